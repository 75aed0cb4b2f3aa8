use std::sync::Arc;

use securewiper::telemetry::{ProgressState, DEFAULT_SECTOR_LABEL};
use securewiper::{
    Error, HashAlgorithm, HashDigester, Digester, PassCount, RunStatus, Severity, TargetFile, TelemetryEvent,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::fixtures::{self, FailingDigester, RecordingPrinter};

fn drain(rx: &mut UnboundedReceiver<TelemetryEvent>) -> Vec<TelemetryEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn phase_entries(session: &securewiper::Session) -> usize {
    session
        .log()
        .iter()
        .filter(|e| e.message.starts_with("Pass ") && e.message.contains(" | Phase: "))
        .count()
}

#[tokio::test]
async fn test_secret_docx_three_passes() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::Three).unwrap();

    let status = session.start_run().await.unwrap();

    assert_eq!(status, RunStatus::Completed);
    assert_eq!(phase_entries(&session), 12);
    assert_eq!(session.progress().percent_complete, 100);

    let record = session.certificate().unwrap();
    assert_eq!(record.file_name, "secret.docx");
    assert_eq!(record.file_size_bytes, 2048);
    assert_eq!(record.pass_count, PassCount::Three);
    assert_eq!(record.compliance_standard, "NIST SP 800-88 Rev. 1 Clear");
    assert_eq!(record.file_path, "/volumes/secure_raid/partition_0/secure_vault/secret.docx");
    assert!(record.certificate_id.starts_with("SWC-20261016-"));
    assert_eq!(record.verification_url, format!("https://verify.securewiper.io/v/{}", record.certificate_id));
    assert!(record.success);

    let expected = HashDigester::new(HashAlgorithm::Sha256)
        .digest(&fixtures::secret_docx().read_bytes().await.unwrap())
        .unwrap();
    assert_eq!(record.pre_wipe_hash, expected);
    assert_eq!(record.post_wipe_hash.len(), 64);
    assert!(session.can_export());
}

#[tokio::test]
async fn test_log_sequence_for_one_pass() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::One).unwrap();
    session.start_run().await.unwrap();

    let log: Vec<_> = session
        .log()
        .iter()
        .map(|e| (e.severity, e.message.clone()))
        .collect();
    let id = session.certificate().unwrap().certificate_id.clone();
    let fingerprint = &session.certificate().unwrap().pre_wipe_hash[..32];

    assert_eq!(
        log,
        vec![
            (Severity::Warning, "PROTOCOL INITIATED: NIST SP 800-88 REV 1 CLEAR".to_string()),
            (Severity::Info, "Calculating pre-wipe SHA-256 fingerprint...".to_string()),
            (Severity::Success, format!("Fingerprint: {}...", fingerprint)),
            (Severity::Info, "Pass 1/1 | Phase: Binary Zero Fill".to_string()),
            (Severity::Info, "Pass 1/1 | Phase: Inverse Byte Fill".to_string()),
            (Severity::Info, "Pass 1/1 | Phase: PRNG Random Pulse".to_string()),
            (Severity::Info, "Pass 1/1 | Phase: Bit-Level Verification".to_string()),
            (Severity::Warning, "Finalizing hardware synchronization...".to_string()),
            (Severity::Success, "Data destruction verified. Storage space reclaimed.".to_string()),
            (Severity::Success, format!("CERTIFICATE ISSUED: {}", id)),
        ]
    );
}

#[tokio::test]
async fn test_every_pass_count_emits_expected_entries() {
    for passes in PassCount::ALL {
        let mut session = fixtures::session();
        session.select_target(fixtures::secret_docx()).unwrap();
        session.set_pass_count(passes).unwrap();
        let mut rx = session.subscribe();

        assert_eq!(session.start_run().await.unwrap(), RunStatus::Completed);

        let p = passes.get() as usize;
        assert_eq!(phase_entries(&session), 4 * p, "passes = {}", p);
        assert_eq!(session.log().len(), 4 * p + 6, "passes = {}", p);
        assert_eq!(session.certificate().unwrap().pass_count, passes);

        // Progress never regresses and only reaches 100 once the run is complete.
        let mut completed = false;
        let mut last = 0;
        for event in drain(&mut rx) {
            match event {
                TelemetryEvent::StatusChanged(RunStatus::Completed) => completed = true,
                TelemetryEvent::ProgressChanged(ProgressState { percent_complete, .. }) => {
                    if percent_complete == 0 && last == 0 {
                        continue;
                    }
                    assert!(percent_complete >= last, "{} after {}", percent_complete, last);
                    assert_eq!(percent_complete == 100, completed);
                    last = percent_complete;
                }
                _ => {}
            }
        }
        assert_eq!(last, 100);
    }
}

#[tokio::test]
async fn test_gutmann_tier_for_35_passes() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::ThirtyFive).unwrap();
    session.start_run().await.unwrap();

    assert_eq!(
        session.log()[0].message,
        "PROTOCOL INITIATED: GUTMANN 35-PASS PURGE"
    );
    assert_eq!(
        session.certificate().unwrap().compliance_standard,
        "Gutmann Method (35-Pass)"
    );
    assert_eq!(phase_entries(&session), 140);
}

#[tokio::test]
async fn test_dod_tier_for_7_passes() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::Seven).unwrap();
    session.start_run().await.unwrap();
    assert_eq!(session.certificate().unwrap().compliance_standard, "DoD 5220.22-M");
}

#[tokio::test]
async fn test_start_without_target_is_disabled() {
    let mut session = fixtures::session();
    session.set_pass_count(PassCount::Seven).unwrap();
    let mut rx = session.subscribe();

    assert!(!session.can_start());
    let result = session.start_run().await;

    assert!(matches!(result, Err(Error::StartDisabled(_))));
    assert_eq!(session.status(), RunStatus::Idle);
    assert!(session.log().is_empty());
    assert!(session.certificate().is_none());
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_digest_failure_ends_in_failed() {
    let mut session = fixtures::builder(Arc::default())
        .digester(Arc::new(FailingDigester))
        .build()
        .unwrap();
    session.select_target(fixtures::secret_docx()).unwrap();

    let status = session.start_run().await.unwrap();

    assert_eq!(status, RunStatus::Failed);
    assert!(session.certificate().is_none());
    assert!(!session.can_export());
    let last = session.log().last().unwrap();
    assert_eq!(last.severity, Severity::Error);
    assert!(last.message.starts_with("CRITICAL FAILURE: "));
    assert!(last.message.contains("secure enclave unavailable"));
    assert_ne!(session.progress().percent_complete, 100);
    assert_eq!(session.metrics().counters.get("runs_failed"), Some(&1));

    // A failed run can be retried or reset.
    assert!(session.can_start());
}

#[tokio::test]
async fn test_unreadable_target_ends_in_failed() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"classified").unwrap();
    let target = TargetFile::from_path(file.path()).await.unwrap();
    drop(file);

    let mut session = fixtures::session();
    session.select_target(target).unwrap();
    let status = session.start_run().await.unwrap();

    assert_eq!(status, RunStatus::Failed);
    assert!(session.certificate().is_none());
    assert!(session
        .log()
        .last()
        .unwrap()
        .message
        .starts_with("CRITICAL FAILURE: I/O error"));
}

#[tokio::test]
async fn test_reset_is_idempotent() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.start_run().await.unwrap();

    session.reset().unwrap();
    let first = (
        session.status(),
        session.target().is_none(),
        session.certificate().is_none(),
        session.log().to_vec(),
        session.progress().clone(),
    );
    session.reset().unwrap();
    let second = (
        session.status(),
        session.target().is_none(),
        session.certificate().is_none(),
        session.log().to_vec(),
        session.progress().clone(),
    );

    assert_eq!(first, second);
    assert_eq!(first.0, RunStatus::Idle);
    assert!(first.1 && first.2 && first.3.is_empty());
    assert_eq!(first.4.current_sector_label, DEFAULT_SECTOR_LABEL);
    assert_eq!(first.4.percent_complete, 0);
}

#[tokio::test]
async fn test_selecting_target_discards_certificate() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.start_run().await.unwrap();
    assert!(session.certificate().is_some());

    session
        .select_target(TargetFile::from_bytes("ledger.xlsx", vec![1; 10]))
        .unwrap();

    assert!(session.certificate().is_none());
    assert!(!session.can_export());
    assert_eq!(session.log().last().unwrap().message.split(" | ").count(), 2);
}

#[tokio::test]
async fn test_selecting_target_clears_previous_run_log() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::One).unwrap();
    session.start_run().await.unwrap();
    assert_eq!(session.log().len(), 10);

    let mut rx = session.subscribe();
    session
        .select_target(TargetFile::from_bytes("ledger.xlsx", vec![1; 10]))
        .unwrap();

    let messages: Vec<_> = session.log().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "File loaded: ledger.xlsx");
    assert!(messages[1].starts_with("Metadata: 0.01 KB | "), "{}", messages[1]);
    assert!(!messages.iter().any(|m| m.starts_with("PROTOCOL INITIATED")));

    let events = drain(&mut rx);
    let cleared = events
        .iter()
        .position(|e| matches!(e, TelemetryEvent::LogCleared))
        .expect("log cleared event");
    let first_append = events
        .iter()
        .position(|e| matches!(e, TelemetryEvent::LogAppended(_)))
        .expect("log appended event");
    assert!(cleared < first_append);
}

#[tokio::test]
async fn test_second_run_supersedes_record() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::One).unwrap();
    session.start_run().await.unwrap();
    let first = session.certificate().unwrap().clone();

    session.set_pass_count(PassCount::Seven).unwrap();
    session.start_run().await.unwrap();
    let second = session.certificate().unwrap();

    assert_eq!(second.pass_count, PassCount::Seven);
    assert_eq!(first.pre_wipe_hash, second.pre_wipe_hash);
    assert_eq!(session.metrics().counters.get("runs_completed"), Some(&2));
}

#[tokio::test]
async fn test_seeded_runs_are_reproducible() {
    async fn run_once() -> (String, Vec<String>) {
        let mut session = fixtures::session();
        session.select_target(fixtures::secret_docx()).unwrap();
        session.set_pass_count(PassCount::One).unwrap();
        let mut rx = session.subscribe();
        session.start_run().await.unwrap();

        let sectors = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                TelemetryEvent::ProgressChanged(p) => Some(p.current_sector_label),
                _ => None,
            })
            .collect();
        (session.certificate().unwrap().certificate_id.clone(), sectors)
    }

    let (id_a, sectors_a) = run_once().await;
    let (id_b, sectors_b) = run_once().await;
    assert_eq!(id_a, id_b);
    assert_eq!(sectors_a, sectors_b);
    assert!(sectors_a.iter().any(|s| s.starts_with("0xRND")));
    assert!(sectors_a.iter().any(|s| s.starts_with("0xVER")));
}

#[tokio::test]
async fn test_print_without_record_shows_pending_view() {
    let printer = Arc::new(RecordingPrinter::default());
    let session = fixtures::builder(printer.clone()).build().unwrap();

    session.print().unwrap();

    assert_eq!(printer.titles(), vec!["Document Verification Pending".to_string()]);
}
