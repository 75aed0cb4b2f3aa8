use std::sync::Arc;

use securewiper::telemetry::{Emphasis, TelemetryLog};
use securewiper::{AppConfig, InstantPacer, PassCount, Session, Severity};

use crate::fixtures::{self, RewindingClock};

#[test]
fn test_severity_presentation_mapping() {
    assert_eq!(Severity::Error.style().prefix, ">> ERR: ");
    assert!(Severity::Error.style().uppercase);
    assert_eq!(Severity::Error.style().emphasis, Emphasis::Heavy);
    assert_eq!(Severity::Success.style().emphasis, Emphasis::Bold);
    assert_eq!(Severity::Warning.style().emphasis, Emphasis::Bold);
    assert_eq!(Severity::Info.style().emphasis, Emphasis::Regular);
    assert_eq!(Severity::Info.style().prefix, "");
}

#[test]
fn test_log_with_rewinding_clock_stays_ordered() {
    let mut log = TelemetryLog::new(Arc::new(RewindingClock::new()));
    for i in 0..5 {
        log.append(format!("entry {}", i), Severity::Info);
    }
    let stamps: Vec<_> = log.entries().iter().map(|e| e.timestamp.clone()).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]), "{:?}", stamps);
}

#[tokio::test]
async fn test_run_timestamps_non_decreasing_with_rewinding_clock() {
    let mut session = Session::builder(AppConfig::default())
        .clock(Arc::new(RewindingClock::new()))
        .pacer(Arc::new(InstantPacer))
        .seed(fixtures::SEED)
        .build()
        .unwrap();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.set_pass_count(PassCount::Three).unwrap();
    session.start_run().await.unwrap();

    let stamps: Vec<_> = session.log().iter().map(|e| e.timestamp.as_str()).collect();
    assert_eq!(stamps.len(), 18);
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_log_entries_serialize() {
    let mut log = TelemetryLog::new(fixtures::fixed_clock());
    let entry = log.append("Fingerprint: abc...", Severity::Success);
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["severity"], "success");
    assert_eq!(json["timestamp"], "14:05:09");
}
