use std::sync::Arc;

use securewiper::certificate::CertificateFormat;
use securewiper::{CertificateFormatter, ExportOutcome, RunStatus, Severity};

use crate::fixtures::{self, FailingRasterizer, RecordingPrinter};

#[tokio::test]
async fn test_export_writes_pdf_and_keeps_state() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.start_run().await.unwrap();
    let record = session.certificate().unwrap().clone();

    let outcome = session.export_certificate().unwrap();

    let document = outcome.document().unwrap();
    assert_eq!(
        document.file_name,
        format!("SecureWiper_Certificate_{}.pdf", record.certificate_id)
    );
    assert!(document.bytes.starts_with(b"%PDF-"));

    let dir = tempfile::tempdir().unwrap();
    let path = document.write_to(dir.path()).await.unwrap();
    assert!(path.ends_with(&document.file_name));
    let loaded = lopdf::Document::load(&path).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);

    assert_eq!(session.status(), RunStatus::Completed);
    assert_eq!(session.certificate(), Some(&record));

    let tail: Vec<_> = session.log().iter().rev().take(2).map(|e| e.message.as_str()).collect();
    assert_eq!(
        tail,
        vec!["Document successfully exported to local storage.", "Synthesizing PDF document..."]
    );
    assert_eq!(session.metrics().counters.get("exports_completed"), Some(&1));
}

#[tokio::test]
async fn test_rasterization_failure_falls_back_to_print() {
    let printer = Arc::new(RecordingPrinter::default());
    let mut session = fixtures::builder(printer.clone())
        .rasterizer(Arc::new(FailingRasterizer))
        .build()
        .unwrap();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.start_run().await.unwrap();
    let record = session.certificate().unwrap().clone();

    let outcome = session.export_certificate().unwrap();

    match outcome {
        ExportOutcome::PrintFallback { reason, printed } => {
            assert!(reason.contains("canvas context lost"));
            assert!(printed);
        }
        other => panic!("expected print fallback, got {:?}", other),
    }
    assert_eq!(printer.titles(), vec!["SECURE DATA ERASURE CERTIFICATE".to_string()]);
    assert_eq!(session.status(), RunStatus::Completed);
    assert_eq!(session.certificate(), Some(&record));

    let last = session.log().last().unwrap();
    assert_eq!(last.severity, Severity::Error);
    assert_eq!(last.message, "PDF Generation failed. Redirecting to print fallback.");

    // Export stays available after a fallback.
    assert!(session.can_export());
}

#[tokio::test]
async fn test_export_unavailable_after_failed_run() {
    let mut session = fixtures::builder(Arc::default())
        .digester(Arc::new(crate::fixtures::FailingDigester))
        .build()
        .unwrap();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.start_run().await.unwrap();

    assert!(session.export_certificate().is_err());
}

#[tokio::test]
async fn test_reports_in_every_format() {
    let mut session = fixtures::session();
    session.select_target(fixtures::secret_docx()).unwrap();
    session.start_run().await.unwrap();
    let view = session.view();
    let id = view.certificate_id().unwrap().to_string();

    for format in [
        CertificateFormat::PlainText,
        CertificateFormat::Markdown,
        CertificateFormat::Html,
        CertificateFormat::Json,
    ] {
        let report = CertificateFormatter::format(&view, format).unwrap();
        assert!(report.contains(&id), "{} report lacks the certificate id", format);
    }

    let text = CertificateFormatter::format(&view, CertificateFormat::PlainText).unwrap();
    assert!(text.contains("2,048 bytes"));
    assert!(text.contains("16/10/2026, 14:05:09"));
    assert!(text.contains("Head of Security"));
}
