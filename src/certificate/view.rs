//! Presentation model of a certificate, or of the pending placeholder

use serde::Serialize;

use crate::types::{format_thousands, CertificateRecord};

pub const TITLE: &str = "SECURE DATA ERASURE CERTIFICATE";
pub const SUBTITLE: &str = "Certificate of Compliance";
pub const SIGNATURE: &str = "SecureWiper Auth";
pub const SIGNATORY: &str = "Head of Security";
pub const VERIFY_CAPTION: &str = "Scan to Verify Authenticity";
pub const FOOTER: &str = "Authorized by SecureWiper Systems Pvt Ltd";
pub const CONTACT: &str = "SUPPORT@SECUREWIPER.IO | +91-99999-99999";

pub const PENDING_TITLE: &str = "Document Verification Pending";
pub const PENDING_NOTICE: &str = "The official sanitization certificate will be generated here upon successful completion of the secure wipe protocol.";

/// One labelled row of the certificate table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateRow {
    pub label: &'static str,
    pub value: String,
    /// Digest and path values are set in a fixed-width face
    pub monospace: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateView {
    pub title: String,
    pub subtitle: String,
    pub statement: String,
    pub rows: Vec<CertificateRow>,
    pub signature: String,
    pub signatory: String,
    pub verification_caption: String,
    pub verification_url: String,
    pub footer: String,
    pub contact: String,
    #[serde(skip)]
    record: Option<CertificateRecord>,
}

impl CertificateView {
    pub fn from_record(record: &CertificateRecord) -> Self {
        let row = |label, value: String, monospace| CertificateRow {
            label,
            value,
            monospace,
        };

        Self {
            title: TITLE.into(),
            subtitle: SUBTITLE.into(),
            statement: format!(
                "This certificate confirms that the following file has been securely erased in accordance with {} using {}.",
                record.compliance_standard, record.tool_version
            ),
            rows: vec![
                row("Certificate ID", record.certificate_id.clone(), false),
                row("File Name", record.file_name.clone(), false),
                row("File Path", record.file_path.clone(), true),
                row("File Size", format!("{} bytes", format_thousands(record.file_size_bytes)), false),
                row("Number of Passes", record.pass_count.to_string(), false),
                row("Original Hash", record.pre_wipe_hash.clone(), true),
                row("Final Hash", record.post_wipe_hash.clone(), true),
                row("Status", if record.success { "SUCCESS" } else { "FAILED" }.into(), false),
                row("Date", record.wipe_date(), false),
                row("Compliance", record.compliance_standard.clone(), false),
            ],
            signature: SIGNATURE.into(),
            signatory: SIGNATORY.into(),
            verification_caption: VERIFY_CAPTION.into(),
            verification_url: record.verification_url.clone(),
            footer: FOOTER.into(),
            contact: CONTACT.into(),
            record: Some(record.clone()),
        }
    }

    /// Placeholder shown while no certificate exists
    pub fn pending() -> Self {
        Self {
            title: PENDING_TITLE.into(),
            subtitle: String::new(),
            statement: PENDING_NOTICE.into(),
            rows: Vec::new(),
            signature: String::new(),
            signatory: String::new(),
            verification_caption: String::new(),
            verification_url: String::new(),
            footer: String::new(),
            contact: String::new(),
            record: None,
        }
    }

    pub fn for_record(record: Option<&CertificateRecord>) -> Self {
        record.map_or_else(Self::pending, Self::from_record)
    }

    pub fn is_pending(&self) -> bool {
        self.record.is_none()
    }

    pub fn record(&self) -> Option<&CertificateRecord> {
        self.record.as_ref()
    }

    pub fn certificate_id(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.certificate_id.as_str())
    }

    pub fn row(&self, label: &str) -> Option<&str> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.value.as_str())
    }
}
