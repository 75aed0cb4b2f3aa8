//! Run status and the certificate record produced by a successful run

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::config::PassCount;
use crate::hash::HashAlgorithm;

/// Lifecycle of a sanitization run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStatus::Idle => "IDLE",
            RunStatus::Running => "WIPING",
            RunStatus::Completed => "COMPLETED",
            RunStatus::Failed => "FAILED",
        };
        write!(f, "{}", name)
    }
}

/// Immutable attestation issued once per successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub certificate_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size_bytes: u64,
    pub pass_count: PassCount,
    pub pre_wipe_hash: String,
    pub post_wipe_hash: String,
    pub hash_algorithm: HashAlgorithm,
    pub wipe_timestamp: DateTime<FixedOffset>,
    pub success: bool,
    pub tool_version: String,
    pub compliance_standard: String,
    pub verification_url: String,
}

impl CertificateRecord {
    /// Date as printed on the certificate, `dd/mm/YYYY, HH:MM:SS`
    pub fn wipe_date(&self) -> String {
        self.wipe_timestamp.format("%d/%m/%Y, %H:%M:%S").to_string()
    }
}
