//! Assembles the certificate record issued at the end of a successful run

use chrono::{DateTime, FixedOffset};

use crate::config::{PassCount, ProductConfig};
use crate::hash::HashAlgorithm;
use crate::types::{CertificateRecord, TargetMetadata};

/// Everything a run contributes to its certificate
#[derive(Debug, Clone)]
pub struct CertificateInputs {
    pub target: TargetMetadata,
    pub pass_count: PassCount,
    pub pre_wipe_hash: String,
    pub post_wipe_hash: String,
    pub hash_algorithm: HashAlgorithm,
    pub certificate_id: String,
    pub wipe_timestamp: DateTime<FixedOffset>,
}

/// Builds the record; pure
pub fn build(inputs: CertificateInputs, product: &ProductConfig) -> CertificateRecord {
    let tier = inputs.pass_count.tier();
    CertificateRecord {
        file_path: format!("{}{}", product.volume_path_prefix, inputs.target.name),
        verification_url: format!("{}{}", product.verification_base_url, inputs.certificate_id),
        certificate_id: inputs.certificate_id,
        file_name: inputs.target.name,
        file_size_bytes: inputs.target.size_bytes,
        pass_count: inputs.pass_count,
        pre_wipe_hash: inputs.pre_wipe_hash,
        post_wipe_hash: inputs.post_wipe_hash,
        hash_algorithm: inputs.hash_algorithm,
        wipe_timestamp: inputs.wipe_timestamp,
        success: true,
        tool_version: product.tool_version.clone(),
        compliance_standard: tier.standard().to_string(),
    }
}
