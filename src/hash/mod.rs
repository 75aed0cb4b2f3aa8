//! Hashing subsystem for the sanitization simulator
//! Provides content fingerprints for the pre-wipe and post-wipe certificate hashes

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::HashError;

pub mod handler;

pub use handler::{hash_bytes, HashDigester};

/// Supported hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
    Blake2b,
    Blake3,
}

impl HashAlgorithm {
    /// Name as printed in log lines and on the certificate
    pub fn label(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha512 => "SHA-512",
            HashAlgorithm::Blake2b => "BLAKE2b-512",
            HashAlgorithm::Blake3 => "BLAKE3",
        }
    }

    /// Length of the hex digest
    pub fn hex_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 | HashAlgorithm::Blake3 => 64,
            HashAlgorithm::Sha512 | HashAlgorithm::Blake2b => 128,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Blake2b => "blake2b",
            HashAlgorithm::Blake3 => "blake3",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "blake2b" | "blake2b512" => Ok(HashAlgorithm::Blake2b),
            "blake3" => Ok(HashAlgorithm::Blake3),
            other => Err(HashError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Content digest collaborator
///
/// Implementations must be deterministic: the same input always yields the same
/// hex string. Any failure is reported as a [`HashError`].
pub trait Digester: Send + Sync {
    fn algorithm(&self) -> HashAlgorithm;

    fn digest(&self, bytes: &[u8]) -> Result<String, HashError>;
}
