//! Digest computation backed by the sha2, blake2 and blake3 crates

use blake2::Blake2b512;
use sha2::{Digest as ShaDigest, Sha256, Sha512};
use tracing::debug;

use super::{Digester, HashAlgorithm};
use crate::error::HashError;

/// Hashes a byte slice into a lower-case hex digest
pub fn hash_bytes(data: &[u8], algo: HashAlgorithm) -> String {
    match algo {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(data);
            hex::encode(hasher.finalize())
        }
        HashAlgorithm::Sha512 => {
            let mut hasher = Sha512::new();
            hasher.update(data);
            hex::encode(hasher.finalize())
        }
        HashAlgorithm::Blake2b => {
            let mut hasher = Blake2b512::new();
            hasher.update(data);
            hex::encode(hasher.finalize())
        }
        HashAlgorithm::Blake3 => blake3::hash(data).to_hex().to_string(),
    }
}

/// Default digest collaborator
#[derive(Debug, Clone, Copy)]
pub struct HashDigester {
    algorithm: HashAlgorithm,
}

impl HashDigester {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }
}

impl Default for HashDigester {
    fn default() -> Self {
        Self::new(HashAlgorithm::Sha256)
    }
}

impl Digester for HashDigester {
    fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    fn digest(&self, bytes: &[u8]) -> Result<String, HashError> {
        debug!(algorithm = %self.algorithm, len = bytes.len(), "computing digest");
        Ok(hash_bytes(bytes, self.algorithm))
    }
}
