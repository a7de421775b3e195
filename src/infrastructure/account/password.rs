//! Password hashing using bcrypt
//!
//! The hash output embeds the work factor and a random salt, so verification
//! needs nothing beyond the stored string. The actual bcrypt work runs on the
//! blocking pool to keep CPU cost off the request dispatch path.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Default bcrypt cost, matching the legacy calibration of 10 rounds
pub const DEFAULT_WORK_FACTOR: u32 = 10;

/// Trait for credential hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a plaintext secret. Fails for the empty secret or when the
    /// transform cannot complete.
    async fn hash(&self, secret: &str) -> Result<String, DomainError>;

    /// Verify a plaintext secret against a stored hash. Any mismatch,
    /// including a malformed stored hash, reads as `false`.
    async fn verify(&self, secret: &str, hash: &str) -> bool;
}

/// Bcrypt-based hasher with a tunable work factor
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    work_factor: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self::with_work_factor(DEFAULT_WORK_FACTOR)
    }

    pub fn with_work_factor(work_factor: u32) -> Self {
        Self { work_factor }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, secret: &str) -> Result<String, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::hashing("cannot hash an empty secret"));
        }

        let secret = secret.to_owned();
        let work_factor = self.work_factor;

        tokio::task::spawn_blocking(move || bcrypt::hash(secret, work_factor))
            .await
            .map_err(|e| DomainError::hashing(format!("hashing task failed: {}", e)))?
            .map_err(|e| DomainError::hashing(format!("failed to hash secret: {}", e)))
    }

    async fn verify(&self, secret: &str, hash: &str) -> bool {
        let secret = secret.to_owned();
        let hash = hash.to_owned();

        match tokio::task::spawn_blocking(move || bcrypt::verify(secret, &hash)).await {
            Ok(Ok(valid)) => valid,
            // Malformed hash or a failed task both read as a mismatch
            _ => false,
        }
    }
}
