//! bcrypt implementation of the [`PasswordHasher`] port.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash, TraceId};

/// Work factor used for new hashes.
pub const BCRYPT_COST: u32 = 10;

/// Hashes passwords with bcrypt on Tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Hasher using [`BCRYPT_COST`].
    #[must_use]
    pub const fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Hasher with an explicit cost; tests use the bcrypt minimum.
    #[must_use]
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let plaintext = Zeroizing::new(password.expose().to_owned());
        let cost = self.cost;
        let trace_id = TraceId::current();

        let encoded = tokio::task::spawn_blocking(move || {
            let _span = tracing::debug_span!("bcrypt_hash", trace_id = ?trace_id).entered();
            bcrypt::hash(plaintext.as_str(), cost)
        })
        .await
        .map_err(|err| PasswordHasherError::hash(format!("hashing task failed: {err}")))?
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?;

        Ok(PasswordHash::new(encoded))
    }
}
