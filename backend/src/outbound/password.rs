//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings, so parameters travel with each hash and
//! can be raised later without invalidating existing accounts. Hashing is
//! CPU bound; both operations run on the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash as PhcHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] backed by the `argon2` crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create the hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &[u8]) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password, &salt)
        .map(|phc| PasswordHash::new(phc.to_string()))
        .map_err(|err| PasswordHashError::hash(err.to_string()))
}

fn verify_blocking(password: &[u8], stored: &str) -> Result<bool, PasswordHashError> {
    let parsed =
        PhcHash::new(stored).map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
    match Argon2::default().verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::hash(err.to_string())),
    }
}

fn join_error(err: &tokio::task::JoinError) -> PasswordHashError {
    PasswordHashError::hash(format!("hashing task failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(|err| join_error(&err))?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.as_bytes().to_vec());
        let stored = hash.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &stored))
            .await
            .map_err(|err| join_error(&err))?
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn hash_then_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("hunter22").await.expect("hashes");

        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("hunter22", &hash).await.expect("verifies"));
        assert!(!hasher.verify("hunter23", &hash).await.expect("verifies"));
    }

    #[rstest]
    #[tokio::test]
    async fn same_password_gets_fresh_salt() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("hunter22").await.expect("hashes");
        let second = hasher.hash("hunter22").await.expect("hashes");

        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn garbage_hash_is_malformed() {
        let err = Argon2PasswordHasher::new()
            .verify("hunter22", &PasswordHash::new("plaintext"))
            .await
            .expect_err("malformed");

        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
