//! Password digests.
//!
//! Stored credentials are unsalted lowercase-hex SHA-256 digests unless the
//! operator opts into Argon2. Verification looks at the stored value, so
//! databases holding both kinds keep working.

use crate::error::StorageError;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt::Write;

const PHC_PREFIX: &str = "$argon2";

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Sha256,
    Argon2,
}

impl PasswordScheme {
    /// Produce the value stored in `users.password` for a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if Argon2 hashing fails.
    pub fn digest(self, password: &str) -> Result<String, StorageError> {
        match self {
            PasswordScheme::Sha256 => Ok(sha256_hex(password)),
            PasswordScheme::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| StorageError::Digest(e.to_string()))
            }
        }
    }
}

/// Check `password` against a stored digest of either scheme.
#[must_use]
pub fn verify(password: &str, stored: &str) -> bool {
    if stored.starts_with(PHC_PREFIX) {
        let Ok(parsed) = PasswordHash::new(stored) else {
            tracing::warn!("Stored Argon2 hash could not be parsed");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    } else {
        sha256_hex(password) == stored
    }
}

fn sha256_hex(password: &str) -> String {
    Sha256::digest(password.as_bytes())
        .iter()
        .fold(String::with_capacity(64), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_known_digest() {
        assert_eq!(
            PasswordScheme::Sha256.digest("password").unwrap(),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn identical_passwords_share_a_sha256_digest() {
        let a = PasswordScheme::Sha256.digest("hunter2").unwrap();
        let b = PasswordScheme::Sha256.digest("hunter2").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn argon2_digests_are_salted_and_verify() {
        let a = PasswordScheme::Argon2.digest("hunter2").unwrap();
        let b = PasswordScheme::Argon2.digest("hunter2").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with(PHC_PREFIX));
        assert!(verify("hunter2", &a));
        assert!(!verify("hunter3", &a));
    }

    #[test]
    fn verify_accepts_legacy_digest() {
        let stored = PasswordScheme::Sha256.digest("s3cret").unwrap();
        assert!(verify("s3cret", &stored));
        assert!(!verify("S3cret", &stored));
    }
}
