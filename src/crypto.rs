use anyhow::{Result, anyhow};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::{TryRngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

use crate::config::PasswordScheme;

const ARGON2_PREFIX: &str = "$argon2";

/// Hashes a password for storage in the credential file.
pub fn hash_password(password: &str, scheme: PasswordScheme) -> Result<String> {
    match scheme {
        PasswordScheme::Sha256 => Ok(sha256_hex(password)),
        PasswordScheme::Argon2 => argon2_phc(password),
    }
}

/// Checks a password against a stored hash of either format.
pub fn verify_password(password: &str, stored: &str) -> bool {
    if stored.starts_with(ARGON2_PREFIX) {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                log::warn!("Stored Argon2 hash is malformed: {}", e);
                false
            }
        }
    } else {
        sha256_hex(password).eq_ignore_ascii_case(stored)
    }
}

fn sha256_hex(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn argon2_phc(password: &str) -> Result<String> {
    let salt = SaltString::encode_b64(&generate_salt()?)
        .map_err(|e| anyhow!("Failed to encode salt: {}", e))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Failed to hash password using Argon2id: {}", e))?;
    Ok(hash.to_string())
}

fn generate_salt() -> Result<[u8; 16]> {
    let mut salt = [0u8; 16];
    OsRng.try_fill_bytes(&mut salt)?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_digest() {
        let hash = hash_password("password", PasswordScheme::Sha256).unwrap();
        assert_eq!(
            hash,
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_sha256_verify() {
        let hash = hash_password("s3cret", PasswordScheme::Sha256).unwrap();
        assert!(verify_password("s3cret", &hash));
        assert!(verify_password("s3cret", &hash.to_uppercase()));
        assert!(!verify_password("S3cret", &hash));
    }

    #[test]
    fn test_argon2_verify() {
        let hash = hash_password("s3cret", PasswordScheme::Argon2).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_argon2_salted() {
        let a = hash_password("same", PasswordScheme::Argon2).unwrap();
        let b = hash_password("same", PasswordScheme::Argon2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_argon2_rejected() {
        assert!(!verify_password("anything", "$argon2id$garbage"));
    }
}
