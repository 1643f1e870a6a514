use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hashes `plain` into an Argon2id PHC string.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!("hash password: {}", e)
        })
}

/// Constant-time check of `plain` against a stored digest.
/// A malformed digest is an error, a mismatch is `Ok(false)`.
pub fn verify_password(plain: &str, digest: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(digest).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!("parse stored password hash: {}", e)
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_digest_is_not_plaintext() {
        let digest = hash_password("admin123").expect("hashing should succeed");
        assert!(!digest.contains("admin123"));
        assert!(digest.starts_with("$argon2"));
    }

    #[test]
    fn verifies_right_and_rejects_wrong() {
        let digest = hash_password("correct-horse").expect("hashing should succeed");
        assert!(verify_password("correct-horse", &digest).unwrap());
        assert!(!verify_password("Correct-horse", &digest).unwrap());
    }

    #[test]
    fn malformed_digest_is_an_error() {
        assert!(verify_password("anything", "plaintext-not-a-hash").is_err());
    }
}
