use argon2::{
    password_hash::{self, rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("invalid password")]
    InvalidPassword,

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a password for storage. Argon2 is CPU-bound, so the work runs on
/// a blocking thread.
pub async fn hash(password: String) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    tokio::task::spawn_blocking(move || {
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| PasswordError::Hash(e.to_string()))?
}

/// Verify a password against a stored hash.
pub async fn verify(password: String, hash: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&hash).map_err(|e| PasswordError::Hash(e.to_string()))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|err| match err {
                password_hash::Error::Password => PasswordError::InvalidPassword,
                other => PasswordError::Hash(other.to_string()),
            })
    })
    .await
    .map_err(|e| PasswordError::Hash(e.to_string()))?
}
