//! Password hashing

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use thiserror::Error;
use tokio::task::{self, JoinError};

/// Error raised while hashing a password
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The hasher rejected the input or parameters
    #[error("Failed to hash password: {0}")]
    Hash(String),

    /// The blocking hash task panicked or was cancelled
    #[error("Password hashing task failed: {0}")]
    Task(#[from] JoinError),
}

/// Hash a plaintext password with Argon2 and a fresh random salt
///
/// Runs on the blocking pool so slow hashes do not stall other requests.
/// The result is a PHC string; hashing the same plaintext twice never
/// yields the same string.
pub async fn hash_password(plaintext: String) -> Result<String, PasswordError> {
    task::spawn_blocking(move || hash_blocking(&plaintext)).await?
}

fn hash_blocking(plaintext: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}
