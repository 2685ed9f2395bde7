// StorePass: Store error types

use thiserror::Error;

use crate::cipher::CipherError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Constraint violation or I/O failure in the underlying database.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("username already registered: {0}")]
    DuplicateUsername(String),

    /// Cipher failures pass through unchanged so tampering stays visible.
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("password hash error: {0}")]
    PasswordHash(String),
}
