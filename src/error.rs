// StorePass: Top-level error types
//
// Aggregates errors from the enclave, cipher, and store modules into a
// single error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all StorePass operations.
#[derive(Debug, Error)]
pub enum StorePassError {
    #[error("enclave error: {0}")]
    Enclave(#[from] crate::enclave::EnclaveError),

    #[error("cipher error: {0}")]
    Cipher(#[from] crate::cipher::CipherError),

    #[error("store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StorePassError>;
