// StorePass: Enclave error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnclaveError {
    /// The platform keystore could not be opened, read, or written.
    /// Fatal to all cipher operations within the session.
    #[error("keystore unavailable: {0}")]
    KeyStoreUnavailable(String),

    #[error("vault key has wrong length: {0} bytes, expected {1}")]
    InvalidKeyLength(usize, usize),
}
