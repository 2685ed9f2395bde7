// StorePass: Cipher error types

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// GCM tag verification failed: the envelope was tampered with, is
    /// corrupted, or was sealed under a different key.
    #[error("ciphertext failed authentication")]
    AuthenticationFailure,

    /// The envelope is structurally invalid: shorter than a nonce plus tag,
    /// not decodable as base64, or not holding a valid plaintext.
    #[error("malformed ciphertext envelope")]
    MalformedEnvelope,

    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("encryption failed: {0}")]
    Encrypt(String),
}
