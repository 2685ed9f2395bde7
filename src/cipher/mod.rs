// StorePass: Cipher Module
//
// Owns the on-disk ciphertext framing format and performs all authenticated
// encryption and decryption for the credential store.

mod error;
mod service;

pub use error::CipherError;
pub use service::{CipherService, MIN_ENVELOPE_LEN, NONCE_LEN, TAG_LEN};
