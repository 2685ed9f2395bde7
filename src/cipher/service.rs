// StorePass: Authenticated Encryption
//
// AES-256-GCM with a fresh random 96-bit nonce per encryption. Envelope
// framing: nonce (12 bytes) || ciphertext with appended 16-byte tag,
// base64-encoded when stored in a text column.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::enclave::KeyHandle;

use super::CipherError;

/// Nonce length in bytes (96-bit GCM IV).
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes (128-bit).
pub const TAG_LEN: usize = 16;

/// Shortest well-formed envelope: a nonce plus the tag of an empty plaintext.
pub const MIN_ENVELOPE_LEN: usize = NONCE_LEN + TAG_LEN;

/// Authenticated encryption bound to one vault key.
///
/// Consumes the key handle at construction; only the AES key schedule is
/// retained and the handle's raw bytes are zeroized on drop.
pub struct CipherService {
    cipher: Aes256Gcm,
}

impl CipherService {
    pub fn new(key: KeyHandle) -> Result<Self, CipherError> {
        let cipher =
            Aes256Gcm::new_from_slice(key.material()).map_err(|_| CipherError::InvalidKeyLength {
                expected: 32,
                got: key.material().len(),
            })?;
        Ok(Self { cipher })
    }

    /// Encrypt `plaintext` under the vault key.
    ///
    /// A fresh random nonce is generated on every call; callers can never
    /// supply one, so nonce reuse under this key cannot happen.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| CipherError::Encrypt(e.to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(nonce.as_slice());
        envelope.extend_from_slice(&ciphertext);
        Ok(envelope)
    }

    /// Decrypt an envelope produced by `encrypt`.
    ///
    /// Fails with `MalformedEnvelope` when the input is shorter than a nonce
    /// plus tag, and with `AuthenticationFailure` when the tag check fails.
    /// The two are never conflated.
    pub fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>, CipherError> {
        if envelope.len() < MIN_ENVELOPE_LEN {
            return Err(CipherError::MalformedEnvelope);
        }

        let (nonce, ciphertext) = envelope.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::AuthenticationFailure)
    }

    /// Encrypt and base64-encode, for storage in a text column.
    pub fn encrypt_to_string(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        Ok(BASE64.encode(self.encrypt(plaintext)?))
    }

    /// Decode base64 and decrypt. Undecodable input is a malformed envelope,
    /// not an authentication failure.
    pub fn decrypt_from_string(&self, encoded: &str) -> Result<Vec<u8>, CipherError> {
        let envelope = BASE64
            .decode(encoded)
            .map_err(|_| CipherError::MalformedEnvelope)?;
        self.decrypt(&envelope)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
