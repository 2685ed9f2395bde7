// StorePass: Vault Key Provider
//
// Manages the lifecycle of the symmetric key that seals stored passwords.
// The key is generated once, kept in the platform keyring, and handed out
// only as an opaque KeyHandle. Raw key bytes never cross the public API.

use std::fmt;

use rand::RngCore;
use zeroize::Zeroizing;

use super::EnclaveError;

// ─── Constants ───────────────────────────────────────────────────────────────

/// Service name identifying StorePass entries in the platform keyring.
const KEYRING_SERVICE: &str = "storepass";

/// Length of the vault key in bytes (256-bit, AES-256).
const VAULT_KEY_LEN: usize = 32;

// ─── Key Handle ──────────────────────────────────────────────────────────────

/// Opaque handle to a vault key.
///
/// The material is zeroized on drop and readable only by the cipher layer,
/// through a crate-internal accessor.
pub struct KeyHandle {
    alias: String,
    material: Zeroizing<Vec<u8>>,
}

impl KeyHandle {
    pub(crate) fn new(alias: &str, material: Zeroizing<Vec<u8>>) -> Result<Self, EnclaveError> {
        if material.len() != VAULT_KEY_LEN {
            return Err(EnclaveError::InvalidKeyLength(material.len(), VAULT_KEY_LEN));
        }
        Ok(Self {
            alias: alias.to_string(),
            material,
        })
    }

    /// The alias this key is stored under.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Raw key bytes. Crate-internal; consumed by the cipher layer only.
    pub(crate) fn material(&self) -> &[u8] {
        self.material.as_slice()
    }
}

/// Custom Debug implementation that never reveals the key material.
impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("alias", &self.alias)
            .field("material", &"[REDACTED]")
            .finish()
    }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over isolated key storage, enabling platform-specific backends
/// and in-memory implementations for testing.
pub trait KeyVault {
    /// Fetch the key stored under `alias`.
    /// On first call, generates a fresh 256-bit key and stores it under
    /// `alias`; subsequent calls return the existing key, never regenerating.
    fn get_or_create_key(&self, alias: &str) -> Result<KeyHandle, EnclaveError>;

    /// Check whether a key exists under `alias`.
    fn has_key(&self, alias: &str) -> Result<bool, EnclaveError>;

    /// Delete the key stored under `alias`.
    /// WARNING: every envelope sealed under this key becomes irrecoverable.
    fn delete_key(&self, alias: &str) -> Result<(), EnclaveError>;
}

// ─── Platform Implementation ─────────────────────────────────────────────────

/// Production implementation using the `keyring` crate.
/// Dispatches to:
///   - Linux: D-Bus Secret Service (GNOME Keyring / KDE Wallet)
///   - macOS: Security.framework Keychain
///   - Windows: Windows Credential Manager
pub struct KeyringVault {
    service: String,
}

impl KeyringVault {
    pub fn new() -> Self {
        Self {
            service: KEYRING_SERVICE.to_string(),
        }
    }

    /// Creates a vault with a custom service name (useful for testing isolation).
    #[allow(dead_code)]
    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, alias: &str) -> Result<keyring::Entry, EnclaveError> {
        keyring::Entry::new(&self.service, alias).map_err(|e| {
            EnclaveError::KeyStoreUnavailable(format!("failed to open keyring entry: {}", e))
        })
    }

    /// Generate a cryptographically secure random vault key.
    fn generate_key() -> Zeroizing<Vec<u8>> {
        let mut key = Zeroizing::new(vec![0u8; VAULT_KEY_LEN]);
        rand::rng().fill_bytes(&mut key);
        key
    }
}

impl Default for KeyringVault {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyVault for KeyringVault {
    fn get_or_create_key(&self, alias: &str) -> Result<KeyHandle, EnclaveError> {
        let entry = self.entry(alias)?;

        match entry.get_secret() {
            Ok(secret) => {
                tracing::debug!(alias, "retrieved existing vault key from keyring");
                KeyHandle::new(alias, Zeroizing::new(secret))
            }
            Err(keyring::Error::NoEntry) => {
                tracing::info!(alias, "no vault key found, generating a new one");
                let key = Self::generate_key();
                entry.set_secret(&key).map_err(|e| {
                    EnclaveError::KeyStoreUnavailable(format!("failed to store vault key: {}", e))
                })?;
                tracing::info!(alias, "vault key stored in platform keyring");
                KeyHandle::new(alias, key)
            }
            Err(e) => Err(EnclaveError::KeyStoreUnavailable(format!(
                "failed to retrieve vault key: {}",
                e
            ))),
        }
    }

    fn has_key(&self, alias: &str) -> Result<bool, EnclaveError> {
        let entry = self.entry(alias)?;
        match entry.get_secret() {
            Ok(_) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(EnclaveError::KeyStoreUnavailable(format!(
                "failed to check vault key: {}",
                e
            ))),
        }
    }

    fn delete_key(&self, alias: &str) -> Result<(), EnclaveError> {
        let entry = self.entry(alias)?;
        match entry.delete_credential() {
            Ok(()) => {
                tracing::warn!(alias, "vault key deleted, sealed data is now irrecoverable");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                tracing::debug!(alias, "no vault key to delete");
                Ok(())
            }
            Err(e) => Err(EnclaveError::KeyStoreUnavailable(format!(
                "failed to delete vault key: {}",
                e
            ))),
        }
    }
}

// ─── In-Memory Mock for Testing ──────────────────────────────────────────────

/// A mock vault that keeps keys in memory.
/// Used in tests so we never touch the real platform keyring.
#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    pub struct MemoryVault {
        keys: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemoryVault {
        pub fn new() -> Self {
            Self {
                keys: Mutex::new(HashMap::new()),
            }
        }
    }

    impl KeyVault for MemoryVault {
        fn get_or_create_key(&self, alias: &str) -> Result<KeyHandle, EnclaveError> {
            let mut guard = self.keys.lock().unwrap();
            let material = guard.entry(alias.to_string()).or_insert_with(|| {
                let mut key = vec![0u8; VAULT_KEY_LEN];
                rand::rng().fill_bytes(&mut key);
                key
            });
            KeyHandle::new(alias, Zeroizing::new(material.clone()))
        }

        fn has_key(&self, alias: &str) -> Result<bool, EnclaveError> {
            let guard = self.keys.lock().unwrap();
            Ok(guard.contains_key(alias))
        }

        fn delete_key(&self, alias: &str) -> Result<(), EnclaveError> {
            let mut guard = self.keys.lock().unwrap();
            guard.remove(alias);
            Ok(())
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::mock::MemoryVault;
    use super::*;

    #[test]
    fn test_generated_key_has_correct_length() {
        let vault = MemoryVault::new();
        let key = vault.get_or_create_key("test-key").unwrap();
        assert_eq!(
            key.material().len(),
            VAULT_KEY_LEN,
            "Vault key must be exactly {} bytes (256-bit)",
            VAULT_KEY_LEN
        );
    }

    #[test]
    fn test_key_is_stable_once_created() {
        let vault = MemoryVault::new();
        let first = vault.get_or_create_key("test-key").unwrap();
        let second = vault.get_or_create_key("test-key").unwrap();
        assert_eq!(
            first.material(),
            second.material(),
            "Subsequent calls must return the same key, never regenerate"
        );
    }

    #[test]
    fn test_distinct_aliases_get_distinct_keys() {
        let vault = MemoryVault::new();
        let a = vault.get_or_create_key("alias-a").unwrap();
        let b = vault.get_or_create_key("alias-b").unwrap();
        assert_ne!(a.material(), b.material());
    }

    #[test]
    fn test_handle_reports_alias() {
        let vault = MemoryVault::new();
        let key = vault.get_or_create_key("my-alias").unwrap();
        assert_eq!(key.alias(), "my-alias");
    }

    #[test]
    fn test_has_key() {
        let vault = MemoryVault::new();
        assert!(!vault.has_key("test-key").unwrap());

        vault.get_or_create_key("test-key").unwrap();
        assert!(vault.has_key("test-key").unwrap());
    }

    #[test]
    fn test_delete_key() {
        let vault = MemoryVault::new();
        vault.get_or_create_key("test-key").unwrap();
        assert!(vault.has_key("test-key").unwrap());

        vault.delete_key("test-key").unwrap();
        assert!(!vault.has_key("test-key").unwrap());
    }

    #[test]
    fn test_delete_nonexistent_key_is_ok() {
        let vault = MemoryVault::new();
        assert!(vault.delete_key("test-key").is_ok());
    }

    #[test]
    fn test_handle_debug_redacts_material() {
        let handle =
            KeyHandle::new("test-key", Zeroizing::new(vec![0x41u8; VAULT_KEY_LEN])).unwrap();
        let debug_output = format!("{:?}", handle);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output must contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("65"),
            "Debug output must never contain key bytes"
        );
    }

    #[test]
    fn test_handle_rejects_wrong_length() {
        let result = KeyHandle::new("short", Zeroizing::new(vec![0u8; 16]));
        assert!(matches!(
            result,
            Err(EnclaveError::InvalidKeyLength(16, VAULT_KEY_LEN))
        ));
    }
}
