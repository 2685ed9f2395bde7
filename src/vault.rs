// StorePass: Vault Context
//
// Wires the key vault, cipher, and database into one context object built
// once at startup. Repositories borrow from it; there is no global state.

use std::path::Path;

use crate::cipher::CipherService;
use crate::enclave::KeyVault;
use crate::error::StorePassError;
use crate::store::{Database, SqliteCredentialStore, SqliteUserStore};

/// Alias under which the vault key is stored in the platform keystore.
pub const KEY_ALIAS: &str = "storepass-vault-key";

/// The opened credential vault.
pub struct Vault {
    db: Database,
    cipher: CipherService,
}

impl Vault {
    /// Open the vault: fetch or create the key under `alias`, bind the
    /// cipher to it, then open the database and apply the schema.
    pub fn open(path: &Path, keys: &dyn KeyVault, alias: &str) -> Result<Self, StorePassError> {
        let key = keys.get_or_create_key(alias)?;
        let cipher = CipherService::new(key)?;
        let db = Database::open(path)?;
        Ok(Self { db, cipher })
    }

    /// Open a vault over an in-memory database (for testing only).
    #[cfg(test)]
    pub fn open_in_memory(keys: &dyn KeyVault, alias: &str) -> Result<Self, StorePassError> {
        let key = keys.get_or_create_key(alias)?;
        let cipher = CipherService::new(key)?;
        let db = Database::open_in_memory()?;
        Ok(Self { db, cipher })
    }

    /// Repository over the users relation.
    pub fn users(&self) -> SqliteUserStore<'_> {
        SqliteUserStore::new(&self.db)
    }

    /// Repository over the credentials relation.
    pub fn credentials(&self) -> SqliteCredentialStore<'_> {
        SqliteCredentialStore::new(&self.db, &self.cipher)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crate::enclave::MemoryVault;
    use crate::store::{CredentialStore, UserStore};

    use super::*;

    #[test]
    fn test_end_to_end_through_the_context() {
        let keys = MemoryVault::new();
        let vault = Vault::open_in_memory(&keys, KEY_ALIAS).unwrap();

        let uid = vault.users().register("alice", "login-pw").unwrap();
        assert!(vault.users().authenticate("alice", "login-pw").unwrap());
        assert_eq!(vault.users().id_for("alice").unwrap(), Some(uid));

        let id = vault
            .credentials()
            .add(uid, "mail", "alice@x", "mail-pw")
            .unwrap();

        let listed = vault.credentials().list_by_owner(uid).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].password(), "mail-pw");

        assert!(vault.credentials().update(id, "mail", "alice@x", "new-pw").unwrap());
        assert!(vault.credentials().delete(id).unwrap());
    }

    #[test]
    fn test_key_is_stable_across_reopen() {
        let keys = MemoryVault::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.db");

        let uid = {
            let vault = Vault::open(&path, &keys, KEY_ALIAS).unwrap();
            let uid = vault.users().register("alice", "pw").unwrap();
            vault
                .credentials()
                .add(uid, "mail", "alice@x", "sealed-pw")
                .unwrap();
            uid
        };

        // A second open must fetch the same key and still decrypt.
        let vault = Vault::open(&path, &keys, KEY_ALIAS).unwrap();
        let listed = vault.credentials().list_by_owner(uid).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].password(), "sealed-pw");
    }
}
