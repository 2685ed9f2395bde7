// StorePass: Credential Repository
//
// CRUD over the credentials relation. The ciphertext column never holds
// plaintext: every write seals the password through the cipher layer with a
// fresh nonce, and every read unseals it again. Nothing is cached.

use rusqlite::params;

use crate::cipher::{CipherError, CipherService};

use super::db::Database;
use super::models::Credential;
use super::StoreError;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over credential storage operations.
pub trait CredentialStore {
    /// Encrypt the password and insert a new credential row.
    /// Returns the generated id.
    fn add(
        &self,
        owner_id: i64,
        service: &str,
        username: &str,
        password: &str,
    ) -> Result<i64, StoreError>;

    /// All credentials for the owner, passwords decrypted, in store order.
    /// A row failing the tag check aborts the whole listing; rows are never
    /// silently skipped.
    fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Credential>, StoreError>;

    /// Re-encrypt the password and overwrite the row's fields.
    /// Returns false when no row matched `id`.
    fn update(
        &self,
        id: i64,
        service: &str,
        username: &str,
        password: &str,
    ) -> Result<bool, StoreError>;

    /// Delete a credential by id. Returns false when no row matched.
    fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

// ─── SQLite Implementation ──────────────────────────────────────────────────

pub struct SqliteCredentialStore<'a> {
    db: &'a Database,
    cipher: &'a CipherService,
}

impl<'a> SqliteCredentialStore<'a> {
    pub fn new(db: &'a Database, cipher: &'a CipherService) -> Self {
        Self { db, cipher }
    }

    fn decrypt_password(&self, encoded: &str) -> Result<String, StoreError> {
        let plaintext = self.cipher.decrypt_from_string(encoded)?;
        // The vault only ever seals UTF-8 passwords.
        String::from_utf8(plaintext).map_err(|_| StoreError::Cipher(CipherError::MalformedEnvelope))
    }
}

impl<'a> CredentialStore for SqliteCredentialStore<'a> {
    fn add(
        &self,
        owner_id: i64,
        service: &str,
        username: &str,
        password: &str,
    ) -> Result<i64, StoreError> {
        let ciphertext = self.cipher.encrypt_to_string(password.as_bytes())?;

        self.db.conn().execute(
            "INSERT INTO credentials (owner_id, service, username, ciphertext)
             VALUES (?1, ?2, ?3, ?4)",
            params![owner_id, service, username, ciphertext],
        )?;
        let id = self.db.conn().last_insert_rowid();

        tracing::info!(credential_id = id, owner_id, "credential stored");
        Ok(id)
    }

    fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Credential>, StoreError> {
        let mut stmt = self.db.conn().prepare(
            "SELECT id, owner_id, service, username, ciphertext
             FROM credentials WHERE owner_id = ?1",
        )?;

        let rows = stmt.query_map(params![owner_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut credentials = Vec::new();
        for row in rows {
            let (id, owner_id, service, username, ciphertext) = row?;
            let password = self.decrypt_password(&ciphertext)?;
            credentials.push(Credential::new(id, owner_id, service, username, password));
        }

        Ok(credentials)
    }

    fn update(
        &self,
        id: i64,
        service: &str,
        username: &str,
        password: &str,
    ) -> Result<bool, StoreError> {
        // Fresh nonce on every rewrite.
        let ciphertext = self.cipher.encrypt_to_string(password.as_bytes())?;

        let affected = self.db.conn().execute(
            "UPDATE credentials SET service = ?1, username = ?2, ciphertext = ?3 WHERE id = ?4",
            params![service, username, ciphertext, id],
        )?;

        if affected > 0 {
            tracing::info!(credential_id = id, "credential updated");
        }
        Ok(affected > 0)
    }

    fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self
            .db
            .conn()
            .execute("DELETE FROM credentials WHERE id = ?1", params![id])?;

        if affected > 0 {
            tracing::info!(credential_id = id, "credential deleted");
        }
        Ok(affected > 0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
