// StorePass: User Repository
//
// Registration and authentication over the users relation. The stored
// credential_secret is a salted Argon2id hash in PHC string form; the login
// password itself is never written to the database.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rusqlite::{params, OptionalExtension};

use super::db::Database;
use super::models::User;
use super::StoreError;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over user registration and authentication.
pub trait UserStore {
    /// Register a new user. Fails with `DuplicateUsername` when the name is
    /// taken. Returns the generated user id.
    fn register(&self, username: &str, password: &str) -> Result<i64, StoreError>;

    /// Check a username/password pair against the stored hash.
    fn authenticate(&self, username: &str, password: &str) -> Result<bool, StoreError>;

    /// Look up a user id by username.
    fn id_for(&self, username: &str) -> Result<Option<i64>, StoreError>;
}

// ─── SQLite Implementation ──────────────────────────────────────────────────

pub struct SqliteUserStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteUserStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .db
            .conn()
            .query_row(
                "SELECT id, username, credential_secret FROM users WHERE username = ?1",
                params![username],
                |row| Ok(User::new(row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        Ok(user)
    }

    /// Burn the same Argon2 work as a real verification, so a missing
    /// username costs the same as a wrong password.
    fn phantom_verify(password: &str) {
        if let Ok(salt) = SaltString::encode_b64(b"storepass.phantom.salt") {
            let _ = Argon2::default().hash_password(password.as_bytes(), &salt);
        }
    }
}

impl<'a> UserStore for SqliteUserStore<'a> {
    fn register(&self, username: &str, password: &str) -> Result<i64, StoreError> {
        // Safe without a transaction under the single-writer model.
        if self.find_by_username(username)?.is_some() {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let secret = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?
            .to_string();

        self.db.conn().execute(
            "INSERT INTO users (username, credential_secret) VALUES (?1, ?2)",
            params![username, secret],
        )?;
        let id = self.db.conn().last_insert_rowid();

        tracing::info!(user_id = id, "user registered");
        Ok(id)
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        let user = match self.find_by_username(username)? {
            Some(user) => user,
            None => {
                Self::phantom_verify(password);
                return Ok(false);
            }
        };

        let hash = PasswordHash::new(user.credential_secret())
            .map_err(|e| StoreError::PasswordHash(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(StoreError::PasswordHash(e.to_string())),
        }
    }

    fn id_for(&self, username: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.find_by_username(username)?.map(|user| user.id))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
