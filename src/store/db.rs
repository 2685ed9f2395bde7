// StorePass: Database Management
//
// Opens the SQLite database and applies the relational schema on first open.
// Passwords are sealed at the column level before insertion, so the file
// itself is plain SQLite.

use std::path::Path;

use rusqlite::Connection;

use super::StoreError;

/// Current schema version, recorded in `PRAGMA user_version`.
const SCHEMA_VERSION: i32 = 1;

/// Wrapper around the SQLite connection holding the two vault relations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path and apply the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.configure()?;
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing only).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.configure()?;
        db.run_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn configure(&self) -> Result<(), StoreError> {
        // owner_id integrity depends on FK enforcement, which SQLite
        // leaves off by default
        self.conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    }

    /// Run schema migrations to create or update tables.
    ///
    /// On a version change the baseline behavior is destructive: both
    /// relations are dropped and recreated, losing all rows.
    fn run_migrations(&self) -> Result<(), StoreError> {
        let version: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version == SCHEMA_VERSION {
            return Ok(());
        }

        if version != 0 {
            tracing::warn!(
                from = version,
                to = SCHEMA_VERSION,
                "schema version changed, dropping and recreating all tables"
            );
            self.conn.execute_batch(
                "DROP TABLE IF EXISTS credentials;
                 DROP TABLE IF EXISTS users;",
            )?;
        }

        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                username          TEXT NOT NULL UNIQUE CHECK (length(username) > 0),
                credential_secret TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS credentials (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id   INTEGER NOT NULL REFERENCES users(id),
                service    TEXT NOT NULL CHECK (length(service) > 0),
                username   TEXT NOT NULL CHECK (length(username) > 0),
                ciphertext TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_credentials_owner
                ON credentials(owner_id);
            ",
        )?;
        self.conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        tracing::debug!("database migrations completed");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn table_count(db: &Database, name: &str) -> i64 {
        db.conn()
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_open_in_memory_succeeds() {
        let db = Database::open_in_memory();
        assert!(db.is_ok(), "Should be able to open an in-memory database");
    }

    #[test]
    fn test_schema_migration_creates_tables() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(table_count(&db, "users"), 1, "users table should exist");
        assert_eq!(
            table_count(&db, "credentials"),
            1,
            "credentials table should exist"
        );
    }

    #[test]
    fn test_schema_migration_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        assert!(
            db.run_migrations().is_ok(),
            "Migrations should be idempotent"
        );
        assert_eq!(table_count(&db, "users"), 1);
    }

    #[test]
    fn test_open_on_disk_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.db");

        {
            let db = Database::open(&path).unwrap();
            db.conn()
                .execute(
                    "INSERT INTO users (username, credential_secret) VALUES ('alice', 'h')",
                    [],
                )
                .unwrap();
        }

        let db = Database::open(&path).unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT count(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "Rows must survive a reopen at the same version");
    }

    #[test]
    fn test_version_change_drops_all_rows() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO users (username, credential_secret) VALUES ('alice', 'h')",
                [],
            )
            .unwrap();

        // Simulate a database stamped with a different schema version.
        db.conn()
            .pragma_update(None, "user_version", SCHEMA_VERSION + 1)
            .unwrap();
        db.run_migrations().unwrap();

        let count: i64 = db
            .conn()
            .query_row("SELECT count(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "A version change rebuilds the schema from scratch");
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let db = Database::open_in_memory().unwrap();
        let result = db.conn().execute(
            "INSERT INTO credentials (owner_id, service, username, ciphertext)
             VALUES (999, 'mail', 'bob', 'AAAA')",
            [],
        );
        assert!(result.is_err(), "Inserting with an unknown owner must fail");
    }

    #[test]
    fn test_empty_username_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let result = db.conn().execute(
            "INSERT INTO users (username, credential_secret) VALUES ('', 'h')",
            [],
        );
        assert!(result.is_err(), "Empty usernames violate the schema");
    }
}
