// StorePass: Store Module
//
// Relational schema and CRUD for the two vault relations. Service passwords
// are sealed through the cipher layer before they reach a row; user login
// secrets are stored as salted Argon2id hashes.

mod credentials;
mod db;
mod error;
mod models;
mod users;

pub use credentials::{CredentialStore, SqliteCredentialStore};
pub use db::Database;
pub use error::StoreError;
pub use models::{Credential, User};
pub use users::{SqliteUserStore, UserStore};
