// StorePass: Data models
//
// SECURITY: the secret-bearing fields are intentionally private. They are
// never included in Debug output or log messages; access goes through
// explicit getter methods.

use std::fmt;

/// A registered vault user.
pub struct User {
    pub id: i64,
    pub username: String,
    /// Salted Argon2id hash of the login password, never the password itself.
    credential_secret: String,
}

impl User {
    pub(crate) fn new(id: i64, username: String, credential_secret: String) -> Self {
        Self {
            id,
            username,
            credential_secret,
        }
    }

    /// The stored password hash, for verification only.
    pub(crate) fn credential_secret(&self) -> &str {
        &self.credential_secret
    }
}

/// Custom Debug implementation that never reveals the stored hash.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("credential_secret", &"[REDACTED]")
            .finish()
    }
}

/// A stored service login, with its password decrypted.
/// The `password` field is private; access only via `password()`.
pub struct Credential {
    pub id: i64,
    pub owner_id: i64,
    pub service: String,
    pub username: String,
    /// The decrypted service password, never printed or Debug-displayed.
    password: String,
}

impl Credential {
    pub fn new(id: i64, owner_id: i64, service: String, username: String, password: String) -> Self {
        Self {
            id,
            owner_id,
            service,
            username,
            password,
        }
    }

    /// Access the decrypted password.
    /// Callers must not log or persist the returned value.
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Custom Debug implementation that never reveals the password.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("owner_id", &self.owner_id)
            .field("service", &self.service)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Human-readable summary without the password.
impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.service, self.username)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
