// StorePass: CLI Module
//
// Command-line interface using clap derive macros. This layer is
// presentation glue over the vault's core operations; it holds no
// cryptography or SQL of its own.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::execute;

/// StorePass: a local encrypted credential vault.
#[derive(Parser, Debug)]
#[command(name = "storepass")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new vault user.
    Register {
        /// The username to register.
        #[arg(long)]
        username: String,

        /// The login password. Stored only as a salted hash.
        #[arg(long)]
        password: String,
    },

    /// Check a username/password pair against the vault.
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Store a new service credential for a user.
    Add {
        /// The owning vault user.
        #[arg(long)]
        user: String,

        /// The service this credential belongs to (e.g. "mail", "github").
        #[arg(long)]
        service: String,

        /// The login name at the service.
        #[arg(long)]
        username: String,

        /// The service password. Encrypted before it reaches the database.
        #[arg(long)]
        password: String,
    },

    /// List a user's stored credentials.
    List {
        /// The owning vault user.
        #[arg(long)]
        user: String,

        /// Print decrypted passwords instead of masking them.
        #[arg(long, default_value = "false")]
        reveal: bool,
    },

    /// Overwrite a stored credential's service, username, and password.
    Update {
        /// The id of the credential to rewrite.
        id: i64,

        #[arg(long)]
        service: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Delete a credential by id.
    Delete {
        /// The id of the credential to remove.
        id: i64,
    },
}
