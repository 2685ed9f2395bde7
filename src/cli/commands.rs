// StorePass: CLI Command Handlers
//
// Each function handles one subcommand, translating vault results into
// user-facing messages. The core never formats its own output.

use std::path::PathBuf;

use crate::enclave::KeyringVault;
use crate::error::StorePassError;
use crate::store::{CredentialStore, UserStore};
use crate::vault::{Vault, KEY_ALIAS};

use super::Commands;

/// Default directory for StorePass data files.
fn data_dir() -> PathBuf {
    let base = dirs_next::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("storepass")
}

/// Path to the vault database file.
fn db_path() -> PathBuf {
    data_dir().join("storepass.db")
}

/// Execute the parsed CLI command.
pub fn execute(command: Commands) -> Result<(), StorePassError> {
    match command {
        Commands::Register { username, password } => cmd_register(username, password),
        Commands::Login { username, password } => cmd_login(username, password),
        Commands::Add {
            user,
            service,
            username,
            password,
        } => cmd_add(user, service, username, password),
        Commands::List { user, reveal } => cmd_list(user, reveal),
        Commands::Update {
            id,
            service,
            username,
            password,
        } => cmd_update(id, service, username, password),
        Commands::Delete { id } => cmd_delete(id),
    }
}

// ─── Users ───────────────────────────────────────────────────────────────────

fn cmd_register(username: String, password: String) -> Result<(), StorePassError> {
    let vault = open_vault()?;
    let id = vault.users().register(&username, &password)?;

    println!("✓ User registered");
    println!("  id:       {}", id);
    println!("  username: {}", username);

    Ok(())
}

fn cmd_login(username: String, password: String) -> Result<(), StorePassError> {
    let vault = open_vault()?;

    if vault.users().authenticate(&username, &password)? {
        println!("✓ Credentials accepted");
    } else {
        println!("✗ Invalid username or password");
    }

    Ok(())
}

// ─── Credentials ─────────────────────────────────────────────────────────────

fn cmd_add(
    user: String,
    service: String,
    username: String,
    password: String,
) -> Result<(), StorePassError> {
    let vault = open_vault()?;
    let owner = owner_id(&vault, &user)?;

    let id = vault.credentials().add(owner, &service, &username, &password)?;

    println!("✓ Credential stored");
    println!("  id:      {}", id);
    println!("  service: {}", service);

    Ok(())
}

fn cmd_list(user: String, reveal: bool) -> Result<(), StorePassError> {
    let vault = open_vault()?;
    let owner = owner_id(&vault, &user)?;

    let credentials = vault.credentials().list_by_owner(owner)?;

    if credentials.is_empty() {
        println!("No credentials stored for {}.", user);
        return Ok(());
    }

    println!("Credentials for {} ({}):\n", user, credentials.len());
    for credential in &credentials {
        let password = if reveal { credential.password() } else { "********" };
        println!(
            "  {:>4} │ {:16} │ {:16} │ {}",
            credential.id, credential.service, credential.username, password,
        );
    }

    Ok(())
}

fn cmd_update(
    id: i64,
    service: String,
    username: String,
    password: String,
) -> Result<(), StorePassError> {
    let vault = open_vault()?;

    if vault.credentials().update(id, &service, &username, &password)? {
        println!("✓ Credential {} updated", id);
    } else {
        println!("Credential not found: {}", id);
    }

    Ok(())
}

fn cmd_delete(id: i64) -> Result<(), StorePassError> {
    let vault = open_vault()?;

    if vault.credentials().delete(id)? {
        println!("✓ Credential {} deleted", id);
    } else {
        println!("Credential not found: {}", id);
    }

    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Open the vault, creating the data directory, the key, and the schema on
/// first use.
fn open_vault() -> Result<Vault, StorePassError> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    let keys = KeyringVault::new();
    Vault::open(&db_path(), &keys, KEY_ALIAS)
}

fn owner_id(vault: &Vault, user: &str) -> Result<i64, StorePassError> {
    vault
        .users()
        .id_for(user)?
        .ok_or_else(|| StorePassError::Other(format!("unknown user: {}", user)))
}
