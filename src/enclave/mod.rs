// StorePass: Enclave Module
//
// Platform-isolated storage for the vault key. Key bytes live in the OS
// keyring (Keychain / Credential Manager / Secret Service) and reach the
// rest of the crate only as opaque handles.

mod error;
mod provider;

pub use error::EnclaveError;
pub use provider::{KeyHandle, KeyVault, KeyringVault};

#[cfg(test)]
pub use provider::mock::MemoryVault;
