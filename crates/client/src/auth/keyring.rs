//! OS keychain token store
//!
//! Persists the token pair in the platform credential store: Keychain
//! Access on macOS, Credential Manager on Windows, Secret Service on Linux.
//! Each token is one entry under a caller-chosen service name.

use async_trait::async_trait;
use keyring::Entry;
use tracing::debug;

use super::store::{TokenStore, TokenStoreError, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

/// Token store backed by the platform keychain.
pub struct KeyringTokenStore {
    service_name: String,
}

impl KeyringTokenStore {
    /// Create a store under `service_name` (e.g. `"ClubFlow"`).
    ///
    /// Hosts embedding several environments should vary the service name
    /// per environment so tokens never cross over.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    fn entry(&self, key: &str) -> Result<Entry, TokenStoreError> {
        Entry::new(&self.service_name, key).map_err(|e| {
            TokenStoreError::AccessFailed(format!("failed to create keychain entry: {e}"))
        })
    }

    fn read(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        let entry = self.entry(key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(TokenStoreError::AccessFailed(format!(
                "failed to retrieve {key} from keychain: {e}"
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), TokenStoreError> {
        let entry = self.entry(key)?;
        entry.set_password(value).map_err(|e| {
            TokenStoreError::AccessFailed(format!("failed to store {key} in keychain: {e}"))
        })
    }

    fn delete(&self, key: &str) -> Result<(), TokenStoreError> {
        let entry = self.entry(key)?;
        if let Err(e) = entry.delete_credential() {
            if !matches!(e, keyring::Error::NoEntry) {
                return Err(TokenStoreError::AccessFailed(format!(
                    "failed to delete {key} from keychain: {e}"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStore for KeyringTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        self.read(ACCESS_TOKEN_KEY)
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        self.read(REFRESH_TOKEN_KEY)
    }

    async fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), TokenStoreError> {
        debug!(service = %self.service_name, "storing token pair in keychain");
        self.write(ACCESS_TOKEN_KEY, access)?;
        self.write(REFRESH_TOKEN_KEY, refresh)
    }

    async fn clear_tokens(&self) -> Result<(), TokenStoreError> {
        debug!(service = %self.service_name, "clearing token pair from keychain");
        self.delete(ACCESS_TOKEN_KEY)?;
        self.delete(REFRESH_TOKEN_KEY)
    }
}
