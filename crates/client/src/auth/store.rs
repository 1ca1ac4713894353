//! Pluggable token storage
//!
//! The client reads and writes exactly two opaque strings: the access token
//! and the refresh token. Absence of a token is a normal state (`Ok(None)`),
//! never an error; request-path callers degrade to unauthenticated behavior
//! when a backend read fails outright.
//!
//! Backends shipped here: [`MemoryTokenStore`] (tests, short-lived
//! processes) and [`FileTokenStore`] (owner-only JSON document). The OS
//! keychain backend lives in [`crate::auth::keyring`].

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::{Map, Value};
use thiserror::Error;

/// Well-known storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Well-known storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Token storage error types
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// Backend access failed (permission denied, not available, etc.)
    #[error("Storage access failed: {0}")]
    AccessFailed(String),

    /// Stored document could not be parsed or written as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(String),
}

/// Storage seam for the access/refresh token pair.
///
/// Implementations must be safe to call before any network layer exists and
/// must treat missing tokens as `Ok(None)` rather than an error.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the access token, if one is stored.
    ///
    /// # Errors
    /// Returns an error only when the backend itself fails, never for a
    /// missing token.
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Read the refresh token, if one is stored.
    ///
    /// # Errors
    /// Returns an error only when the backend itself fails, never for a
    /// missing token.
    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Overwrite both tokens.
    ///
    /// # Errors
    /// Returns an error if the pair cannot be persisted.
    async fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), TokenStoreError>;

    /// Remove both tokens. Idempotent; subsequent reads return `None`.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the deletion.
    async fn clear_tokens(&self) -> Result<(), TokenStoreError>;

    /// True iff an access token is currently readable.
    async fn is_authenticated(&self) -> bool {
        matches!(self.access_token().await, Ok(Some(_)))
    }
}

/* -------------------------------------------------------------------------- */
/* In-memory backend */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
struct StoredTokens {
    access: String,
    refresh: String,
}

/// Process-local token store. Infallible; the default backend.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<StoredTokens>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.tokens.read().as_ref().map(|t| t.access.clone()))
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.tokens.read().as_ref().map(|t| t.refresh.clone()))
    }

    async fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), TokenStoreError> {
        *self.tokens.write() =
            Some(StoredTokens { access: access.to_string(), refresh: refresh.to_string() });
        Ok(())
    }

    async fn clear_tokens(&self) -> Result<(), TokenStoreError> {
        *self.tokens.write() = None;
        Ok(())
    }
}

/* -------------------------------------------------------------------------- */
/* File backend */
/* -------------------------------------------------------------------------- */

/// Token store backed by a single JSON document on disk.
///
/// The document is an object keyed by [`ACCESS_TOKEN_KEY`] and
/// [`REFRESH_TOKEN_KEY`], the same well-known keys the keychain backend
/// stores under. The file is created with owner-only permissions on Unix. A
/// missing file reads as no tokens; a corrupt file surfaces as a
/// serialization error so the host can decide whether to wipe it.
pub struct FileTokenStore {
    path: PathBuf,
    // Serializes read-modify-write sequences within this process.
    guard: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store over `path`. The file is not touched until the first
    /// write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), guard: Mutex::new(()) }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, TokenStoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(TokenStoreError::Io(err.to_string())),
        };
        serde_json::from_str(&raw).map_err(|err| TokenStoreError::Serialization(err.to_string()))
    }

    fn read_key(&self, key: &str) -> Result<Option<String>, TokenStoreError> {
        let document = self.read_document()?;
        Ok(document.get(key).and_then(Value::as_str).map(|token| token.to_string()))
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| TokenStoreError::Io(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|err| TokenStoreError::Serialization(err.to_string()))?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| TokenStoreError::Io(e.to_string()))?;
        file.write_all(json.as_bytes()).map_err(|e| TokenStoreError::Io(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        let _guard = self.guard.lock();
        self.read_key(ACCESS_TOKEN_KEY)
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        let _guard = self.guard.lock();
        self.read_key(REFRESH_TOKEN_KEY)
    }

    async fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), TokenStoreError> {
        let _guard = self.guard.lock();
        let mut document = Map::new();
        document.insert(ACCESS_TOKEN_KEY.to_string(), Value::String(access.to_string()));
        document.insert(REFRESH_TOKEN_KEY.to_string(), Value::String(refresh.to_string()));
        self.write_document(&document)
    }

    async fn clear_tokens(&self) -> Result<(), TokenStoreError> {
        let _guard = self.guard.lock();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TokenStoreError::Io(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates `MemoryTokenStore` behavior for the token round-trip
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms both getters return exactly the stored values.
    /// - Ensures both getters return `None` after `clear_tokens`.
    #[tokio::test]
    async fn test_memory_round_trip_and_clear() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.access_token().await.unwrap(), None);

        store.set_tokens("access-1", "refresh-1").await.unwrap();
        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("refresh-1"));

        store.clear_tokens().await.unwrap();
        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    /// Validates `set_tokens` behavior for the overwrite scenario.
    ///
    /// Assertions:
    /// - Confirms a second `set_tokens` call replaces both values.
    #[test]
    fn test_memory_set_overwrites_both() {
        tokio_test::block_on(async {
            let store = MemoryTokenStore::new();
            store.set_tokens("a1", "r1").await.unwrap();
            store.set_tokens("a2", "r2").await.unwrap();

            assert_eq!(store.access_token().await.unwrap().as_deref(), Some("a2"));
            assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("r2"));
        });
    }

    /// Validates `is_authenticated` behavior for presence checks.
    ///
    /// Assertions:
    /// - False for an empty store, true once tokens are set, false after
    ///   clearing.
    #[tokio::test]
    async fn test_is_authenticated_tracks_access_token() {
        let store = MemoryTokenStore::new();
        assert!(!store.is_authenticated().await);

        store.set_tokens("access", "refresh").await.unwrap();
        assert!(store.is_authenticated().await);

        store.clear_tokens().await.unwrap();
        assert!(!store.is_authenticated().await);
    }

    /// Validates `FileTokenStore` behavior for the persisted round-trip
    /// scenario.
    ///
    /// Assertions:
    /// - Tokens survive a second store instance over the same path.
    /// - `clear_tokens` removes the backing file.
    #[tokio::test]
    async fn test_file_round_trip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let store = FileTokenStore::new(&path);
        store.set_tokens("access-file", "refresh-file").await.unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.access_token().await.unwrap().as_deref(), Some("access-file"));
        assert_eq!(reopened.refresh_token().await.unwrap().as_deref(), Some("refresh-file"));

        reopened.clear_tokens().await.unwrap();
        assert!(!path.exists());
        assert_eq!(store.access_token().await.unwrap(), None);
    }

    /// Validates that the on-disk document is keyed by the shared
    /// well-known storage keys.
    #[tokio::test]
    async fn test_file_document_uses_well_known_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::new(&path);
        store.set_tokens("access-file", "refresh-file").await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let document: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(document[ACCESS_TOKEN_KEY], "access-file");
        assert_eq!(document[REFRESH_TOKEN_KEY], "refresh-file");
    }

    /// Validates `FileTokenStore` behavior for the missing-file scenario.
    ///
    /// Assertions:
    /// - Reads return `None` and `clear_tokens` succeeds with no file.
    #[tokio::test]
    async fn test_file_missing_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("never-written.json"));

        assert_eq!(store.access_token().await.unwrap(), None);
        assert_eq!(store.refresh_token().await.unwrap(), None);
        store.clear_tokens().await.unwrap();
    }

    /// Validates `FileTokenStore` behavior for the corrupt-document scenario.
    ///
    /// Assertions:
    /// - A non-JSON document surfaces as `TokenStoreError::Serialization`.
    #[tokio::test]
    async fn test_file_corrupt_document_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileTokenStore::new(&path);
        let result = store.access_token().await;
        assert!(matches!(result, Err(TokenStoreError::Serialization(_))));
    }

    /// Validates `FileTokenStore` permissions for the owner-only scenario.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_written_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::new(&path);
        store.set_tokens("a", "r").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
