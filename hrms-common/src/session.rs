//! Session persistence
//!
//! A session is two string entries in a key-value store: the serialized
//! [`Identity`] under [`IDENTITY_KEY`] and the bearer token under
//! [`TOKEN_KEY`]. Backends only need single-key atomicity.

use crate::auth::Identity;
use crate::error::StorageError;
use std::collections::HashMap;
use tracing::warn;

/// Key holding the serialized identity (`{"username": .., "role": ..}`)
pub const IDENTITY_KEY: &str = "user";

/// Key holding the bearer token issued at login
pub const TOKEN_KEY: &str = "token";

/// Synchronous key-value storage that survives reloads
pub trait SessionStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store, used by tests and as a fallback when no persistent
/// backend exists
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding, handy for simulating a previous page load
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

pub fn encode_identity(identity: &Identity) -> Result<String, StorageError> {
    serde_json::to_string(identity).map_err(|e| StorageError::Encoding(e.to_string()))
}

/// Parse a persisted identity entry. Corrupt data yields `None`.
pub fn decode_identity(raw: &str) -> Option<Identity> {
    match serde_json::from_str(raw) {
        Ok(identity) => Some(identity),
        Err(e) => {
            warn!(error = %e, "discarding unreadable persisted identity");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    #[test]
    fn test_memory_store_roundtrip_and_remove() {
        let mut store = MemoryStore::new();
        store.write(IDENTITY_KEY, "x").unwrap();
        assert_eq!(store.read(IDENTITY_KEY).unwrap().as_deref(), Some("x"));

        store.remove(IDENTITY_KEY).unwrap();
        assert_eq!(store.read(IDENTITY_KEY).unwrap(), None);
        // removing a missing key is not an error
        store.remove(IDENTITY_KEY).unwrap();
    }

    #[test]
    fn test_decode_identity_accepts_persisted_shape() {
        let identity = decode_identity(r#"{"username":"hr1","role":"HR"}"#).unwrap();
        assert_eq!(identity, Identity::new("hr1", Role::Hr));
    }

    #[test]
    fn test_decode_identity_rejects_corrupt_data() {
        assert!(decode_identity("").is_none());
        assert!(decode_identity("{not json").is_none());
        assert!(decode_identity(r#"{"username":"x"}"#).is_none());
        assert!(decode_identity(r#"{"username":"x","role":"Owner"}"#).is_none());
        assert!(decode_identity("null").is_none());
    }

    #[test]
    fn test_encode_then_decode_identity() {
        let identity = Identity::new("management", Role::Management);
        let raw = encode_identity(&identity).unwrap();
        assert_eq!(decode_identity(&raw), Some(identity));
    }
}
