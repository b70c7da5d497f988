//! `localStorage`-backed session store
//!
//! Storage may be missing entirely (sandboxed iframes, some private browsing
//! modes) or reject writes (quota). Both surface as [`StorageError`] so the
//! auth policy can fall back to a logged-out session.

use hrms_common::session::SessionStore;
use hrms_common::StorageError;
use wasm_bindgen::JsValue;

pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            leptos::logging::warn!("localStorage unavailable, sessions will not survive a reload");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

impl SessionStore for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(|e| access_error(key, e))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| access_error(key, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|e| access_error(key, e))
    }
}

fn access_error(key: &str, err: JsValue) -> StorageError {
    StorageError::Access {
        key: key.to_string(),
        message: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    }
}
