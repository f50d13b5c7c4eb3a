//! `window.sessionStorage` as a [`SessionStore`].

use conversion_core::{ConversionError, ConversionResult};
use conversion_session::SessionStore;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::host;

pub struct WebSessionStore {
    storage: Storage,
}

impl WebSessionStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The session storage of the current window.
    pub fn from_window() -> ConversionResult<Self> {
        let storage = host::window()?
            .session_storage()
            .map_err(store_error)?
            .ok_or_else(|| ConversionError::Store("sessionStorage unavailable".to_string()))?;
        Ok(Self::new(storage))
    }
}

impl SessionStore for WebSessionStore {
    fn get(&self, key: &str) -> ConversionResult<Option<String>> {
        self.storage.get_item(key).map_err(store_error)
    }

    fn set(&self, key: &str, value: &str) -> ConversionResult<()> {
        self.storage.set_item(key, value).map_err(store_error)
    }

    fn remove(&self, key: &str) -> ConversionResult<()> {
        self.storage.remove_item(key).map_err(store_error)
    }

    fn clear(&self) -> ConversionResult<()> {
        self.storage.clear().map_err(store_error)
    }
}

fn store_error(err: JsValue) -> ConversionError {
    ConversionError::Store(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
