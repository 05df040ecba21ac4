//! # `localStorage`-backed store: browser-side persistence
//!
//! [`BrowserStore`] is the [`LocalStore`] used on the web platform. It is a
//! zero-size handle that looks up `window.localStorage` on every call, so it is
//! `Copy` and can be captured freely by event handlers.
//!
//! ## Error handling
//!
//! Storage can be unavailable (private browsing, disabled cookies, quota). All
//! methods degrade silently: reads return `None`, writes are dropped with a
//! `warn!`. The only consequence is that the user has to log in again on the
//! next page load.

use crate::local::LocalStore;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl BrowserStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl LocalStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            tracing::warn!("localStorage unavailable, dropping write to {key}");
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("localStorage rejected write to {key}");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}
