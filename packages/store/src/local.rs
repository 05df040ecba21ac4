//! # Client-local key/value persistence
//!
//! The admin client keeps exactly two things across page loads: the bearer
//! credential returned by `/auth/login` and the light/dark theme preference.
//! Both live behind [`LocalStore`], a synchronous string key/value interface
//! mirroring the browser's `localStorage`.
//!
//! | Implementation | Where |
//! |----------------|-------|
//! | [`crate::MemoryStore`] | native builds and tests |
//! | `BrowserStore` | wasm32 with the `web` feature, backed by `window.localStorage` |
//!
//! The provided methods on the trait (`token`, `set_token`, `clear_token`,
//! `theme`, `set_theme`) are the only keys the application touches.

/// Storage key holding the bearer credential.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the theme preference (`"light"` or `"dark"`).
pub const THEME_KEY: &str = "theme";

/// Synchronous string key/value storage.
pub trait LocalStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// The stored bearer credential, if any. Blank values count as absent.
    fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    fn set_token(&self, token: &str) {
        self.set(TOKEN_KEY, token);
    }

    fn clear_token(&self) {
        self.remove(TOKEN_KEY);
    }

    fn theme(&self) -> Option<String> {
        self.get(THEME_KEY)
    }

    fn set_theme(&self, theme: &str) {
        self.set(THEME_KEY, theme);
    }
}
