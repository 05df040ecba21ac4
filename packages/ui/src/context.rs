//! Shared client constructors for all platforms.
//!
//! [`local_store`] returns the platform's [`store::LocalStore`]:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::BrowserStore`]
//! - **Native**: a process-wide [`store::MemoryStore`]
//!
//! [`Api`] builds an [`ApiClient`] on demand so the bearer credential is read at
//! request time, not when the component rendered. It is `Copy`, so event
//! handlers and spawned tasks can capture it freely.
//!
//! [`use_admin_provider`] installs the app-wide contexts once at the root.

use api::ApiClient;
use dioxus::prelude::*;
use store::{AdminConfig, LocalStore};

use crate::notice::Notices;

/// App-wide configuration, provided once at the root.
#[derive(Clone, Debug, PartialEq)]
pub struct AdminContext {
    pub config: AdminConfig,
}

/// Handle for issuing backend requests from components.
#[derive(Clone, Copy, PartialEq)]
pub struct Api {
    base_url: CopyValue<String>,
}

impl Api {
    /// Must be called inside the Dioxus runtime; the value belongs to the
    /// current scope.
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            base_url: CopyValue::new(config.api.base_url.clone()),
        }
    }

    /// A client carrying whatever credential is stored right now.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.cloned()).with_token(local_store().token())
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn local_store() -> impl LocalStore + Clone + 'static {
    store::BrowserStore::new()
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub fn local_store() -> impl LocalStore + Clone + 'static {
    use std::sync::OnceLock;

    static STORE: OnceLock<store::MemoryStore> = OnceLock::new();
    STORE.get_or_init(store::MemoryStore::new).clone()
}

pub fn use_config() -> AdminConfig {
    use_context::<AdminContext>().config
}

pub fn use_api() -> Api {
    use_context::<Api>()
}

/// Provide configuration, the backend handle and the notice stack.
pub fn use_admin_provider(config: impl FnOnce() -> AdminConfig) {
    let config = use_hook(|| {
        let config = config();
        tracing::info!("Using backend at {}", config.api.base_url);
        config
    });
    use_context_provider(|| Api::new(&config));
    use_context_provider(|| AdminContext { config });
    use_context_provider(|| Signal::new(Notices::default()));
}
