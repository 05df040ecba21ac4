pub mod config;
pub mod local;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod browser;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use browser::BrowserStore;

pub use config::AdminConfig;
pub use local::{LocalStore, THEME_KEY, TOKEN_KEY};
