//! # API crate: remote data client for the admin backend
//!
//! Everything the admin frontend knows about the REST backend lives here.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, bearer credential, JSON and multipart requests, status → [`ApiError`] mapping |
//! | [`endpoints`] | One typed method per backend route, unwrapping the `{success, <collection>}` and `{data}` envelopes |
//! | [`models`] | Entity records (projects, jobs, tickets, ...) and their status enums |
//! | [`error`] | [`ApiError`] |
//!
//! The crate is platform-neutral: `reqwest` uses `fetch` on wasm32 and hyper
//! on native, so the same client runs in the browser and in tests.

pub mod client;
mod de;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::{ApiClient, FilePart, Upload};
pub use endpoints::LoginResponse;
pub use error::ApiError;
pub use models::*;
