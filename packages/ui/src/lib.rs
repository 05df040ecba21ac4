//! This crate contains all shared UI for the admin client.
//!
//! Components live next to the plain-Rust state they render, so the state
//! machines (`SearchState`, `FormController`, `ListState`, `Session`) can be
//! tested without a renderer.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const ADMIN_CSS: Asset = asset!("/assets/admin.css");

mod context;
pub use context::{local_store, use_admin_provider, use_api, use_config, AdminContext, Api};

mod timer;
pub use timer::{now_iso, now_millis, sleep};

pub mod search;
pub use search::{ClientSearch, DebounceSlot, Dropdown, SearchPhase, SearchState};

pub mod form;
pub use form::{Draft, FormController, RepeatableField, ValidationError};

pub mod drafts;
pub use drafts::{
    invoice_file, HasStatus, InvoiceUpload, InvoiceUploadDraft, JobDraft, LoginDraft, ModuleDraft,
    ModuleUpdateDraft, ProjectDraft, StatusDraft,
};

pub mod list;
pub use list::{ListState, PendingConfirm};

mod auth;
pub use auth::{
    expire_on_unauthorized, sign_in, sign_out, use_auth, AuthBackend, AuthProvider,
    Authenticator, Gate, LogoutButton, Session,
};

mod theme;
pub use theme::{apply_theme, toggle_theme, use_theme, Theme, ThemeProvider, ThemeToggle};

pub mod notice;
pub use notice::{notify, use_notices, NoticeLevel, NoticeStack, Notices};

mod modal;
pub use modal::{ConfirmDialog, Modal};

mod badge;
pub use badge::{format_money, status_tone, EmptyState, Spinner, StatusBadge};

mod job_modal;
pub use job_modal::JobModal;

mod project_modal;
pub use project_modal::ProjectModal;

mod invoice_upload;
pub use invoice_upload::InvoiceUploadModal;
