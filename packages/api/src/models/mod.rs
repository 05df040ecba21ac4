//! Typed records exchanged with the admin backend.
//!
//! Every collection row implements [`Entity`] so list views can key rows and
//! patch them by id. Status fields use [`status_enum!`]-generated enums that
//! round-trip the backend's display strings and keep unknown values in an
//! `Other` variant instead of failing the decode.

#[macro_use]
mod status;

mod appointment;
mod career;
mod invoice;
mod pricing;
mod project;
mod quote;
mod ticket;
mod user;

pub use appointment::{Appointment, AppointmentStatus};
pub use career::{ApplicationStatus, Job, JobApplication, JobPayload, JobStatus, JobType};
pub use invoice::{Invoice, InvoiceMeta, InvoiceStatus};
pub use pricing::{parse_price, PriceTable, PricingCategory, QuotePricing};
pub use project::{ModuleUpdate, NewModule, NewProject, Project, ProjectModule, ProjectStatus};
pub use quote::{QuoteLineItem, QuoteRequest, QuoteStatus, QuoteTotals};
pub use ticket::{Ticket, TicketPriority, TicketStatus};
pub use user::{AdminUser, AuthUser, SearchCandidate};

/// A backend record with a stable id, usable as a list key.
pub trait Entity {
    fn id(&self) -> &str;
}
