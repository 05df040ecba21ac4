mod layout;
pub use layout::AdminLayout;

mod login;
pub use login::Login;

mod not_found;
pub use not_found::NotFound;

mod projects;
pub use projects::Projects;

mod project_detail;
pub use project_detail::ProjectDetail;

mod users;
pub use users::Users;

mod invoices;
pub use invoices::Invoices;

mod tickets;
pub use tickets::Tickets;

mod appointments;
pub use appointments::Appointments;

mod quote_requests;
pub use quote_requests::QuoteRequests;

mod pricing;
pub use pricing::PricingSettings;

mod career;
pub use career::Career;
