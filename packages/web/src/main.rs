use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::AdminConfig;
use ui::{use_admin_provider, AuthProvider, NoticeStack, ThemeProvider, ADMIN_CSS};
use views::{
    AdminLayout, Appointments, Career, Invoices, Login, NotFound, PricingSettings, ProjectDetail,
    Projects, QuoteRequests, Tickets, Users,
};

mod views;

/// Settings baked into the bundle; see `admin.toml`.
const ADMIN_TOML: &str = include_str!("../admin.toml");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login")]
    Login {},
    #[layout(AdminLayout)]
        #[route("/")]
        Root {},
        #[route("/projects")]
        Projects {},
        #[route("/projects/:id")]
        ProjectDetail { id: String },
        #[route("/users")]
        Users {},
        #[route("/invoices")]
        Invoices {},
        #[route("/tickets")]
        Tickets {},
        #[route("/appointments")]
        Appointments {},
        #[route("/quote-requests")]
        QuoteRequests {},
        #[route("/quote-pricing")]
        PricingSettings {},
        #[route("/career")]
        Career {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

fn main() {
    let level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    if let Err(e) = dioxus::logger::init(level) {
        eprintln!("Failed to initialise logging: {e}");
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_admin_provider(|| AdminConfig::from_toml_or_default(ADMIN_TOML));

    rsx! {
        document::Link { rel: "stylesheet", href: ADMIN_CSS }

        ThemeProvider {
            AuthProvider {
                Router::<Route> {}
                NoticeStack {}
            }
        }
    }
}

/// Redirect `/` to `/projects`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::Projects {});
    });
    rsx! {}
}
