use dioxus::prelude::*;

use ui::icons::{
    FaBriefcase, FaCalendarCheck, FaDiagramProject, FaFileInvoiceDollar, FaHeadset, FaSliders,
    FaTags, FaUsers,
};
use ui::{use_auth, Gate, Icon, LogoutButton, Spinner, ThemeToggle};

use crate::Route;

/// Shell for every signed-in page: sidebar navigation plus the routed view.
///
/// Doubles as the route gate. While the stored credential is being checked a
/// placeholder is shown; without a user the visitor is sent to the login view.
#[component]
pub fn AdminLayout() -> Element {
    let session = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if session().gate() == Gate::Redirect {
            tracing::debug!("No session, redirecting to login");
            nav.replace(Route::Login {});
        }
    });

    let (gate, user_name) = {
        let s = session.read();
        let name = s.user().map(|u| u.display_name().to_string()).unwrap_or_default();
        (s.gate(), name)
    };

    match gate {
        Gate::Pending => rsx! { Spinner { label: "Checking session..." } },
        Gate::Redirect => rsx! {},
        Gate::Allow => rsx! {
            div {
                class: "admin-shell",
                aside {
                    class: "admin-sidebar",
                    div { class: "admin-brand", "Exceptionz Admin" }
                    nav {
                        class: "admin-nav",
                        Link {
                            to: Route::Projects {},
                            active_class: "active",
                            Icon { icon: FaDiagramProject, width: 16, height: 16 }
                            "Projects"
                        }
                        Link {
                            to: Route::Users {},
                            active_class: "active",
                            Icon { icon: FaUsers, width: 16, height: 16 }
                            "Users"
                        }
                        Link {
                            to: Route::Invoices {},
                            active_class: "active",
                            Icon { icon: FaFileInvoiceDollar, width: 16, height: 16 }
                            "Invoices"
                        }
                        Link {
                            to: Route::Tickets {},
                            active_class: "active",
                            Icon { icon: FaHeadset, width: 16, height: 16 }
                            "Support Tickets"
                        }
                        Link {
                            to: Route::Appointments {},
                            active_class: "active",
                            Icon { icon: FaCalendarCheck, width: 16, height: 16 }
                            "Appointments"
                        }
                        Link {
                            to: Route::QuoteRequests {},
                            active_class: "active",
                            Icon { icon: FaTags, width: 16, height: 16 }
                            "Quote Requests"
                        }
                        Link {
                            to: Route::PricingSettings {},
                            active_class: "active",
                            Icon { icon: FaSliders, width: 16, height: 16 }
                            "Quote Pricing"
                        }
                        Link {
                            to: Route::Career {},
                            active_class: "active",
                            Icon { icon: FaBriefcase, width: 16, height: 16 }
                            "Career"
                        }
                    }
                    div {
                        class: "admin-sidebar-footer",
                        span { class: "admin-user", "{user_name}" }
                        div {
                            class: "toolbar",
                            ThemeToggle {}
                            LogoutButton { class: "btn btn-outline" }
                        }
                    }
                }
                main {
                    class: "admin-main",
                    Outlet::<Route> {}
                }
            }
        },
    }
}
