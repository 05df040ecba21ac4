use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "login-page",
            div {
                class: "login-card",
                h1 { class: "login-title", "Page not found" }
                p { class: "page-subtitle", "Nothing lives at /{path}." }
                Link { class: "btn btn-primary btn-block", to: Route::Projects {}, "Back to projects" }
            }
        }
    }
}
