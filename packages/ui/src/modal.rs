use dioxus::prelude::*;

use crate::icons::{FaTriangleExclamation, FaXmark};
use crate::Icon;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close` unless `locked` is set,
/// which forms use while a save is in flight.
#[component]
pub fn Modal(
    title: String,
    on_close: EventHandler<()>,
    #[props(default = false)] locked: bool,
    #[props(default = false)] wide: bool,
    children: Element,
) -> Element {
    let close = move || {
        if !locked {
            on_close.call(());
        }
    };

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| close(),
            div {
                class: if wide { "modal-card wide" } else { "modal-card" },
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal-header",
                    h3 { class: "modal-title", "{title}" }
                    button {
                        class: "icon-button",
                        r#type: "button",
                        disabled: locked,
                        onclick: move |_| close(),
                        Icon { icon: FaXmark, width: 18, height: 18 }
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}

/// Asks before a destructive action. The action runs only from `on_confirm`.
#[component]
pub fn ConfirmDialog(
    message: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
    #[props(default = "Delete".to_string())] confirm_label: String,
) -> Element {
    rsx! {
        Modal {
            title: "Please confirm",
            on_close: move |_| on_cancel.call(()),
            div {
                class: "confirm-message",
                span {
                    class: "confirm-icon",
                    Icon { icon: FaTriangleExclamation, width: 20, height: 20 }
                }
                p { "{message}" }
            }
            div {
                class: "form-actions",
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}
