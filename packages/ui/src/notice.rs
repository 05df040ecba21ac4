//! User-visible notices raised by page actions ("Failed to delete ticket").
//!
//! Every notice is also traced, so failures show up in the console log too.

use dioxus::prelude::*;

use crate::icons::FaXmark;
use crate::Icon;

/// Oldest notices are dropped past this many.
const MAX_NOTICES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    fn class(self) -> &'static str {
        match self {
            NoticeLevel::Error => "notice error",
            NoticeLevel::Success => "notice success",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notices {
    entries: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.entries.push(Notice {
            id: self.next_id,
            timestamp: clock_time(),
            level,
            message: message.into(),
        });
        if self.entries.len() > MAX_NOTICES {
            let excess = self.entries.len() - MAX_NOTICES;
            self.entries.drain(..excess);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn use_notices() -> Signal<Notices> {
    use_context::<Signal<Notices>>()
}

pub fn notify(notices: &mut Signal<Notices>, level: NoticeLevel, message: &str) {
    match level {
        NoticeLevel::Error => tracing::error!("{message}"),
        NoticeLevel::Success => tracing::info!("{message}"),
    }
    notices.write().push(level, message);
}

#[cfg(target_arch = "wasm32")]
fn clock_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_time() -> String {
    "00:00:00".to_string()
}

/// Renders the current notices in a corner stack.
#[component]
pub fn NoticeStack() -> Element {
    let mut notices = use_notices();
    let entries = notices().entries().to_vec();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-stack",
            for notice in entries {
                div {
                    key: "{notice.id}",
                    class: notice.level.class(),
                    span { class: "notice-time", "{notice.timestamp}" }
                    span { class: "notice-message", "{notice.message}" }
                    button {
                        class: "notice-dismiss",
                        title: "Dismiss",
                        onclick: move |_| notices.write().dismiss(notice.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_caps_and_dismisses() {
        let mut notices = Notices::default();
        for i in 0..7 {
            notices.push(NoticeLevel::Error, format!("failure {i}"));
        }
        assert_eq!(notices.entries().len(), MAX_NOTICES);
        assert_eq!(notices.entries()[0].message, "failure 2");

        let last = notices.entries()[4].id;
        notices.dismiss(last);
        assert!(notices.entries().iter().all(|n| n.id != last));
    }
}
