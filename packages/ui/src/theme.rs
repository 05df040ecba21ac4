//! Light/dark theme, shared across the app and remembered in local storage.

use dioxus::prelude::*;
use store::LocalStore;

use crate::context::local_store;
use crate::icons::{FaMoon, FaSun};
use crate::Icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything but `"dark"` reads as light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn load(store: &impl LocalStore) -> Self {
        Self::from_stored(store.theme().as_deref())
    }

    pub fn save(self, store: &impl LocalStore) {
        store.set_theme(self.as_str());
    }
}

/// Set or clear the `dark` class on the document root.
pub fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        let root = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element());
        if let Some(root) = root {
            let classes = root.class_list();
            let result = if theme.is_dark() {
                classes.add_1("dark")
            } else {
                classes.remove_1("dark")
            };
            if result.is_err() {
                tracing::warn!("Could not apply {} theme", theme.as_str());
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("Theme is now {}", theme.as_str());
}

pub fn use_theme() -> Signal<Theme> {
    use_context::<Signal<Theme>>()
}

/// Flip the theme, persist it and apply it.
pub fn toggle_theme(mut theme: Signal<Theme>) {
    let next = theme.peek().toggled();
    next.save(&local_store());
    apply_theme(next);
    theme.set(next);
}

#[component]
pub fn ThemeProvider(children: Element) -> Element {
    let theme = use_signal(|| Theme::load(&local_store()));

    use_effect(move || apply_theme(theme()));

    use_context_provider(|| theme);

    rsx! {
        {children}
    }
}

#[component]
pub fn ThemeToggle(#[props(default = "".to_string())] class: String) -> Element {
    let theme = use_theme();
    let title = if theme().is_dark() {
        "Switch to light mode"
    } else {
        "Switch to dark mode"
    };

    rsx! {
        button {
            class: "theme-toggle {class}",
            title: "{title}",
            onclick: move |_| toggle_theme(theme),
            if theme().is_dark() {
                Icon { icon: FaSun, width: 16, height: 16 }
            } else {
                Icon { icon: FaMoon, width: 16, height: 16 }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    #[test]
    fn test_toggle_roundtrip() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_persisted_preference() {
        let store = MemoryStore::new();
        assert_eq!(Theme::load(&store), Theme::Light);

        Theme::Dark.save(&store);
        assert_eq!(store.theme().as_deref(), Some("dark"));
        assert_eq!(Theme::load(&store), Theme::Dark);

        store.set_theme("purple");
        assert_eq!(Theme::load(&store), Theme::Light);
    }
}
