use log::Level;
use serde_json::json;

use crate::config::{THEME_ATTRIBUTE, THEME_KEY};
use crate::dom::{Document, PreferenceStore};
use crate::telemetry::log_event;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggle_label(self) -> String {
        let next = Self::from_dark(!self.is_dark()).as_str();
        format!("Switch to {next} theme")
    }
}

/// Only an exact `"dark"` selects the dark theme; anything else, including
/// nothing stored, is light.
pub fn stored_theme<S: PreferenceStore>(store: &S) -> Theme {
    match store.load(THEME_KEY).as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    }
}

pub fn apply_theme<D: Document, S: PreferenceStore>(document: &D, store: &S, theme: Theme) {
    match theme {
        Theme::Dark => document.set_root_attribute(THEME_ATTRIBUTE, theme.as_str()),
        Theme::Light => document.remove_root_attribute(THEME_ATTRIBUTE),
    }
    persist_theme(store, theme);

    log_event(
        Level::Debug,
        "theme_applied",
        json!({ "theme": theme.as_str() }),
    );
}

fn persist_theme<S: PreferenceStore>(store: &S, theme: Theme) {
    if let Err(error) = store.save(THEME_KEY, theme.as_str()) {
        log_event(
            Level::Warn,
            "theme_persist_failed",
            json!({ "theme": theme.as_str(), "error": error.to_string() }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeDocument, MemoryStore};

    #[test]
    fn only_exact_dark_is_dark() {
        assert_eq!(stored_theme(&MemoryStore::with_value(THEME_KEY, "dark")), Theme::Dark);
        assert_eq!(stored_theme(&MemoryStore::with_value(THEME_KEY, "Dark")), Theme::Light);
        assert_eq!(stored_theme(&MemoryStore::with_value(THEME_KEY, "light")), Theme::Light);
        assert_eq!(stored_theme(&MemoryStore::default()), Theme::Light);
    }

    #[test]
    fn dark_sets_attribute_and_persists() {
        let document = FakeDocument::new();
        let store = MemoryStore::default();

        apply_theme(&document, &store, Theme::Dark);

        assert_eq!(document.root_attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        assert_eq!(store.value(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn light_removes_attribute_and_persists() {
        let document = FakeDocument::new();
        let store = MemoryStore::default();
        apply_theme(&document, &store, Theme::Dark);

        apply_theme(&document, &store, Theme::Light);

        assert_eq!(document.root_attribute(THEME_ATTRIBUTE), None);
        assert_eq!(store.value(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn failed_write_still_updates_document() {
        let document = FakeDocument::new();
        let store = MemoryStore::failing();

        apply_theme(&document, &store, Theme::Dark);

        assert_eq!(document.root_attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        assert_eq!(store.value(THEME_KEY), None);
    }

    #[test]
    fn toggle_label_names_the_other_theme() {
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark theme");
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light theme");
    }
}
