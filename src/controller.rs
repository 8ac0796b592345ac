use log::Level;
use serde_json::json;

use crate::config::PageConfig;
use crate::director::{AnimationDirector, Installed};
use crate::dom::{Document, PreferenceStore};
use crate::scheduler::Scheduler;
use crate::telemetry::log_event;
use crate::theme::{apply_theme, stored_theme, Theme};

/// Where the view is being rendered. Only a browser has a document,
/// storage and a frame clock to animate against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderTarget {
    Browser,
    Server,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    pub is_dark_mode: bool,
    pub is_mobile_menu_open: bool,
}

impl PageState {
    pub fn theme(&self) -> Theme {
        Theme::from_dark(self.is_dark_mode)
    }

    pub fn init_theme<D: Document, S: PreferenceStore>(&mut self, document: &D, store: &S) {
        let theme = stored_theme(store);
        self.is_dark_mode = theme.is_dark();
        apply_theme(document, store, theme);
    }

    pub fn toggle_theme<D: Document, S: PreferenceStore>(
        &mut self,
        checked: bool,
        document: &D,
        store: &S,
    ) {
        self.is_dark_mode = checked;
        apply_theme(document, store, self.theme());
    }

    pub fn toggle_menu(&mut self) {
        self.is_mobile_menu_open = !self.is_mobile_menu_open;
    }
}

/// One-time setup once the view is attached: theme first, then animations.
/// A server render touches nothing and returns `None`.
pub fn after_view_init<D: Document, S: PreferenceStore>(
    target: RenderTarget,
    state: &mut PageState,
    document: &D,
    store: &S,
    scheduler: &mut Scheduler<D::Node>,
    config: &PageConfig,
) -> Option<Installed<D::Node>> {
    if target == RenderTarget::Server {
        log_event(Level::Debug, "view_init_skipped", json!({ "target": "server" }));
        return None;
    }

    state.init_theme(document, store);
    let installed = AnimationDirector::new(document, config).install(scheduler);
    scheduler.on_scroll(document);
    Some(installed)
}
