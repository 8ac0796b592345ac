use portfolio_motion::dom::{Bounds, Document, PreferenceStore, ScrollMetrics};
use portfolio_motion::error::PageError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Element, HtmlElement, NodeList, Storage};

const FALLBACK_VIEWPORT_HEIGHT: f64 = 720.0;

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn js_reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Seconds on the same clock as `requestAnimationFrame` timestamps.
pub fn now_seconds() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map_or(0.0, |performance| performance.now() / 1_000.0)
}

#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn current() -> Option<Self> {
        window()
            .and_then(|w| w.document())
            .map(|document| Self { document })
    }

    pub fn text_of(&self, id: &str) -> Option<String> {
        self.document.get_element_by_id(id)?.text_content()
    }

    pub fn mount_point(&self, id: &'static str) -> Result<Element, PageError> {
        self.document
            .get_element_by_id(id)
            .ok_or(PageError::MissingMountPoint(id))
    }

    fn rejected(selector: &str, error: &JsValue) -> PageError {
        PageError::InvalidSelector {
            selector: selector.to_string(),
            reason: js_reason(error),
        }
    }
}

impl Document for WebDocument {
    type Node = HtmlElement;

    fn query_all(&self, selector: &str) -> Result<Vec<HtmlElement>, PageError> {
        self.document
            .query_selector_all(selector)
            .map(html_elements)
            .map_err(|error| Self::rejected(selector, &error))
    }

    fn query_within(
        &self,
        parent: &HtmlElement,
        selector: &str,
    ) -> Result<Vec<HtmlElement>, PageError> {
        parent
            .query_selector_all(selector)
            .map(html_elements)
            .map_err(|error| Self::rejected(selector, &error))
    }

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn data_attribute(&self, node: &HtmlElement, name: &str) -> Option<String> {
        node.get_attribute(&format!("data-{name}"))
    }

    fn set_style(&self, node: &HtmlElement, property: &str, value: &str) {
        let _ = node.style().set_property(property, value);
    }

    fn remove_style(&self, node: &HtmlElement, property: &str) {
        let _ = node.style().remove_property(property);
    }

    fn bounds(&self, node: &HtmlElement) -> Bounds {
        let rect = node.get_bounding_client_rect();
        Bounds {
            top: rect.top(),
            height: rect.height(),
        }
    }

    fn viewport_height(&self) -> f64 {
        window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|value| value.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_HEIGHT)
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let Some(root) = self.document.document_element() else {
            return ScrollMetrics::default();
        };

        ScrollMetrics {
            scroll_top: f64::from(root.scroll_top()),
            scroll_height: f64::from(root.scroll_height()),
            client_height: f64::from(root.client_height()),
        }
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute(name, value);
        }
    }

    fn remove_root_attribute(&self, name: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.remove_attribute(name);
        }
    }
}

pub struct LocalStore;

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PageError> {
        let storage = local_storage().ok_or(PageError::StorageUnavailable)?;
        storage
            .set_item(key, value)
            .map_err(|error| PageError::StorageWrite {
                key: key.to_string(),
                reason: js_reason(&error),
            })
    }
}
