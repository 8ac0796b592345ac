use log::Level;
use serde_json::json;

use crate::error::PageError;
use crate::telemetry::log_event;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

pub trait Document {
    type Node: Clone + PartialEq;

    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, PageError>;

    fn query_within(
        &self,
        parent: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, PageError>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn data_attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    fn remove_style(&self, node: &Self::Node, property: &str);

    fn bounds(&self, node: &Self::Node) -> Bounds;

    fn viewport_height(&self) -> f64;

    fn scroll_metrics(&self) -> ScrollMetrics;

    fn set_root_attribute(&self, name: &str, value: &str);

    fn remove_root_attribute(&self, name: &str);
}

pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&self, key: &str, value: &str) -> Result<(), PageError>;
}

/// All elements matching `selector`, in document order. No match and a
/// rejected selector both give an empty list.
pub fn safe_select<D: Document>(document: &D, selector: &str) -> Vec<D::Node> {
    selection_or_empty(selector, document.query_all(selector))
}

pub fn safe_select_within<D: Document>(
    document: &D,
    parent: &D::Node,
    selector: &str,
) -> Vec<D::Node> {
    selection_or_empty(selector, document.query_within(parent, selector))
}

pub fn safe_query<D: Document>(document: &D, selector: &str) -> Option<D::Node> {
    safe_select(document, selector).into_iter().next()
}

fn selection_or_empty<N>(selector: &str, selection: Result<Vec<N>, PageError>) -> Vec<N> {
    selection.unwrap_or_else(|error| {
        log_event(
            Level::Debug,
            "selector_rejected",
            json!({ "selector": selector, "error": error.to_string() }),
        );
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeDocument;

    #[test]
    fn safe_select_returns_matches_in_order() {
        let mut document = FakeDocument::new();
        let first = document.add(&[".card"]);
        let second = document.add(&[".card"]);
        document.add(&[".skill"]);

        assert_eq!(safe_select(&document, ".card"), vec![first, second]);
    }

    #[test]
    fn safe_select_is_empty_for_missing_or_rejected_selectors() {
        let document = FakeDocument::new();

        assert!(safe_select(&document, ".navbar").is_empty());
        assert!(safe_select(&document, FakeDocument::INVALID_SELECTOR).is_empty());
        assert_eq!(safe_query(&document, ".navbar"), None);
    }

    #[test]
    fn safe_select_within_only_sees_children_of_parent() {
        let mut document = FakeDocument::new();
        let section = document.add(&[".section"]);
        let other = document.add(&[".section"]);
        let card = document.add_child(section, &[".card"]);
        document.add_child(other, &[".card"]);

        assert_eq!(safe_select_within(&document, &section, ".card"), vec![card]);
    }
}
