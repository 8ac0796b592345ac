use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::dom::{Bounds, Document, PreferenceStore, ScrollMetrics};
use crate::error::PageError;

struct FakeNode {
    tags: Vec<&'static str>,
    parent: Option<usize>,
    id: Option<&'static str>,
    data: HashMap<String, String>,
    bounds: Bounds,
}

pub struct FakeDocument {
    nodes: Vec<FakeNode>,
    styles: RefCell<HashMap<(usize, String), String>>,
    root_attributes: RefCell<HashMap<String, String>>,
    viewport_height: f64,
    metrics: Cell<ScrollMetrics>,
    style_writes: Cell<usize>,
}

impl FakeDocument {
    pub const INVALID_SELECTOR: &'static str = "::not-a-selector";

    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            styles: RefCell::new(HashMap::new()),
            root_attributes: RefCell::new(HashMap::new()),
            viewport_height: 1_000.0,
            metrics: Cell::new(ScrollMetrics::default()),
            style_writes: Cell::new(0),
        }
    }

    pub fn add(&mut self, tags: &[&'static str]) -> usize {
        self.push(tags, None)
    }

    pub fn add_child(&mut self, parent: usize, tags: &[&'static str]) -> usize {
        self.push(tags, Some(parent))
    }

    pub fn add_with_id(&mut self, id: &'static str) -> usize {
        let node = self.push(&[], None);
        self.nodes[node].id = Some(id);
        node
    }

    pub fn set_data(&mut self, node: usize, name: &str, value: &str) {
        self.nodes[node]
            .data
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_bounds(&mut self, node: usize, top: f64, height: f64) {
        self.nodes[node].bounds = Bounds { top, height };
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    pub fn set_scroll_metrics(&self, scroll_top: f64, scroll_height: f64, client_height: f64) {
        self.metrics.set(ScrollMetrics {
            scroll_top,
            scroll_height,
            client_height,
        });
    }

    pub fn style(&self, node: usize, property: &str) -> Option<String> {
        self.styles
            .borrow()
            .get(&(node, property.to_string()))
            .cloned()
    }

    pub fn style_writes(&self) -> usize {
        self.style_writes.get()
    }

    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.borrow().get(name).cloned()
    }

    fn push(&mut self, tags: &[&'static str], parent: Option<usize>) -> usize {
        self.nodes.push(FakeNode {
            tags: tags.to_vec(),
            parent,
            id: None,
            data: HashMap::new(),
            bounds: Bounds::default(),
        });
        self.nodes.len() - 1
    }

    fn matching(
        &self,
        selector: &str,
        parent: Option<usize>,
    ) -> Result<Vec<usize>, PageError> {
        if selector == Self::INVALID_SELECTOR {
            return Err(PageError::InvalidSelector {
                selector: selector.to_string(),
                reason: "SyntaxError".to_string(),
            });
        }

        let alternatives: Vec<&str> = selector.split(',').map(str::trim).collect();
        Ok(self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| parent.map_or(true, |parent| node.parent == Some(parent)))
            .filter(|(_, node)| node.tags.iter().any(|tag| alternatives.contains(tag)))
            .map(|(index, _)| index)
            .collect())
    }
}

impl Document for FakeDocument {
    type Node = usize;

    fn query_all(&self, selector: &str) -> Result<Vec<usize>, PageError> {
        self.matching(selector, None)
    }

    fn query_within(&self, parent: &usize, selector: &str) -> Result<Vec<usize>, PageError> {
        self.matching(selector, Some(*parent))
    }

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == Some(id))
    }

    fn data_attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.nodes.get(*node)?.data.get(name).cloned()
    }

    fn set_style(&self, node: &usize, property: &str, value: &str) {
        self.style_writes.set(self.style_writes.get() + 1);
        self.styles
            .borrow_mut()
            .insert((*node, property.to_string()), value.to_string());
    }

    fn remove_style(&self, node: &usize, property: &str) {
        self.styles
            .borrow_mut()
            .remove(&(*node, property.to_string()));
    }

    fn bounds(&self, node: &usize) -> Bounds {
        self.nodes
            .get(*node)
            .map(|node| node.bounds)
            .unwrap_or_default()
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics.get()
    }

    fn set_root_attribute(&self, name: &str, value: &str) {
        self.root_attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_root_attribute(&self, name: &str) {
        self.root_attributes.borrow_mut().remove(name);
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn failing() -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PageError> {
        if self.fail_writes {
            return Err(PageError::StorageWrite {
                key: key.to_string(),
                reason: "QuotaExceededError".to_string(),
            });
        }

        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
