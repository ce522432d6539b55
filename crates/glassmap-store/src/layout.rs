use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use glassmap_core::Panel;
use glassmap_engine::LayoutProvider;

/// In-memory panel layout storage: product model -> ordered panel rows.
/// Layout data is reference data; the engine reads it fresh per resolution
/// request and never writes back.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LayoutStore {
    products: HashMap<String, Vec<Panel>>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the panel layout for a product.
    pub fn set_product(&mut self, product: &str, panels: Vec<Panel>) {
        self.products.insert(product.to_string(), panels);
    }

    pub fn remove_product(&mut self, product: &str) -> Option<Vec<Panel>> {
        self.products.remove(product)
    }

    pub fn product_names(&self) -> Vec<&str> {
        self.products.keys().map(String::as_str).collect()
    }

    pub fn panel_count(&self, product: &str) -> usize {
        self.products.get(product).map_or(0, Vec::len)
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl LayoutProvider for LayoutStore {
    fn panels_for_product(&self, product: &str) -> Vec<Panel> {
        self.products.get(product).cloned().unwrap_or_default()
    }
}
