//! Pricing catalog: model records plus the registry metadata
//!
//! The engine never loads anything itself; callers resolve a [`Catalog`]
//! here and pass its `models` slice into the formula functions.

mod cache;
mod error;
mod loader;
mod provider;
mod types;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::CatalogError;
pub use loader::{CatalogOrigin, LoadOptions, LoadedCatalog, load_catalog};
pub use types::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_LATENCY_INDEX, Model, ModelCapabilities, ModelPricing,
    PricingMetadata,
};

/// Catalog bundled into the binary, used when no other source is reachable
const BUNDLED_CATALOG: &str = include_str!("../../data/llm-pricing.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PricingMetadata>,
    #[serde(default)]
    pub models: Vec<Model>,
}

impl Catalog {
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    pub fn find(&self, id: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Models whose IDs appear in `ids`, in catalog order.
    ///
    /// An empty selection means "every model".
    pub fn select(&self, ids: &[String]) -> Vec<Model> {
        if ids.is_empty() {
            return self.models.clone();
        }
        self.models
            .iter()
            .filter(|m| ids.iter().any(|id| *id == m.id))
            .cloned()
            .collect()
    }

    /// IDs from `ids` that are not present in the catalog.
    pub fn unknown_ids<'a>(&self, ids: &'a [String]) -> Vec<&'a str> {
        ids.iter()
            .filter(|id| self.find(id).is_none())
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "metadata": {"version": "2.1.0", "last_updated": "2026-01-15", "maintained_by": "ops"},
        "models": [
            {"id": "a", "name": "Alpha", "provider": "P1", "pricing": {"input_1m": 1.0, "output_1m": 2.0}},
            {"id": "b", "name": "Beta", "provider": "P2", "pricing": {"input_1m": 3.0, "output_1m": 4.0}},
            {"id": "c", "name": "Gamma", "provider": "P3", "pricing": {"input_1m": 5.0, "output_1m": 6.0}}
        ]
    }"#;

    #[test]
    fn parses_metadata_and_models() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let meta = catalog.metadata.as_ref().unwrap();
        assert_eq!(meta.version, "2.1.0");
        assert_eq!(meta.last_updated, "2026-01-15");
        assert_eq!(catalog.models.len(), 3);
    }

    #[test]
    fn metadata_is_optional() {
        let catalog = Catalog::from_json_str(r#"{"models": []}"#).unwrap();
        assert!(catalog.metadata.is_none());
        assert!(catalog.models.is_empty());
    }

    #[test]
    fn select_preserves_catalog_order() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let ids = vec!["c".to_string(), "a".to_string()];
        let selected: Vec<_> = catalog.select(&ids).into_iter().map(|m| m.id).collect();
        assert_eq!(selected, vec!["a", "c"]);
    }

    #[test]
    fn empty_selection_returns_everything() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.select(&[]).len(), 3);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        let ids = vec!["a".to_string(), "zzz".to_string()];
        assert_eq!(catalog.unknown_ids(&ids), vec!["zzz"]);
    }

    #[test]
    fn find_by_id() {
        let catalog = Catalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.find("b").map(|m| m.name.as_str()), Some("Beta"));
        assert!(catalog.find("nope").is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Catalog::from_json_str("not json").is_err());
        assert!(Catalog::from_json_str(r#"{"models": [{"id": "x"}]}"#).is_err());
    }

    #[test]
    fn bundled_catalog_parses() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.models.is_empty());
        assert!(catalog.models.iter().all(|m| m.pricing.input_1m > 0.0));
    }
}
