mod batch;
mod caching;
mod context;
mod format;
mod models;
mod simulate;

use llmcost::catalog::LoadedCatalog;
use llmcost::engine::{ENGINE_NAME, ENGINE_VERSION, ValueWeights, WeightDescription};
use serde::Serialize;

pub(crate) use batch::{BatchReport, print_batch_table};
pub(crate) use caching::{CachingReport, print_caching_table};
pub(crate) use context::{ContextReport, print_context_table};
pub(crate) use format::NumberFormat;
pub(crate) use models::{ModelsReport, print_models_table};
pub(crate) use simulate::{SimulationReport, print_simulation};

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) number_format: NumberFormat,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EngineInfo {
    pub(crate) name: &'static str,
    pub(crate) version: &'static str,
    pub(crate) weights: ValueWeights,
    pub(crate) weight_description: WeightDescription,
}

impl EngineInfo {
    pub(crate) fn new(weights: ValueWeights) -> Self {
        Self {
            name: ENGINE_NAME,
            version: ENGINE_VERSION,
            weights,
            weight_description: weights.describe(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogInfo {
    pub(crate) source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) last_updated: Option<String>,
    pub(crate) model_count: usize,
}

impl CatalogInfo {
    pub(crate) fn from_loaded(loaded: &LoadedCatalog) -> Self {
        let metadata = loaded.catalog.metadata.as_ref();
        Self {
            source: loaded.origin.label(),
            version: metadata.map(|m| m.version.clone()),
            last_updated: metadata.map(|m| m.last_updated.clone()),
            model_count: loaded.catalog.models.len(),
        }
    }

    fn summary(&self) -> String {
        match (&self.version, &self.last_updated) {
            (Some(version), Some(updated)) => {
                format!("catalog v{version} ({updated}) from {}", self.source)
            }
            _ => format!("catalog from {}", self.source),
        }
    }
}

/// Shared footer under every table
fn print_footer(catalog: &CatalogInfo, use_color: bool) {
    if use_color {
        println!("\n  \x1b[90m{}\x1b[0m\n", catalog.summary());
    } else {
        println!("\n  {}\n", catalog.summary());
    }
}
