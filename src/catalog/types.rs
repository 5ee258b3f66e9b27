//! Model records as published in the pricing registry
//!
//! All prices are USD per 1,000,000 tokens. Optional fields are resolved
//! through the `effective_*` accessors so every formula shares one
//! fallback rule.

use serde::{Deserialize, Serialize};

/// Context window assumed when a model does not declare a positive one
pub const DEFAULT_CONTEXT_WINDOW: u64 = 8000;

/// Latency index assumed when a model does not declare a positive one
pub const DEFAULT_LATENCY_INDEX: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub input_1m: f64,
    pub output_1m: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_input_1m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_input_1m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_output_1m: Option<f64>,
}

/// Returns the discounted price when it is set and positive, else the base price.
fn positive_or(discounted: Option<f64>, base: f64) -> f64 {
    match discounted {
        Some(price) if price > 0.0 => price,
        _ => base,
    }
}

impl ModelPricing {
    /// Price charged for cache hits; falls back to `input_1m`.
    pub fn effective_cached_input_1m(&self) -> f64 {
        positive_or(self.cached_input_1m, self.input_1m)
    }

    /// Batch input price; falls back to `input_1m`.
    pub fn effective_batch_input_1m(&self) -> f64 {
        positive_or(self.batch_input_1m, self.input_1m)
    }

    /// Batch output price; falls back to `output_1m`.
    pub fn effective_batch_output_1m(&self) -> f64 {
        positive_or(self.batch_output_1m, self.output_1m)
    }

    pub fn has_cache_pricing(&self) -> bool {
        self.cached_input_1m.is_some_and(|p| p > 0.0)
    }

    pub fn has_batch_pricing(&self) -> bool {
        self.batch_input_1m.is_some_and(|p| p > 0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<i64>,
    /// 0-1 scale, higher is faster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_index: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    pub pricing: ModelPricing,
    #[serde(default)]
    pub capabilities: ModelCapabilities,
}

impl Model {
    /// Context window used by the value score; never zero.
    pub fn context_window(&self) -> u64 {
        match self.capabilities.context_window {
            Some(window) if window > 0 => window as u64,
            _ => DEFAULT_CONTEXT_WINDOW,
        }
    }

    /// Context window exactly as published, 0 when missing or non-positive.
    pub fn declared_context_window(&self) -> u64 {
        match self.capabilities.context_window {
            Some(window) if window > 0 => window as u64,
            _ => 0,
        }
    }

    pub fn latency_index(&self) -> f64 {
        match self.capabilities.latency_index {
            Some(index) if index > 0.0 => index,
            _ => DEFAULT_LATENCY_INDEX,
        }
    }

    /// Display name, falling back to the ID for records without one.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Registry header; informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingMetadata {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_verified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_unit: Option<String>,
}
