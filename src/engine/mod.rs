//! Cost simulation and ranking formulas
//!
//! Every function here is pure and synchronous: it reads a usage scenario
//! and model records and returns a fresh result. Inputs are trusted; the
//! caller validates ranges (cache rate in `[0, 1]`, write share in
//! `[0, 100]`) before invoking anything in this module.

mod batch;
mod caching;
mod comparison;
mod context;
mod cost;
mod ranking;
mod routing;
mod sensitivity;

pub use batch::{BatchApiInputs, BatchApiResult, calculate_batch, filter_batch_models};
pub use caching::{
    CachingRoiInputs, CachingRoiResult, calculate_caching_roi, filter_cacheable_models,
};
pub use comparison::{AggressiveComparison, calculate_aggressive_comparison};
pub use context::{
    ContentUnit, ContextWindowResult, SortMode, TOKENS_PER_PAGE, TOKENS_PER_WORD, UsagePercent,
    analyze_context, max_context, normalize_to_tokens, sort_context_results,
};
pub use cost::{DailyCostsBreakdown, UsageScenario, compute_daily_costs, compute_monthly_cost};
pub use ranking::{
    EPSILON, SimulationResult, ValueWeights, WeightDescription, compute_value_score,
    explain_score, find_best_value, simulate_all_models, simulate_model,
};
pub use routing::{RoutedCost, calculate_routed_cost};
pub use sensitivity::{
    SensitivityAnalysis, calculate_all_sensitivity_analysis, calculate_sensitivity_analysis,
};

pub const ENGINE_NAME: &str = "LLM Cost Engine";
pub const ENGINE_VERSION: &str = "1.0";

/// Prices are quoted per million tokens
pub(crate) const TOKENS_DIVISOR: f64 = 1_000_000.0;
/// Fixed billing month; no calendar awareness
pub(crate) const DAYS_PER_MONTH: f64 = 30.0;
pub(crate) const MONTHS_PER_YEAR: f64 = 12.0;

/// Round half up to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::{Model, ModelCapabilities, ModelPricing};

    pub(crate) fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    pub(crate) fn model(id: &str, input: f64, output: f64) -> Model {
        Model {
            id: id.to_string(),
            name: id.to_uppercase(),
            provider: "Test".to_string(),
            pricing: ModelPricing {
                input_1m: input,
                output_1m: output,
                ..Default::default()
            },
            capabilities: ModelCapabilities::default(),
        }
    }

    pub(crate) fn with_caps(mut model: Model, context_window: i64, latency_index: f64) -> Model {
        model.capabilities = ModelCapabilities {
            context_window: Some(context_window),
            latency_index: Some(latency_index),
        };
        model
    }
}
