use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Model;

use super::{TOKENS_DIVISOR, round_to};

pub const TOKENS_PER_WORD: f64 = 1.33;
const WORDS_PER_PAGE: f64 = 500.0;
pub const TOKENS_PER_PAGE: f64 = TOKENS_PER_WORD * WORDS_PER_PAGE;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentUnit {
    #[default]
    Tokens,
    Words,
    Pages,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Fitting models by input cost, then the rest by window size
    #[default]
    Price,
    Size,
}

/// Share of the context window a document occupies
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UsagePercent {
    Finite(f64),
    /// Window of size 0; serialized as `null`
    Overflow,
}

impl UsagePercent {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Finite(v) => Some(*v),
            Self::Overflow => None,
        }
    }
}

impl fmt::Display for UsagePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v:.1}%"),
            Self::Overflow => f.write_str("overflow"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextWindowResult {
    pub model_id: String,
    pub model_name: String,
    pub provider: String,
    /// Declared window; 0 when the catalog omits it
    pub context_window: u64,
    pub is_valid: bool,
    pub usage_percent: UsagePercent,
    pub overflow_tokens: u64,
    /// Cost of sending the document once
    pub input_cost: f64,
    pub price_per_million: f64,
}

pub fn normalize_to_tokens(size: f64, unit: ContentUnit) -> u64 {
    let tokens = match unit {
        ContentUnit::Tokens => size,
        ContentUnit::Words => size * TOKENS_PER_WORD,
        ContentUnit::Pages => size * TOKENS_PER_PAGE,
    };
    // `as` saturates; negative input collapses to 0
    round_to(tokens, 0) as u64
}

/// Checks a document of `token_count` tokens against every model's window.
///
/// Uses the declared window without the scoring fallback, so a model
/// with no window never fits.
pub fn analyze_context(models: &[Model], token_count: u64) -> Vec<ContextWindowResult> {
    models
        .iter()
        .map(|model| {
            let window = model.declared_context_window();
            let usage_percent = if window > 0 {
                UsagePercent::Finite(round_to(token_count as f64 / window as f64 * 100.0, 1))
            } else {
                UsagePercent::Overflow
            };
            let input_cost = token_count as f64 / TOKENS_DIVISOR * model.pricing.input_1m;

            ContextWindowResult {
                model_id: model.id.clone(),
                model_name: model.display_name().to_string(),
                provider: model.provider.clone(),
                context_window: window,
                is_valid: window >= token_count,
                usage_percent,
                overflow_tokens: token_count.saturating_sub(window),
                input_cost: round_to(input_cost, 4),
                price_per_million: model.pricing.input_1m,
            }
        })
        .collect()
}

pub fn sort_context_results(
    mut results: Vec<ContextWindowResult>,
    mode: SortMode,
) -> Vec<ContextWindowResult> {
    match mode {
        SortMode::Size => results.sort_by(|a, b| b.context_window.cmp(&a.context_window)),
        SortMode::Price => results.sort_by(price_order),
    }
    results
}

fn price_order(a: &ContextWindowResult, b: &ContextWindowResult) -> Ordering {
    match (a.is_valid, b.is_valid) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => a.input_cost.total_cmp(&b.input_cost),
        (false, false) => b.context_window.cmp(&a.context_window),
    }
}

/// Largest declared window, 0 for an empty list
pub fn max_context(models: &[Model]) -> u64 {
    models
        .iter()
        .map(Model::declared_context_window)
        .max()
        .unwrap_or(0)
}
