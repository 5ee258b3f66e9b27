use serde::{Deserialize, Serialize};

use crate::catalog::Model;

use super::{DAYS_PER_MONTH, TOKENS_DIVISOR, round_to};

/// Chatbot workload described per day.
///
/// `cache_hit_rate` must already be within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageScenario {
    pub messages_per_day: u64,
    pub tokens_input_per_message: u64,
    pub tokens_output_per_message: u64,
    pub cache_hit_rate: f64,
}

impl UsageScenario {
    /// Same scenario at `multiplier` times the message volume.
    pub(crate) fn scaled_traffic(&self, multiplier: u64) -> Self {
        Self {
            messages_per_day: self.messages_per_day.saturating_mul(multiplier),
            ..*self
        }
    }
}

/// Daily cost split, each field rounded to cents on its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCostsBreakdown {
    pub input_non_cached: f64,
    pub input_cached: f64,
    pub output: f64,
    pub total: f64,
}

/// Daily cost of `usage` on `model`.
///
/// The four fields are rounded independently, so the displayed parts may
/// differ from the displayed total by a cent.
pub fn compute_daily_costs(usage: &UsageScenario, model: &Model) -> DailyCostsBreakdown {
    let pricing = &model.pricing;
    let messages = usage.messages_per_day as f64;
    let tokens_in = usage.tokens_input_per_message as f64;
    let tokens_out = usage.tokens_output_per_message as f64;
    let hit_rate = usage.cache_hit_rate;

    let input_non_cached =
        messages * tokens_in * (1.0 - hit_rate) * pricing.input_1m / TOKENS_DIVISOR;
    let input_cached =
        messages * tokens_in * hit_rate * pricing.effective_cached_input_1m() / TOKENS_DIVISOR;
    let output = messages * tokens_out * pricing.output_1m / TOKENS_DIVISOR;
    let total = input_non_cached + input_cached + output;

    DailyCostsBreakdown {
        input_non_cached: round_to(input_non_cached, 2),
        input_cached: round_to(input_cached, 2),
        output: round_to(output, 2),
        total: round_to(total, 2),
    }
}

/// Monthly cost over a fixed 30-day month, built from the rounded daily total.
pub fn compute_monthly_cost(usage: &UsageScenario, model: &Model) -> f64 {
    monthly_from_daily(&compute_daily_costs(usage, model))
}

pub(super) fn monthly_from_daily(daily: &DailyCostsBreakdown) -> f64 {
    round_to(daily.total * DAYS_PER_MONTH, 2)
}
