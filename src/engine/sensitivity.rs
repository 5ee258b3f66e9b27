use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::Model;

use super::cost::{UsageScenario, compute_monthly_cost};
use super::{MONTHS_PER_YEAR, round_to};

/// Monthly and annual cost at 1x, 2x and 3x message volume
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityAnalysis {
    pub model_id: String,
    pub model_name: String,
    #[serde(rename = "cost1x")]
    pub cost_1x: f64,
    #[serde(rename = "cost2x")]
    pub cost_2x: f64,
    #[serde(rename = "cost3x")]
    pub cost_3x: f64,
    #[serde(rename = "annualCost1x")]
    pub annual_cost_1x: f64,
    #[serde(rename = "annualCost2x")]
    pub annual_cost_2x: f64,
    #[serde(rename = "annualCost3x")]
    pub annual_cost_3x: f64,
}

/// Projects cost under traffic growth.
///
/// Only `messages_per_day` scales; per-message tokens and cache rate stay put.
pub fn calculate_sensitivity_analysis(usage: &UsageScenario, model: &Model) -> SensitivityAnalysis {
    let cost_at = |multiplier| compute_monthly_cost(&usage.scaled_traffic(multiplier), model);
    let annual = |monthly: f64| round_to(monthly * MONTHS_PER_YEAR, 2);

    let cost_1x = cost_at(1);
    let cost_2x = cost_at(2);
    let cost_3x = cost_at(3);

    SensitivityAnalysis {
        model_id: model.id.clone(),
        model_name: model.display_name().to_string(),
        cost_1x,
        cost_2x,
        cost_3x,
        annual_cost_1x: annual(cost_1x),
        annual_cost_2x: annual(cost_2x),
        annual_cost_3x: annual(cost_3x),
    }
}

/// Sensitivity for every model, in input order.
pub fn calculate_all_sensitivity_analysis(
    usage: &UsageScenario,
    models: &[Model],
) -> Vec<SensitivityAnalysis> {
    models
        .par_iter()
        .map(|model| calculate_sensitivity_analysis(usage, model))
        .collect()
}
