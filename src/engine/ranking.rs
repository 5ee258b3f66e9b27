use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::Model;

use super::cost::{DailyCostsBreakdown, UsageScenario, compute_daily_costs, monthly_from_daily};
use super::round_to;

/// Substituted for a zero monthly cost in the inverse-cost factor
pub const EPSILON: f64 = 0.0001;

/// Exponents of the value score
///
/// `score = (1 / cost)^alpha * log10(context)^beta * latency`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueWeights {
    /// Cost-efficiency weight
    pub alpha: f64,
    /// Context-capacity weight
    pub beta: f64,
}

impl ValueWeights {
    pub const DEFAULT_ALPHA: f64 = 0.65;
    pub const DEFAULT_BETA: f64 = 0.35;

    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    pub fn describe(&self) -> WeightDescription {
        WeightDescription {
            cost_efficiency_percent: round_to(self.alpha * 100.0, 0) as i64,
            context_capacity_percent: round_to(self.beta * 100.0, 0) as i64,
        }
    }
}

impl Default for ValueWeights {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ALPHA, Self::DEFAULT_BETA)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightDescription {
    pub cost_efficiency_percent: i64,
    pub context_capacity_percent: i64,
}

/// One model's outcome for a usage scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub model_id: String,
    pub model_name: String,
    pub provider: String,
    pub daily_costs: DailyCostsBreakdown,
    pub monthly_cost: f64,
    pub value_score: f64,
    pub score_explanation: String,
    pub context_window: u64,
    pub latency_index: f64,
}

pub fn compute_value_score(monthly_cost: f64, model: &Model, weights: &ValueWeights) -> f64 {
    let safe_cost = if monthly_cost == 0.0 {
        EPSILON
    } else {
        monthly_cost
    };
    // context_window() never returns 0, so log10 stays finite
    let context = model.context_window() as f64;

    let inverse_cost_factor = (1.0 / safe_cost).powf(weights.alpha);
    let context_factor = context.log10().powf(weights.beta);
    let score = inverse_cost_factor * context_factor * model.latency_index();

    round_to(score, 4)
}

/// Simulates one model; `score_explanation` is left empty because it
/// depends on the whole ranking.
pub fn simulate_model(
    usage: &UsageScenario,
    model: &Model,
    weights: &ValueWeights,
) -> SimulationResult {
    let daily_costs = compute_daily_costs(usage, model);
    let monthly_cost = monthly_from_daily(&daily_costs);
    let value_score = compute_value_score(monthly_cost, model, weights);

    SimulationResult {
        model_id: model.id.clone(),
        model_name: model.display_name().to_string(),
        provider: model.provider.clone(),
        daily_costs,
        monthly_cost,
        value_score,
        score_explanation: String::new(),
        context_window: model.context_window(),
        latency_index: model.latency_index(),
    }
}

/// Simulates every model and ranks them by value score, best first.
///
/// Equal scores keep catalog order.
pub fn simulate_all_models(
    usage: &UsageScenario,
    models: &[Model],
    weights: &ValueWeights,
) -> Vec<SimulationResult> {
    let mut results: Vec<SimulationResult> = models
        .par_iter()
        .map(|model| simulate_model(usage, model, weights))
        .collect();

    results.sort_by(|a, b| b.value_score.total_cmp(&a.value_score));

    let explanations: Vec<String> = results
        .iter()
        .map(|r| explain_score(&r.model_id, &results))
        .collect();
    for (result, explanation) in results.iter_mut().zip(explanations) {
        result.score_explanation = explanation;
    }

    results
}

pub fn explain_score(model_id: &str, results: &[SimulationResult]) -> String {
    let Some(best) = find_best_value(results) else {
        return "No results available for comparison.".to_string();
    };
    let Some(current) = results.iter().find(|r| r.model_id == model_id) else {
        return "Model not found in results.".to_string();
    };

    if current.model_id == best.model_id {
        return "This model is the #1 Best Value choice for your volume.".to_string();
    }

    let cost_difference = current.monthly_cost - best.monthly_cost;
    if cost_difference > 0.0 {
        return format!(
            "Operating this model costs ${cost_difference:.2} more/mo than {}. Ensure the Latency/Context justifies the premium.",
            best.model_name
        );
    }

    format!(
        "{} is cheaper, but {} scores higher due to better Latency Index or Context Window.",
        current.model_name, best.model_name
    )
}

/// Highest value score; the earliest entry wins ties.
pub fn find_best_value(results: &[SimulationResult]) -> Option<&SimulationResult> {
    results.iter().fold(None, |best, current| match best {
        Some(b) if current.value_score <= b.value_score => Some(b),
        _ => Some(current),
    })
}
