use serde::Serialize;

use super::ranking::SimulationResult;
use super::round_to;

/// Winner vs runner-up of a ranked simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggressiveComparison {
    pub winner: SimulationResult,
    pub runner_up: SimulationResult,
    pub monthly_savings: f64,
    pub savings_percent: f64,
    pub context_multiplier: f64,
    pub savings_narration: String,
    pub context_narration: Option<String>,
}

/// Compares the first two entries of a ranked list.
///
/// Returns `None` when fewer than two results are available.
pub fn calculate_aggressive_comparison(results: &[SimulationResult]) -> Option<AggressiveComparison> {
    let [winner, runner_up, ..] = results else {
        return None;
    };

    let monthly_savings = runner_up.monthly_cost - winner.monthly_cost;
    let savings_percent = if runner_up.monthly_cost > 0.0 {
        round_to(monthly_savings / runner_up.monthly_cost * 100.0, 1)
    } else {
        0.0
    };
    let context_multiplier = if runner_up.context_window > 0 {
        round_to(
            winner.context_window as f64 / runner_up.context_window as f64,
            1,
        )
    } else {
        1.0
    };

    let savings_narration = if savings_percent > 0.0 {
        format!(
            "Switching to {} saves you {savings_percent}% monthly compared to {}.",
            winner.model_name, runner_up.model_name
        )
    } else {
        format!(
            "{} costs {}% more than {}, but delivers superior value.",
            winner.model_name,
            savings_percent.abs(),
            runner_up.model_name
        )
    };

    let context_narration = (context_multiplier > 1.0).then(|| {
        format!(
            "{} offers {context_multiplier}x more context memory than {}.",
            winner.model_name, runner_up.model_name
        )
    });

    Some(AggressiveComparison {
        winner: winner.clone(),
        runner_up: runner_up.clone(),
        monthly_savings: round_to(monthly_savings, 2),
        savings_percent,
        context_multiplier,
        savings_narration,
        context_narration,
    })
}
