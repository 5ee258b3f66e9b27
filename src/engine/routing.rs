use serde::Serialize;

use super::ranking::SimulationResult;
use super::round_to;

/// Monthly cost when traffic is split between two models
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedCost {
    pub primary_id: String,
    pub secondary_id: String,
    /// Share of traffic sent to the primary model, `0..=100`
    pub primary_percent: f64,
    pub blended_monthly_cost: f64,
    pub savings_vs_secondary: f64,
    pub savings_percent: f64,
}

/// Blends the monthly costs of two simulated models.
///
/// `primary_percent` must already be within `[0, 100]`. Returns `None`
/// when either ID is missing from `results`.
pub fn calculate_routed_cost(
    results: &[SimulationResult],
    primary_id: &str,
    secondary_id: &str,
    primary_percent: f64,
) -> Option<RoutedCost> {
    let primary = results.iter().find(|r| r.model_id == primary_id)?;
    let secondary = results.iter().find(|r| r.model_id == secondary_id)?;

    let share = primary_percent / 100.0;
    let blended = primary.monthly_cost * share + secondary.monthly_cost * (1.0 - share);
    let savings = secondary.monthly_cost - blended;
    let savings_percent = if secondary.monthly_cost > 0.0 {
        round_to(savings / secondary.monthly_cost * 100.0, 1)
    } else {
        0.0
    };

    Some(RoutedCost {
        primary_id: primary.model_id.clone(),
        secondary_id: secondary.model_id.clone(),
        primary_percent,
        blended_monthly_cost: round_to(blended, 2),
        savings_vs_secondary: round_to(savings, 2),
        savings_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DailyCostsBreakdown;
    use crate::engine::test_support::assert_close;

    fn result(id: &str, monthly_cost: f64) -> SimulationResult {
        SimulationResult {
            model_id: id.to_string(),
            model_name: id.to_string(),
            provider: String::new(),
            daily_costs: DailyCostsBreakdown::default(),
            monthly_cost,
            value_score: 0.0,
            score_explanation: String::new(),
            context_window: 8000,
            latency_index: 0.5,
        }
    }

    #[test]
    fn blends_cheap_primary_with_expensive_fallback() {
        let results = [result("mini", 10.0), result("large", 200.0)];
        let routed = calculate_routed_cost(&results, "mini", "large", 80.0).unwrap();
        // 10 * 0.8 + 200 * 0.2
        assert_close(routed.blended_monthly_cost, 48.0);
        assert_close(routed.savings_vs_secondary, 152.0);
        assert_close(routed.savings_percent, 76.0);
    }

    #[test]
    fn full_share_equals_primary() {
        let results = [result("a", 12.34), result("b", 56.78)];
        let routed = calculate_routed_cost(&results, "a", "b", 100.0).unwrap();
        assert_close(routed.blended_monthly_cost, 12.34);
        let routed = calculate_routed_cost(&results, "a", "b", 0.0).unwrap();
        assert_close(routed.blended_monthly_cost, 56.78);
        assert_close(routed.savings_vs_secondary, 0.0);
    }

    #[test]
    fn missing_model_yields_none() {
        let results = [result("a", 1.0)];
        assert!(calculate_routed_cost(&results, "a", "zzz", 50.0).is_none());
        assert!(calculate_routed_cost(&results, "zzz", "a", 50.0).is_none());
    }

    #[test]
    fn free_secondary_gives_zero_percent() {
        let results = [result("a", 5.0), result("b", 0.0)];
        let routed = calculate_routed_cost(&results, "a", "b", 50.0).unwrap();
        assert_eq!(routed.savings_percent, 0.0);
        assert_close(routed.savings_vs_secondary, -2.5);
    }
}
