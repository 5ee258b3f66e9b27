use serde::{Deserialize, Serialize};

use crate::catalog::Model;

use super::{TOKENS_DIVISOR, round_to};

/// Savings under this many dollars are reported as trivial
const TRIVIAL_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchApiInputs {
    pub records: u64,
    pub avg_input_tokens: u64,
    pub avg_output_tokens: u64,
}

/// Real-time vs batch API cost for one job
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchApiResult {
    pub model_id: String,
    pub model_name: String,
    pub cost_real_time: f64,
    pub cost_batch: f64,
    pub savings: f64,
    pub savings_percent: f64,
    /// Batch cost per record
    pub cost_per_record: f64,
    pub cost_per_record_real_time: f64,
    /// Input-side discount in whole percent
    pub batch_discount: f64,
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub is_trivial_savings: bool,
}

pub fn calculate_batch(inputs: &BatchApiInputs, model: &Model) -> BatchApiResult {
    let pricing = &model.pricing;
    let price_input = pricing.input_1m / TOKENS_DIVISOR;
    let price_output = pricing.output_1m / TOKENS_DIVISOR;
    let batch_input = pricing.effective_batch_input_1m() / TOKENS_DIVISOR;
    let batch_output = pricing.effective_batch_output_1m() / TOKENS_DIVISOR;

    let total_input_tokens = inputs.records.saturating_mul(inputs.avg_input_tokens);
    let total_output_tokens = inputs.records.saturating_mul(inputs.avg_output_tokens);
    let tokens_in = total_input_tokens as f64;
    let tokens_out = total_output_tokens as f64;

    let cost_real_time = tokens_in * price_input + tokens_out * price_output;
    let cost_batch = tokens_in * batch_input + tokens_out * batch_output;

    let savings = cost_real_time - cost_batch;
    let savings_percent = if cost_real_time > 0.0 {
        savings / cost_real_time * 100.0
    } else {
        0.0
    };

    let (cost_per_record, cost_per_record_real_time) = if inputs.records > 0 {
        let records = inputs.records as f64;
        (cost_batch / records, cost_real_time / records)
    } else {
        (0.0, 0.0)
    };

    let batch_discount = if pricing.input_1m > 0.0 {
        (1.0 - pricing.effective_batch_input_1m() / pricing.input_1m) * 100.0
    } else {
        0.0
    };

    BatchApiResult {
        model_id: model.id.clone(),
        model_name: model.display_name().to_string(),
        cost_real_time: round_to(cost_real_time, 2),
        cost_batch: round_to(cost_batch, 2),
        savings: round_to(savings, 2),
        savings_percent: round_to(savings_percent, 1),
        cost_per_record: round_to(cost_per_record, 6),
        cost_per_record_real_time: round_to(cost_per_record_real_time, 6),
        batch_discount: round_to(batch_discount, 0),
        total_input_tokens,
        total_output_tokens,
        is_trivial_savings: savings < TRIVIAL_THRESHOLD,
    }
}

/// Models with a positive batch input price, in input order
pub fn filter_batch_models(models: &[Model]) -> Vec<&Model> {
    models
        .iter()
        .filter(|m| m.pricing.has_batch_pricing())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{assert_close, model};

    fn gpt4o() -> Model {
        let mut m = model("gpt-4o", 2.50, 10.00);
        m.pricing.batch_input_1m = Some(1.25);
        m.pricing.batch_output_1m = Some(5.00);
        m
    }

    fn inputs(records: u64, avg_in: u64, avg_out: u64) -> BatchApiInputs {
        BatchApiInputs {
            records,
            avg_input_tokens: avg_in,
            avg_output_tokens: avg_out,
        }
    }

    #[test]
    fn half_price_batch() {
        let r = calculate_batch(&inputs(10_000, 500, 100), &gpt4o());
        assert_eq!(r.total_input_tokens, 5_000_000);
        assert_eq!(r.total_output_tokens, 1_000_000);
        assert_close(r.cost_real_time, 22.5);
        assert_close(r.cost_batch, 11.25);
        assert_close(r.savings, 11.25);
        assert_close(r.savings_percent, 50.0);
        assert_close(r.cost_per_record, 0.001125);
        assert_close(r.cost_per_record_real_time, 0.00225);
        assert_close(r.batch_discount, 50.0);
        assert!(!r.is_trivial_savings);
    }

    #[test]
    fn missing_batch_price_means_no_discount() {
        let r = calculate_batch(&inputs(10_000, 500, 100), &model("plain", 2.5, 10.0));
        assert_eq!(r.cost_real_time, r.cost_batch);
        assert_eq!(r.savings, 0.0);
        assert_eq!(r.savings_percent, 0.0);
        assert_eq!(r.batch_discount, 0.0);
        assert!(r.is_trivial_savings);
    }

    #[test]
    fn zero_batch_price_falls_back() {
        let mut m = model("zero", 2.5, 10.0);
        m.pricing.batch_input_1m = Some(0.0);
        m.pricing.batch_output_1m = Some(0.0);
        let r = calculate_batch(&inputs(100, 100, 100), &m);
        assert_eq!(r.savings, 0.0);
        assert_eq!(r.batch_discount, 0.0);
    }

    #[test]
    fn zero_records() {
        let r = calculate_batch(&inputs(0, 500, 100), &gpt4o());
        assert_eq!(r.cost_real_time, 0.0);
        assert_eq!(r.cost_per_record, 0.0);
        assert_eq!(r.cost_per_record_real_time, 0.0);
        assert_eq!(r.savings_percent, 0.0);
        assert!(r.is_trivial_savings);
    }

    #[test]
    fn tiny_jobs_are_trivial() {
        // real-time 0.0035, batch 0.00175
        let r = calculate_batch(&inputs(1, 1000, 100), &gpt4o());
        assert!(r.is_trivial_savings);
        assert_close(r.savings_percent, 50.0);
    }

    #[test]
    fn free_model_has_zero_discount() {
        let r = calculate_batch(&inputs(10, 10, 10), &model("free", 0.0, 0.0));
        assert_eq!(r.batch_discount, 0.0);
        assert_eq!(r.savings_percent, 0.0);
    }

    #[test]
    fn filter_excludes_missing_and_zero() {
        let mut zero = model("zero", 1.0, 1.0);
        zero.pricing.batch_input_1m = Some(0.0);
        let models = vec![gpt4o(), model("plain", 1.0, 1.0), zero];
        let ids: Vec<_> = filter_batch_models(&models)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["gpt-4o"]);
    }
}
