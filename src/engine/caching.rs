use serde::{Deserialize, Serialize};

use crate::catalog::Model;

use super::{DAYS_PER_MONTH, MONTHS_PER_YEAR, TOKENS_DIVISOR, round_to};

/// Per-request prompt shape and daily volume.
///
/// `cache_write_percent` must already be within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachingRoiInputs {
    /// Cacheable prefix (system prompt, documents)
    pub static_tokens: u64,
    pub dynamic_tokens: u64,
    pub output_tokens: u64,
    pub requests_per_day: u64,
    /// Share of requests that write the cache instead of reading it
    pub cache_write_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachingRoiResult {
    pub model_id: String,
    pub model_name: String,
    pub cost_no_cache: f64,
    pub cost_cached: f64,
    pub monthly_savings: f64,
    pub savings_percent: f64,
    pub annual_savings: f64,
    /// Requests before one cache write is paid back by reads.
    ///
    /// Depends only on prices, not on traffic.
    pub break_even_requests: u64,
    pub cache_discount: f64,
    pub daily_cost_no_cache: f64,
    pub daily_cost_cached: f64,
}

pub fn calculate_caching_roi(inputs: &CachingRoiInputs, model: &Model) -> CachingRoiResult {
    let pricing = &model.pricing;
    let price_input = pricing.input_1m / TOKENS_DIVISOR;
    let price_cached = pricing.effective_cached_input_1m() / TOKENS_DIVISOR;
    let price_output = pricing.output_1m / TOKENS_DIVISOR;

    let static_tokens = inputs.static_tokens as f64;
    let dynamic_tokens = inputs.dynamic_tokens as f64;
    let output_tokens = inputs.output_tokens as f64;
    let requests = inputs.requests_per_day as f64;

    let write_rate = inputs.cache_write_percent / 100.0;
    let read_rate = 1.0 - write_rate;

    let daily_no_cache =
        requests * ((static_tokens + dynamic_tokens) * price_input + output_tokens * price_output);
    let cost_no_cache = daily_no_cache * DAYS_PER_MONTH;

    let static_write = requests * write_rate * static_tokens * price_input;
    let static_read = requests * read_rate * static_tokens * price_cached;
    let dynamic = requests * dynamic_tokens * price_input;
    let output = requests * output_tokens * price_output;
    let daily_cached = static_write + static_read + dynamic + output;
    let cost_cached = daily_cached * DAYS_PER_MONTH;

    let monthly_savings = cost_no_cache - cost_cached;
    let savings_percent = if cost_no_cache > 0.0 {
        monthly_savings / cost_no_cache * 100.0
    } else {
        0.0
    };

    let savings_per_read = static_tokens * (price_input - price_cached);
    let cost_per_write = static_tokens * price_input;
    let break_even_requests = if savings_per_read > 0.0 {
        (cost_per_write / savings_per_read).ceil() as u64
    } else {
        0
    };

    let cache_discount = if pricing.input_1m > 0.0 {
        (1.0 - pricing.effective_cached_input_1m() / pricing.input_1m) * 100.0
    } else {
        0.0
    };

    CachingRoiResult {
        model_id: model.id.clone(),
        model_name: model.display_name().to_string(),
        cost_no_cache: round_to(cost_no_cache, 2),
        cost_cached: round_to(cost_cached, 2),
        monthly_savings: round_to(monthly_savings, 2),
        savings_percent: round_to(savings_percent, 1),
        annual_savings: round_to(monthly_savings * MONTHS_PER_YEAR, 2),
        break_even_requests,
        cache_discount: round_to(cache_discount, 0),
        daily_cost_no_cache: round_to(daily_no_cache, 2),
        daily_cost_cached: round_to(daily_cached, 2),
    }
}

/// Models with a positive cached-input price, in input order
pub fn filter_cacheable_models(models: &[Model]) -> Vec<&Model> {
    models
        .iter()
        .filter(|m| m.pricing.has_cache_pricing())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{assert_close, model};

    fn sonnet() -> Model {
        let mut m = model("claude-3.5-sonnet", 3.0, 15.0);
        m.pricing.cached_input_1m = Some(0.30);
        m
    }

    fn inputs(requests_per_day: u64, cache_write_percent: f64) -> CachingRoiInputs {
        CachingRoiInputs {
            static_tokens: 10_000,
            dynamic_tokens: 0,
            output_tokens: 0,
            requests_per_day,
            cache_write_percent,
        }
    }

    #[test]
    fn static_prompt_savings() {
        // no cache: 1000 * 10_000 * 3e-6 = 30/day, 900/month
        // cached: 1000 * (0.1 * 10_000 * 3e-6 + 0.9 * 10_000 * 0.3e-6) = 5.7/day, 171/month
        let r = calculate_caching_roi(&inputs(1000, 10.0), &sonnet());
        assert_close(r.daily_cost_no_cache, 30.0);
        assert_close(r.daily_cost_cached, 5.7);
        assert_close(r.cost_no_cache, 900.0);
        assert_close(r.cost_cached, 171.0);
        assert_close(r.monthly_savings, 729.0);
        assert_close(r.savings_percent, 81.0);
        assert_close(r.annual_savings, 8748.0);
        assert_close(r.cache_discount, 90.0);
    }

    #[test]
    fn dynamic_and_output_tokens_never_discount() {
        let i = CachingRoiInputs {
            static_tokens: 0,
            dynamic_tokens: 1000,
            output_tokens: 500,
            requests_per_day: 100,
            cache_write_percent: 10.0,
        };
        let r = calculate_caching_roi(&i, &sonnet());
        assert_eq!(r.cost_no_cache, r.cost_cached);
        assert_eq!(r.monthly_savings, 0.0);
        assert_eq!(r.break_even_requests, 0);
    }

    #[test]
    fn all_writes_save_nothing() {
        let r = calculate_caching_roi(&inputs(1000, 100.0), &sonnet());
        assert_close(r.monthly_savings, 0.0);
    }

    #[test]
    fn break_even_rounds_up() {
        // 3.0 / (3.0 - 0.3) = 1.11.. -> 2
        let r = calculate_caching_roi(&inputs(1000, 10.0), &sonnet());
        assert_eq!(r.break_even_requests, 2);
    }

    #[test]
    fn break_even_is_independent_of_traffic() {
        let m = sonnet();
        let expected = calculate_caching_roi(&inputs(1, 10.0), &m).break_even_requests;
        for requests in [0, 10, 1_000, 250_000] {
            for write in [0.0, 25.0, 90.0] {
                let r = calculate_caching_roi(&inputs(requests, write), &m);
                assert_eq!(r.break_even_requests, expected);
            }
        }
    }

    #[test]
    fn missing_cache_price_is_no_op() {
        let r = calculate_caching_roi(&inputs(1000, 10.0), &model("plain", 3.0, 15.0));
        assert_eq!(r.monthly_savings, 0.0);
        assert_eq!(r.cache_discount, 0.0);
        assert_eq!(r.break_even_requests, 0);
    }

    #[test]
    fn zero_traffic() {
        let r = calculate_caching_roi(&inputs(0, 10.0), &sonnet());
        assert_eq!(r.cost_no_cache, 0.0);
        assert_eq!(r.savings_percent, 0.0);
    }

    #[test]
    fn filter_cacheable() {
        let mut zero = model("zero", 1.0, 1.0);
        zero.pricing.cached_input_1m = Some(0.0);
        let models = vec![model("plain", 1.0, 1.0), sonnet(), zero];
        let ids: Vec<_> = filter_cacheable_models(&models)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["claude-3.5-sonnet"]);
    }
}
