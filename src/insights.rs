//! Market classification of a usage scenario
//!
//! Buckets a scenario by traffic volume, caching maturity and the shape
//! of its token mix. Used for the summary line under a simulation.

use std::fmt;

use serde::Serialize;

use crate::engine::{UsageScenario, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSegment {
    Startup,
    Scaleup,
    Enterprise,
}

impl MarketSegment {
    pub fn classify(messages_per_day: u64) -> Self {
        match messages_per_day {
            0..5_000 => Self::Startup,
            5_000..50_000 => Self::Scaleup,
            _ => Self::Enterprise,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Startup => "Startup",
            Self::Scaleup => "Scaleup",
            Self::Enterprise => "Enterprise",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Startup => "< 5K messages/day",
            Self::Scaleup => "5K - 50K messages/day",
            Self::Enterprise => "> 50K messages/day",
        }
    }
}

/// Caching maturity inferred from the cache hit rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sophistication {
    Basic,
    Intermediate,
    Advanced,
}

impl Sophistication {
    pub fn classify(cache_rate: f64) -> Self {
        if cache_rate <= 0.0 {
            Self::Basic
        } else if cache_rate <= 0.4 {
            Self::Intermediate
        } else {
            Self::Advanced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadType {
    /// Output-heavy
    Creative,
    Balanced,
    /// Input-heavy retrieval or analysis
    RagAnalysis,
}

impl WorkloadType {
    pub fn classify(input_output_ratio: f64) -> Self {
        if input_output_ratio < 0.5 {
            Self::Creative
        } else if input_output_ratio <= 1.0 {
            Self::Balanced
        } else {
            Self::RagAnalysis
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Creative => "Creative",
            Self::Balanced => "Balanced",
            Self::RagAnalysis => "RAG / Analysis",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(MarketSegment, Sophistication, WorkloadType);

/// All three classifications of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProfile {
    pub segment: MarketSegment,
    pub sophistication: Sophistication,
    /// `None` when the scenario produces no output tokens
    pub input_output_ratio: Option<f64>,
    pub workload: Option<WorkloadType>,
}

impl ScenarioProfile {
    pub fn from_usage(usage: &UsageScenario) -> Self {
        let ratio = input_output_ratio(usage);
        Self {
            segment: MarketSegment::classify(usage.messages_per_day),
            sophistication: Sophistication::classify(usage.cache_hit_rate),
            input_output_ratio: ratio.map(|r| round_to(r, 2)),
            workload: ratio.map(WorkloadType::classify),
        }
    }
}

/// Input tokens per output token
pub fn input_output_ratio(usage: &UsageScenario) -> Option<f64> {
    (usage.tokens_output_per_message > 0).then(|| {
        usage.tokens_input_per_message as f64 / usage.tokens_output_per_message as f64
    })
}
