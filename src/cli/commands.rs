//! CLI subcommand definitions
//!
//! Each calculator has its own argument struct; defaults match a typical
//! small chatbot / batch job / RAG prompt.

use clap::{Args, Subcommand, ValueEnum};
use llmcost::engine::{ContentUnit, SortMode};

pub(crate) const DEFAULT_MESSAGES: u64 = 500;
pub(crate) const DEFAULT_INPUT_TOKENS: u64 = 150;
pub(crate) const DEFAULT_OUTPUT_TOKENS: u64 = 300;
pub(crate) const DEFAULT_CACHE_RATE: f64 = 0.2;
pub(crate) const DEFAULT_PRIMARY_SHARE: f64 = 80.0;

pub(crate) const DEFAULT_RECORDS: u64 = 10_000;
pub(crate) const DEFAULT_BATCH_INPUT: u64 = 500;
pub(crate) const DEFAULT_BATCH_OUTPUT: u64 = 100;

pub(crate) const DEFAULT_STATIC_TOKENS: u64 = 5_000;
pub(crate) const DEFAULT_DYNAMIC_TOKENS: u64 = 100;
pub(crate) const DEFAULT_CACHING_OUTPUT: u64 = 200;
pub(crate) const DEFAULT_REQUESTS: u64 = 1_000;
pub(crate) const DEFAULT_WRITE_PERCENT: f64 = 10.0;

pub(crate) const DEFAULT_CONTEXT_SIZE: f64 = 30_000.0;

/// Main CLI commands
#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Rank models by monthly cost and value score (default)
    Simulate(SimulateArgs),
    /// Compare real-time vs batch API cost
    Batch(BatchArgs),
    /// Estimate prompt caching savings
    Caching(CachingArgs),
    /// Check which models fit a document in their context window
    Context(ContextArgs),
    /// List catalog models and pricing
    Models,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SimulateArgs {
    /// Chatbot messages per day
    #[arg(short, long, default_value_t = DEFAULT_MESSAGES)]
    pub(crate) messages: u64,

    /// Input tokens per message
    #[arg(long, default_value_t = DEFAULT_INPUT_TOKENS)]
    pub(crate) input_tokens: u64,

    /// Output tokens per message
    #[arg(long, default_value_t = DEFAULT_OUTPUT_TOKENS)]
    pub(crate) output_tokens: u64,

    /// Share of input tokens served from the prompt cache (0-1)
    #[arg(long, default_value_t = DEFAULT_CACHE_RATE)]
    pub(crate) cache_rate: f64,

    /// Model that receives `--primary-share` of the traffic
    #[arg(long, value_name = "ID", requires = "route_secondary")]
    pub(crate) route_primary: Option<String>,

    /// Model that receives the remaining traffic
    #[arg(long, value_name = "ID", requires = "route_primary")]
    pub(crate) route_secondary: Option<String>,

    /// Percent of traffic sent to the primary route model
    #[arg(long, value_name = "PCT", default_value_t = DEFAULT_PRIMARY_SHARE)]
    pub(crate) primary_share: f64,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGES,
            input_tokens: DEFAULT_INPUT_TOKENS,
            output_tokens: DEFAULT_OUTPUT_TOKENS,
            cache_rate: DEFAULT_CACHE_RATE,
            route_primary: None,
            route_secondary: None,
            primary_share: DEFAULT_PRIMARY_SHARE,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct BatchArgs {
    /// Number of records in the job
    #[arg(short, long, default_value_t = DEFAULT_RECORDS)]
    pub(crate) records: u64,

    /// Average input tokens per record
    #[arg(long, default_value_t = DEFAULT_BATCH_INPUT)]
    pub(crate) avg_input: u64,

    /// Average output tokens per record
    #[arg(long, default_value_t = DEFAULT_BATCH_OUTPUT)]
    pub(crate) avg_output: u64,

    /// Single model to price (default: every model with batch pricing)
    #[arg(long, value_name = "ID")]
    pub(crate) model: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct CachingArgs {
    /// Cacheable prompt prefix tokens per request
    #[arg(long, default_value_t = DEFAULT_STATIC_TOKENS)]
    pub(crate) static_tokens: u64,

    /// Uncacheable tokens per request
    #[arg(long, default_value_t = DEFAULT_DYNAMIC_TOKENS)]
    pub(crate) dynamic_tokens: u64,

    /// Output tokens per request
    #[arg(long, default_value_t = DEFAULT_CACHING_OUTPUT)]
    pub(crate) output_tokens: u64,

    /// Requests per day
    #[arg(long, default_value_t = DEFAULT_REQUESTS)]
    pub(crate) requests: u64,

    /// Percent of requests that write the cache (0-100)
    #[arg(long, default_value_t = DEFAULT_WRITE_PERCENT)]
    pub(crate) write_percent: f64,

    /// Single model to price (default: every model with cache pricing)
    #[arg(long, value_name = "ID")]
    pub(crate) model: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum UnitArg {
    #[default]
    Tokens,
    Words,
    Pages,
}

impl From<UnitArg> for ContentUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Tokens => ContentUnit::Tokens,
            UnitArg::Words => ContentUnit::Words,
            UnitArg::Pages => ContentUnit::Pages,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum SortArg {
    /// Fitting models first, cheapest first (default)
    #[default]
    Price,
    /// Largest context window first
    Size,
}

impl From<SortArg> for SortMode {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Price => SortMode::Price,
            SortArg::Size => SortMode::Size,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ContextArgs {
    /// Document size in `--unit`s
    #[arg(short, long, default_value_t = DEFAULT_CONTEXT_SIZE)]
    pub(crate) size: f64,

    #[arg(long, value_enum, default_value = "tokens")]
    pub(crate) unit: UnitArg,

    #[arg(long, value_enum, default_value = "price")]
    pub(crate) sort: SortArg,
}
