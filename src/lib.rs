//! LLM cost simulation and ranking
//!
//! [`catalog`] resolves model pricing records; [`engine`] turns a usage
//! scenario plus those records into costs, value rankings and the batch,
//! caching and context-window comparisons.

pub mod catalog;
pub mod engine;
pub mod insights;
pub mod scenario;
