//! Data capture module
//!
//! Persists decision requests/responses and fetched comps as JSON lines

mod recorder;

pub use recorder::{CompsCacheEntry, DecisionLog, DecisionRecord, LogStats};
