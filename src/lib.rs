//! card-king: grading, buy and sell advice for raw trading cards
//!
//! This library provides the core components for:
//! - Market statistics over recent sold comps
//! - Grade probability estimates from condition subscores
//! - Expected value and ROI of a grading submission
//! - A rule-based BUY/GRADE/HOLD/SELL/PASS decision policy
//! - Card identification and a deterministic comps provider
//! - An advisor service with a JSON-lines decision log
//! - Structured logging and Prometheus metrics

pub mod advisor;
pub mod cli;
pub mod comps;
pub mod config;
pub mod data;
pub mod decision;
pub mod error;
pub mod fees;
pub mod grading;
pub mod market;
pub mod roi;
pub mod telemetry;

pub use error::{Result, ValuationError};
