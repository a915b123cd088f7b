//! Configuration types for card-king

use crate::fees::FeeSchedule;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fees: FeesConfig,
    #[serde(default)]
    pub comps: CompsConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Fee schedule location
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeesConfig {
    /// JSON fee schedule; the built-in schedule is used when absent
    pub schedule_path: Option<PathBuf>,
}

/// Comparable sales configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CompsConfig {
    /// Comps generated per card
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Oldest sale, in days
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
}

fn default_sample_size() -> usize {
    10
}
fn default_lookback_days() -> i64 {
    45
}

impl Default for CompsConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            lookback_days: default_lookback_days(),
        }
    }
}

/// Decision log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_true")]
    pub decision_log_enabled: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_true() -> bool {
    true
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            decision_log_enabled: true,
            output_dir: default_output_dir(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus listener port; no exporter when absent
    pub metrics_port: Option<u16>,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Fee schedule from `fees.schedule_path`, or the built-in default
    pub fn fee_schedule(&self) -> anyhow::Result<FeeSchedule> {
        match &self.fees.schedule_path {
            Some(path) => FeeSchedule::load(path),
            None => Ok(FeeSchedule::default()),
        }
    }
}
