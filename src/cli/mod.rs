//! CLI interface for card-king
//!
//! Provides subcommands for:
//! - `identify`: Resolve a query to a card identity
//! - `comps`: Show recent sold comps and market stats
//! - `decide`: Recommend BUY/GRADE/HOLD/SELL/PASS for a card
//! - `config`: Show the effective configuration and fee schedule

mod comps;
mod decide;
mod identify;

pub use comps::CompsArgs;
pub use decide::DecideArgs;
pub use identify::IdentifyArgs;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "card-king")]
#[command(about = "Grade, buy and sell advice for raw trading cards")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a query to a card identity
    Identify(IdentifyArgs),
    /// Show recent sold comps
    Comps(CompsArgs),
    /// Recommend an action for a card
    Decide(DecideArgs),
    /// Show effective configuration
    Config,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}
