use clap::Parser;
use card_king::cli::{Cli, Commands};
use card_king::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            toml::from_str(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    let _guard = card_king::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Identify(args) => {
            args.execute()?;
        }
        Commands::Comps(args) => {
            tracing::debug!(query = %args.query, "Fetching comps");
            args.execute(&config).await?;
        }
        Commands::Decide(args) => {
            tracing::debug!(query = %args.query, "Evaluating card");
            args.execute(&config).await?;
        }
        Commands::Config => {
            let fees = config.fee_schedule()?;
            println!("Current configuration:");
            match &config.fees.schedule_path {
                Some(path) => println!("  Fees: {}", path.display()),
                None => println!("  Fees: built-in schedule"),
            }
            println!(
                "  Comps: {} samples over {} days",
                config.comps.sample_size, config.comps.lookback_days
            );
            println!(
                "  Decision log: {} ({})",
                if config.data.decision_log_enabled { "on" } else { "off" },
                config.data.output_dir.display()
            );
            println!(
                "  Telemetry: level={}, format={:?}, metrics_port={:?}",
                config.telemetry.log_level, config.telemetry.log_format, config.telemetry.metrics_port
            );
            println!("Fee schedule:");
            println!("{}", serde_json::to_string_pretty(&fees)?);
        }
    }

    Ok(())
}
