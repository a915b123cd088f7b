//! Comps command implementation

use super::OutputFormat;
use crate::advisor::Advisor;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct CompsArgs {
    /// Free-text card description
    pub query: String,

    /// Output format: json or table
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl CompsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let advisor = Advisor::from_config(config).await?;
        let (identity, snapshot) = advisor.comps(&self.query).await?;

        match self.format {
            OutputFormat::Json => {
                let out = serde_json::json!({ "card": identity, "comps": snapshot });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            OutputFormat::Table => {
                println!("{} ({})", identity.display_name, identity.card_key);
                println!("{:<12} {:>10}  Title", "Sold", "Price");
                for comp in &snapshot.comps {
                    println!(
                        "{:<12} {:>10.2}  {}",
                        comp.sold_date_utc.format("%Y-%m-%d"),
                        comp.sold_price,
                        comp.title
                    );
                }
                let stats = &snapshot.stats;
                println!();
                println!(
                    "p25 {:.2} | median {:.2} | p75 {:.2} {}",
                    stats.p25, stats.median, stats.p75, stats.currency
                );
                println!(
                    "spread {:.4} | confidence {}/100 | {} comps",
                    stats.spread_ratio, stats.confidence, stats.comps_count
                );
            }
        }
        Ok(())
    }
}
