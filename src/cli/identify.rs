//! Identify command implementation

use super::OutputFormat;
use crate::comps::identify;
use clap::Args;

#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// Free-text card description
    pub query: String,

    /// Output format: json or table
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl IdentifyArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let identity = identify(&self.query)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&identity)?),
            OutputFormat::Table => {
                println!("Card:      {}", identity.display_name);
                println!("Key:       {}", identity.card_key);
                println!("Category:  {:?}", identity.category);
            }
        }
        Ok(())
    }
}
