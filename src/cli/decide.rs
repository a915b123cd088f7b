//! Decide command implementation

use super::OutputFormat;
use crate::advisor::{Advisor, DecisionRequest, DecisionResponse};
use crate::config::Config;
use crate::decision::RiskTolerance;
use crate::grading::ConditionMetrics;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct DecideArgs {
    /// Free-text card description
    pub query: String,

    /// Centering subscore (0-10)
    #[arg(long)]
    pub centering: f64,

    /// Corners subscore (0-10)
    #[arg(long)]
    pub corners: f64,

    /// Edges subscore (0-10)
    #[arg(long)]
    pub edges: f64,

    /// Surface subscore (0-10)
    #[arg(long)]
    pub surface: f64,

    /// Card has a visible defect
    #[arg(long)]
    pub issue: bool,

    /// Asking price of a listing
    #[arg(long)]
    pub listed_price: Option<Decimal>,

    /// Risk appetite
    #[arg(long, value_enum, default_value_t = ToleranceArg::Standard)]
    pub risk_tolerance: ToleranceArg,

    /// Output format: json or table
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToleranceArg {
    Conservative,
    Standard,
    Aggressive,
}

impl From<ToleranceArg> for RiskTolerance {
    fn from(value: ToleranceArg) -> Self {
        match value {
            ToleranceArg::Conservative => RiskTolerance::Conservative,
            ToleranceArg::Standard => RiskTolerance::Standard,
            ToleranceArg::Aggressive => RiskTolerance::Aggressive,
        }
    }
}

impl DecideArgs {
    pub fn request(&self) -> anyhow::Result<DecisionRequest> {
        let metrics = ConditionMetrics::new(
            self.centering,
            self.corners,
            self.edges,
            self.surface,
            self.issue,
        )?;
        let mut request = DecisionRequest::new(self.query.clone(), metrics)
            .with_risk_tolerance(self.risk_tolerance.into());
        request.listed_price = self.listed_price;
        Ok(request)
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let request = self.request()?;
        let advisor = Advisor::from_config(config).await?;
        let response = advisor.decide(&request).await?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
            OutputFormat::Table => print_table(&response),
        }
        Ok(())
    }
}

fn print_table(response: &DecisionResponse) {
    let market = &response.market_value;
    println!("{} ({})", response.card.display_name, response.card.card_key);
    println!(
        "Decision:   {} (confidence {}/100, risk {})",
        response.decision, response.confidence, response.risk
    );
    println!(
        "Market:     {:.2} / {:.2} / {:.2} {} from {} comps",
        market.p25, market.median, market.p75, market.currency, response.comps_count
    );
    println!(
        "Grading:    expected net {:.2}, ROI {:.1}%, breakeven {}",
        response.roi.expected_net, response.roi.roi_pct, response.roi.breakeven_grade
    );
    let odds: Vec<String> = response
        .grade_probabilities
        .iter()
        .map(|(grade, p)| format!("{grade} {:.0}%", p * 100.0))
        .collect();
    println!("Odds:       {}", odds.join(", "));
    for line in &response.explanation {
        println!("  - {line}");
    }
}
