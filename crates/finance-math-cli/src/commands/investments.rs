use clap::Args;
use rust_decimal::Decimal;

use finance_math_core::investments::future_value::{future_value_with_contributions, InvestmentInput};

use super::deposits::parse_frequency;
use super::{required, run_timed, CommandResult};
use crate::input;

/// Arguments for investment growth with monthly contributions
#[derive(Args)]
pub struct FutureValueArgs {
    /// Initial lump sum
    #[arg(long, default_value = "0")]
    pub principal: Decimal,

    /// Amount contributed every month
    #[arg(long, default_value = "0")]
    pub monthly_contribution: Decimal,

    /// Expected annual return in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Investment horizon in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Compounding frequency: annually, semiannually, quarterly, monthly, daily
    #[arg(long, default_value = "monthly")]
    pub frequency: String,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_future_value(args: FutureValueArgs) -> CommandResult {
    let investment: InvestmentInput = match input::load(args.input.as_deref())? {
        Some(investment) => investment,
        None => InvestmentInput {
            principal: args.principal,
            monthly_contribution: args.monthly_contribution,
            annual_rate_pct: required(args.rate, "rate")?,
            years: required(args.years, "years")?,
            compounding: parse_frequency(&args.frequency)?,
        },
    };

    let mut warnings = Vec::new();
    if !investment.years.fract().is_zero() {
        warnings.push(format!(
            "Yearly breakdown covers whole years only ({} of {} years)",
            investment.years.trunc(),
            investment.years
        ));
    }

    run_timed(
        "future-value",
        "Future value of lump sum plus periodic contributions (ordinary annuity)",
        &investment,
        warnings,
        future_value_with_contributions,
    )
}
