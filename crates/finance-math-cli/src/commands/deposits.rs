use clap::Args;
use rust_decimal::Decimal;

use finance_math_core::deposits::interest::{self, DepositInput, SimpleInterestInput};
use finance_math_core::deposits::recurring::{recurring_deposit, RecurringDepositInput};
use finance_math_core::CompoundingFrequency;

use super::{required, run_timed, CommandResult};
use crate::input;

/// Arguments for lump-sum deposits (compound interest and fixed deposits)
#[derive(Args)]
pub struct DepositArgs {
    /// Amount deposited
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Compounding frequency: annually, semiannually, quarterly, monthly, daily
    #[arg(long, default_value = "monthly")]
    pub frequency: String,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for simple interest
#[derive(Args)]
pub struct SimpleInterestArgs {
    /// Principal amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for recurring deposits
#[derive(Args)]
pub struct RecurringDepositArgs {
    /// Amount deposited every month
    #[arg(long)]
    pub monthly_deposit: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years (must be a whole number of months)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub(crate) fn parse_frequency(name: &str) -> Result<CompoundingFrequency, Box<dyn std::error::Error>> {
    CompoundingFrequency::from_name(name).ok_or_else(|| {
        format!("Unknown frequency '{name}'. Use: annually, semiannually, quarterly, monthly, daily").into()
    })
}

fn deposit_input(args: DepositArgs) -> Result<DepositInput, Box<dyn std::error::Error>> {
    if let Some(deposit) = input::load(args.input.as_deref())? {
        return Ok(deposit);
    }
    Ok(DepositInput {
        principal: required(args.principal, "principal")?,
        annual_rate_pct: required(args.rate, "rate")?,
        term_years: required(args.years, "years")?,
        compounding: parse_frequency(&args.frequency)?,
    })
}

pub fn run_compound(args: DepositArgs) -> CommandResult {
    let deposit = deposit_input(args)?;
    run_timed(
        "compound",
        "Compound interest A = P(1 + r/n)^(nt)",
        &deposit,
        Vec::new(),
        interest::compound,
    )
}

pub fn run_fixed_deposit(args: DepositArgs) -> CommandResult {
    let deposit = deposit_input(args)?;
    run_timed(
        "fixed-deposit",
        "Fixed deposit maturity (periodic compounding)",
        &deposit,
        Vec::new(),
        interest::fixed_deposit,
    )
}

pub fn run_simple_interest(args: SimpleInterestArgs) -> CommandResult {
    let si: SimpleInterestInput = match input::load(args.input.as_deref())? {
        Some(si) => si,
        None => SimpleInterestInput {
            principal: required(args.principal, "principal")?,
            annual_rate_pct: required(args.rate, "rate")?,
            term_years: required(args.years, "years")?,
        },
    };
    run_timed(
        "simple-interest",
        "Simple interest I = PRT / 100",
        &si,
        Vec::new(),
        interest::simple_interest,
    )
}

pub fn run_recurring_deposit(args: RecurringDepositArgs) -> CommandResult {
    let rd: RecurringDepositInput = match input::load(args.input.as_deref())? {
        Some(rd) => rd,
        None => RecurringDepositInput {
            monthly_deposit: required(args.monthly_deposit, "monthly-deposit")?,
            annual_rate_pct: required(args.rate, "rate")?,
            term_years: required(args.years, "years")?,
        },
    };

    let mut warnings = Vec::new();
    if rd.annual_rate_pct.is_zero() {
        warnings.push("Zero interest rate: maturity equals the sum of deposits".to_string());
    }

    run_timed(
        "recurring-deposit",
        "Recurring deposit maturity (monthly compounding, end-of-month deposits)",
        &rd,
        warnings,
        recurring_deposit,
    )
}
