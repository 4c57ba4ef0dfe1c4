use clap::Args;
use rust_decimal::Decimal;

use finance_math_core::loans::amortization::{amortize_loan, LoanInput};

use super::{required, run_timed, CommandResult};
use crate::input;

/// Arguments for loan amortization
#[derive(Args)]
pub struct LoanArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 10 for 10%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years (must be a whole number of months)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Only print the first N rows of the schedule
    #[arg(long)]
    pub rows: Option<usize>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_loan(args: LoanArgs) -> CommandResult {
    let loan: LoanInput = match input::load(args.input.as_deref())? {
        Some(loan) => loan,
        None => LoanInput {
            principal: required(args.principal, "principal")?,
            annual_rate_pct: required(args.rate, "rate")?,
            term_years: required(args.years, "years")?,
        },
    };

    let mut warnings = Vec::new();
    if let Some(rows) = args.rows {
        warnings.push(format!("Schedule truncated to the first {rows} payments"));
    }

    run_timed(
        "loan",
        "Level-payment loan amortization (monthly compounding)",
        &loan,
        warnings,
        |loan| {
            let mut out = amortize_loan(loan)?;
            if let Some(rows) = args.rows {
                out.schedule.truncate(rows);
            }
            Ok(out)
        },
    )
}
