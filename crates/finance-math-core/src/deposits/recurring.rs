use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{annuity_factor, compound_factor, periodic_rate};
use crate::types::{Money, Percent, Years};
use crate::validation::{checked, require_non_negative, whole_months};
use crate::FinanceMathResult;

/// A fixed amount deposited at the end of every month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDepositInput {
    pub monthly_deposit: Money,
    pub annual_rate_pct: Percent,
    pub term_years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringDepositOutput {
    pub maturity_amount: Money,
    pub interest_earned: Money,
    pub total_investment: Money,
}

/// Recurring deposit maturity: D × ((1 + rm)^M − 1) / rm with monthly
/// compounding. A zero rate falls back to the plain sum D × M.
pub fn recurring_deposit(input: &RecurringDepositInput) -> FinanceMathResult<RecurringDepositOutput> {
    require_non_negative("monthly_deposit", input.monthly_deposit)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    let months = whole_months("term_years", input.term_years)?;

    let rate = periodic_rate(input.annual_rate_pct, 12);
    let periods = Decimal::from(months);
    let growth = compound_factor(rate, months)?;

    let annuity = annuity_factor(rate, periods, growth)?;
    let maturity_amount = checked("monthly_deposit", input.monthly_deposit.checked_mul(annuity))?;
    let total_investment = checked("monthly_deposit", input.monthly_deposit.checked_mul(periods))?;

    Ok(RecurringDepositOutput {
        maturity_amount,
        interest_earned: maturity_amount - total_investment,
        total_investment,
    })
}
