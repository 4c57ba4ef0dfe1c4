use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::{growth_factor, periodic_rate};
use crate::types::{CompoundingFrequency, Money, Percent, Years};
use crate::validation::{checked, require_non_negative, require_positive};
use crate::FinanceMathResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lump-sum deposit compounded at a fixed frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub term_years: Years,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub term_years: Years,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositOutput {
    pub maturity_amount: Money,
    pub interest_earned: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Compound interest: A = P × (1 + r/n)^(n·t).
///
/// A zero number of compounding periods (t = 0) leaves the principal untouched.
pub fn compound(input: &DepositInput) -> FinanceMathResult<DepositOutput> {
    require_non_negative("principal", input.principal)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    require_non_negative("term_years", input.term_years)?;

    let n = input.compounding.periods_per_year();
    let periods = checked("term_years", Decimal::from(n).checked_mul(input.term_years))?;
    if periods.is_zero() {
        return Ok(DepositOutput {
            maturity_amount: input.principal,
            interest_earned: Decimal::ZERO,
        });
    }

    let growth = growth_factor(periodic_rate(input.annual_rate_pct, n), periods)?;
    let maturity_amount = checked("principal", input.principal.checked_mul(growth))?;

    Ok(DepositOutput {
        maturity_amount,
        interest_earned: maturity_amount - input.principal,
    })
}

/// Fixed deposit: a lump sum compounded for a fixed tenure. Same formula as
/// [`compound`], but a deposit account must hold something.
pub fn fixed_deposit(input: &DepositInput) -> FinanceMathResult<DepositOutput> {
    require_positive("principal", input.principal)?;
    compound(input)
}

/// Simple interest: I = P × R × T / 100.
pub fn simple_interest(input: &SimpleInterestInput) -> FinanceMathResult<DepositOutput> {
    require_non_negative("principal", input.principal)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    require_non_negative("term_years", input.term_years)?;

    let rate_for_term = checked(
        "annual_rate_pct",
        input.annual_rate_pct.checked_mul(input.term_years),
    )? / dec!(100);
    let interest = checked("principal", input.principal.checked_mul(rate_for_term))?;

    Ok(DepositOutput {
        maturity_amount: checked("principal", input.principal.checked_add(interest))?,
        interest_earned: interest,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
