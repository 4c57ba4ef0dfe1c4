use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{level_payment, periodic_rate};
use crate::types::{Money, Percent, Years};
use crate::validation::{checked, require_non_negative, require_positive, whole_months};
use crate::FinanceMathResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for a fixed-rate, level-payment loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual interest rate in percent (10 = 10%).
    pub annual_rate_pct: Percent,
    /// Term in years; must be a whole number of months.
    pub term_years: Years,
}

/// One monthly period of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub remaining_balance: Money,
}

/// Top-level output from `amortize_loan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOutput {
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    pub total_payment: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the level monthly payment and full amortization schedule.
///
/// Each row charges interest on the opening balance; the rest of the payment
/// reduces principal. The closing balance of the final row is clamped to zero
/// so decimal residue never shows up as a negative balance.
pub fn amortize_loan(input: &LoanInput) -> FinanceMathResult<LoanOutput> {
    require_positive("principal", input.principal)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    require_positive("term_years", input.term_years)?;
    let months = whole_months("term_years", input.term_years)?;

    let rate = periodic_rate(input.annual_rate_pct, 12);
    let payment = level_payment(input.principal, rate, months)?;

    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = input.principal;

    for period in 1..=months {
        let interest = checked("annual_rate_pct", balance.checked_mul(rate))?;
        let principal_component = payment - interest;
        balance -= principal_component;

        if period == months || balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        schedule.push(AmortizationRow {
            period,
            payment,
            principal_component,
            interest_component: interest,
            remaining_balance: balance,
        });
    }

    let total_payment = checked("principal", payment.checked_mul(Decimal::from(months)))?;
    let total_interest = total_payment - input.principal;

    Ok(LoanOutput {
        monthly_payment: payment,
        number_of_payments: months,
        total_payment,
        total_interest,
        schedule,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn loan(principal: Decimal, rate: Decimal, years: Decimal) -> LoanInput {
        LoanInput {
            principal,
            annual_rate_pct: rate,
            term_years: years,
        }
    }

    #[test]
    fn test_one_year_ten_percent() {
        let out = amortize_loan(&loan(dec!(100_000), dec!(10), dec!(1))).unwrap();
        assert!(
            (out.monthly_payment - dec!(8791.59)).abs() < dec!(0.01),
            "payment={}",
            out.monthly_payment
        );
        assert_eq!(out.schedule.len(), 12);
        assert_eq!(out.number_of_payments, 12);
        assert_eq!(out.schedule.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_principal_components_sum_to_principal() {
        let out = amortize_loan(&loan(dec!(250_000), dec!(7.5), dec!(20))).unwrap();
        let repaid: Decimal = out.schedule.iter().map(|r| r.principal_component).sum();
        assert!((repaid - dec!(250_000)).abs() < dec!(0.01), "repaid={}", repaid);
    }

    #[test]
    fn test_balance_non_increasing() {
        let out = amortize_loan(&loan(dec!(50_000), dec!(12), dec!(3))).unwrap();
        let mut prev = dec!(50_000);
        for row in &out.schedule {
            assert!(row.remaining_balance <= prev);
            assert!(row.remaining_balance >= Decimal::ZERO);
            prev = row.remaining_balance;
        }
    }

    #[test]
    fn test_first_row_interest_on_full_principal() {
        let out = amortize_loan(&loan(dec!(120_000), dec!(12), dec!(10))).unwrap();
        let first = &out.schedule[0];
        assert_eq!(first.interest_component, dec!(1200));
        assert_eq!(
            first.principal_component + first.interest_component,
            first.payment
        );
    }

    #[test]
    fn test_totals() {
        let out = amortize_loan(&loan(dec!(100_000), dec!(10), dec!(1))).unwrap();
        assert_eq!(out.total_payment, out.monthly_payment * dec!(12));
        assert_eq!(out.total_interest, out.total_payment - dec!(100_000));
        assert!(out.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_loan_is_straight_line() {
        let out = amortize_loan(&loan(dec!(12_000), Decimal::ZERO, dec!(1))).unwrap();
        assert_eq!(out.monthly_payment, dec!(1000));
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert!(out.schedule.iter().all(|r| r.interest_component.is_zero()));
    }

    #[test]
    fn test_fractional_year_term() {
        let out = amortize_loan(&loan(dec!(10_000), dec!(6), dec!(1.5))).unwrap();
        assert_eq!(out.schedule.len(), 18);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(amortize_loan(&loan(Decimal::ZERO, dec!(10), dec!(1))).is_err());
        assert!(amortize_loan(&loan(dec!(-5), dec!(10), dec!(1))).is_err());
        assert!(amortize_loan(&loan(dec!(1000), dec!(-1), dec!(1))).is_err());
        assert!(amortize_loan(&loan(dec!(1000), dec!(10), Decimal::ZERO)).is_err());
        assert!(amortize_loan(&loan(dec!(1000), dec!(10), dec!(1.3333))).is_err());
    }

    #[test]
    fn test_overflow_is_an_error() {
        // payment fits, twelve of them do not
        let err = amortize_loan(&loan(Decimal::MAX * dec!(0.9), dec!(120), dec!(1))).unwrap_err();
        assert_eq!(err.field(), "principal");
    }

    #[test]
    fn test_idempotent() {
        let input = loan(dec!(75_000), dec!(8.25), dec!(5));
        assert_eq!(amortize_loan(&input).unwrap(), amortize_loan(&input).unwrap());
    }
}
