use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::FinanceMathError;
use crate::types::{Money, Percent, Rate};
use crate::validation::{checked, overflow};
use crate::FinanceMathResult;

/// Convert an annual percentage (e.g. 10 for 10%) into a per-period rate.
pub fn periodic_rate(annual_rate_pct: Percent, periods_per_year: u32) -> Rate {
    annual_rate_pct / dec!(100) / Decimal::from(periods_per_year)
}

/// (1 + r)^n for a whole number of periods via iterative multiplication
/// (avoids Decimal::powd drift).
pub fn compound_factor(rate: Rate, periods: u32) -> FinanceMathResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for _ in 0..periods {
        result = checked("rate", result.checked_mul(factor))?;
    }
    Ok(result)
}

/// (1 + r)^n where n may be fractional. Whole counts take the iterative path.
pub fn growth_factor(rate: Rate, periods: Decimal) -> FinanceMathResult<Decimal> {
    if periods < Decimal::ZERO {
        return Err(FinanceMathError::invalid(
            "periods",
            "number of periods must not be negative",
        ));
    }
    if periods.fract().is_zero() {
        let n = periods.to_u32().ok_or_else(|| overflow("periods"))?;
        return compound_factor(rate, n);
    }
    checked("rate", (Decimal::ONE + rate).checked_powd(periods))
}

/// Future-value annuity factor ((1 + r)^n − 1) / r given a precomputed
/// growth factor. At r = 0 the limit is simply n.
pub fn annuity_factor(rate: Rate, periods: Decimal, growth: Decimal) -> FinanceMathResult<Decimal> {
    if rate.is_zero() {
        return Ok(periods);
    }
    checked("rate", (growth - Decimal::ONE).checked_div(rate))
}

/// Level payment that retires `principal` over `periods` at `rate` per period:
/// P·r·(1+r)^n / ((1+r)^n − 1), or P / n when r = 0.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> FinanceMathResult<Money> {
    if periods == 0 {
        return Err(FinanceMathError::invalid(
            "periods",
            "number of periods must be > 0",
        ));
    }
    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }
    let growth = compound_factor(rate, periods)?;
    let denom = growth - Decimal::ONE;
    if denom.is_zero() {
        return Err(FinanceMathError::invalid(
            "rate",
            "rate too small to amortise over the requested term",
        ));
    }
    let payment = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denom));
    checked("principal", payment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_rate() {
        assert_eq!(periodic_rate(dec!(12), 12), dec!(0.01));
        assert_eq!(periodic_rate(dec!(8), 4), dec!(0.02));
    }

    #[test]
    fn test_compound_factor_whole_periods() {
        assert_eq!(compound_factor(dec!(0.10), 2).unwrap(), dec!(1.21));
        assert_eq!(compound_factor(dec!(0.05), 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_growth_factor_fractional_periods() {
        // 1.21^0.5 = 1.1
        let g = growth_factor(dec!(0.21), dec!(0.5)).unwrap();
        assert!((g - dec!(1.1)).abs() < dec!(0.000001), "g={}", g);
    }

    #[test]
    fn test_growth_factor_overflow_is_an_error() {
        let err = growth_factor(dec!(100), dec!(1000)).unwrap_err();
        assert_eq!(err.field(), "rate");
    }

    #[test]
    fn test_level_payment_overflow_names_principal() {
        let err = level_payment(Decimal::MAX, dec!(0.5), 12).unwrap_err();
        assert_eq!(err.field(), "principal");
    }

    #[test]
    fn test_annuity_factor_zero_rate_limit() {
        assert_eq!(annuity_factor(Decimal::ZERO, dec!(60), Decimal::ONE).unwrap(), dec!(60));
    }

    #[test]
    fn test_level_payment() {
        // 100k at 1% per month for 12 months ≈ 8884.88
        let pmt = level_payment(dec!(100_000), dec!(0.01), 12).unwrap();
        assert!((pmt - dec!(8884.88)).abs() < dec!(0.01), "pmt={}", pmt);
    }

    #[test]
    fn test_level_payment_zero_rate() {
        assert_eq!(
            level_payment(dec!(1200), Decimal::ZERO, 12).unwrap(),
            dec!(100)
        );
    }

    #[test]
    fn test_level_payment_zero_periods_rejected() {
        assert!(level_payment(dec!(1000), dec!(0.01), 0).is_err());
    }
}
