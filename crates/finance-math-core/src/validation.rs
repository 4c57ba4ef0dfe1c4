//! Input guards shared by every calculator. Each returns the typed
//! `InvalidInput` error naming the offending field.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::FinanceMathError;
use crate::types::Years;
use crate::FinanceMathResult;

pub fn require_positive(field: &str, value: Decimal) -> FinanceMathResult<()> {
    if value <= Decimal::ZERO {
        return Err(FinanceMathError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: Decimal) -> FinanceMathResult<()> {
    if value < Decimal::ZERO {
        return Err(FinanceMathError::invalid(field, "must not be negative"));
    }
    Ok(())
}

/// Error for an intermediate value outside the 128-bit decimal range,
/// attributed to the input that drove it there.
pub(crate) fn overflow(field: &str) -> FinanceMathError {
    FinanceMathError::invalid(field, "value is outside the representable range")
}

/// Turn the result of a `checked_*` operation into a typed error.
pub(crate) fn checked(field: &str, value: Option<Decimal>) -> FinanceMathResult<Decimal> {
    value.ok_or_else(|| overflow(field))
}

/// Overflow-checked sum of named terms; an overflow blames the term that
/// pushed the running total out of range.
pub(crate) fn checked_sum<'a, I>(terms: I) -> FinanceMathResult<Decimal>
where
    I: IntoIterator<Item = (&'a str, Decimal)>,
{
    terms.into_iter().try_fold(Decimal::ZERO, |acc, (field, value)| {
        checked(field, acc.checked_add(value))
    })
}

/// Convert a term in years to a whole number of monthly periods.
pub fn whole_months(field: &str, years: Years) -> FinanceMathResult<u32> {
    require_non_negative(field, years)?;
    let months = years * dec!(12);
    if !months.fract().is_zero() {
        return Err(FinanceMathError::invalid(
            field,
            format!("{years} years is not a whole number of months"),
        ));
    }
    months
        .to_u32()
        .ok_or_else(|| FinanceMathError::invalid(field, "term is too long"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_zero_and_negative() {
        assert!(require_positive("x", dec!(0)).is_err());
        assert!(require_positive("x", dec!(-1)).is_err());
        assert!(require_positive("x", dec!(0.01)).is_ok());
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert!(require_non_negative("x", Decimal::ZERO).is_ok());
        let err = require_non_negative("rate", dec!(-0.5)).unwrap_err();
        assert_eq!(err.field(), "rate");
    }

    #[test]
    fn test_checked_sum_names_the_overflowing_term() {
        assert_eq!(checked_sum([("a", dec!(1)), ("b", dec!(2))]).unwrap(), dec!(3));
        let err = checked_sum([("a", Decimal::MAX), ("b", Decimal::ZERO), ("c", dec!(1))]).unwrap_err();
        assert_eq!(err.field(), "c");
    }

    #[test]
    fn test_whole_months() {
        assert_eq!(whole_months("t", dec!(1)).unwrap(), 12);
        assert_eq!(whole_months("t", dec!(2.5)).unwrap(), 30);
        assert_eq!(whole_months("t", dec!(0.25)).unwrap(), 3);
        assert!(whole_months("t", dec!(1.01)).is_err());
        assert!(whole_months("t", dec!(-1)).is_err());
    }
}
