use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::FinanceMathError;
use crate::time_value::{annuity_factor, compound_factor, growth_factor, periodic_rate};
use crate::types::{CompoundingFrequency, Money, Percent, Rate, Years};
use crate::validation::{checked, checked_sum, require_non_negative};
use crate::FinanceMathResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lump sum plus a regular monthly contribution, compounded at `compounding`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub principal: Money,
    pub monthly_contribution: Money,
    pub annual_rate_pct: Percent,
    pub years: Years,
    /// The monthly contribution is spread evenly over the compounding
    /// periods of a year, so non-monthly frequencies credit `monthly × 12 / n`
    /// per period rather than the full monthly amount.
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

/// Cumulative position at the end of a whole year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    pub year: u32,
    pub total_value: Money,
    pub total_contributed: Money,
    pub interest_earned: Money,
}

/// Year-by-year view of an investment, computed on demand.
///
/// Holds only the parameters; every snapshot is recomputed from the start of
/// the investment, so the sequence can be iterated any number of times and
/// each pass yields the same values. Serialises as an array of snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyBreakdown {
    principal: Money,
    monthly_contribution: Money,
    per_period_contribution: Money,
    rate_per_period: Rate,
    periods_per_year: u32,
    years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentOutput {
    pub future_value: Money,
    pub total_contributions: Money,
    pub total_interest: Money,
    pub yearly_breakdown: YearlyBreakdown,
}

// ---------------------------------------------------------------------------
// Breakdown sequence
// ---------------------------------------------------------------------------

impl YearlyBreakdown {
    /// Number of whole years covered.
    pub fn len(&self) -> usize {
        self.years as usize
    }

    pub fn is_empty(&self) -> bool {
        self.years == 0
    }

    pub fn iter(&self) -> YearSnapshots<'_> {
        YearSnapshots {
            breakdown: self,
            next_year: 1,
        }
    }

    /// Cumulative value at the end of `year` (1-based).
    pub fn snapshot(&self, year: u32) -> FinanceMathResult<YearSnapshot> {
        if year == 0 || year > self.years {
            return Err(FinanceMathError::invalid(
                "year",
                format!("year must be between 1 and {}", self.years),
            ));
        }
        let periods = year
            .checked_mul(self.periods_per_year)
            .ok_or_else(|| FinanceMathError::invalid("year", "too many compounding periods"))?;
        let growth = compound_factor(self.rate_per_period, periods)?;
        let total_value = accumulated_value(
            self.principal,
            self.per_period_contribution,
            self.rate_per_period,
            Decimal::from(periods),
            growth,
        )?;
        let total_contributed =
            contributed(self.principal, self.monthly_contribution, Decimal::from(year))?;

        Ok(YearSnapshot {
            year,
            total_value,
            total_contributed,
            interest_earned: total_value - total_contributed,
        })
    }
}

/// Iterator over the snapshots of a [`YearlyBreakdown`].
#[derive(Debug, Clone)]
pub struct YearSnapshots<'a> {
    breakdown: &'a YearlyBreakdown,
    next_year: u32,
}

impl Iterator for YearSnapshots<'_> {
    type Item = YearSnapshot;

    fn next(&mut self) -> Option<YearSnapshot> {
        if self.next_year > self.breakdown.years {
            return None;
        }
        let year = self.next_year;
        self.next_year += 1;
        // Earlier years never exceed the full-term value, which was already
        // computed without overflow when the breakdown was built.
        let snapshot = self.breakdown.snapshot(year);
        debug_assert!(snapshot.is_ok(), "year {year} of the breakdown failed: {snapshot:?}");
        snapshot.ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.breakdown.years + 1).saturating_sub(self.next_year) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for YearSnapshots<'_> {}

impl<'a> IntoIterator for &'a YearlyBreakdown {
    type Item = YearSnapshot;
    type IntoIter = YearSnapshots<'a>;

    fn into_iter(self) -> YearSnapshots<'a> {
        self.iter()
    }
}

impl Serialize for YearlyBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// P·(1+r)^n + C·annuity(r, n), overflow-checked.
fn accumulated_value(
    principal: Money,
    per_period_contribution: Money,
    rate: Rate,
    periods: Decimal,
    growth: Decimal,
) -> FinanceMathResult<Money> {
    let lump = checked("principal", principal.checked_mul(growth))?;
    let annuity = annuity_factor(rate, periods, growth)?;
    let stream = checked(
        "monthly_contribution",
        per_period_contribution.checked_mul(annuity),
    )?;
    checked_sum([("principal", lump), ("monthly_contribution", stream)])
}

/// Principal plus contributions paid over `years`.
fn contributed(principal: Money, monthly_contribution: Money, years: Decimal) -> FinanceMathResult<Money> {
    let stream = monthly_contribution
        .checked_mul(dec!(12))
        .and_then(|v| v.checked_mul(years));
    let stream = checked("monthly_contribution", stream)?;
    checked_sum([("principal", principal), ("monthly_contribution", stream)])
}

/// Future value of a lump sum plus monthly contributions.
///
/// Contributions are converted to the compounding period (monthly × 12 / n)
/// and credited at the end of each period, so the contributed total is the
/// same whatever the frequency.
pub fn future_value_with_contributions(input: &InvestmentInput) -> FinanceMathResult<InvestmentOutput> {
    require_non_negative("principal", input.principal)?;
    require_non_negative("monthly_contribution", input.monthly_contribution)?;
    require_non_negative("annual_rate_pct", input.annual_rate_pct)?;
    require_non_negative("years", input.years)?;

    let n = input.compounding.periods_per_year();
    let rate = periodic_rate(input.annual_rate_pct, n);
    let per_period_contribution = checked(
        "monthly_contribution",
        input.monthly_contribution.checked_mul(dec!(12)),
    )? / Decimal::from(n);
    let periods = checked("years", input.years.checked_mul(Decimal::from(n)))?;

    let growth = growth_factor(rate, periods)?;
    let future_value = accumulated_value(input.principal, per_period_contribution, rate, periods, growth)?;
    let total_contributions = contributed(input.principal, input.monthly_contribution, input.years)?;

    let whole_years = input
        .years
        .trunc()
        .to_u32()
        .ok_or_else(|| FinanceMathError::invalid("years", "investment horizon is too long"))?;

    Ok(InvestmentOutput {
        future_value,
        total_contributions,
        total_interest: future_value - total_contributions,
        yearly_breakdown: YearlyBreakdown {
            principal: input.principal,
            monthly_contribution: input.monthly_contribution,
            per_period_contribution,
            rate_per_period: rate,
            periods_per_year: n,
            years: whole_years,
        },
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
