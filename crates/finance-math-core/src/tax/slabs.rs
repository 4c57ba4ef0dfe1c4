use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Income tax regime under Indian income-tax law.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    #[default]
    New,
    Old,
}

/// A taxable-income bracket taxed at a single marginal rate.
///
/// Covers income above `lower` up to and including `upper`; the top slab has
/// no upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower: Money,
    pub upper: Option<Money>,
    pub rate: Rate,
}

/// Tax charged within one slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabCharge {
    pub lower: Money,
    pub upper: Option<Money>,
    pub rate: Rate,
    pub taxable_in_slab: Money,
    pub tax: Money,
}

fn slab(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> TaxSlab {
    TaxSlab { lower, upper, rate }
}

/// Slab table for `regime` (FY 2024-25 rates).
pub fn slabs_for(regime: TaxRegime) -> Vec<TaxSlab> {
    match regime {
        TaxRegime::New => vec![
            slab(dec!(0), Some(dec!(300_000)), dec!(0)),
            slab(dec!(300_000), Some(dec!(600_000)), dec!(0.05)),
            slab(dec!(600_000), Some(dec!(900_000)), dec!(0.10)),
            slab(dec!(900_000), Some(dec!(1_200_000)), dec!(0.15)),
            slab(dec!(1_200_000), Some(dec!(1_500_000)), dec!(0.20)),
            slab(dec!(1_500_000), None, dec!(0.30)),
        ],
        TaxRegime::Old => vec![
            slab(dec!(0), Some(dec!(250_000)), dec!(0)),
            slab(dec!(250_000), Some(dec!(500_000)), dec!(0.05)),
            slab(dec!(500_000), Some(dec!(1_000_000)), dec!(0.20)),
            slab(dec!(1_000_000), None, dec!(0.30)),
        ],
    }
}

/// Apply marginal slab rates to `income`, returning the charge in every slab
/// the income reaches. Slabs must be sorted by `lower` and contiguous.
pub fn apply_slabs(income: Money, slabs: &[TaxSlab]) -> Vec<SlabCharge> {
    slabs
        .iter()
        .take_while(|s| income > s.lower)
        .map(|s| {
            let top = match s.upper {
                Some(upper) => income.min(upper),
                None => income,
            };
            let taxable_in_slab = top - s.lower;
            SlabCharge {
                lower: s.lower,
                upper: s.upper,
                rate: s.rate,
                taxable_in_slab,
                tax: taxable_in_slab * s.rate,
            }
        })
        .collect()
}

/// Total slab tax on `income`.
pub fn slab_tax(income: Money, slabs: &[TaxSlab]) -> Money {
    apply_slabs(income, slabs).iter().map(|c| c.tax).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_regime_breakpoints() {
        let new = slabs_for(TaxRegime::New);
        assert_eq!(slab_tax(dec!(300_000), &new), Decimal::ZERO);
        assert_eq!(slab_tax(dec!(600_000), &new), dec!(15_000));
        assert_eq!(slab_tax(dec!(900_000), &new), dec!(45_000));
        assert_eq!(slab_tax(dec!(1_200_000), &new), dec!(90_000));
        assert_eq!(slab_tax(dec!(1_500_000), &new), dec!(150_000));
        assert_eq!(slab_tax(dec!(2_000_000), &new), dec!(300_000));
    }

    #[test]
    fn test_old_regime_breakpoints() {
        let old = slabs_for(TaxRegime::Old);
        assert_eq!(slab_tax(dec!(250_000), &old), Decimal::ZERO);
        assert_eq!(slab_tax(dec!(500_000), &old), dec!(12_500));
        assert_eq!(slab_tax(dec!(1_000_000), &old), dec!(112_500));
        assert_eq!(slab_tax(dec!(1_200_000), &old), dec!(172_500));
    }

    #[test]
    fn test_one_unit_above_breakpoint() {
        let new = slabs_for(TaxRegime::New);
        assert_eq!(slab_tax(dec!(300_001), &new), dec!(0.05));
    }

    #[test]
    fn test_breakdown_lists_reached_slabs_only() {
        let charges = apply_slabs(dec!(700_000), &slabs_for(TaxRegime::New));
        assert_eq!(charges.len(), 3);
        assert_eq!(charges[2].taxable_in_slab, dec!(100_000));
        assert_eq!(charges[2].tax, dec!(10_000));
    }

    #[test]
    fn test_zero_income() {
        assert!(apply_slabs(Decimal::ZERO, &slabs_for(TaxRegime::Old)).is_empty());
    }

    #[test]
    fn test_tables_are_contiguous() {
        for regime in [TaxRegime::New, TaxRegime::Old] {
            let table = slabs_for(regime);
            for pair in table.windows(2) {
                assert_eq!(pair[0].upper, Some(pair[1].lower));
                assert!(pair[1].rate >= pair[0].rate);
            }
            assert!(table.last().unwrap().upper.is_none());
        }
    }
}
