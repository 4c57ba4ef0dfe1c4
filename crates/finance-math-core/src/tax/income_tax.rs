use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::slabs::{apply_slabs, slabs_for, SlabCharge, TaxRegime};
use crate::types::{Money, Rate};
use crate::validation::{checked, checked_sum, require_non_negative};
use crate::FinanceMathResult;

/// Health and education cess on the computed tax.
pub const CESS_RATE: Rate = dec!(0.04);
/// Section 80C ceiling (old regime only).
pub const SECTION_80C_CAP: Money = dec!(150_000);
/// Section 80D ceiling (old regime only).
pub const SECTION_80D_CAP: Money = dec!(25_000);
/// NPS contribution ceiling (old regime only).
pub const NPS_CAP: Money = dec!(50_000);

const DEFAULT_STANDARD_DEDUCTION: Money = dec!(50_000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxInput {
    #[serde(default)]
    pub regime: TaxRegime,
    #[serde(default)]
    pub salary: Money,
    #[serde(default)]
    pub rental_income: Money,
    #[serde(default)]
    pub other_income: Money,
    #[serde(default = "default_standard_deduction")]
    pub standard_deduction: Money,
    #[serde(default)]
    pub section_80c: Money,
    #[serde(default)]
    pub section_80d: Money,
    #[serde(default)]
    pub hra: Money,
    #[serde(default)]
    pub lta: Money,
    #[serde(default)]
    pub nps: Money,
}

fn default_standard_deduction() -> Money {
    DEFAULT_STANDARD_DEDUCTION
}

impl Default for TaxInput {
    fn default() -> Self {
        TaxInput {
            regime: TaxRegime::New,
            salary: Decimal::ZERO,
            rental_income: Decimal::ZERO,
            other_income: Decimal::ZERO,
            standard_deduction: DEFAULT_STANDARD_DEDUCTION,
            section_80c: Decimal::ZERO,
            section_80d: Decimal::ZERO,
            hra: Decimal::ZERO,
            lta: Decimal::ZERO,
            nps: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: TaxRegime,
    pub gross_income: Money,
    pub total_deductions: Money,
    pub taxable_income: Money,
    pub tax_amount: Money,
    pub cess: Money,
    pub total_tax: Money,
    pub effective_rate: Rate,
    pub slab_breakdown: Vec<SlabCharge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub new_regime: TaxResult,
    pub old_regime: TaxResult,
    pub recommended: TaxRegime,
    pub tax_saving: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Compute income tax, cess and total liability under the input's regime.
pub fn compute_income_tax(input: &TaxInput) -> FinanceMathResult<TaxResult> {
    validate(input)?;

    let gross_income = checked_sum([
        ("salary", input.salary),
        ("rental_income", input.rental_income),
        ("other_income", input.other_income),
    ])?;
    let total_deductions = deductions(input)?;
    let taxable_income = (gross_income - total_deductions).max(Decimal::ZERO);

    let slab_breakdown = apply_slabs(taxable_income, &slabs_for(input.regime));
    let tax_amount = checked_sum(slab_breakdown.iter().map(|c| ("taxable_income", c.tax)))?;
    let cess = checked("taxable_income", tax_amount.checked_mul(CESS_RATE))?;
    let total_tax = checked_sum([("taxable_income", tax_amount), ("taxable_income", cess)])?;

    let effective_rate = if gross_income > Decimal::ZERO {
        total_tax / gross_income
    } else {
        Decimal::ZERO
    };

    Ok(TaxResult {
        regime: input.regime,
        gross_income,
        total_deductions,
        taxable_income,
        tax_amount,
        cess,
        total_tax,
        effective_rate,
        slab_breakdown,
    })
}

/// Evaluate the same incomes and deductions under both regimes and recommend
/// the cheaper one. Ties go to the new regime.
pub fn compare_regimes(input: &TaxInput) -> FinanceMathResult<RegimeComparison> {
    let new_regime = compute_income_tax(&TaxInput {
        regime: TaxRegime::New,
        ..input.clone()
    })?;
    let old_regime = compute_income_tax(&TaxInput {
        regime: TaxRegime::Old,
        ..input.clone()
    })?;

    let recommended = if old_regime.total_tax < new_regime.total_tax {
        TaxRegime::Old
    } else {
        TaxRegime::New
    };
    let tax_saving = (new_regime.total_tax - old_regime.total_tax).abs();

    Ok(RegimeComparison {
        new_regime,
        old_regime,
        recommended,
        tax_saving,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate(input: &TaxInput) -> FinanceMathResult<()> {
    let fields = [
        ("salary", input.salary),
        ("rental_income", input.rental_income),
        ("other_income", input.other_income),
        ("standard_deduction", input.standard_deduction),
        ("section_80c", input.section_80c),
        ("section_80d", input.section_80d),
        ("hra", input.hra),
        ("lta", input.lta),
        ("nps", input.nps),
    ];
    for (field, value) in fields {
        require_non_negative(field, value)?;
    }
    Ok(())
}

/// Old regime allows capped chapter VI-A deductions plus HRA/LTA; the new
/// regime allows the standard deduction only.
fn deductions(input: &TaxInput) -> FinanceMathResult<Money> {
    match input.regime {
        TaxRegime::New => Ok(input.standard_deduction),
        TaxRegime::Old => checked_sum([
            ("standard_deduction", input.standard_deduction),
            ("section_80c", input.section_80c.min(SECTION_80C_CAP)),
            ("section_80d", input.section_80d.min(SECTION_80D_CAP)),
            ("hra", input.hra),
            ("lta", input.lta),
            ("nps", input.nps.min(NPS_CAP)),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn salaried(regime: TaxRegime, salary: Decimal) -> TaxInput {
        TaxInput {
            regime,
            salary,
            ..TaxInput::default()
        }
    }

    #[test]
    fn test_new_regime_ten_lakh_salary() {
        let result = compute_income_tax(&salaried(TaxRegime::New, dec!(1_000_000))).unwrap();
        assert_eq!(result.gross_income, dec!(1_000_000));
        assert_eq!(result.total_deductions, dec!(50_000));
        assert_eq!(result.taxable_income, dec!(950_000));
        assert_eq!(result.tax_amount, dec!(52_500));
        assert_eq!(result.cess, dec!(2_100));
        assert_eq!(result.total_tax, dec!(54_600));
    }

    #[test]
    fn test_breakpoint_exact_and_one_above() {
        let at = compute_income_tax(&TaxInput {
            salary: dec!(300_000),
            standard_deduction: Decimal::ZERO,
            ..TaxInput::default()
        })
        .unwrap();
        assert_eq!(at.tax_amount, Decimal::ZERO);

        let above = compute_income_tax(&TaxInput {
            salary: dec!(300_001),
            standard_deduction: Decimal::ZERO,
            ..TaxInput::default()
        })
        .unwrap();
        assert_eq!(above.tax_amount, dec!(0.05));
    }

    #[test]
    fn test_old_regime_caps_deductions() {
        let input = TaxInput {
            regime: TaxRegime::Old,
            salary: dec!(1_500_000),
            section_80c: dec!(200_000),
            section_80d: dec!(40_000),
            nps: dec!(80_000),
            hra: dec!(120_000),
            lta: dec!(30_000),
            ..TaxInput::default()
        };
        let result = compute_income_tax(&input).unwrap();
        // 50k + 150k + 25k + 120k + 30k + 50k
        assert_eq!(result.total_deductions, dec!(425_000));
        assert_eq!(result.taxable_income, dec!(1_075_000));
        assert_eq!(result.tax_amount, dec!(135_000));
    }

    #[test]
    fn test_new_regime_ignores_chapter_via_deductions() {
        let input = TaxInput {
            regime: TaxRegime::New,
            salary: dec!(800_000),
            section_80c: dec!(150_000),
            hra: dec!(100_000),
            ..TaxInput::default()
        };
        let result = compute_income_tax(&input).unwrap();
        assert_eq!(result.total_deductions, dec!(50_000));
    }

    #[test]
    fn test_taxable_income_floored_at_zero() {
        let input = TaxInput {
            regime: TaxRegime::Old,
            salary: dec!(100_000),
            section_80c: dec!(150_000),
            ..TaxInput::default()
        };
        let result = compute_income_tax(&input).unwrap();
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
        assert!(result.slab_breakdown.is_empty());
    }

    #[test]
    fn test_income_components_add_up() {
        let input = TaxInput {
            salary: dec!(600_000),
            rental_income: dec!(200_000),
            other_income: dec!(50_000),
            ..TaxInput::default()
        };
        let result = compute_income_tax(&input).unwrap();
        assert_eq!(result.gross_income, dec!(850_000));
    }

    #[test]
    fn test_negative_component_rejected() {
        let input = TaxInput {
            salary: dec!(500_000),
            section_80d: dec!(-1),
            ..TaxInput::default()
        };
        let err = compute_income_tax(&input).unwrap_err();
        assert_eq!(err.field(), "section_80d");
    }

    #[test]
    fn test_overflowing_income_is_an_error() {
        let input = TaxInput {
            salary: Decimal::MAX,
            rental_income: dec!(1),
            ..TaxInput::default()
        };
        let err = compute_income_tax(&input).unwrap_err();
        assert_eq!(err.field(), "rental_income");
    }

    #[test]
    fn test_overflowing_deductions_are_an_error() {
        let input = TaxInput {
            regime: TaxRegime::Old,
            salary: dec!(1_000_000),
            standard_deduction: Decimal::ZERO,
            hra: Decimal::MAX,
            lta: dec!(1),
            ..TaxInput::default()
        };
        let err = compute_income_tax(&input).unwrap_err();
        assert_eq!(err.field(), "lta");
        // the new regime never adds HRA/LTA
        assert!(compute_income_tax(&TaxInput { regime: TaxRegime::New, ..input }).is_ok());
    }

    #[test]
    fn test_same_input_same_output() {
        let input = TaxInput {
            regime: TaxRegime::Old,
            salary: dec!(1_350_000),
            section_80c: dec!(90_000),
            hra: dec!(60_000),
            ..TaxInput::default()
        };
        assert_eq!(compute_income_tax(&input).unwrap(), compute_income_tax(&input).unwrap());
    }

    #[test]
    fn test_effective_rate() {
        let result = compute_income_tax(&salaried(TaxRegime::New, dec!(1_000_000))).unwrap();
        assert_eq!(result.effective_rate, dec!(0.0546));
        let zero = compute_income_tax(&salaried(TaxRegime::New, Decimal::ZERO)).unwrap();
        assert_eq!(zero.effective_rate, Decimal::ZERO);
    }

    #[test]
    fn test_compare_regimes_prefers_old_with_heavy_deductions() {
        let input = TaxInput {
            salary: dec!(1_200_000),
            section_80c: dec!(150_000),
            section_80d: dec!(25_000),
            nps: dec!(50_000),
            hra: dec!(250_000),
            ..TaxInput::default()
        };
        let cmp = compare_regimes(&input).unwrap();
        assert_eq!(cmp.new_regime.regime, TaxRegime::New);
        assert_eq!(cmp.old_regime.regime, TaxRegime::Old);
        assert_eq!(cmp.recommended, TaxRegime::Old);
        assert_eq!(
            cmp.tax_saving,
            cmp.new_regime.total_tax - cmp.old_regime.total_tax
        );
    }

    #[test]
    fn test_compare_regimes_prefers_new_without_deductions() {
        let cmp = compare_regimes(&salaried(TaxRegime::Old, dec!(1_000_000))).unwrap();
        assert_eq!(cmp.recommended, TaxRegime::New);
        assert!(cmp.tax_saving > Decimal::ZERO);
    }

    #[test]
    fn test_missing_fields_default_on_deserialise() {
        let input: TaxInput = serde_json::from_str(r#"{"regime":"old","salary":"700000"}"#).unwrap();
        assert_eq!(input.regime, TaxRegime::Old);
        assert_eq!(input.standard_deduction, dec!(50_000));
        assert_eq!(input.hra, Decimal::ZERO);
    }
}
