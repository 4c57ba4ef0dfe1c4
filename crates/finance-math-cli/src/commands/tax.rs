use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use finance_math_core::tax::income_tax::{compare_regimes, compute_income_tax, TaxInput};
use finance_math_core::tax::slabs::TaxRegime;

use super::{run_timed, CommandResult};
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegimeArg {
    New,
    Old,
}

impl From<RegimeArg> for TaxRegime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::New => TaxRegime::New,
            RegimeArg::Old => TaxRegime::Old,
        }
    }
}

/// Arguments for Indian income tax (FY 2024-25 slabs)
#[derive(Args)]
pub struct IncomeTaxArgs {
    /// Tax regime
    #[arg(long, value_enum, default_value = "new")]
    pub regime: RegimeArg,

    /// Annual salary income
    #[arg(long, default_value = "0")]
    pub salary: Decimal,

    /// Annual rental income
    #[arg(long, default_value = "0")]
    pub rental_income: Decimal,

    /// Other annual income
    #[arg(long, default_value = "0")]
    pub other_income: Decimal,

    /// Standard deduction
    #[arg(long, default_value = "50000")]
    pub standard_deduction: Decimal,

    /// Section 80C investments (old regime, capped at 1.5L)
    #[arg(long = "section-80c", default_value = "0")]
    pub section_80c: Decimal,

    /// Section 80D health insurance (old regime, capped at 25k)
    #[arg(long = "section-80d", default_value = "0")]
    pub section_80d: Decimal,

    /// House rent allowance exemption (old regime)
    #[arg(long, default_value = "0")]
    pub hra: Decimal,

    /// Leave travel allowance exemption (old regime)
    #[arg(long, default_value = "0")]
    pub lta: Decimal,

    /// NPS contribution (old regime, capped at 50k)
    #[arg(long, default_value = "0")]
    pub nps: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn tax_input(args: IncomeTaxArgs) -> Result<TaxInput, Box<dyn std::error::Error>> {
    if let Some(tax) = input::load(args.input.as_deref())? {
        return Ok(tax);
    }
    Ok(TaxInput {
        regime: args.regime.into(),
        salary: args.salary,
        rental_income: args.rental_income,
        other_income: args.other_income,
        standard_deduction: args.standard_deduction,
        section_80c: args.section_80c,
        section_80d: args.section_80d,
        hra: args.hra,
        lta: args.lta,
        nps: args.nps,
    })
}

pub fn run_income_tax(args: IncomeTaxArgs) -> CommandResult {
    let tax = tax_input(args)?;

    let mut warnings = Vec::new();
    let chapter_via = tax.section_80c + tax.section_80d + tax.hra + tax.lta + tax.nps;
    if tax.regime == TaxRegime::New && chapter_via > Decimal::ZERO {
        warnings.push("New regime ignores 80C/80D/HRA/LTA/NPS deductions".to_string());
    }

    run_timed(
        "income-tax",
        "Indian income tax: marginal slab rates plus 4% cess",
        &tax,
        warnings,
        compute_income_tax,
    )
}

pub fn run_compare_regimes(args: IncomeTaxArgs) -> CommandResult {
    let tax = tax_input(args)?;
    run_timed(
        "compare-regimes",
        "Indian income tax: new vs old regime comparison",
        &tax,
        Vec::new(),
        compare_regimes,
    )
}
