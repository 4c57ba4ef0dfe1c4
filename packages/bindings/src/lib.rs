use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use finance_math_core::dashboard::expenses::{self, Expense};
use finance_math_core::dashboard::goals::{self, Goal};
use finance_math_core::deposits::{interest, recurring};
use finance_math_core::investments::future_value;
use finance_math_core::loans::amortization;
use finance_math_core::portfolio::holdings::{self, Holding, Transaction};
use finance_math_core::portfolio::stats;
use finance_math_core::tax::income_tax;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse `input_json`, run `calculate`, and serialise the result.
fn call<I, O, F>(input_json: &str, calculate: F) -> NapiResult<String>
where
    I: for<'de> Deserialize<'de>,
    O: serde::Serialize,
    F: FnOnce(&I) -> finance_math_core::FinanceMathResult<O>,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calculate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct TransactionBatch {
    holding: Holding,
    transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct GoalQuery {
    goal: Goal,
    #[serde(default)]
    as_of: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize_loan(input_json: String) -> NapiResult<String> {
    call(&input_json, amortization::amortize_loan)
}

// ---------------------------------------------------------------------------
// Deposits
// ---------------------------------------------------------------------------

#[napi]
pub fn compound_interest(input_json: String) -> NapiResult<String> {
    call(&input_json, interest::compound)
}

#[napi]
pub fn fixed_deposit(input_json: String) -> NapiResult<String> {
    call(&input_json, interest::fixed_deposit)
}

#[napi]
pub fn simple_interest(input_json: String) -> NapiResult<String> {
    call(&input_json, interest::simple_interest)
}

#[napi]
pub fn recurring_deposit(input_json: String) -> NapiResult<String> {
    call(&input_json, recurring::recurring_deposit)
}

// ---------------------------------------------------------------------------
// Investments
// ---------------------------------------------------------------------------

#[napi]
pub fn future_value_with_contributions(input_json: String) -> NapiResult<String> {
    call(&input_json, future_value::future_value_with_contributions)
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_income_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, income_tax::compute_income_tax)
}

#[napi]
pub fn compare_regimes(input_json: String) -> NapiResult<String> {
    call(&input_json, income_tax::compare_regimes)
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

/// Input: `{ "holding": {...}, "transactions": [...] }`.
#[napi]
pub fn apply_transactions(input_json: String) -> NapiResult<String> {
    call(&input_json, |batch: &TransactionBatch| {
        holdings::apply_transactions(&batch.holding, &batch.transactions)
    })
}

#[napi]
pub fn holding_valuation(input_json: String) -> NapiResult<String> {
    call(&input_json, holdings::holding_valuation)
}

/// Input: an array of holdings.
#[napi]
pub fn portfolio_stats(input_json: String) -> NapiResult<String> {
    call(&input_json, |list: &Vec<Holding>| stats::portfolio_stats(list))
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Input: `{ "goal": {...}, "as_of": "YYYY-MM-DD" }`. Without `as_of`,
/// no days-remaining figure is reported.
#[napi]
pub fn goal_progress(input_json: String) -> NapiResult<String> {
    call(&input_json, |q: &GoalQuery| goals::goal_progress(&q.goal, q.as_of))
}

/// Input: an array of expenses.
#[napi]
pub fn expense_summary(input_json: String) -> NapiResult<String> {
    call(&input_json, |list: &Vec<Expense>| expenses::expense_summary(list))
}
