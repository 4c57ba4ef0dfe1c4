pub mod dashboard;
pub mod deposits;
pub mod investments;
pub mod loans;
pub mod portfolio;
pub mod tax;

use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use finance_math_core::{with_metadata, FinanceMathResult};

pub type CommandResult = Result<Value, Box<dyn std::error::Error>>;

/// Run a core calculation, time it and wrap the result in the standard
/// output envelope.
pub(crate) fn run_timed<I, T, F>(
    operation: &str,
    methodology: &str,
    input: &I,
    warnings: Vec<String>,
    calculate: F,
) -> CommandResult
where
    I: Serialize,
    T: Serialize,
    F: FnOnce(&I) -> FinanceMathResult<T>,
{
    tracing::debug!(operation, "running calculation");
    let start = Instant::now();
    let result = calculate(input).inspect_err(|e| tracing::warn!(operation, error = %e, "calculation rejected input"))?;
    let elapsed = start.elapsed().as_micros() as u64;
    tracing::debug!(operation, elapsed_us = elapsed, "calculation finished");

    Ok(serde_json::to_value(with_metadata(
        methodology,
        input,
        warnings,
        elapsed,
        result,
    ))?)
}

/// Unwrap a required flag when no JSON input was supplied.
pub(crate) fn required<T>(value: Option<T>, flag: &str) -> Result<T, Box<dyn std::error::Error>> {
    value.ok_or_else(|| format!("--{flag} is required (or provide --input)").into())
}
