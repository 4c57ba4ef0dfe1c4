use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceMathError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },
}

impl FinanceMathError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FinanceMathError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            FinanceMathError::InvalidInput { field, .. } => field,
        }
    }
}
