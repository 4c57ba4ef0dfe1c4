pub mod error;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "deposits")]
pub mod deposits;

#[cfg(feature = "investments")]
pub mod investments;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "portfolio")]
pub mod portfolio;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use error::FinanceMathError;
pub use types::*;

/// Standard result type for all finance-math operations
pub type FinanceMathResult<T> = Result<T, FinanceMathError>;
