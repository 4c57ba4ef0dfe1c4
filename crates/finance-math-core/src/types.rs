use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Rates expressed in percentage points (5 = 5%), as entered on calculator forms.
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// How many times per year interest is credited to the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    Annually,
    Semiannually,
    Quarterly,
    #[default]
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::Semiannually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }

    /// Parse the lowercase names used on the calculator forms.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "annually" | "annual" | "yearly" => Some(CompoundingFrequency::Annually),
            "semiannually" | "semiannual" | "half-yearly" => Some(CompoundingFrequency::Semiannually),
            "quarterly" => Some(CompoundingFrequency::Quarterly),
            "monthly" => Some(CompoundingFrequency::Monthly),
            "daily" => Some(CompoundingFrequency::Daily),
            _ => None,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata attached by the caller that timed the computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata.
///
/// The calculation functions themselves return bare results so that repeated
/// calls stay identical; front ends time the call and wrap it here.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        assert_eq!(CompoundingFrequency::Annually.periods_per_year(), 1);
        assert_eq!(CompoundingFrequency::Semiannually.periods_per_year(), 2);
        assert_eq!(CompoundingFrequency::Quarterly.periods_per_year(), 4);
        assert_eq!(CompoundingFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(CompoundingFrequency::Daily.periods_per_year(), 365);
    }

    #[test]
    fn test_frequency_serialises_lowercase() {
        let json = serde_json::to_string(&CompoundingFrequency::Quarterly).unwrap();
        assert_eq!(json, "\"quarterly\"");
        let parsed: CompoundingFrequency = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(parsed, CompoundingFrequency::Daily);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            CompoundingFrequency::from_name("Monthly"),
            Some(CompoundingFrequency::Monthly)
        );
        assert_eq!(
            CompoundingFrequency::from_name("annual"),
            Some(CompoundingFrequency::Annually)
        );
        assert_eq!(CompoundingFrequency::from_name("hourly"), None);
    }

    #[test]
    fn test_with_metadata_envelope() {
        let out = with_metadata(
            "test",
            &serde_json::json!({ "x": 1 }),
            vec!["w".into()],
            42,
            7u32,
        );
        assert_eq!(out.result, 7);
        assert_eq!(out.metadata.computation_time_us, 42);
        assert_eq!(out.warnings, vec!["w".to_string()]);
    }
}
