pub mod holdings;
pub mod stats;
