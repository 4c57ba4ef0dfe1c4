use std::collections::BTreeMap;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::holdings::{position_values, validate_holding, AssetType, Holding};
use crate::types::{Money, Percent};
use crate::validation::{checked, checked_sum};
use crate::FinanceMathResult;

/// Value and cost of a group of holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationBucket {
    pub value: Money,
    pub investment: Money,
}

impl AllocationBucket {
    fn add(&mut self, value: Money, investment: Money) -> FinanceMathResult<()> {
        self.value = checked_sum([("current_price", self.value), ("current_price", value)])?;
        self.investment = checked_sum([("avg_price", self.investment), ("avg_price", investment)])?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub holdings_count: usize,
    pub total_value: Money,
    pub total_investment: Money,
    pub profit_loss: Money,
    pub profit_loss_pct: Option<Percent>,
    pub by_type: BTreeMap<AssetType, AllocationBucket>,
    pub by_sector: BTreeMap<String, AllocationBucket>,
}

/// Aggregate value, cost and profit/loss across holdings, grouped by asset
/// type and by sector. Holdings without a sector only count towards totals
/// and `by_type`.
pub fn portfolio_stats(holdings: &[Holding]) -> FinanceMathResult<PortfolioStats> {
    let mut totals = AllocationBucket::default();
    let mut by_type: BTreeMap<AssetType, AllocationBucket> = BTreeMap::new();
    let mut by_sector: BTreeMap<String, AllocationBucket> = BTreeMap::new();

    for holding in holdings {
        validate_holding(holding)?;

        let (value, investment) = position_values(holding)?;
        totals.add(value, investment)?;
        by_type.entry(holding.asset_type).or_default().add(value, investment)?;

        if let Some(sector) = holding.sector.as_deref().filter(|s| !s.trim().is_empty()) {
            by_sector.entry(sector.to_string()).or_default().add(value, investment)?;
        }
    }

    let AllocationBucket {
        value: total_value,
        investment: total_investment,
    } = totals;
    let profit_loss = total_value - total_investment;
    let profit_loss_pct = if total_investment.is_zero() {
        None
    } else {
        let pct = profit_loss
            .checked_div(total_investment)
            .and_then(|r| r.checked_mul(dec!(100)));
        Some(checked("avg_price", pct)?)
    };

    Ok(PortfolioStats {
        holdings_count: holdings.len(),
        total_value,
        total_investment,
        profit_loss,
        profit_loss_pct,
        by_type,
        by_sector,
    })
}
