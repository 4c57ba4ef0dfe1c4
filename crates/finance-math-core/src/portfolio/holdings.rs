use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinanceMathError;
use crate::types::{Money, Percent};
use crate::validation::{checked, checked_sum, require_non_negative, require_positive};
use crate::FinanceMathResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Equity,
    #[serde(rename = "ETF")]
    Etf,
    #[serde(alias = "Mutual Fund")]
    MutualFund,
    Bond,
    Commodity,
    Cryptocurrency,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub side: TransactionSide,
    pub quantity: Decimal,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// A position in one instrument, valued at `avg_price` cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub asset_type: AssetType,
    pub quantity: Decimal,
    pub avg_price: Money,
    pub current_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionOutcome {
    pub holding: Holding,
    /// Gain (or loss, when negative) realised by a sale; zero for purchases.
    pub realized_gain_loss: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValuation {
    pub symbol: String,
    pub current_value: Money,
    pub invested_value: Money,
    pub profit_loss: Money,
    /// `None` when the holding has no cost basis.
    pub profit_loss_pct: Option<Percent>,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Apply a buy or sell to a holding and return the updated holding.
///
/// Buys re-average the cost: (q₀·p₀ + q·p) / (q₀ + q). Sells reduce the
/// quantity at unchanged average cost and realise (price − avg) × q.
pub fn apply_transaction(holding: &Holding, txn: &Transaction) -> FinanceMathResult<TransactionOutcome> {
    validate_holding(holding)?;
    require_positive("quantity", txn.quantity)?;
    require_non_negative("price", txn.price)?;

    let mut updated = holding.clone();
    let mut realized_gain_loss = Decimal::ZERO;

    match txn.side {
        TransactionSide::Buy => {
            let new_quantity = checked_sum([("quantity", holding.quantity), ("quantity", txn.quantity)])?;
            let held_cost = checked("avg_price", holding.quantity.checked_mul(holding.avg_price))?;
            let bought_cost = checked("price", txn.quantity.checked_mul(txn.price))?;
            let new_cost = checked_sum([("avg_price", held_cost), ("price", bought_cost)])?;
            updated.quantity = new_quantity;
            updated.avg_price = new_cost / new_quantity;
        }
        TransactionSide::Sell => {
            if txn.quantity > holding.quantity {
                return Err(FinanceMathError::invalid(
                    "quantity",
                    format!(
                        "cannot sell {} of {}: only {} held",
                        txn.quantity, holding.symbol, holding.quantity
                    ),
                ));
            }
            updated.quantity = holding.quantity - txn.quantity;
            realized_gain_loss = checked("price", (txn.price - holding.avg_price).checked_mul(txn.quantity))?;
        }
    }

    updated.transactions.push(txn.clone());

    Ok(TransactionOutcome {
        holding: updated,
        realized_gain_loss,
    })
}

/// Replay a sequence of transactions against an opening holding.
pub fn apply_transactions(holding: &Holding, txns: &[Transaction]) -> FinanceMathResult<TransactionOutcome> {
    let mut outcome = TransactionOutcome {
        holding: holding.clone(),
        realized_gain_loss: Decimal::ZERO,
    };
    for txn in txns {
        let step = apply_transaction(&outcome.holding, txn)?;
        outcome.realized_gain_loss = checked(
            "price",
            outcome.realized_gain_loss.checked_add(step.realized_gain_loss),
        )?;
        outcome.holding = step.holding;
    }
    Ok(outcome)
}

/// Current value and unrealised profit/loss of a holding.
pub fn holding_valuation(holding: &Holding) -> FinanceMathResult<HoldingValuation> {
    validate_holding(holding)?;

    let (current_value, invested_value) = position_values(holding)?;
    let profit_loss_pct = if holding.avg_price.is_zero() {
        None
    } else {
        let pct = (holding.current_price - holding.avg_price)
            .checked_div(holding.avg_price)
            .and_then(|r| r.checked_mul(dec!(100)));
        Some(checked("avg_price", pct)?)
    };

    Ok(HoldingValuation {
        symbol: holding.symbol.clone(),
        current_value,
        invested_value,
        profit_loss: current_value - invested_value,
        profit_loss_pct,
    })
}

/// (quantity × current_price, quantity × avg_price).
pub(crate) fn position_values(holding: &Holding) -> FinanceMathResult<(Money, Money)> {
    let current = checked("current_price", holding.quantity.checked_mul(holding.current_price))?;
    let invested = checked("avg_price", holding.quantity.checked_mul(holding.avg_price))?;
    Ok((current, invested))
}

pub(crate) fn validate_holding(holding: &Holding) -> FinanceMathResult<()> {
    if holding.symbol.trim().is_empty() {
        return Err(FinanceMathError::invalid("symbol", "symbol must not be empty"));
    }
    require_non_negative("quantity", holding.quantity)?;
    require_non_negative("avg_price", holding.avg_price)?;
    require_non_negative("current_price", holding.current_price)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
