use clap::Args;
use serde::{Deserialize, Serialize};

use finance_math_core::portfolio::holdings::{
    apply_transactions, holding_valuation, Holding, HoldingValuation, Transaction,
};
use finance_math_core::portfolio::stats::{portfolio_stats, PortfolioStats};
use finance_math_core::FinanceMathResult;

use super::{run_timed, CommandResult};
use crate::input;

/// Arguments for applying buy/sell transactions to a holding
#[derive(Args)]
pub struct ApplyTransactionArgs {
    /// JSON/YAML file with `holding` and `transactions`
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for portfolio statistics
#[derive(Args)]
pub struct PortfolioStatsArgs {
    /// JSON/YAML file with an array of holdings
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TransactionBatch {
    holding: Holding,
    transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize)]
struct PortfolioReport {
    stats: PortfolioStats,
    holdings: Vec<HoldingValuation>,
}

fn portfolio_report(holdings: &[Holding]) -> FinanceMathResult<PortfolioReport> {
    let stats = portfolio_stats(holdings)?;
    let holdings = holdings
        .iter()
        .map(holding_valuation)
        .collect::<FinanceMathResult<Vec<_>>>()?;
    Ok(PortfolioReport { stats, holdings })
}

pub fn run_apply_transaction(args: ApplyTransactionArgs) -> CommandResult {
    let batch: TransactionBatch = input::require(args.input.as_deref(), "apply-transaction")?;
    run_timed(
        "apply-transaction",
        "Weighted-average cost update; sells realise against average cost",
        &batch,
        Vec::new(),
        |b| apply_transactions(&b.holding, &b.transactions),
    )
}

pub fn run_portfolio_stats(args: PortfolioStatsArgs) -> CommandResult {
    let holdings: Vec<Holding> = input::require(args.input.as_deref(), "portfolio-stats")?;

    let mut warnings = Vec::new();
    let unsectored = holdings.iter().filter(|h| h.sector.is_none()).count();
    if unsectored > 0 {
        warnings.push(format!("{unsectored} holding(s) without a sector excluded from by_sector"));
    }

    run_timed(
        "portfolio-stats",
        "Portfolio value, cost and profit/loss by asset type and sector",
        &holdings,
        warnings,
        |h| portfolio_report(h),
    )
}
