mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::dashboard::{ExpenseSummaryArgs, GoalProgressArgs};
use commands::deposits::{DepositArgs, RecurringDepositArgs, SimpleInterestArgs};
use commands::investments::FutureValueArgs;
use commands::loans::LoanArgs;
use commands::portfolio::{ApplyTransactionArgs, PortfolioStatsArgs};
use commands::tax::IncomeTaxArgs;

/// Personal-finance calculations
#[derive(Parser)]
#[command(
    name = "fm",
    version,
    about = "Personal-finance calculations with decimal precision",
    long_about = "A CLI for loan, deposit, investment and income-tax calculations \
                  with decimal precision. Supports amortization schedules, compound, \
                  simple and recurring-deposit interest, SIP growth, Indian income tax \
                  under both regimes, and portfolio/goal/expense dashboards."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Loan EMI and amortization schedule
    Loan(LoanArgs),
    /// Compound interest on a lump sum
    Compound(DepositArgs),
    /// Fixed deposit maturity
    FixedDeposit(DepositArgs),
    /// Simple interest
    SimpleInterest(SimpleInterestArgs),
    /// Recurring deposit maturity
    RecurringDeposit(RecurringDepositArgs),
    /// Future value of a lump sum plus monthly contributions
    FutureValue(FutureValueArgs),
    /// Income tax under the new or old regime
    IncomeTax(IncomeTaxArgs),
    /// Compare income tax under both regimes
    CompareRegimes(IncomeTaxArgs),
    /// Apply buy/sell transactions to a holding
    ApplyTransaction(ApplyTransactionArgs),
    /// Portfolio value and profit/loss breakdown
    PortfolioStats(PortfolioStatsArgs),
    /// Progress towards a savings goal
    GoalProgress(GoalProgressArgs),
    /// Expense totals by category
    ExpenseSummary(ExpenseSummaryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "fm=debug" } else { "fm=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the result; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: commands::CommandResult = match cli.command {
        Commands::Loan(args) => commands::loans::run_loan(args),
        Commands::Compound(args) => commands::deposits::run_compound(args),
        Commands::FixedDeposit(args) => commands::deposits::run_fixed_deposit(args),
        Commands::SimpleInterest(args) => commands::deposits::run_simple_interest(args),
        Commands::RecurringDeposit(args) => commands::deposits::run_recurring_deposit(args),
        Commands::FutureValue(args) => commands::investments::run_future_value(args),
        Commands::IncomeTax(args) => commands::tax::run_income_tax(args),
        Commands::CompareRegimes(args) => commands::tax::run_compare_regimes(args),
        Commands::ApplyTransaction(args) => commands::portfolio::run_apply_transaction(args),
        Commands::PortfolioStats(args) => commands::portfolio::run_portfolio_stats(args),
        Commands::GoalProgress(args) => commands::dashboard::run_goal_progress(args),
        Commands::ExpenseSummary(args) => commands::dashboard::run_expense_summary(args),
        Commands::Version => {
            println!("fm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
