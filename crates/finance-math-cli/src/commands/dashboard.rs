use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finance_math_core::dashboard::expenses::{expense_summary, Expense};
use finance_math_core::dashboard::goals::{goal_progress, Goal};

use super::{required, run_timed, CommandResult};
use crate::input;

/// Arguments for savings-goal progress
#[derive(Args)]
pub struct GoalProgressArgs {
    /// Goal name
    #[arg(long, default_value = "Goal")]
    pub name: String,

    /// Target amount
    #[arg(long)]
    pub target: Option<Decimal>,

    /// Amount saved so far
    #[arg(long, default_value = "0")]
    pub current: Decimal,

    /// Deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<NaiveDate>,

    /// Date to measure from (YYYY-MM-DD); defaults to today when a deadline is set
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Path to JSON/YAML input file with the goal (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for expense category breakdown
#[derive(Args)]
pub struct ExpenseSummaryArgs {
    /// JSON/YAML file with an array of expenses
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GoalQuery {
    goal: Goal,
    as_of: Option<NaiveDate>,
}

pub fn run_goal_progress(args: GoalProgressArgs) -> CommandResult {
    let goal: Goal = match input::load(args.input.as_deref())? {
        Some(goal) => goal,
        None => Goal {
            name: args.name,
            target_amount: required(args.target, "target")?,
            current_amount: args.current,
            deadline: args.deadline,
        },
    };

    // The library never reads the clock; the front end supplies "today".
    let as_of = args
        .as_of
        .or_else(|| goal.deadline.map(|_| chrono::Local::now().date_naive()));

    run_timed(
        "goal-progress",
        "Savings goal progress against target",
        &GoalQuery { goal, as_of },
        Vec::new(),
        |q| goal_progress(&q.goal, q.as_of),
    )
}

pub fn run_expense_summary(args: ExpenseSummaryArgs) -> CommandResult {
    let expenses: Vec<Expense> = input::require(args.input.as_deref(), "expense-summary")?;
    run_timed(
        "expense-summary",
        "Expense totals and shares by category",
        &expenses,
        Vec::new(),
        |e| expense_summary(e),
    )
}
