use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};
use crate::validation::{checked, checked_sum, require_non_negative};
use crate::FinanceMathResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub category: String,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
    pub share_pct: Percent,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: Money,
    pub categories: Vec<CategoryTotal>,
}

/// Total spending per category with each category's share of the whole,
/// largest first.
pub fn expense_summary(expenses: &[Expense]) -> FinanceMathResult<ExpenseSummary> {
    let mut totals: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
    for expense in expenses {
        require_non_negative("amount", expense.amount)?;
        let entry = totals.entry(expense.category.as_str()).or_insert((Decimal::ZERO, 0));
        entry.0 = checked("amount", entry.0.checked_add(expense.amount))?;
        entry.1 += 1;
    }

    let total = checked_sum(totals.values().map(|(amount, _)| ("amount", *amount)))?;

    let mut categories: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (amount, count))| CategoryTotal {
            category: category.to_string(),
            amount,
            share_pct: if total.is_zero() {
                Decimal::ZERO
            } else {
                amount / total * dec!(100)
            },
            count,
        })
        .collect();
    // BTreeMap order makes the name the tie-breaker
    categories.sort_by(|a, b| b.amount.cmp(&a.amount));

    Ok(ExpenseSummary { total, categories })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(category: &str, amount: Decimal) -> Expense {
        Expense {
            category: category.into(),
            amount,
            date: None,
            description: None,
        }
    }

    #[test]
    fn test_groups_and_sorts() {
        let expenses = vec![
            expense("Food", dec!(300)),
            expense("Rent", dec!(1200)),
            expense("Food", dec!(200)),
            expense("Travel", dec!(500)),
        ];
        let summary = expense_summary(&expenses).unwrap();
        assert_eq!(summary.total, dec!(2200));
        let names: Vec<&str> = summary.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Travel"]);
        assert_eq!(summary.categories[1].count, 2);
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let expenses = vec![expense("A", dec!(1)), expense("B", dec!(1)), expense("C", dec!(2))];
        let summary = expense_summary(&expenses).unwrap();
        assert_eq!(summary.categories[0].share_pct, dec!(50));
        let sum: Decimal = summary.categories.iter().map(|c| c.share_pct).sum();
        assert_eq!(sum, dec!(100));
    }

    #[test]
    fn test_empty_and_zero_total() {
        assert!(expense_summary(&[]).unwrap().categories.is_empty());
        let summary = expense_summary(&[expense("A", Decimal::ZERO)]).unwrap();
        assert_eq!(summary.categories[0].share_pct, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let same = [expense("A", Decimal::MAX), expense("A", dec!(1))];
        assert_eq!(expense_summary(&same).unwrap_err().field(), "amount");
        let split = [expense("A", Decimal::MAX), expense("B", dec!(1))];
        assert_eq!(expense_summary(&split).unwrap_err().field(), "amount");
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(expense_summary(&[expense("A", dec!(-5))]).is_err());
    }
}
