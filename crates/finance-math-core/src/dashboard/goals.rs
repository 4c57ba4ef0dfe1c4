use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};
use crate::validation::{require_non_negative, require_positive};
use crate::FinanceMathResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub target_amount: Money,
    pub current_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    OnTrack,
    Behind,
    AtRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub name: String,
    pub progress_pct: Percent,
    pub remaining_amount: Money,
    pub status: GoalStatus,
    /// Days from `as_of` to the deadline; negative once overdue.
    pub days_remaining: Option<i64>,
}

/// Progress towards a savings goal, capped at 100%.
///
/// Status bands: on track from 75%, behind from 40%, at risk below that.
pub fn goal_progress(goal: &Goal, as_of: Option<NaiveDate>) -> FinanceMathResult<GoalProgress> {
    require_positive("target_amount", goal.target_amount)?;
    require_non_negative("current_amount", goal.current_amount)?;

    // Below target the ratio is < 1, so the scaling cannot overflow
    let progress_pct = if goal.current_amount >= goal.target_amount {
        dec!(100)
    } else {
        goal.current_amount / goal.target_amount * dec!(100)
    };
    let status = if progress_pct >= dec!(75) {
        GoalStatus::OnTrack
    } else if progress_pct >= dec!(40) {
        GoalStatus::Behind
    } else {
        GoalStatus::AtRisk
    };

    let days_remaining = match (goal.deadline, as_of) {
        (Some(deadline), Some(today)) => Some((deadline - today).num_days()),
        _ => None,
    };

    Ok(GoalProgress {
        name: goal.name.clone(),
        progress_pct,
        remaining_amount: (goal.target_amount - goal.current_amount).max(Decimal::ZERO),
        status,
        days_remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: Decimal, current: Decimal) -> Goal {
        Goal {
            name: "Emergency fund".into(),
            target_amount: target,
            current_amount: current,
            deadline: NaiveDate::from_ymd_opt(2025, 12, 31),
        }
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(goal_progress(&goal(dec!(100), dec!(80)), None).unwrap().status, GoalStatus::OnTrack);
        assert_eq!(goal_progress(&goal(dec!(100), dec!(75)), None).unwrap().status, GoalStatus::OnTrack);
        assert_eq!(goal_progress(&goal(dec!(100), dec!(40)), None).unwrap().status, GoalStatus::Behind);
        assert_eq!(goal_progress(&goal(dec!(100), dec!(39)), None).unwrap().status, GoalStatus::AtRisk);
    }

    #[test]
    fn test_overfunded_goal_capped() {
        let p = goal_progress(&goal(dec!(1000), dec!(1500)), None).unwrap();
        assert_eq!(p.progress_pct, dec!(100));
        assert_eq!(p.remaining_amount, Decimal::ZERO);
    }

    #[test]
    fn test_huge_ratio_does_not_overflow() {
        let p = goal_progress(&goal(dec!(0.0001), Decimal::MAX), None).unwrap();
        assert_eq!(p.progress_pct, dec!(100));
        assert_eq!(p.status, GoalStatus::OnTrack);
    }

    #[test]
    fn test_days_remaining() {
        let g = goal(dec!(1000), dec!(100));
        let p = goal_progress(&g, NaiveDate::from_ymd_opt(2025, 12, 1)).unwrap();
        assert_eq!(p.days_remaining, Some(30));
        let late = goal_progress(&g, NaiveDate::from_ymd_opt(2026, 1, 2)).unwrap();
        assert_eq!(late.days_remaining, Some(-2));
        assert_eq!(goal_progress(&g, None).unwrap().days_remaining, None);
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(goal_progress(&goal(Decimal::ZERO, dec!(1)), None).is_err());
    }
}
