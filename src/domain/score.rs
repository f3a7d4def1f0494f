//! Composite 0-100 trading quality score and letter grade.
//!
//! Weighted sum of risk-adjusted return, profit factor, reward/risk,
//! streak balance, and drawdown recovery. Each component is clamped to
//! its bucket, so inputs beyond a scaling ceiling cannot overflow the
//! total and the score stays inside [0, 100].

use crate::domain::performance::PerformanceSummary;

const SHARPE_CEILING: f64 = 3.0;
const PROFIT_FACTOR_CEILING: f64 = 3.0;
const RISK_REWARD_CEILING: f64 = 3.0;
const STREAK_RATIO_CEILING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreInputs {
    pub sharpe_ratio: f64,
    pub profit_factor: f64,
    pub avg_risk_reward: Option<f64>,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    pub recovery_periods: Option<usize>,
}

impl From<&PerformanceSummary> for ScoreInputs {
    fn from(summary: &PerformanceSummary) -> Self {
        ScoreInputs {
            sharpe_ratio: summary.sharpe_ratio,
            profit_factor: summary.profit_factor,
            avg_risk_reward: summary.avg_risk_reward,
            longest_win_streak: summary.longest_win_streak,
            longest_loss_streak: summary.longest_loss_streak,
            recovery_periods: summary.recovery_periods,
        }
    }
}

fn bucket(value: f64, ceiling: f64, points: f64) -> f64 {
    (value / ceiling).clamp(0.0, 1.0) * points
}

/// Weighted composite: Sharpe up to 30, profit factor up to 25,
/// reward/risk up to 20, win/loss streak ratio up to 15, drawdown
/// recovery bonus up to 10.
pub fn composite_score(inputs: &ScoreInputs) -> f64 {
    let sharpe_pts = bucket(inputs.sharpe_ratio, SHARPE_CEILING, 30.0);
    let pf_pts = bucket(inputs.profit_factor, PROFIT_FACTOR_CEILING, 25.0);
    let rr_pts = bucket(
        inputs.avg_risk_reward.unwrap_or(0.0),
        RISK_REWARD_CEILING,
        20.0,
    );

    // a spotless record has no loss streak to divide by
    let loss_streak = inputs.longest_loss_streak.max(1) as f64;
    let streak_ratio = inputs.longest_win_streak as f64 / loss_streak;
    let streak_pts = bucket(streak_ratio, STREAK_RATIO_CEILING, 15.0);

    // never recovering within the window earns nothing
    let recovery_pts = inputs
        .recovery_periods
        .map(|periods| (10 - periods.min(10)) as f64)
        .unwrap_or(0.0);

    sharpe_pts + pf_pts + rr_pts + streak_pts + recovery_pts
}

pub fn letter_grade(score: f64) -> &'static str {
    if score >= 90.0 {
        "A+"
    } else if score >= 80.0 {
        "A"
    } else if score >= 70.0 {
        "B"
    } else if score >= 60.0 {
        "C"
    } else if score >= 50.0 {
        "D"
    } else {
        "F"
    }
}

/// Display band for a profit factor, mirrored by the report coloring.
pub fn profit_factor_band(profit_factor: f64) -> &'static str {
    if profit_factor >= 2.0 {
        "excellent"
    } else if profit_factor >= 1.5 {
        "good"
    } else if profit_factor >= 1.0 {
        "marginal"
    } else {
        "poor"
    }
}
