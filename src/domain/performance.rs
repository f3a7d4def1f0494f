//! Performance aggregation over a collection of closed trades.
//!
//! Everything here is a pure function of the input trade list: same trades
//! in, same summary out. Win rate, profit factor, expectancy, and the
//! average/extreme figures are unordered reductions; streaks, drawdown,
//! and the equity curve depend on chronological order and re-sort the
//! input by exit time (entry time as fallback) before walking it.

use crate::domain::economics::risk_reward;
use crate::domain::trade::{ClosedTrade, Outcome};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Baseline equity the curve starts from.
    pub starting_equity: f64,
    /// Periods per year for Sharpe scaling; 1.0 leaves the ratio raw.
    pub annualization: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            starting_equity: 100_000.0,
            annualization: 1.0,
        }
    }
}

/// One point of the cumulative equity curve.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub label: String,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    /// Percentage of winners over all closed trades.
    pub win_rate: f64,
    /// Gross profit over gross loss magnitude; +inf with wins and no losses.
    pub profit_factor: f64,
    /// Mean P/L per trade.
    pub expectancy: f64,
    pub average_win: f64,
    /// Mean losing P/L, reported as a positive magnitude.
    pub average_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
    /// Largest peak-to-trough equity decline, in account currency.
    pub max_drawdown: f64,
    /// Curve steps from the deepest trough back to its prior peak.
    /// `Some(0)` when there was no drawdown; `None` when the observed
    /// window never recovers.
    pub recovery_periods: Option<usize>,
    pub sharpe_ratio: f64,
    /// Mean reward/risk over trades carrying both levels; `None` when no
    /// trade has a well-formed setup.
    pub avg_risk_reward: Option<f64>,
}

impl PerformanceSummary {
    pub fn compute(trades: &[ClosedTrade], config: &AnalysisConfig) -> Self {
        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut gross_profit = 0.0_f64;
        let mut gross_loss = 0.0_f64;
        let mut largest_win = 0.0_f64;
        let mut largest_loss = 0.0_f64;
        let mut total_pnl = 0.0_f64;

        for trade in trades {
            let pnl = trade.profit_loss;
            total_pnl += pnl;
            match trade.outcome() {
                Outcome::Win => {
                    trades_won += 1;
                    gross_profit += pnl;
                    if pnl > largest_win {
                        largest_win = pnl;
                    }
                }
                Outcome::Loss => {
                    trades_lost += 1;
                    gross_loss += pnl.abs();
                    if pnl.abs() > largest_loss {
                        largest_loss = pnl.abs();
                    }
                }
                Outcome::Breakeven => {
                    trades_breakeven += 1;
                }
            }
        }

        let total_trades = trades.len();
        let win_rate = if total_trades > 0 {
            trades_won as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let expectancy = if total_trades > 0 {
            total_pnl / total_trades as f64
        } else {
            0.0
        };

        let average_win = if trades_won > 0 {
            gross_profit / trades_won as f64
        } else {
            0.0
        };

        let average_loss = if trades_lost > 0 {
            gross_loss / trades_lost as f64
        } else {
            0.0
        };

        let sorted = chronological(trades);
        let (longest_win_streak, longest_loss_streak) = compute_streaks(&sorted);

        let curve = equity_curve(trades, config);
        let (max_drawdown, recovery_periods) = compute_drawdown(&curve);

        let pnls: Vec<f64> = sorted.iter().map(|t| t.profit_loss).collect();
        let sharpe_ratio = sharpe(&pnls, config.annualization);

        let rr_values: Vec<f64> = trades
            .iter()
            .filter_map(|t| risk_reward(t.entry_price, t.stop_loss, t.take_profit, t.direction))
            .filter(|r| r.is_finite())
            .collect();
        let avg_risk_reward = if rr_values.is_empty() {
            None
        } else {
            Some(rr_values.iter().sum::<f64>() / rr_values.len() as f64)
        };

        PerformanceSummary {
            total_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            profit_factor,
            expectancy,
            average_win,
            average_loss,
            largest_win,
            largest_loss,
            longest_win_streak,
            longest_loss_streak,
            max_drawdown,
            recovery_periods,
            sharpe_ratio,
            avg_risk_reward,
        }
    }
}

fn chronological(trades: &[ClosedTrade]) -> Vec<ClosedTrade> {
    let mut sorted = trades.to_vec();
    sorted.sort_by_key(|t| t.chronological_key());
    sorted
}

/// Longest runs of consecutive winners and losers. Breakeven trades end
/// both runs. A single trade is a streak of length 1.
fn compute_streaks(sorted: &[ClosedTrade]) -> (usize, usize) {
    let mut longest_win = 0usize;
    let mut longest_loss = 0usize;
    let mut current_win = 0usize;
    let mut current_loss = 0usize;

    for trade in sorted {
        match trade.outcome() {
            Outcome::Win => {
                current_win += 1;
                current_loss = 0;
            }
            Outcome::Loss => {
                current_loss += 1;
                current_win = 0;
            }
            Outcome::Breakeven => {
                current_win = 0;
                current_loss = 0;
            }
        }
        longest_win = longest_win.max(current_win);
        longest_loss = longest_loss.max(current_loss);
    }

    (longest_win, longest_loss)
}

/// Cumulative equity from the baseline, one point per closed trade in
/// chronological order. An empty trade list still yields the baseline
/// point so charts never render empty.
pub fn equity_curve(trades: &[ClosedTrade], config: &AnalysisConfig) -> Vec<EquityPoint> {
    let sorted = chronological(trades);
    let mut curve = Vec::with_capacity(sorted.len() + 1);
    curve.push(EquityPoint {
        label: "Start".to_string(),
        equity: config.starting_equity,
    });

    let mut running = config.starting_equity;
    for trade in &sorted {
        running += trade.profit_loss;
        curve.push(EquityPoint {
            label: trade.exit_time.format("%Y-%m-%d").to_string(),
            equity: running,
        });
    }

    curve
}

/// Largest peak-to-trough decline and the number of curve steps from that
/// trough back to its prior peak.
fn compute_drawdown(curve: &[EquityPoint]) -> (f64, Option<usize>) {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;
    let mut trough_idx = 0usize;
    let mut peak_at_trough = 0.0_f64;

    for (i, point) in curve.iter().enumerate() {
        if point.equity > peak {
            peak = point.equity;
        }
        let dd = peak - point.equity;
        if dd > max_dd {
            max_dd = dd;
            trough_idx = i;
            peak_at_trough = peak;
        }
    }

    if max_dd == 0.0 {
        return (0.0, Some(0));
    }

    let recovery = curve[trough_idx + 1..]
        .iter()
        .position(|p| p.equity >= peak_at_trough)
        .map(|steps| steps + 1);

    (max_dd, recovery)
}

/// Mean over standard deviation of the P/L series, scaled by
/// sqrt(annualization). Zero when the series is too short or flat.
pub fn sharpe(pnls: &[f64], annualization: f64) -> f64 {
    if pnls.len() < 2 {
        return 0.0;
    }

    let n = pnls.len() as f64;
    let mean = pnls.iter().sum::<f64>() / n;
    let variance = pnls.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        mean / stddev * annualization.sqrt()
    } else {
        0.0
    }
}
