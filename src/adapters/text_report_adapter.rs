//! Plain-text report adapter.
//!
//! Renders a performance summary, quality score, and equity curve into a
//! human-readable text file.

use crate::domain::error::PropdeskError;
use crate::domain::score::profit_factor_band;
use crate::ports::report_port::{ReportContext, ReportPort};
use std::fmt::Write as _;
use std::fs;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(ctx: &ReportContext<'_>) -> String {
        let s = ctx.summary;
        let mut out = String::new();

        let _ = writeln!(out, "Performance Report");
        let _ = writeln!(out, "==================");
        let _ = writeln!(out);
        let _ = writeln!(out, "Trades:            {}", s.total_trades);
        let _ = writeln!(
            out,
            "  won / lost / be: {} / {} / {}",
            s.trades_won, s.trades_lost, s.trades_breakeven
        );
        let _ = writeln!(out, "Win Rate:          {:.2}%", s.win_rate);
        if s.profit_factor.is_finite() {
            let _ = writeln!(
                out,
                "Profit Factor:     {:.2} ({})",
                s.profit_factor,
                profit_factor_band(s.profit_factor)
            );
        } else {
            let _ = writeln!(out, "Profit Factor:     inf (excellent)");
        }
        let _ = writeln!(out, "Expectancy:        {:+.2}", s.expectancy);
        let _ = writeln!(out, "Average Win:       {:.2}", s.average_win);
        let _ = writeln!(out, "Average Loss:      {:.2}", s.average_loss);
        let _ = writeln!(out, "Largest Win:       {:.2}", s.largest_win);
        let _ = writeln!(out, "Largest Loss:      {:.2}", s.largest_loss);
        let _ = writeln!(out, "Win Streak:        {}", s.longest_win_streak);
        let _ = writeln!(out, "Loss Streak:       {}", s.longest_loss_streak);
        let _ = writeln!(out, "Max Drawdown:      {:.2}", s.max_drawdown);
        match s.recovery_periods {
            Some(periods) => {
                let _ = writeln!(out, "Recovery:          {periods} period(s)");
            }
            None => {
                let _ = writeln!(out, "Recovery:          not recovered");
            }
        }
        let _ = writeln!(out, "Sharpe Ratio:      {:.2}", s.sharpe_ratio);
        match s.avg_risk_reward {
            Some(rr) => {
                let _ = writeln!(out, "Avg Risk:Reward:   {rr:.2}");
            }
            None => {
                let _ = writeln!(out, "Avg Risk:Reward:   unavailable");
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Quality Score:     {:.1} ({})", ctx.score, ctx.grade);
        let _ = writeln!(out);
        let _ = writeln!(out, "Equity Curve");
        let _ = writeln!(out, "------------");
        for point in ctx.curve {
            let _ = writeln!(out, "{:<12} {:>14.2}", point.label, point.equity);
        }

        out
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, ctx: &ReportContext<'_>, output_path: &str) -> Result<(), PropdeskError> {
        fs::write(output_path, Self::render(ctx))?;
        Ok(())
    }
}
