//! Trade economics: P/L, margin, position sizing, risk/reward, swap, and
//! order validation.
//!
//! All account-type constants (leverage, lot units, volume ceiling) live in
//! [`EngineConfig`] rather than in the formulas, so different account types
//! can be modeled without touching the calculation logic.

use crate::domain::error::CalcError;
use crate::domain::symbol::{pip_size, pip_value};
use crate::domain::trade::{Direction, Trade, TradeState};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub leverage: f64,
    pub lot_units: f64,
    pub max_volume: f64,
    pub account_currency: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            leverage: 100.0,
            lot_units: 100_000.0,
            max_volume: 100.0,
            account_currency: "USD".to_string(),
        }
    }
}

/// Money and risk figures for one trade at one price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeFigures {
    pub pip_value: f64,
    pub pips: f64,
    pub profit: f64,
    pub profit_percent: f64,
    pub margin_required: f64,
}

/// A proposed order as submitted by callers. Field names follow the JSON
/// shape of the order-entry interface (`type`, `sl`, `tp`, `price`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub volume: f64,
    #[serde(rename = "price")]
    pub entry_price: f64,
    #[serde(rename = "sl", default)]
    pub stop_loss: Option<f64>,
    #[serde(rename = "tp", default)]
    pub take_profit: Option<f64>,
}

/// Validation result: every violated constraint, not just the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCheck {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Overnight financing rates in account currency per lot per night,
/// keyed by symbol and direction. Unknown symbols cost nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapTable {
    rates: HashMap<(String, Direction), f64>,
}

impl SwapTable {
    pub fn empty() -> Self {
        SwapTable {
            rates: HashMap::new(),
        }
    }

    pub fn with_rate(mut self, symbol: &str, direction: Direction, rate: f64) -> Self {
        self.rates.insert((symbol.to_uppercase(), direction), rate);
        self
    }

    /// Read rates from a `[swap]` config section with keys like
    /// `eurusd_buy = -7.2`. Malformed keys are skipped.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let mut table = SwapTable::empty();
        for key in config.section_keys("swap") {
            let Some((symbol, dir_str)) = key.rsplit_once('_') else {
                continue;
            };
            let Ok(direction) = dir_str.parse::<Direction>() else {
                continue;
            };
            let rate = config.get_double("swap", &key, 0.0);
            table = table.with_rate(symbol, direction, rate);
        }
        table
    }

    pub fn rate(&self, symbol: &str, direction: Direction) -> f64 {
        self.rates
            .get(&(symbol.to_uppercase(), direction))
            .copied()
            .unwrap_or(0.0)
    }
}

impl Default for SwapTable {
    fn default() -> Self {
        SwapTable::empty()
            .with_rate("EURUSD", Direction::Buy, -7.2)
            .with_rate("EURUSD", Direction::Sell, 2.5)
            .with_rate("GBPUSD", Direction::Buy, -5.8)
            .with_rate("GBPUSD", Direction::Sell, 1.6)
            .with_rate("USDJPY", Direction::Buy, 9.1)
            .with_rate("USDJPY", Direction::Sell, -14.3)
            .with_rate("AUDUSD", Direction::Buy, -4.1)
            .with_rate("AUDUSD", Direction::Sell, 0.8)
            .with_rate("XAUUSD", Direction::Buy, -21.5)
            .with_rate("XAUUSD", Direction::Sell, 8.2)
    }
}

/// Reward-to-risk ratio for a proposed setup.
///
/// Returns `None` when either level is missing: "ratio unavailable" is
/// distinct from a ratio of literally zero. Levels on the wrong side of
/// entry pass through unclamped and can yield a negative or infinite
/// ratio; [`Engine::validate_order`] is the place that rejects those.
pub fn risk_reward(
    entry_price: f64,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
    direction: Direction,
) -> Option<f64> {
    let sl = stop_loss?;
    let tp = take_profit?;
    let (risk, reward) = match direction {
        Direction::Buy => (entry_price - sl, tp - entry_price),
        Direction::Sell => (sl - entry_price, entry_price - tp),
    };
    Some(reward / risk)
}

/// Equity over used margin as a percentage; 0 when no margin is in use.
pub fn margin_level(equity: f64, used_margin: f64) -> f64 {
    if used_margin == 0.0 {
        return 0.0;
    }
    equity / used_margin * 100.0
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// P/L, pip count, and margin for a position of `volume` lots opened at
    /// `open_price` and marked at `current_price`.
    ///
    /// Positive pips always means the trade is favorable, whichever the
    /// direction. Profit percent is expressed against notional position
    /// value, not account equity.
    pub fn profit_loss(
        &self,
        symbol: &str,
        direction: Direction,
        open_price: f64,
        current_price: f64,
        volume: f64,
    ) -> TradeFigures {
        let pip = pip_size(symbol);
        let pip_val = pip_value(symbol, &self.config.account_currency);

        let pips = match direction {
            Direction::Buy => (current_price - open_price) / pip,
            Direction::Sell => (open_price - current_price) / pip,
        };

        let profit = pips * pip_val * volume;
        let notional = volume * self.config.lot_units;
        let profit_percent = if notional > 0.0 {
            profit / notional * 100.0
        } else {
            0.0
        };
        let margin_required = notional / self.config.leverage;

        TradeFigures {
            pip_value: pip_val,
            pips,
            profit,
            profit_percent,
            margin_required,
        }
    }

    /// Lot size that risks `risk_percent` of the balance between entry and
    /// stop, rounded to the 0.01-lot grain.
    ///
    /// A stop at the entry price has no distance to size against and is a
    /// domain error rather than an infinite lot size.
    pub fn position_size(
        &self,
        account_balance: f64,
        risk_percent: f64,
        entry_price: f64,
        stop_loss: f64,
        symbol: &str,
    ) -> Result<f64, CalcError> {
        let pips_to_sl = (entry_price - stop_loss).abs() / pip_size(symbol);
        if pips_to_sl == 0.0 {
            return Err(CalcError::ZeroStopDistance);
        }

        let risk_amount = account_balance * risk_percent / 100.0;
        let risk_per_lot = pips_to_sl * pip_value(symbol, &self.config.account_currency);
        let size = risk_amount / risk_per_lot;

        Ok((size * 100.0).round() / 100.0)
    }

    /// Overnight financing cost for holding `volume` lots over `days`
    /// nights at the table's per-lot rate.
    pub fn swap(
        &self,
        table: &SwapTable,
        symbol: &str,
        direction: Direction,
        volume: f64,
        days: u32,
    ) -> f64 {
        table.rate(symbol, direction) * volume * days as f64
    }

    /// Check a proposed order against volume limits and level placement,
    /// accumulating every violation. Never clamps or auto-corrects.
    pub fn validate_order(&self, order: &OrderRequest) -> OrderCheck {
        let mut errors = Vec::new();

        if order.volume <= 0.0 {
            errors.push("Volume must be greater than 0".to_string());
        }
        if order.volume > self.config.max_volume {
            errors.push("Volume exceeds maximum allowed".to_string());
        }

        match order.direction {
            Direction::Buy => {
                if let Some(sl) = order.stop_loss {
                    if sl >= order.entry_price {
                        errors.push("Stop loss must be below entry price for buy orders".to_string());
                    }
                }
                if let Some(tp) = order.take_profit {
                    if tp <= order.entry_price {
                        errors.push(
                            "Take profit must be above entry price for buy orders".to_string(),
                        );
                    }
                }
            }
            Direction::Sell => {
                if let Some(sl) = order.stop_loss {
                    if sl <= order.entry_price {
                        errors.push("Stop loss must be above entry price for sell orders".to_string());
                    }
                }
                if let Some(tp) = order.take_profit {
                    if tp >= order.entry_price {
                        errors.push(
                            "Take profit must be below entry price for sell orders".to_string(),
                        );
                    }
                }
            }
        }

        OrderCheck {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Mark a trade against a price: floating figures for open trades,
    /// figures at the recorded exit for closed ones.
    pub fn mark(&self, trade: &Trade, current_price: f64) -> TradeFigures {
        let price = match trade.state {
            TradeState::Open => current_price,
            TradeState::Closed { exit_price, .. } => exit_price,
        };
        self.profit_loss(
            &trade.symbol,
            trade.direction,
            trade.entry_price,
            price,
            trade.lot_size,
        )
    }

    /// Realize a trade at `exit_price`, computing its P/L and transitioning
    /// it to closed. Returns the realized profit.
    pub fn close_trade(
        &self,
        trade: &mut Trade,
        exit_price: f64,
        exit_time: NaiveDateTime,
    ) -> Result<f64, CalcError> {
        let figures = self.profit_loss(
            &trade.symbol,
            trade.direction,
            trade.entry_price,
            exit_price,
            trade.lot_size,
        );
        trade.close(exit_price, exit_time, figures.profit)?;
        Ok(figures.profit)
    }
}
