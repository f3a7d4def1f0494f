//! Trade lifecycle model.
//!
//! A trade is either open or closed; the closed variant carries exit price,
//! exit time, and realized profit so "closed but missing exit data" cannot
//! be represented. The win/loss outcome is always derived from the sign of
//! the realized profit, never stored on its own.

use crate::domain::error::CalcError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "buy"),
            Direction::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" | "long" => Ok(Direction::Buy),
            "sell" | "short" => Ok(Direction::Sell),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Win/loss classification of a realized trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Breakeven,
}

impl Outcome {
    pub fn of(profit_loss: f64) -> Self {
        if profit_loss > 0.0 {
            Outcome::Win
        } else if profit_loss < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Breakeven
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TradeState {
    Open,
    Closed {
        exit_price: f64,
        exit_time: NaiveDateTime,
        profit_loss: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub symbol: String,
    pub direction: Direction,
    pub lot_size: f64,
    pub entry_price: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub entry_time: NaiveDateTime,
    pub state: TradeState,
}

impl Trade {
    pub fn open(
        symbol: impl Into<String>,
        direction: Direction,
        lot_size: f64,
        entry_price: f64,
        entry_time: NaiveDateTime,
    ) -> Self {
        Trade {
            symbol: symbol.into(),
            direction,
            lot_size,
            entry_price,
            stop_loss: None,
            take_profit: None,
            entry_time,
            state: TradeState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, TradeState::Open)
    }

    /// Transition Open -> Closed with the realized figures.
    pub fn close(
        &mut self,
        exit_price: f64,
        exit_time: NaiveDateTime,
        profit_loss: f64,
    ) -> Result<(), CalcError> {
        if !self.is_open() {
            return Err(CalcError::AlreadyClosed);
        }
        self.state = TradeState::Closed {
            exit_price,
            exit_time,
            profit_loss,
        };
        Ok(())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            TradeState::Open => None,
            TradeState::Closed { profit_loss, .. } => Some(Outcome::of(profit_loss)),
        }
    }

    /// Flat record for aggregation; `None` while the trade is open.
    pub fn to_closed(&self) -> Option<ClosedTrade> {
        match self.state {
            TradeState::Open => None,
            TradeState::Closed {
                exit_price,
                exit_time,
                profit_loss,
            } => Some(ClosedTrade {
                symbol: self.symbol.clone(),
                direction: self.direction,
                lot_size: self.lot_size,
                entry_price: self.entry_price,
                exit_price,
                stop_loss: self.stop_loss,
                take_profit: self.take_profit,
                profit_loss,
                entry_time: self.entry_time,
                exit_time,
            }),
        }
    }
}

/// A fully realized trade as it appears in the journal.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub symbol: String,
    pub direction: Direction,
    pub lot_size: f64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub profit_loss: f64,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
}

impl ClosedTrade {
    pub fn outcome(&self) -> Outcome {
        Outcome::of(self.profit_loss)
    }

    /// Sort key for chronological walks: exit time, entry time as fallback.
    pub fn chronological_key(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.exit_time, self.entry_time)
    }
}
