#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use propdesk::domain::error::PropdeskError;
use propdesk::domain::trade::{ClosedTrade, Direction};
use propdesk::ports::price_port::PricePort;
use propdesk::ports::trade_port::TradePort;
use std::collections::HashMap;

pub fn ts(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn make_closed_trade(symbol: &str, pnl: f64, day: u32) -> ClosedTrade {
    ClosedTrade {
        symbol: symbol.to_string(),
        direction: Direction::Buy,
        lot_size: 1.0,
        entry_price: 1.0800,
        exit_price: 1.0800 + pnl / 100_000.0,
        stop_loss: None,
        take_profit: None,
        profit_loss: pnl,
        entry_time: ts(day, 9),
        exit_time: ts(day, 17),
    }
}

pub fn make_trades(pnls: &[f64]) -> Vec<ClosedTrade> {
    pnls.iter()
        .enumerate()
        .map(|(i, &pnl)| make_closed_trade("EURUSD", pnl, i as u32 + 1))
        .collect()
}

pub struct MockTradePort {
    pub trades: Vec<ClosedTrade>,
    pub error: Option<String>,
}

impl MockTradePort {
    pub fn new() -> Self {
        Self {
            trades: Vec::new(),
            error: None,
        }
    }

    pub fn with_trades(mut self, trades: Vec<ClosedTrade>) -> Self {
        self.trades = trades;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl TradePort for MockTradePort {
    fn fetch_closed_trades(&self) -> Result<Vec<ClosedTrade>, PropdeskError> {
        if let Some(reason) = &self.error {
            return Err(PropdeskError::Journal {
                reason: reason.clone(),
            });
        }
        Ok(self.trades.clone())
    }

    fn list_symbols(&self) -> Result<Vec<String>, PropdeskError> {
        let mut symbols: Vec<String> = self.trades.iter().map(|t| t.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}

pub struct MockPricePort {
    pub quotes: HashMap<String, f64>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            quotes: HashMap::new(),
        }
    }

    pub fn with_quote(mut self, symbol: &str, price: f64) -> Self {
        self.quotes.insert(symbol.to_uppercase(), price);
        self
    }
}

impl PricePort for MockPricePort {
    fn quote(&self, symbol: &str) -> Result<f64, PropdeskError> {
        self.quotes
            .get(&symbol.to_uppercase())
            .copied()
            .ok_or_else(|| PropdeskError::PriceUnavailable {
                symbol: symbol.to_uppercase(),
            })
    }
}
