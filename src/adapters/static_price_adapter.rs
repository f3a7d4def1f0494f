//! Static price table adapter.
//!
//! A fixed symbol -> price map implementing the price feed port, loaded
//! from a `[prices]` config section or built directly. Used wherever a
//! reproducible feed is needed: CLI fallback quotes and tests.

use crate::domain::error::PropdeskError;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;
use std::collections::HashMap;

pub struct StaticPriceAdapter {
    prices: HashMap<String, f64>,
}

impl StaticPriceAdapter {
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_uppercase(), price);
        self
    }

    /// Build from a `[prices]` section with keys like `eurusd = 1.0850`.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let mut adapter = StaticPriceAdapter::new();
        for key in config.section_keys("prices") {
            let price = config.get_double("prices", &key, 0.0);
            if price > 0.0 {
                adapter = adapter.with_price(&key, price);
            }
        }
        adapter
    }
}

impl Default for StaticPriceAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PricePort for StaticPriceAdapter {
    fn quote(&self, symbol: &str) -> Result<f64, PropdeskError> {
        self.prices
            .get(&symbol.to_uppercase())
            .copied()
            .ok_or_else(|| PropdeskError::PriceUnavailable {
                symbol: symbol.to_uppercase(),
            })
    }
}
