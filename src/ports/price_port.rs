//! Price feed port trait.
//!
//! The engine itself never sources prices; callers inject a feed. The
//! shipped adapter is a static table, which keeps every calculation
//! reproducible under test.

use crate::domain::error::PropdeskError;

pub trait PricePort {
    fn quote(&self, symbol: &str) -> Result<f64, PropdeskError>;
}
