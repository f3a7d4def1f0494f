//! Trade journal access port trait.
//!
//! Persistence stays outside the core: implementations hand over
//! already-realized trade records and the calculations never write back.

use crate::domain::error::PropdeskError;
use crate::domain::trade::ClosedTrade;

pub trait TradePort {
    fn fetch_closed_trades(&self) -> Result<Vec<ClosedTrade>, PropdeskError>;

    fn list_symbols(&self) -> Result<Vec<String>, PropdeskError>;
}
