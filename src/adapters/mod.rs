//! Concrete adapter implementations for ports.

pub mod csv_journal_adapter;
pub mod file_config_adapter;
pub mod static_price_adapter;
pub mod text_report_adapter;
