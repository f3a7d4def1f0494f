//! CLI integration tests for config loading and command plumbing.
//!
//! Tests cover:
//! - Config parsing (build_engine_config, build_analysis_config)
//! - Validation of engine/analysis sections
//! - Swap table and price table loading from real INI files on disk
//! - Order validation through a configured engine

mod common;

use propdesk::adapters::file_config_adapter::FileConfigAdapter;
use propdesk::adapters::static_price_adapter::StaticPriceAdapter;
use propdesk::cli;
use propdesk::domain::config_validation::{validate_analysis_config, validate_engine_config};
use propdesk::domain::economics::{Engine, OrderRequest, SwapTable};
use propdesk::domain::trade::Direction;
use propdesk::ports::price_port::PricePort;
use std::io::Write;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[engine]
leverage = 50
lot_units = 100000
max_volume = 20
account_currency = USD

[analysis]
starting_equity = 50000.0
annualization = 252

[swap]
eurusd_buy = -7.2
eurusd_sell = 2.5
usdjpy_buy = 9.1

[prices]
eurusd = 1.0850
usdjpy = 154.30
"#;

mod config_loading {
    use super::*;

    #[test]
    fn build_engine_config_reads_all_fields() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_engine_config(&adapter);

        assert!((config.leverage - 50.0).abs() < f64::EPSILON);
        assert!((config.lot_units - 100_000.0).abs() < f64::EPSILON);
        assert!((config.max_volume - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.account_currency, "USD");
    }

    #[test]
    fn build_engine_config_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("[engine]\n").unwrap();
        let config = cli::build_engine_config(&adapter);

        assert!((config.leverage - 100.0).abs() < f64::EPSILON);
        assert!((config.lot_units - 100_000.0).abs() < f64::EPSILON);
        assert!((config.max_volume - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.account_currency, "USD");
    }

    #[test]
    fn build_analysis_config_reads_fields_and_defaults() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_analysis_config(&adapter);
        assert!((config.starting_equity - 50_000.0).abs() < f64::EPSILON);
        assert!((config.annualization - 252.0).abs() < f64::EPSILON);

        let empty = FileConfigAdapter::from_string("[analysis]\n").unwrap();
        let defaults = cli::build_analysis_config(&empty);
        assert!((defaults.starting_equity - 100_000.0).abs() < f64::EPSILON);
        assert!((defaults.annualization - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn load_config_from_disk() {
        let file = write_temp_ini(VALID_INI);
        let adapter = cli::load_config(&file.path().to_path_buf()).unwrap();
        assert!(validate_engine_config(&adapter).is_ok());
        assert!(validate_analysis_config(&adapter).is_ok());
    }

    #[test]
    fn load_config_missing_file_fails() {
        let path = std::path::PathBuf::from("/nonexistent/propdesk.ini");
        assert!(cli::load_config(&path).is_err());
    }
}

mod config_validation_rules {
    use super::*;

    #[test]
    fn invalid_leverage_rejected() {
        let adapter = FileConfigAdapter::from_string("[engine]\nleverage = -10\n").unwrap();
        assert!(validate_engine_config(&adapter).is_err());
    }

    #[test]
    fn invalid_starting_equity_rejected() {
        let adapter = FileConfigAdapter::from_string("[analysis]\nstarting_equity = 0\n").unwrap();
        assert!(validate_analysis_config(&adapter).is_err());
    }

    #[test]
    fn malformed_swap_key_rejected() {
        let adapter = FileConfigAdapter::from_string("[swap]\neurusd_hold = 1\n").unwrap();
        assert!(validate_engine_config(&adapter).is_err());
    }
}

mod configured_tables {
    use super::*;

    #[test]
    fn swap_table_from_config_section() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let table = SwapTable::from_config(&adapter);

        assert!((table.rate("EURUSD", Direction::Buy) - (-7.2)).abs() < f64::EPSILON);
        assert!((table.rate("EURUSD", Direction::Sell) - 2.5).abs() < f64::EPSILON);
        assert!((table.rate("USDJPY", Direction::Buy) - 9.1).abs() < f64::EPSILON);
        // not in the section, not defaulted
        assert!((table.rate("GBPUSD", Direction::Buy) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_table_from_config_section() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let prices = StaticPriceAdapter::from_config(&adapter);

        assert!((prices.quote("EURUSD").unwrap() - 1.0850).abs() < f64::EPSILON);
        assert!(prices.quote("GBPUSD").is_err());
    }
}

mod configured_orders {
    use super::*;

    #[test]
    fn configured_volume_ceiling_applies() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let engine = Engine::new(cli::build_engine_config(&adapter));

        let order = OrderRequest {
            symbol: "EURUSD".into(),
            direction: Direction::Buy,
            volume: 25.0,
            entry_price: 1.0800,
            stop_loss: None,
            take_profit: None,
        };

        // 25 lots exceeds the configured ceiling of 20
        let check = engine.validate_order(&order);
        assert!(!check.valid);
        assert!(check
            .errors
            .contains(&"Volume exceeds maximum allowed".to_string()));

        let default_check = Engine::default().validate_order(&order);
        assert!(default_check.valid);
    }

    #[test]
    fn configured_leverage_changes_margin() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let engine = Engine::new(cli::build_engine_config(&adapter));

        let figures = engine.profit_loss("EURUSD", Direction::Buy, 1.0800, 1.0810, 1.0);
        // 100,000 notional at 50:1
        assert!((figures.margin_required - 2000.0).abs() < 1e-9);
    }
}
