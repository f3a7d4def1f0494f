//! Configuration validation.
//!
//! Checks every engine and analysis field before a command runs, so bad
//! values fail with a config error instead of surfacing mid-calculation.

use crate::domain::error::PropdeskError;
use crate::domain::trade::Direction;
use crate::ports::config_port::ConfigPort;

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), PropdeskError> {
    validate_leverage(config)?;
    validate_lot_units(config)?;
    validate_max_volume(config)?;
    validate_swap_section(config)?;
    Ok(())
}

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), PropdeskError> {
    validate_starting_equity(config)?;
    validate_annualization(config)?;
    Ok(())
}

fn invalid(key: &str, section: &str, reason: &str) -> PropdeskError {
    PropdeskError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_leverage(config: &dyn ConfigPort) -> Result<(), PropdeskError> {
    let value = config.get_double("engine", "leverage", 100.0);
    if value <= 0.0 {
        return Err(invalid("leverage", "engine", "leverage must be positive"));
    }
    Ok(())
}

fn validate_lot_units(config: &dyn ConfigPort) -> Result<(), PropdeskError> {
    let value = config.get_double("engine", "lot_units", 100_000.0);
    if value <= 0.0 {
        return Err(invalid("lot_units", "engine", "lot_units must be positive"));
    }
    Ok(())
}

fn validate_max_volume(config: &dyn ConfigPort) -> Result<(), PropdeskError> {
    let value = config.get_double("engine", "max_volume", 100.0);
    if value <= 0.0 {
        return Err(invalid(
            "max_volume",
            "engine",
            "max_volume must be positive",
        ));
    }
    Ok(())
}

fn validate_starting_equity(config: &dyn ConfigPort) -> Result<(), PropdeskError> {
    let value = config.get_double("analysis", "starting_equity", 100_000.0);
    if value <= 0.0 {
        return Err(invalid(
            "starting_equity",
            "analysis",
            "starting_equity must be positive",
        ));
    }
    Ok(())
}

fn validate_annualization(config: &dyn ConfigPort) -> Result<(), PropdeskError> {
    let value = config.get_double("analysis", "annualization", 1.0);
    if value < 0.0 {
        return Err(invalid(
            "annualization",
            "analysis",
            "annualization must be non-negative",
        ));
    }
    Ok(())
}

fn validate_swap_section(config: &dyn ConfigPort) -> Result<(), PropdeskError> {
    for key in config.section_keys("swap") {
        let Some((_, dir_str)) = key.rsplit_once('_') else {
            return Err(invalid(
                &key,
                "swap",
                "swap keys must look like symbol_buy or symbol_sell",
            ));
        };
        if dir_str.parse::<Direction>().is_err() {
            return Err(invalid(
                &key,
                "swap",
                "swap keys must end in _buy or _sell",
            ));
        }
        if let Some(raw) = config.get_string("swap", &key) {
            if raw.trim().parse::<f64>().is_err() {
                return Err(invalid(&key, "swap", "swap rate must be a number"));
            }
        }
    }
    Ok(())
}
