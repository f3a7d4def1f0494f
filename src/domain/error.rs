//! Domain error types.

/// Degenerate-input arithmetic surfaced as explicit errors instead of
/// silent NaN/infinity propagation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("stop-loss distance must be non-zero")]
    ZeroStopDistance,

    #[error("trade is already closed")]
    AlreadyClosed,
}

/// Top-level error type for propdesk.
#[derive(Debug, thiserror::Error)]
pub enum PropdeskError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("journal error: {reason}")]
    Journal { reason: String },

    #[error("journal row {line}: {reason}")]
    JournalRow { line: usize, reason: String },

    #[error("no price available for {symbol}")]
    PriceUnavailable { symbol: String },

    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PropdeskError> for std::process::ExitCode {
    fn from(err: &PropdeskError) -> Self {
        let code: u8 = match err {
            PropdeskError::Io(_) => 1,
            PropdeskError::ConfigParse { .. }
            | PropdeskError::ConfigMissing { .. }
            | PropdeskError::ConfigInvalid { .. } => 2,
            PropdeskError::Journal { .. } | PropdeskError::JournalRow { .. } => 3,
            PropdeskError::Calc(_) => 4,
            PropdeskError::PriceUnavailable { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_error_messages() {
        assert_eq!(
            CalcError::ZeroStopDistance.to_string(),
            "stop-loss distance must be non-zero"
        );
        assert_eq!(
            CalcError::AlreadyClosed.to_string(),
            "trade is already closed"
        );
    }

    #[test]
    fn config_error_message_includes_location() {
        let err = PropdeskError::ConfigInvalid {
            section: "engine".into(),
            key: "leverage".into(),
            reason: "leverage must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [engine] leverage: leverage must be positive"
        );
    }

    #[test]
    fn journal_row_error_carries_line() {
        let err = PropdeskError::JournalRow {
            line: 7,
            reason: "invalid lot_size value".into(),
        };
        assert!(err.to_string().contains("row 7"));
    }

    #[test]
    fn calc_error_converts() {
        let err: PropdeskError = CalcError::ZeroStopDistance.into();
        assert!(matches!(
            err,
            PropdeskError::Calc(CalcError::ZeroStopDistance)
        ));
    }
}
