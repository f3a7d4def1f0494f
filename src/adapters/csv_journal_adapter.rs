//! CSV trade journal adapter.
//!
//! Reads realized trades from a journal export with the columns
//! `symbol,direction,lot_size,entry_price,exit_price,stop_loss,
//! take_profit,profit_loss,entry_time,exit_time`. Stop-loss and
//! take-profit cells may be empty; timestamps are `%Y-%m-%d %H:%M:%S`.

use crate::domain::error::PropdeskError;
use crate::domain::trade::{ClosedTrade, Direction};
use crate::ports::trade_port::TradePort;
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvJournalAdapter {
    path: PathBuf,
}

impl CsvJournalAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn field<'a>(
        record: &'a csv::StringRecord,
        index: usize,
        name: &str,
        line: usize,
    ) -> Result<&'a str, PropdeskError> {
        record
            .get(index)
            .ok_or_else(|| PropdeskError::JournalRow {
                line,
                reason: format!("missing {name} column"),
            })
    }

    fn parse_f64(raw: &str, name: &str, line: usize) -> Result<f64, PropdeskError> {
        raw.trim()
            .parse()
            .map_err(|_| PropdeskError::JournalRow {
                line,
                reason: format!("invalid {name} value: {raw}"),
            })
    }

    fn parse_optional_f64(raw: &str, name: &str, line: usize) -> Result<Option<f64>, PropdeskError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Self::parse_f64(raw, name, line).map(Some)
    }

    fn parse_time(raw: &str, name: &str, line: usize) -> Result<NaiveDateTime, PropdeskError> {
        NaiveDateTime::parse_from_str(raw.trim(), TIME_FORMAT).map_err(|e| {
            PropdeskError::JournalRow {
                line,
                reason: format!("invalid {name} value ({e})"),
            }
        })
    }
}

impl TradePort for CsvJournalAdapter {
    fn fetch_closed_trades(&self) -> Result<Vec<ClosedTrade>, PropdeskError> {
        let content = fs::read_to_string(&self.path).map_err(|e| PropdeskError::Journal {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut trades = Vec::new();

        for (i, result) in rdr.records().enumerate() {
            let line = i + 2; // header occupies line 1
            let record = result.map_err(|e| PropdeskError::JournalRow {
                line,
                reason: format!("CSV parse error: {e}"),
            })?;

            let symbol = Self::field(&record, 0, "symbol", line)?.trim().to_uppercase();
            let direction: Direction = Self::field(&record, 1, "direction", line)?
                .trim()
                .parse()
                .map_err(|reason| PropdeskError::JournalRow { line, reason })?;
            let lot_size = Self::parse_f64(Self::field(&record, 2, "lot_size", line)?, "lot_size", line)?;
            let entry_price =
                Self::parse_f64(Self::field(&record, 3, "entry_price", line)?, "entry_price", line)?;
            let exit_price =
                Self::parse_f64(Self::field(&record, 4, "exit_price", line)?, "exit_price", line)?;
            let stop_loss = Self::parse_optional_f64(
                Self::field(&record, 5, "stop_loss", line)?,
                "stop_loss",
                line,
            )?;
            let take_profit = Self::parse_optional_f64(
                Self::field(&record, 6, "take_profit", line)?,
                "take_profit",
                line,
            )?;
            let profit_loss =
                Self::parse_f64(Self::field(&record, 7, "profit_loss", line)?, "profit_loss", line)?;
            let entry_time =
                Self::parse_time(Self::field(&record, 8, "entry_time", line)?, "entry_time", line)?;
            let exit_time =
                Self::parse_time(Self::field(&record, 9, "exit_time", line)?, "exit_time", line)?;

            trades.push(ClosedTrade {
                symbol,
                direction,
                lot_size,
                entry_price,
                exit_price,
                stop_loss,
                take_profit,
                profit_loss,
                entry_time,
                exit_time,
            });
        }

        trades.sort_by_key(|t| t.chronological_key());
        Ok(trades)
    }

    fn list_symbols(&self) -> Result<Vec<String>, PropdeskError> {
        let symbols: BTreeSet<String> = self
            .fetch_closed_trades()?
            .into_iter()
            .map(|t| t.symbol)
            .collect();
        Ok(symbols.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "symbol,direction,lot_size,entry_price,exit_price,stop_loss,take_profit,profit_loss,entry_time,exit_time\n";

    fn journal(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}{}", HEADER, rows).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_well_formed_journal() {
        let file = journal(
            "EURUSD,buy,1.0,1.0800,1.0820,1.0750,1.0900,200.0,2024-03-01 09:00:00,2024-03-01 17:00:00\n\
             USDJPY,sell,0.5,154.50,154.80,,,-150.0,2024-03-02 10:00:00,2024-03-02 15:30:00\n",
        );
        let adapter = CsvJournalAdapter::new(file.path().to_path_buf());
        let trades = adapter.fetch_closed_trades().unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].symbol, "EURUSD");
        assert_eq!(trades[0].direction, Direction::Buy);
        assert_eq!(trades[0].stop_loss, Some(1.0750));
        assert!((trades[0].profit_loss - 200.0).abs() < f64::EPSILON);
        assert_eq!(trades[1].stop_loss, None);
        assert_eq!(trades[1].take_profit, None);
    }

    #[test]
    fn sorts_rows_chronologically() {
        let file = journal(
            "EURUSD,buy,1.0,1.0800,1.0820,,,200.0,2024-03-05 09:00:00,2024-03-05 17:00:00\n\
             EURUSD,buy,1.0,1.0800,1.0790,,,-100.0,2024-03-01 09:00:00,2024-03-01 17:00:00\n",
        );
        let adapter = CsvJournalAdapter::new(file.path().to_path_buf());
        let trades = adapter.fetch_closed_trades().unwrap();

        assert!((trades[0].profit_loss - (-100.0)).abs() < f64::EPSILON);
        assert!((trades[1].profit_loss - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn uppercases_symbols() {
        let file = journal(
            "eurusd,buy,1.0,1.0800,1.0820,,,200.0,2024-03-01 09:00:00,2024-03-01 17:00:00\n",
        );
        let adapter = CsvJournalAdapter::new(file.path().to_path_buf());
        let trades = adapter.fetch_closed_trades().unwrap();
        assert_eq!(trades[0].symbol, "EURUSD");
    }

    #[test]
    fn row_errors_carry_line_numbers() {
        let file = journal(
            "EURUSD,buy,1.0,1.0800,1.0820,,,200.0,2024-03-01 09:00:00,2024-03-01 17:00:00\n\
             EURUSD,buy,not-a-number,1.0800,1.0790,,,-100.0,2024-03-02 09:00:00,2024-03-02 17:00:00\n",
        );
        let adapter = CsvJournalAdapter::new(file.path().to_path_buf());
        let err = adapter.fetch_closed_trades().unwrap_err();

        match err {
            PropdeskError::JournalRow { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("lot_size"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_bad_direction() {
        let file = journal(
            "EURUSD,hold,1.0,1.0800,1.0820,,,200.0,2024-03-01 09:00:00,2024-03-01 17:00:00\n",
        );
        let adapter = CsvJournalAdapter::new(file.path().to_path_buf());
        assert!(adapter.fetch_closed_trades().is_err());
    }

    #[test]
    fn rejects_bad_timestamp() {
        let file = journal("EURUSD,buy,1.0,1.0800,1.0820,,,200.0,yesterday,2024-03-01 17:00:00\n");
        let adapter = CsvJournalAdapter::new(file.path().to_path_buf());
        assert!(adapter.fetch_closed_trades().is_err());
    }

    #[test]
    fn missing_file_is_journal_error() {
        let adapter = CsvJournalAdapter::new(PathBuf::from("/nonexistent/journal.csv"));
        assert!(matches!(
            adapter.fetch_closed_trades(),
            Err(PropdeskError::Journal { .. })
        ));
    }

    #[test]
    fn lists_unique_symbols_sorted() {
        let file = journal(
            "USDJPY,sell,0.5,154.50,154.80,,,-150.0,2024-03-02 10:00:00,2024-03-02 15:30:00\n\
             EURUSD,buy,1.0,1.0800,1.0820,,,200.0,2024-03-01 09:00:00,2024-03-01 17:00:00\n\
             EURUSD,sell,1.0,1.0820,1.0800,,,200.0,2024-03-03 09:00:00,2024-03-03 17:00:00\n",
        );
        let adapter = CsvJournalAdapter::new(file.path().to_path_buf());
        assert_eq!(adapter.list_symbols().unwrap(), vec!["EURUSD", "USDJPY"]);
    }

    #[test]
    fn empty_journal_yields_no_trades() {
        let file = journal("");
        let adapter = CsvJournalAdapter::new(file.path().to_path_buf());
        assert!(adapter.fetch_closed_trades().unwrap().is_empty());
    }
}
