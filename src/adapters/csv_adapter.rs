//! CSV file data adapter.
//!
//! Reads the holdings and trades tables from two CSV files. Column order
//! is free; columns are resolved by header name, trimmed and
//! case-insensitive. A missing file is `SourceUnavailable`; a missing
//! required column or an unparseable cell is `SourceMalformed` with row
//! context. Empty numeric cells read as zero.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::error::FundbotError;
use crate::domain::holding::HoldingRecord;
use crate::domain::trade::TradeRecord;
use crate::ports::data_port::DataPort;

pub struct CsvAdapter {
    holdings_path: PathBuf,
    trades_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(holdings_path: impl Into<PathBuf>, trades_path: impl Into<PathBuf>) -> Self {
        Self {
            holdings_path: holdings_path.into(),
            trades_path: trades_path.into(),
        }
    }

    fn read_source(path: &PathBuf) -> Result<String, FundbotError> {
        fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FundbotError::SourceUnavailable {
                    path: path.display().to_string(),
                }
            } else {
                FundbotError::Io(e)
            }
        })
    }
}

impl DataPort for CsvAdapter {
    fn load_holdings(&self) -> Result<Vec<HoldingRecord>, FundbotError> {
        let path = self.holdings_path.display().to_string();
        let content = Self::read_source(&self.holdings_path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = headers(&mut rdr, &path)?;
        let fund = require_column(&headers, "ShortName", &path)?;
        let custodian = require_column(&headers, "CustodianName", &path)?;
        let security = require_column(&headers, "SecName", &path)?;
        let security_type = require_column(&headers, "SecurityTypeName", &path)?;
        let quantity = require_column(&headers, "Qty", &path)?;
        let market_value = require_column(&headers, "MV_Base", &path)?;

        let mut rows = Vec::new();
        for (index, result) in rdr.records().enumerate() {
            let row = index + 2;
            let record = result.map_err(|e| malformed(&path, format!("row {row}: {e}")))?;

            rows.push(HoldingRecord {
                fund: field(&record, fund),
                custodian: field(&record, custodian),
                security: field(&record, security),
                security_type: field(&record, security_type),
                quantity: parse_decimal(&record, quantity, "Qty", &path, row)?,
                market_value: parse_decimal(&record, market_value, "MV_Base", &path, row)?,
            });
        }
        Ok(rows)
    }

    fn load_trades(&self) -> Result<Vec<TradeRecord>, FundbotError> {
        let path = self.trades_path.display().to_string();
        let content = Self::read_source(&self.trades_path)?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = headers(&mut rdr, &path)?;
        let fund = require_column(&headers, "PortfolioName", &path)?;
        let custodian = require_column(&headers, "CustodianName", &path)?;
        let counterparty = require_column(&headers, "Counterparty", &path)?;
        let trade_type = require_column(&headers, "TradeTypeName", &path)?;
        let trade_date = require_column(&headers, "TradeDate", &path)?;
        let quantity = require_column(&headers, "Quantity", &path)?;
        let pnl = require_column(&headers, "PL", &path)?;

        let mut rows = Vec::new();
        for (index, result) in rdr.records().enumerate() {
            let row = index + 2;
            let record = result.map_err(|e| malformed(&path, format!("row {row}: {e}")))?;

            rows.push(TradeRecord {
                fund: field(&record, fund),
                custodian: field(&record, custodian),
                counterparty: field(&record, counterparty),
                trade_type: field(&record, trade_type),
                trade_date: parse_date(&record, trade_date, &path, row)?,
                quantity: parse_decimal(&record, quantity, "Quantity", &path, row)?,
                pnl: parse_decimal(&record, pnl, "PL", &path, row)?,
            });
        }
        Ok(rows)
    }
}

fn headers(
    rdr: &mut csv::Reader<&[u8]>,
    path: &str,
) -> Result<Vec<String>, FundbotError> {
    let headers = rdr
        .headers()
        .map_err(|e| malformed(path, format!("unreadable header row: {e}")))?;
    Ok(headers.iter().map(|h| h.trim().to_string()).collect())
}

fn require_column(headers: &[String], name: &str, path: &str) -> Result<usize, FundbotError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| malformed(path, format!("missing required column '{name}'")))
}

fn malformed(path: &str, reason: String) -> FundbotError {
    FundbotError::SourceMalformed {
        path: path.to_string(),
        reason,
    }
}

fn field(record: &csv::StringRecord, index: usize) -> String {
    record.get(index).unwrap_or("").trim().to_string()
}

fn parse_decimal(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    path: &str,
    row: usize,
) -> Result<Decimal, FundbotError> {
    let raw = record.get(index).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let cleaned = raw.replace(',', "");
    Decimal::from_str(&cleaned)
        .map_err(|_| malformed(path, format!("row {row}: invalid {column} value '{raw}'")))
}

fn parse_date(
    record: &csv::StringRecord,
    index: usize,
    path: &str,
    row: usize,
) -> Result<NaiveDate, FundbotError> {
    let raw = record.get(index).unwrap_or("").trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .map_err(|_| malformed(path, format!("row {row}: invalid TradeDate value '{raw}'")))
}
