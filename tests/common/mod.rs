#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fundbot::domain::dataset::Dataset;
use fundbot::domain::engine::Engine;
use fundbot::domain::error::FundbotError;
use fundbot::domain::holding::HoldingRecord;
use fundbot::domain::trade::TradeRecord;
use fundbot::ports::data_port::DataPort;

/// Fixed reference date for window computations in tests.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn holding(fund: &str, security: &str, security_type: &str, mv: Decimal) -> HoldingRecord {
    HoldingRecord {
        fund: fund.into(),
        custodian: "BNY Mellon".into(),
        security: security.into(),
        security_type: security_type.into(),
        quantity: dec!(100),
        market_value: mv,
    }
}

pub fn trade(
    fund: &str,
    trade_date: NaiveDate,
    trade_type: &str,
    pnl: Decimal,
) -> TradeRecord {
    TradeRecord {
        fund: fund.into(),
        custodian: "State Street".into(),
        counterparty: "Goldman".into(),
        trade_type: trade_type.into(),
        trade_date,
        quantity: dec!(10),
        pnl,
    }
}

/// Three funds; Ytum nets a YTD P&L of 70 relative to [`today`].
pub fn sample_dataset() -> Dataset {
    Dataset::new(
        vec![
            holding("Garfield", "ACME Corp", "Equity", dec!(1000.50)),
            holding("Garfield", "Treasury 2030", "Bond", dec!(2000.00)),
            holding("Ytum", "ACME Corp", "Equity", dec!(500.25)),
            holding("HoldCo 1", "Copper Dec25", "Option", dec!(750.00)),
        ],
        vec![
            trade("Ytum", date(2025, 2, 10), "Buy", dec!(100)),
            trade("Ytum", date(2025, 3, 5), "Sell", dec!(-30)),
            trade("Garfield", date(2025, 6, 1), "Buy", dec!(40)),
            trade("HoldCo 1", date(2024, 12, 31), "Buy", dec!(999)),
        ],
    )
}

pub fn sample_engine() -> Engine {
    Engine::new(sample_dataset())
}

pub struct MockDataPort {
    pub holdings: Vec<HoldingRecord>,
    pub trades: Vec<TradeRecord>,
    pub holdings_error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            holdings: Vec::new(),
            trades: Vec::new(),
            holdings_error: None,
        }
    }

    pub fn with_holdings(mut self, holdings: Vec<HoldingRecord>) -> Self {
        self.holdings = holdings;
        self
    }

    pub fn with_trades(mut self, trades: Vec<TradeRecord>) -> Self {
        self.trades = trades;
        self
    }

    pub fn with_holdings_error(mut self, path: &str) -> Self {
        self.holdings_error = Some(path.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_holdings(&self) -> Result<Vec<HoldingRecord>, FundbotError> {
        if let Some(path) = &self.holdings_error {
            return Err(FundbotError::SourceUnavailable { path: path.clone() });
        }
        Ok(self.holdings.clone())
    }

    fn load_trades(&self) -> Result<Vec<TradeRecord>, FundbotError> {
        Ok(self.trades.clone())
    }
}
