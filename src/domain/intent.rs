//! Classified question intents and their parameters.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Date window relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Ytd,
    Mtd,
    Qtd,
}

impl Window {
    /// First day of the window. The window is inclusive of both this
    /// date and the reference date itself.
    pub fn start(self, today: NaiveDate) -> NaiveDate {
        let month = match self {
            Window::Ytd => 1,
            Window::Mtd => today.month(),
            Window::Qtd => (today.month0() / 3) * 3 + 1,
        };
        NaiveDate::from_ymd_opt(today.year(), month, 1).unwrap_or(today)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Window::Ytd => "YTD",
            Window::Mtd => "MTD",
            Window::Qtd => "QTD",
        };
        f.write_str(label)
    }
}

/// Metric used to rank funds against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    PnlYtd,
    MarketValue,
}

impl RankMetric {
    pub fn label(self) -> &'static str {
        match self {
            RankMetric::PnlYtd => "YTD P&L",
            RankMetric::MarketValue => "market value",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    Top,
    Bottom,
}

/// The classified meaning of a user question. `Unknown` is a normal
/// terminal classification, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    ListFunds,
    CountHoldings { fund: Option<String> },
    CountTrades { fund: Option<String> },
    TopFunds { metric: RankMetric, order: RankOrder },
    PerformanceRanking,
    PnlForWindow { window: Window, fund: Option<String> },
    SecuritiesForFund { fund: Option<String> },
    SecurityTypes { fund: Option<String> },
    TradeTypeSummary,
    TradesByType { trade_type: String },
    TotalMarketValue { fund: Option<String> },
    ListCustodians,
    ListCounterparties,
    HoldingsBySecurityType { security_type: String },
    TotalQuantity { fund: Option<String> },
    Help,
    Unknown,
}
