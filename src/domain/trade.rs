//! Trade row representation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One executed trade as loaded from the trades table.
/// Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    /// Fund the trade was booked against (`PortfolioName` column).
    pub fund: String,
    pub custodian: String,
    pub counterparty: String,
    /// Trade type as present in the source, e.g. "Buy" or "Sell".
    pub trade_type: String,
    pub trade_date: NaiveDate,
    pub quantity: Decimal,
    /// Signed P&L contribution of this trade (`PL` column).
    pub pnl: Decimal,
}
