//! Loaded tables and derived fund index.
//!
//! A [`Dataset`] is built once at startup from a [`DataPort`] and is
//! read-only for the rest of the process lifetime. Every classifier and
//! calculator call borrows it; nothing mutates it.

use std::collections::BTreeSet;

use crate::domain::error::FundbotError;
use crate::domain::holding::HoldingRecord;
use crate::domain::trade::TradeRecord;
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone)]
pub struct Dataset {
    holdings: Vec<HoldingRecord>,
    trades: Vec<TradeRecord>,
    funds: Vec<String>,
}

impl Dataset {
    pub fn new(holdings: Vec<HoldingRecord>, trades: Vec<TradeRecord>) -> Self {
        let funds: BTreeSet<String> = holdings
            .iter()
            .map(|h| h.fund.as_str())
            .chain(trades.iter().map(|t| t.fund.as_str()))
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            holdings,
            trades,
            funds: funds.into_iter().collect(),
        }
    }

    pub fn load(port: &dyn DataPort) -> Result<Self, FundbotError> {
        let holdings = port.load_holdings()?;
        let trades = port.load_trades()?;
        Ok(Self::new(holdings, trades))
    }

    pub fn holdings(&self) -> &[HoldingRecord] {
        &self.holdings
    }

    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Distinct fund names across both tables, ascending.
    pub fn funds(&self) -> &[String] {
        &self.funds
    }

    /// Resolve a fund filter against the known funds.
    ///
    /// Returns `None` when the filter matches no known fund at all, which
    /// callers surface as `NoDataForFund`. A filter equal to a known fund
    /// name selects rows by equality; anything else falls back to
    /// case-insensitive substring matching. Equality-first keeps per-fund
    /// aggregates a partition of the whole table even when one fund name
    /// is a prefix of another.
    pub fn fund_selector(&self, filter: &str) -> Option<FundSelector> {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let exact = self.funds.iter().any(|f| f.to_lowercase() == needle);
        let known = exact || self.funds.iter().any(|f| f.to_lowercase().contains(&needle));
        if !known {
            return None;
        }

        Some(FundSelector { needle, exact })
    }
}

/// A resolved fund filter, ready to test row fund names against.
#[derive(Debug, Clone)]
pub struct FundSelector {
    needle: String,
    exact: bool,
}

impl FundSelector {
    pub fn matches(&self, fund: &str) -> bool {
        let fund = fund.to_lowercase();
        if self.exact {
            fund == self.needle
        } else {
            fund.contains(&self.needle)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding(fund: &str) -> HoldingRecord {
        HoldingRecord {
            fund: fund.into(),
            custodian: "BNY".into(),
            security: "ACME Corp".into(),
            security_type: "Equity".into(),
            quantity: dec!(100),
            market_value: dec!(1000),
        }
    }

    fn trade(fund: &str) -> TradeRecord {
        TradeRecord {
            fund: fund.into(),
            custodian: "BNY".into(),
            counterparty: "GS".into(),
            trade_type: "Buy".into(),
            trade_date: chrono::NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            quantity: dec!(10),
            pnl: dec!(50),
        }
    }

    #[test]
    fn funds_are_distinct_union_of_both_tables_sorted() {
        let dataset = Dataset::new(
            vec![holding("Ytum"), holding("Garfield"), holding("Ytum")],
            vec![trade("HoldCo 1"), trade("Garfield")],
        );
        assert_eq!(dataset.funds(), &["Garfield", "HoldCo 1", "Ytum"]);
    }

    #[test]
    fn funds_skip_empty_names() {
        let dataset = Dataset::new(vec![holding("")], vec![trade("Ytum")]);
        assert_eq!(dataset.funds(), &["Ytum"]);
    }

    #[test]
    fn selector_exact_match_does_not_absorb_longer_names() {
        let dataset = Dataset::new(vec![holding("HoldCo 1"), holding("HoldCo 10")], vec![]);
        let selector = dataset.fund_selector("holdco 1").unwrap();
        assert!(selector.matches("HoldCo 1"));
        assert!(!selector.matches("HoldCo 10"));
    }

    #[test]
    fn selector_falls_back_to_substring_for_partial_text() {
        let dataset = Dataset::new(vec![holding("HoldCo 1"), holding("HoldCo 10")], vec![]);
        let selector = dataset.fund_selector("holdco").unwrap();
        assert!(selector.matches("HoldCo 1"));
        assert!(selector.matches("HoldCo 10"));
    }

    #[test]
    fn selector_is_none_for_unknown_fund() {
        let dataset = Dataset::new(vec![holding("Garfield")], vec![]);
        assert!(dataset.fund_selector("Nonexistent Fund").is_none());
        assert!(dataset.fund_selector("").is_none());
    }
}
