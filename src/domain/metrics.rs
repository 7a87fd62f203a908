//! Pure aggregate calculations over a loaded dataset.
//!
//! Every function is a read-only pass over the tables. Monetary sums use
//! decimal arithmetic throughout. A fund filter that matches no known
//! fund fails with `NoDataForFund`; an empty filtered set is a 0 / empty
//! result, not an error.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::dataset::{Dataset, FundSelector};
use crate::domain::error::FundbotError;
use crate::domain::intent::{RankMetric, RankOrder, Window};

/// One fund paired with a computed monetary value.
#[derive(Debug, Clone, PartialEq)]
pub struct FundValue {
    pub fund: String,
    pub value: Decimal,
}

fn resolve_filter(
    dataset: &Dataset,
    fund: Option<&str>,
) -> Result<Option<FundSelector>, FundbotError> {
    match fund {
        None => Ok(None),
        Some(f) => dataset
            .fund_selector(f)
            .map(Some)
            .ok_or_else(|| FundbotError::NoDataForFund { fund: f.to_string() }),
    }
}

fn fund_matches(selector: &Option<FundSelector>, fund: &str) -> bool {
    selector.as_ref().is_none_or(|s| s.matches(fund))
}

pub fn count_holdings(dataset: &Dataset, fund: Option<&str>) -> Result<usize, FundbotError> {
    let selector = resolve_filter(dataset, fund)?;
    Ok(dataset
        .holdings()
        .iter()
        .filter(|h| fund_matches(&selector, &h.fund))
        .count())
}

pub fn count_trades(dataset: &Dataset, fund: Option<&str>) -> Result<usize, FundbotError> {
    let selector = resolve_filter(dataset, fund)?;
    Ok(dataset
        .trades()
        .iter()
        .filter(|t| fund_matches(&selector, &t.fund))
        .count())
}

pub fn total_market_value(dataset: &Dataset, fund: Option<&str>) -> Result<Decimal, FundbotError> {
    let selector = resolve_filter(dataset, fund)?;
    Ok(dataset
        .holdings()
        .iter()
        .filter(|h| fund_matches(&selector, &h.fund))
        .map(|h| h.market_value)
        .sum())
}

pub fn total_quantity(dataset: &Dataset, fund: Option<&str>) -> Result<Decimal, FundbotError> {
    let selector = resolve_filter(dataset, fund)?;
    Ok(dataset
        .holdings()
        .iter()
        .filter(|h| fund_matches(&selector, &h.fund))
        .map(|h| h.quantity)
        .sum())
}

/// Net P&L of trades dated inside the window, inclusive of both the
/// window start and `today`.
pub fn pnl_for_window(
    dataset: &Dataset,
    window: Window,
    fund: Option<&str>,
    today: NaiveDate,
) -> Result<Decimal, FundbotError> {
    let selector = resolve_filter(dataset, fund)?;
    let start = window.start(today);
    Ok(dataset
        .trades()
        .iter()
        .filter(|t| fund_matches(&selector, &t.fund))
        .filter(|t| t.trade_date >= start && t.trade_date <= today)
        .map(|t| t.pnl)
        .sum())
}

/// Per-fund P&L over all known funds, value-descending with name-ascending
/// tie-break. Funds with no trades in the window report zero.
pub fn pnl_breakdown(dataset: &Dataset, window: Window, today: NaiveDate) -> Vec<FundValue> {
    let start = window.start(today);
    let mut rows = fund_values(dataset, |fund| {
        dataset
            .trades()
            .iter()
            .filter(|t| t.fund == fund)
            .filter(|t| t.trade_date >= start && t.trade_date <= today)
            .map(|t| t.pnl)
            .sum()
    });
    rows.sort_by(|a, b| b.value.cmp(&a.value).then(a.fund.cmp(&b.fund)));
    rows
}

/// Rank distinct funds by the chosen metric. Descending for `Top`,
/// ascending for `Bottom`; ties always break fund-name-ascending.
pub fn rank_funds(
    dataset: &Dataset,
    metric: RankMetric,
    order: RankOrder,
    n: usize,
    today: NaiveDate,
) -> Vec<FundValue> {
    let ytd_start = Window::Ytd.start(today);
    let mut rows = fund_values(dataset, |fund| match metric {
        RankMetric::PnlYtd => dataset
            .trades()
            .iter()
            .filter(|t| t.fund == fund)
            .filter(|t| t.trade_date >= ytd_start && t.trade_date <= today)
            .map(|t| t.pnl)
            .sum(),
        RankMetric::MarketValue => dataset
            .holdings()
            .iter()
            .filter(|h| h.fund == fund)
            .map(|h| h.market_value)
            .sum(),
    });
    rows.sort_by(|a, b| match order {
        RankOrder::Top => b.value.cmp(&a.value).then(a.fund.cmp(&b.fund)),
        RankOrder::Bottom => a.value.cmp(&b.value).then(a.fund.cmp(&b.fund)),
    });
    rows.truncate(n);
    rows
}

fn fund_values(dataset: &Dataset, value_of: impl Fn(&str) -> Decimal) -> Vec<FundValue> {
    dataset
        .funds()
        .iter()
        .map(|fund| FundValue {
            fund: fund.clone(),
            value: value_of(fund),
        })
        .collect()
}

pub fn list_funds(dataset: &Dataset) -> Vec<String> {
    dataset.funds().to_vec()
}

/// Distinct custodians across both tables, ascending.
pub fn list_custodians(dataset: &Dataset) -> Vec<String> {
    let names: BTreeSet<&str> = dataset
        .holdings()
        .iter()
        .map(|h| h.custodian.as_str())
        .chain(dataset.trades().iter().map(|t| t.custodian.as_str()))
        .filter(|c| !c.is_empty())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

pub fn list_counterparties(dataset: &Dataset) -> Vec<String> {
    let names: BTreeSet<&str> = dataset
        .trades()
        .iter()
        .map(|t| t.counterparty.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

pub fn list_security_types(dataset: &Dataset) -> Vec<String> {
    let names: BTreeSet<&str> = dataset
        .holdings()
        .iter()
        .map(|h| h.security_type.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

pub fn securities_for_fund(dataset: &Dataset, fund: &str) -> Result<Vec<String>, FundbotError> {
    let selector = resolve_filter(dataset, Some(fund))?;
    let names: BTreeSet<&str> = dataset
        .holdings()
        .iter()
        .filter(|h| fund_matches(&selector, &h.fund))
        .map(|h| h.security.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(names.into_iter().map(str::to_string).collect())
}

pub fn security_types_for_fund(dataset: &Dataset, fund: &str) -> Result<Vec<String>, FundbotError> {
    let selector = resolve_filter(dataset, Some(fund))?;
    let names: BTreeSet<&str> = dataset
        .holdings()
        .iter()
        .filter(|h| fund_matches(&selector, &h.fund))
        .map(|h| h.security_type.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    Ok(names.into_iter().map(str::to_string).collect())
}

/// Trade type → count, ordered count-descending then name-ascending.
pub fn trade_type_summary(dataset: &Dataset) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for trade in dataset.trades() {
        if !trade.trade_type.is_empty() {
            *counts.entry(trade.trade_type.as_str()).or_default() += 1;
        }
    }
    let mut rows: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    rows
}

pub fn trades_by_type(dataset: &Dataset, trade_type: &str) -> usize {
    dataset
        .trades()
        .iter()
        .filter(|t| t.trade_type.eq_ignore_ascii_case(trade_type))
        .count()
}

pub fn count_holdings_by_security_type(dataset: &Dataset, security_type: &str) -> usize {
    let needle = security_type.to_lowercase();
    dataset
        .holdings()
        .iter()
        .filter(|h| h.security_type.to_lowercase().contains(&needle))
        .count()
}
