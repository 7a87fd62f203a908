//! Computed results and their rendering.
//!
//! One deterministic template per intent. Currency renders as a dollar
//! sign, thousands-grouped magnitude and exactly two decimals; ranked
//! lists render with 1-based positions.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::intent::{Intent, RankMetric, RankOrder};
use crate::domain::metrics::FundValue;

/// Result of a metric computation, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerResult {
    Count(usize),
    Money(Decimal),
    Quantity(Decimal),
    Names(Vec<String>),
    Ranked(Vec<FundValue>),
    Breakdown(Vec<FundValue>),
    TypeCounts(Vec<(String, usize)>),
    Empty,
}

/// Fixed reply for questions no rule matches. The system answers only
/// from the loaded tables and never invents figures.
pub const UNKNOWN_FALLBACK: &str = "Sorry, I can not find the answer in the loaded holdings \
and trades data. I only answer from that data and will not make figures up.\n\
Try questions like:\n  - Total number of holdings\n  - YTD P&L for <fund>\n  - List all funds";

pub const EMPTY_QUESTION: &str = "Please enter a question.";

const SPECIFY_FUND: &str = "Please specify a fund name.";

const HELP_TEXT: &str = "I answer questions about the loaded holdings and trades data. Examples:

Holdings:
  - Total number of holdings for <fund>
  - How many holdings are there?
  - What securities does <fund> hold?
  - Number of equity holdings

Trades:
  - Total number of trades for <fund>
  - Trade types summary
  - How many buy trades?

Performance:
  - Best performing funds
  - Worst performing funds
  - YTD P&L for <fund>
  - Fund performance ranking

Value:
  - Market value for <fund>
  - Total market value

Other:
  - List all funds
  - What are the custodians?
  - What are the counterparties?";

/// User-visible reply when a fund filter matched no known fund.
pub fn no_data_message(fund: &str) -> String {
    format!("Sorry, no data for fund '{fund}' in the loaded holdings and trades.")
}

/// Render a computed result for the intent that produced it.
pub fn format(intent: &Intent, result: &AnswerResult) -> String {
    match (intent, result) {
        (Intent::ListFunds, AnswerResult::Names(names)) => {
            named_list("Available funds/portfolios:", names, "No funds found.")
        }

        (Intent::CountHoldings { fund }, AnswerResult::Count(n)) => match fund {
            Some(f) => format!("Total number of holdings for {f}: {n}"),
            None => format!("Total number of holdings across all funds: {n}"),
        },
        (Intent::CountTrades { fund }, AnswerResult::Count(n)) => match fund {
            Some(f) => format!("Total number of trades for {f}: {n}"),
            None => format!("Total number of trades across all funds: {n}"),
        },

        (Intent::TopFunds { metric, order }, AnswerResult::Ranked(rows)) => {
            let header = match (metric, order) {
                (RankMetric::PnlYtd, RankOrder::Top) => "Best performing funds by YTD P&L:",
                (RankMetric::PnlYtd, RankOrder::Bottom) => "Worst performing funds by YTD P&L:",
                (RankMetric::MarketValue, RankOrder::Top) => "Largest funds by market value:",
                (RankMetric::MarketValue, RankOrder::Bottom) => "Smallest funds by market value:",
            };
            ranked_list(header, rows)
        }
        (Intent::PerformanceRanking, AnswerResult::Ranked(rows)) => {
            ranked_list("Fund performance ranking by YTD P&L:", rows)
        }

        (Intent::PnlForWindow { window, fund }, AnswerResult::Money(value)) => {
            let fund = fund.as_deref().unwrap_or("all funds");
            format!("{window} P&L for {fund}: {}", format_money(*value))
        }
        (Intent::PnlForWindow { window, .. }, AnswerResult::Breakdown(rows)) => {
            let mut out = format!("{window} P&L for all funds:");
            for row in rows {
                out.push_str(&format!("\n  - {}: {}", row.fund, format_money(row.value)));
            }
            out
        }

        (Intent::SecuritiesForFund { fund: Some(f) }, AnswerResult::Names(names)) => named_list(
            &format!("Securities held by {f}:"),
            names,
            &format!("No securities found for {f}."),
        ),
        (Intent::SecuritiesForFund { fund: None }, _) => SPECIFY_FUND.to_string(),

        (Intent::SecurityTypes { fund }, AnswerResult::Names(names)) => {
            if names.is_empty() {
                return match fund {
                    Some(f) => format!("No security types found for {f}."),
                    None => "No security types found.".to_string(),
                };
            }
            match fund {
                Some(f) => format!("Security types for {f}: {}", names.join(", ")),
                None => format!("Available security types: {}", names.join(", ")),
            }
        }

        (Intent::TradeTypeSummary, AnswerResult::TypeCounts(rows)) => {
            if rows.is_empty() {
                return "No trades found.".to_string();
            }
            let mut out = String::from("Trade types summary:");
            for (trade_type, count) in rows {
                out.push_str(&format!("\n  - {trade_type}: {count}"));
            }
            out
        }
        (Intent::TradesByType { trade_type }, AnswerResult::Count(n)) => {
            format!("Total number of {trade_type} trades: {n}")
        }

        (Intent::TotalMarketValue { fund }, AnswerResult::Money(value)) => match fund {
            Some(f) => format!("Total market value for {f}: {}", format_money(*value)),
            None => format!(
                "Total market value across all funds: {}",
                format_money(*value)
            ),
        },

        (Intent::ListCustodians, AnswerResult::Names(names)) => {
            named_list("Custodians:", names, "No custodians found.")
        }
        (Intent::ListCounterparties, AnswerResult::Names(names)) => {
            named_list("Counterparties:", names, "No counterparties found.")
        }

        (Intent::HoldingsBySecurityType { security_type }, AnswerResult::Count(n)) => {
            format!("Number of {security_type} holdings: {n}")
        }

        (Intent::TotalQuantity { fund: Some(f) }, AnswerResult::Quantity(value)) => {
            format!("Total quantity for {f}: {}", format_quantity(*value))
        }
        (Intent::TotalQuantity { fund: None }, _) => {
            "Please specify a fund name for quantity information.".to_string()
        }

        (Intent::Help, _) => HELP_TEXT.to_string(),
        _ => UNKNOWN_FALLBACK.to_string(),
    }
}

fn named_list(header: &str, names: &[String], empty: &str) -> String {
    if names.is_empty() {
        return empty.to_string();
    }
    let mut out = header.to_string();
    for name in names {
        out.push_str(&format!("\n  - {name}"));
    }
    out
}

fn ranked_list(header: &str, rows: &[FundValue]) -> String {
    if rows.is_empty() {
        return "No funds found.".to_string();
    }
    let mut out = header.to_string();
    for (position, row) in rows.iter().enumerate() {
        out.push_str(&format!(
            "\n  {}. {}: {}",
            position + 1,
            row.fund,
            format_money(row.value)
        ));
    }
    out
}

/// `$` + thousands-grouped magnitude + two decimals, sign after the `$`.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);
    format!("${sign}{}.{cents:02}", group_thousands(&whole.to_string()))
}

/// Thousands-grouped whole number, no decimals.
pub fn format_quantity(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}", group_thousands(&rounded.abs().to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::Window;
    use rust_decimal_macros::dec;

    #[test]
    fn money_rounds_groups_and_signs() {
        assert_eq!(format_money(dec!(70)), "$70.00");
        assert_eq!(format_money(dec!(-30)), "$-30.00");
        assert_eq!(format_money(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_money(dec!(0.5)), "$0.50");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn quantity_drops_decimals() {
        assert_eq!(format_quantity(dec!(12345.4)), "12,345");
        assert_eq!(format_quantity(dec!(-250)), "-250");
    }

    #[test]
    fn count_templates_name_the_fund() {
        let with_fund = Intent::CountHoldings {
            fund: Some("Garfield".into()),
        };
        assert_eq!(
            format(&with_fund, &AnswerResult::Count(12)),
            "Total number of holdings for Garfield: 12"
        );
        let without = Intent::CountHoldings { fund: None };
        assert_eq!(
            format(&without, &AnswerResult::Count(12)),
            "Total number of holdings across all funds: 12"
        );
    }

    #[test]
    fn ranked_lists_use_one_based_positions() {
        let intent = Intent::TopFunds {
            metric: RankMetric::PnlYtd,
            order: RankOrder::Top,
        };
        let rows = vec![
            FundValue {
                fund: "Ytum".into(),
                value: dec!(70),
            },
            FundValue {
                fund: "Garfield".into(),
                value: dec!(-5),
            },
        ];
        assert_eq!(
            format(&intent, &AnswerResult::Ranked(rows)),
            "Best performing funds by YTD P&L:\n  1. Ytum: $70.00\n  2. Garfield: $-5.00"
        );
    }

    #[test]
    fn pnl_template_names_window_and_fund() {
        let intent = Intent::PnlForWindow {
            window: Window::Ytd,
            fund: Some("Ytum".into()),
        };
        assert_eq!(
            format(&intent, &AnswerResult::Money(dec!(70))),
            "YTD P&L for Ytum: $70.00"
        );
    }

    #[test]
    fn fund_list_renders_every_name() {
        let names = vec!["Garfield".to_string(), "HoldCo 1".into(), "Ytum".into()];
        assert_eq!(
            format(&Intent::ListFunds, &AnswerResult::Names(names)),
            "Available funds/portfolios:\n  - Garfield\n  - HoldCo 1\n  - Ytum"
        );
    }

    #[test]
    fn unknown_intent_renders_fixed_fallback() {
        assert_eq!(format(&Intent::Unknown, &AnswerResult::Empty), UNKNOWN_FALLBACK);
        // The fallback admits inability and refuses to fabricate.
        assert!(UNKNOWN_FALLBACK.contains("can not find the answer"));
        assert!(UNKNOWN_FALLBACK.contains("will not make figures up"));
    }

    #[test]
    fn securities_without_fund_asks_for_one() {
        let intent = Intent::SecuritiesForFund { fund: None };
        assert_eq!(
            format(&intent, &AnswerResult::Empty),
            "Please specify a fund name."
        );
    }

    #[test]
    fn no_data_message_names_the_fund() {
        assert_eq!(
            no_data_message("Nonexistent Fund"),
            "Sorry, no data for fund 'Nonexistent Fund' in the loaded holdings and trades."
        );
    }
}
