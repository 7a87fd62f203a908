//! The classify → compute → format pipeline.
//!
//! Every question terminates in a formatted string: recognized intents
//! through their calculator, unknown-fund filters through the "no data"
//! template, everything else through the fixed fallback. No internal
//! error ever reaches the caller raw.

use chrono::NaiveDate;

use crate::domain::answer::{self, AnswerResult};
use crate::domain::classifier;
use crate::domain::dataset::Dataset;
use crate::domain::error::FundbotError;
use crate::domain::intent::{Intent, RankMetric, RankOrder};
use crate::domain::metrics;

const DEFAULT_TOP_N: usize = 10;

/// The answering core: an immutable dataset plus formatting knobs.
pub struct Engine {
    dataset: Dataset,
    top_n: usize,
}

impl Engine {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Number of entries in best/worst fund rankings.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Answer one question. Windows are computed relative to `today`, so
    /// identical inputs always produce byte-identical output.
    pub fn answer(&self, question: &str, today: NaiveDate) -> String {
        if question.trim().is_empty() {
            return answer::EMPTY_QUESTION.to_string();
        }

        let intent = classifier::classify(question, &self.dataset);
        match self.compute(&intent, today) {
            Ok(result) => answer::format(&intent, &result),
            Err(FundbotError::NoDataForFund { fund }) => answer::no_data_message(&fund),
            Err(_) => answer::UNKNOWN_FALLBACK.to_string(),
        }
    }

    fn compute(&self, intent: &Intent, today: NaiveDate) -> Result<AnswerResult, FundbotError> {
        let dataset = &self.dataset;
        let result = match intent {
            Intent::ListFunds => AnswerResult::Names(metrics::list_funds(dataset)),
            Intent::CountHoldings { fund } => {
                AnswerResult::Count(metrics::count_holdings(dataset, fund.as_deref())?)
            }
            Intent::CountTrades { fund } => {
                AnswerResult::Count(metrics::count_trades(dataset, fund.as_deref())?)
            }
            Intent::TopFunds { metric, order } => AnswerResult::Ranked(metrics::rank_funds(
                dataset,
                *metric,
                *order,
                self.top_n,
                today,
            )),
            Intent::PerformanceRanking => AnswerResult::Ranked(metrics::rank_funds(
                dataset,
                RankMetric::PnlYtd,
                RankOrder::Top,
                dataset.funds().len(),
                today,
            )),
            Intent::PnlForWindow { window, fund } => match fund {
                Some(f) => AnswerResult::Money(metrics::pnl_for_window(
                    dataset,
                    *window,
                    Some(f.as_str()),
                    today,
                )?),
                None => AnswerResult::Breakdown(metrics::pnl_breakdown(dataset, *window, today)),
            },
            Intent::SecuritiesForFund { fund } => match fund {
                Some(f) => AnswerResult::Names(metrics::securities_for_fund(dataset, f)?),
                None => AnswerResult::Empty,
            },
            Intent::SecurityTypes { fund } => match fund {
                Some(f) => AnswerResult::Names(metrics::security_types_for_fund(dataset, f)?),
                None => AnswerResult::Names(metrics::list_security_types(dataset)),
            },
            Intent::TradeTypeSummary => {
                AnswerResult::TypeCounts(metrics::trade_type_summary(dataset))
            }
            Intent::TradesByType { trade_type } => {
                AnswerResult::Count(metrics::trades_by_type(dataset, trade_type))
            }
            Intent::TotalMarketValue { fund } => {
                AnswerResult::Money(metrics::total_market_value(dataset, fund.as_deref())?)
            }
            Intent::ListCustodians => AnswerResult::Names(metrics::list_custodians(dataset)),
            Intent::ListCounterparties => {
                AnswerResult::Names(metrics::list_counterparties(dataset))
            }
            Intent::HoldingsBySecurityType { security_type } => AnswerResult::Count(
                metrics::count_holdings_by_security_type(dataset, security_type),
            ),
            Intent::TotalQuantity { fund } => match fund {
                Some(f) => {
                    AnswerResult::Quantity(metrics::total_quantity(dataset, Some(f.as_str()))?)
                }
                None => AnswerResult::Empty,
            },
            Intent::Help | Intent::Unknown => AnswerResult::Empty,
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::holding::HoldingRecord;
    use crate::domain::trade::TradeRecord;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn holding(fund: &str, mv: Decimal) -> HoldingRecord {
        HoldingRecord {
            fund: fund.into(),
            custodian: "BNY Mellon".into(),
            security: "ACME Corp".into(),
            security_type: "Equity".into(),
            quantity: dec!(100),
            market_value: mv,
        }
    }

    fn trade(fund: &str, y: i32, m: u32, d: u32, pnl: Decimal) -> TradeRecord {
        TradeRecord {
            fund: fund.into(),
            custodian: "State Street".into(),
            counterparty: "Goldman".into(),
            trade_type: "Buy".into(),
            trade_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            quantity: dec!(10),
            pnl,
        }
    }

    fn sample_engine() -> Engine {
        let holdings: Vec<HoldingRecord> = (0..12)
            .map(|i| {
                let fund = match i % 3 {
                    0 => "Garfield",
                    1 => "Ytum",
                    _ => "HoldCo 1",
                };
                holding(fund, dec!(1000))
            })
            .collect();
        let trades = vec![
            trade("Ytum", 2025, 2, 10, dec!(100)),
            trade("Ytum", 2025, 3, 5, dec!(-30)),
            trade("Garfield", 2025, 6, 1, dec!(40)),
        ];
        Engine::new(Dataset::new(holdings, trades))
    }

    #[test]
    fn total_holdings_reports_row_count() {
        let engine = sample_engine();
        let reply = engine.answer("Total number of holdings", today());
        assert!(reply.contains("12"), "reply: {reply}");
    }

    #[test]
    fn ytd_pnl_nets_trades_since_january() {
        let engine = sample_engine();
        let reply = engine.answer("YTD P&L for Ytum", today());
        assert!(reply.contains("70.00"), "reply: {reply}");
    }

    #[test]
    fn list_funds_names_exactly_the_loaded_funds() {
        let engine = sample_engine();
        let reply = engine.answer("List all funds", today());
        assert_eq!(
            reply,
            "Available funds/portfolios:\n  - Garfield\n  - HoldCo 1\n  - Ytum"
        );
    }

    #[test]
    fn unknown_fund_gets_no_data_reply_not_a_count() {
        let engine = sample_engine();
        let reply = engine.answer("Total number of holdings for Nonexistent Fund", today());
        assert_eq!(
            reply,
            "Sorry, no data for fund 'nonexistent fund' in the loaded holdings and trades."
        );
        assert!(!reply.contains(": 0"));
    }

    #[test]
    fn gibberish_gets_the_fixed_fallback() {
        let engine = sample_engine();
        assert_eq!(
            engine.answer("asdkjasd random text", today()),
            answer::UNKNOWN_FALLBACK
        );
    }

    #[test]
    fn empty_question_asks_for_one() {
        let engine = sample_engine();
        assert_eq!(engine.answer("   ", today()), answer::EMPTY_QUESTION);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let engine = sample_engine();
        for question in [
            "Total number of holdings",
            "Best performing funds",
            "YTD P&L",
            "Trade types summary",
            "asdkjasd random text",
        ] {
            let first = engine.answer(question, today());
            let second = engine.answer(question, today());
            assert_eq!(first, second, "question: {question:?}");
        }
    }

    #[test]
    fn top_n_limits_rankings() {
        let engine = sample_engine().with_top_n(1);
        let reply = engine.answer("Best performing funds", today());
        assert_eq!(reply, "Best performing funds by YTD P&L:\n  1. Ytum: $70.00");
    }

    #[test]
    fn ranking_lists_every_fund() {
        let engine = sample_engine().with_top_n(1);
        let reply = engine.answer("Fund performance ranking", today());
        assert!(reply.contains("1. Ytum"));
        assert!(reply.contains("2. Garfield"));
        assert!(reply.contains("3. HoldCo 1"));
    }
}
