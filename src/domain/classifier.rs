//! Free-text question classification.
//!
//! Questions are normalized and then checked against an ordered table of
//! keyword rules. Each rule names the phrases that trigger it and the
//! intent it produces; the first matching rule wins, so specific rules
//! must stay above the generic count/list catch-alls. Parameters (fund
//! name, date window) are extracted from the normalized text after the
//! rule has been chosen. Input that matches no rule classifies as
//! [`Intent::Unknown`].

use crate::domain::dataset::Dataset;
use crate::domain::intent::{Intent, RankMetric, RankOrder, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleTag {
    ListFunds,
    CountHoldings,
    CountTrades,
    BestFunds,
    WorstFunds,
    LargestFunds,
    Ranking,
    Pnl,
    Securities,
    SecurityTypes,
    TradeTypes,
    Buys,
    Sells,
    MarketValue,
    Custodians,
    Counterparties,
    SecurityTypeCount,
    Quantity,
    Help,
}

struct QueryRule {
    /// Every phrase must occur in the normalized text.
    all: &'static [&'static str],
    /// At least one phrase must occur; ignored when empty.
    any: &'static [&'static str],
    tag: RuleTag,
}

impl QueryRule {
    fn matches(&self, text: &str) -> bool {
        self.all.iter().all(|p| text.contains(p))
            && (self.any.is_empty() || self.any.iter().any(|p| text.contains(p)))
    }
}

/// Rules are evaluated strictly in this order; reordering changes which
/// intent wins for overlapping phrasings.
const RULES: &[QueryRule] = &[
    QueryRule {
        all: &[],
        any: &[
            "list all funds",
            "all funds",
            "what funds",
            "which funds are there",
            "show funds",
            "available funds",
        ],
        tag: RuleTag::ListFunds,
    },
    QueryRule {
        all: &["holdings"],
        any: &["total", "how many"],
        tag: RuleTag::CountHoldings,
    },
    QueryRule {
        all: &["trades"],
        any: &["total", "how many"],
        tag: RuleTag::CountTrades,
    },
    QueryRule {
        all: &[],
        any: &[
            "best performing",
            "top performing",
            "highest profit",
            "best fund",
            "top fund",
            "performed better",
            "which fund performed",
        ],
        tag: RuleTag::BestFunds,
    },
    QueryRule {
        all: &[],
        any: &[
            "worst performing",
            "lowest profit",
            "worst fund",
            "poor performing",
            "lowest performing",
        ],
        tag: RuleTag::WorstFunds,
    },
    QueryRule {
        all: &[],
        any: &["largest fund", "biggest fund"],
        tag: RuleTag::LargestFunds,
    },
    QueryRule {
        all: &[],
        any: &[
            "fund performance",
            "performance ranking",
            "rank funds",
            "compare funds",
        ],
        tag: RuleTag::Ranking,
    },
    QueryRule {
        all: &[],
        any: &[
            "ytd",
            "mtd",
            "qtd",
            "year to date",
            "month to date",
            "quarter to date",
            "yearly",
            "annual",
            "profit and loss",
            "pnl",
            "p&l",
            "profit",
            "loss",
        ],
        tag: RuleTag::Pnl,
    },
    QueryRule {
        all: &[],
        any: &[
            "securities",
            "what securities",
            "which securities",
            "holdings for",
        ],
        tag: RuleTag::Securities,
    },
    QueryRule {
        all: &[],
        any: &[
            "security types",
            "asset types",
            "type of securities",
            "types of assets",
        ],
        tag: RuleTag::SecurityTypes,
    },
    QueryRule {
        all: &[],
        any: &["trade types", "buy and sell", "buys and sells", "trade summary"],
        tag: RuleTag::TradeTypes,
    },
    QueryRule {
        all: &["buy"],
        any: &["how many", "number of", "total"],
        tag: RuleTag::Buys,
    },
    QueryRule {
        all: &["sell"],
        any: &["how many", "number of", "total"],
        tag: RuleTag::Sells,
    },
    QueryRule {
        all: &[],
        any: &["market value", "total value", "mv", "aum"],
        tag: RuleTag::MarketValue,
    },
    QueryRule {
        all: &["custodian"],
        any: &[],
        tag: RuleTag::Custodians,
    },
    QueryRule {
        all: &["counterpart"],
        any: &[],
        tag: RuleTag::Counterparties,
    },
    QueryRule {
        all: &[],
        any: &["equity", "bond", "option", "assetbacked", "fx forward"],
        tag: RuleTag::SecurityTypeCount,
    },
    QueryRule {
        all: &[],
        any: &["quantity", "qty"],
        tag: RuleTag::Quantity,
    },
    QueryRule {
        all: &[],
        any: &["help", "what can you", "commands", "examples"],
        tag: RuleTag::Help,
    },
];

/// Security-type triggers with their display casing.
const SECURITY_TYPES: &[(&str, &str)] = &[
    ("equity", "Equity"),
    ("bond", "Bond"),
    ("option", "Option"),
    ("assetbacked", "AssetBacked"),
    ("fx forward", "FX Forward"),
];

/// Classify a free-text question against the loaded dataset.
pub fn classify(question: &str, dataset: &Dataset) -> Intent {
    let text = normalize(question);

    for rule in RULES {
        if !rule.matches(&text) {
            continue;
        }
        return build_intent(rule.tag, &text, dataset);
    }

    Intent::Unknown
}

fn build_intent(tag: RuleTag, text: &str, dataset: &Dataset) -> Intent {
    match tag {
        RuleTag::ListFunds => Intent::ListFunds,
        RuleTag::CountHoldings => Intent::CountHoldings {
            fund: extract_fund(text, dataset),
        },
        RuleTag::CountTrades => Intent::CountTrades {
            fund: extract_fund(text, dataset),
        },
        RuleTag::BestFunds => Intent::TopFunds {
            metric: RankMetric::PnlYtd,
            order: RankOrder::Top,
        },
        RuleTag::WorstFunds => Intent::TopFunds {
            metric: RankMetric::PnlYtd,
            order: RankOrder::Bottom,
        },
        RuleTag::LargestFunds => Intent::TopFunds {
            metric: RankMetric::MarketValue,
            order: RankOrder::Top,
        },
        RuleTag::Ranking => Intent::PerformanceRanking,
        RuleTag::Pnl => Intent::PnlForWindow {
            window: extract_window(text).unwrap_or(Window::Ytd),
            fund: extract_fund(text, dataset),
        },
        RuleTag::Securities => Intent::SecuritiesForFund {
            fund: extract_fund(text, dataset),
        },
        RuleTag::SecurityTypes => Intent::SecurityTypes {
            fund: extract_fund(text, dataset),
        },
        RuleTag::TradeTypes => Intent::TradeTypeSummary,
        RuleTag::Buys => Intent::TradesByType {
            trade_type: "Buy".to_string(),
        },
        RuleTag::Sells => Intent::TradesByType {
            trade_type: "Sell".to_string(),
        },
        RuleTag::MarketValue => Intent::TotalMarketValue {
            fund: extract_fund(text, dataset),
        },
        RuleTag::Custodians => Intent::ListCustodians,
        RuleTag::Counterparties => Intent::ListCounterparties,
        RuleTag::SecurityTypeCount => {
            let security_type = SECURITY_TYPES
                .iter()
                .find(|(trigger, _)| text.contains(trigger))
                .map(|(_, display)| display.to_string())
                .unwrap_or_default();
            Intent::HoldingsBySecurityType { security_type }
        }
        RuleTag::Quantity => Intent::TotalQuantity {
            fund: extract_fund(text, dataset),
        },
        RuleTag::Help => Intent::Help,
    }
}

/// Lowercase, trim, map punctuation to spaces and collapse whitespace.
/// `&` and `-` survive: they carry meaning in "p&l" and in fund names.
pub fn normalize(question: &str) -> String {
    let mapped: String = question
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_punctuation() && c != '&' && c != '-' {
                ' '
            } else {
                c
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract a fund filter from normalized text.
///
/// Known fund names are tried first (longest name wins, so "HoldCo 10"
/// beats "HoldCo 1"), then significant words of known fund names. Failing
/// both, text after a trailing " for " is kept as a *requested* fund even
/// when unknown, so the calculator can answer "no data" instead of
/// silently computing over the full table.
fn extract_fund(text: &str, dataset: &Dataset) -> Option<String> {
    let mut funds: Vec<&String> = dataset.funds().iter().collect();
    funds.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    for fund in &funds {
        let needle = normalize(fund);
        if !needle.is_empty() && text.contains(&needle) {
            return Some((*fund).clone());
        }
    }

    let tokens: Vec<&str> = text.split(' ').collect();
    for fund in &funds {
        let needle = normalize(fund);
        if needle
            .split(' ')
            .any(|word| word.len() > 3 && tokens.contains(&word))
        {
            return Some((*fund).clone());
        }
    }

    requested_fund(text)
}

fn requested_fund(text: &str) -> Option<String> {
    let idx = text.rfind(" for ")?;
    let tail = text[idx + 5..].trim().trim_start_matches("the ").trim();
    match tail {
        "" | "all" | "all funds" | "each fund" | "every fund" => None,
        _ => Some(tail.to_string()),
    }
}

fn extract_window(text: &str) -> Option<Window> {
    let has_token = |token: &str| text.split(' ').any(|t| t == token);
    if has_token("ytd") || text.contains("year to date") {
        Some(Window::Ytd)
    } else if has_token("mtd") || text.contains("month to date") {
        Some(Window::Mtd)
    } else if has_token("qtd") || text.contains("quarter to date") {
        Some(Window::Qtd)
    } else {
        None
    }
}
