//! Form preferences and their URL query-string encoding.
//!
//! The statement, stake and display options travel in the query string so
//! a link reproduces exactly what its sender saw. Keys:
//! `value`, `amount`, `currency_prefix`, `currency_postfix`, `show_as_jst`,
//! `countering`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

use crate::types::{BetStake, BidAskError, CurrencyFormat, DisplayStyle, Role};

/// Statements offered as clickable examples.
pub const EXAMPLES: [&str; 5] = [
    "The sun will come up tomorrow, 10 bid",
    "This coin toss will come up heads, 50 bid at 50",
    "Karen will work past 10pm today, 70 bid at 90",
    "Your desk is going to collapse, at 10",
    "This sale will go through without and yet we won't hear back from them in the next week, 30 bid at 50",
];

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Everything the user can set on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preferences {
    /// The raw bet statement.
    pub value: String,
    pub amount: Decimal,
    pub currency: CurrencyFormat,
    pub show_as_jst: bool,
    pub role: Role,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            value: String::new(),
            amount: dec!(10),
            currency: CurrencyFormat::default(),
            show_as_jst: true,
            role: Role::Counterer,
        }
    }
}

impl Preferences {
    pub fn stake(&self) -> BetStake {
        BetStake::new(self.amount, self.role)
    }

    pub fn style(&self) -> DisplayStyle {
        DisplayStyle::from_show_as_jst(self.show_as_jst)
    }

    /// Decode a query string over the built-in defaults.
    pub fn from_query(query: &str) -> Result<Self, BidAskError> {
        Self::from_query_over(Self::default(), query)
    }

    /// Decode a query string over `base`. Unknown keys are ignored and
    /// empty values leave the base value in place.
    pub fn from_query_over(base: Self, query: &str) -> Result<Self, BidAskError> {
        let mut prefs = base;
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key)?;
            let value = decode_component(raw_value)?;
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "value" => prefs.value = value,
                "amount" => prefs.amount = parse_amount(&value)?,
                "currency_prefix" => prefs.currency.prefix = value,
                "currency_postfix" => prefs.currency.postfix = value,
                "show_as_jst" => prefs.show_as_jst = parse_bool(&key, &value)?,
                "countering" => prefs.role = Role::from_countering(parse_bool(&key, &value)?),
                other => debug!(key = other, "Ignoring unknown query parameter"),
            }
        }

        Ok(prefs)
    }

    /// Encode as `?key=value&...`. Only the statement and fields that
    /// differ from the defaults are written; all defaults encode as `"?"`.
    pub fn to_query(&self) -> String {
        let defaults = Self::default();
        let mut params: Vec<(&str, String)> = Vec::new();

        if !self.value.is_empty() {
            params.push(("value", self.value.clone()));
        }
        if self.amount != defaults.amount {
            params.push(("amount", self.amount.normalize().to_string()));
        }
        if self.currency.prefix != defaults.currency.prefix {
            params.push(("currency_prefix", self.currency.prefix.clone()));
        }
        if self.currency.postfix != defaults.currency.postfix {
            params.push(("currency_postfix", self.currency.postfix.clone()));
        }
        if self.show_as_jst != defaults.show_as_jst {
            params.push(("show_as_jst", self.show_as_jst.to_string()));
        }
        if self.role != defaults.role {
            params.push(("countering", self.role.is_counterer().to_string()));
        }

        let encoded: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect();
        format!("?{}", encoded.join("&"))
    }
}

/// Share links for the built-in example statements, relative to `base`.
pub fn example_links(base: &str) -> Vec<(&'static str, String)> {
    EXAMPLES
        .iter()
        .map(|ex| {
            let prefs = Preferences {
                value: ex.to_string(),
                ..Preferences::default()
            };
            (*ex, format!("{base}{}", prefs.to_query()))
        })
        .collect()
}

/// Parse a user-supplied stake, rejecting non-positive amounts.
pub fn parse_amount(raw: &str) -> Result<Decimal, BidAskError> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| BidAskError::InvalidQuery {
        key: "amount".into(),
        value: raw.to_string(),
    })?;
    BetStake::checked(amount, Role::default()).map(|s| s.amount)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, BidAskError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(BidAskError::InvalidQuery {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Percent-decode one query component, treating `+` as a space.
fn decode_component(raw: &str) -> Result<String, BidAskError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|_| BidAskError::InvalidQuery {
            key: "query".into(),
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
