//! Shared types for BIDASK.
//!
//! These types form the data model passed between the parser, the
//! payoff calculator and the presentation modules. All of them are
//! plain values, recomputed from scratch whenever the input changes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Parsed bet
// ---------------------------------------------------------------------------

/// Structured terms extracted from a bet statement.
///
/// When the statement does not match the bid/ask grammar every field is
/// `None`. When it does, `proposition` is always `Some` (possibly empty)
/// and `bid`/`ask` are present depending on which sub-clauses appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedBet {
    /// Price (0.0–1.0) at which the proposer buys the proposition.
    pub bid: Option<Decimal>,
    /// Price (0.0–1.0) at which the proposer sells the proposition.
    pub ask: Option<Decimal>,
    /// The statement with the bid/ask clause cut out.
    pub proposition: Option<String>,
}

impl ParsedBet {
    /// The "not bet-shaped" result.
    pub fn unmatched() -> Self {
        Self::default()
    }

    /// Whether the statement matched the grammar at all.
    pub fn is_match(&self) -> bool {
        self.proposition.is_some()
    }

    /// Whether both sides of the market were quoted.
    pub fn has_both_sides(&self) -> bool {
        self.bid.is_some() && self.ask.is_some()
    }
}

impl fmt::Display for ParsedBet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(proposition) = &self.proposition else {
            return write!(f, "(not a bid/ask statement)");
        };
        write!(f, "\"{proposition}\"")?;
        if let Some(bid) = self.bid {
            write!(f, " | bid {}%", (bid * dec!(100)).normalize())?;
        }
        if let Some(ask) = self.ask {
            write!(f, " | ask {}%", (ask * dec!(100)).normalize())?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Stake & role
// ---------------------------------------------------------------------------

/// Which side of the wager "you" are on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person countering (accepting or declining) the bet.
    #[default]
    Counterer,
    /// The person offering the bet.
    Proposer,
}

impl Role {
    pub fn from_countering(is_counterer: bool) -> Self {
        if is_counterer {
            Role::Counterer
        } else {
            Role::Proposer
        }
    }

    pub fn is_counterer(&self) -> bool {
        matches!(self, Role::Counterer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Counterer => write!(f, "counterer"),
            Role::Proposer => write!(f, "proposer"),
        }
    }
}

/// Stake and role supplied by the caller of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetStake {
    /// Total value the bet is sized against. Expected to be positive.
    pub amount: Decimal,
    pub role: Role,
}

impl BetStake {
    pub fn new(amount: Decimal, role: Role) -> Self {
        Self { amount, role }
    }

    /// Checked constructor for amounts coming from user input.
    pub fn checked(amount: Decimal, role: Role) -> Result<Self, BidAskError> {
        if amount <= Decimal::ZERO {
            return Err(BidAskError::InvalidStake(amount.to_string()));
        }
        Ok(Self { amount, role })
    }
}

impl Default for BetStake {
    fn default() -> Self {
        Self {
            amount: dec!(10),
            role: Role::Counterer,
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting options
// ---------------------------------------------------------------------------

/// Literal strings placed around every formatted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    #[serde(default)]
    pub prefix: String,
    #[serde(default = "default_postfix")]
    pub postfix: String,
}

fn default_postfix() -> String {
    " points".to_string()
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            postfix: default_postfix(),
        }
    }
}

/// Which explanation of the bet to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// "sold"/"taken" bid/ask phrasing.
    #[default]
    Bid,
    /// Yes-to-no odds phrasing.
    Betting,
}

impl DisplayStyle {
    pub fn from_show_as_jst(show_as_jst: bool) -> Self {
        if show_as_jst {
            DisplayStyle::Bid
        } else {
            DisplayStyle::Betting
        }
    }

    pub fn is_bid_style(&self) -> bool {
        matches!(self, DisplayStyle::Bid)
    }
}

impl fmt::Display for DisplayStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayStyle::Bid => write!(f, "Bid style"),
            DisplayStyle::Betting => write!(f, "Betting style"),
        }
    }
}

/// Parse a style name (case-insensitive).
impl std::str::FromStr for DisplayStyle {
    type Err = BidAskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bid" | "jst" => Ok(DisplayStyle::Bid),
            "betting" | "bet" | "odds" => Ok(DisplayStyle::Betting),
            _ => Err(BidAskError::UnknownStyle(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Payoff figures
// ---------------------------------------------------------------------------

/// Percentages and amounts derived from a `ParsedBet` and a stake.
///
/// Each field is `None` exactly when the probability it derives from is
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffFigures {
    pub amount: Decimal,
    pub role: Role,
    pub bid_percent: Option<i64>,
    pub bid_no_percent: Option<i64>,
    pub ask_percent: Option<i64>,
    pub ask_no_percent: Option<i64>,
    /// `amount * bid`: owed by the buyer whatever the outcome.
    pub bid_regardless: Option<Decimal>,
    /// `amount * (1 - bid)`: net to the buyer if the proposition is true.
    pub bid_if_true: Option<Decimal>,
    /// `amount * ask`: owed to the seller whatever the outcome.
    pub ask_regardless: Option<Decimal>,
    /// `amount * (1 - ask)`: net from the seller if the proposition is true.
    pub ask_if_true: Option<Decimal>,
}

impl fmt::Display for PayoffFigures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stake {} ({})", self.amount, self.role)?;
        if let (Some(pct), Some(reg), Some(rest)) =
            (self.bid_percent, self.bid_regardless, self.bid_if_true)
        {
            write!(f, " | bid {pct}%: {reg} regardless, {rest} if true")?;
        }
        if let (Some(pct), Some(reg), Some(rest)) =
            (self.ask_percent, self.ask_regardless, self.ask_if_true)
        {
            write!(f, " | ask {pct}%: {reg} regardless, {rest} if true")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised at the edges (CLI flags, query strings, config).
/// The parser and calculator themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum BidAskError {
    #[error("Invalid stake: {0} (must be a positive number)")]
    InvalidStake(String),

    #[error("Invalid query parameter {key}: {value}")]
    InvalidQuery { key: String, value: String },

    #[error("Unknown display style: {0}")]
    UnknownStyle(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
