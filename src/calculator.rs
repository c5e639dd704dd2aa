//! Payoff calculation.
//!
//! Turns a `ParsedBet` and a stake into the percentages and amounts each
//! side owes, and formats amounts for display. Everything here is pure;
//! absent probabilities produce absent figures, never zeros.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use crate::types::{BetStake, CurrencyFormat, ParsedBet, PayoffFigures, Role};

// ---------------------------------------------------------------------------
// Rounding & formatting helpers
// ---------------------------------------------------------------------------

/// Whole-percent display of a probability, rounding half away from zero.
pub fn percent(p: Decimal) -> i64 {
    let scaled = (p * dec!(100)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    scaled.to_i64().unwrap_or(if scaled.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Format an amount to two decimals between the configured prefix and
/// postfix. `None` stays `None`.
pub fn format_currency(value: Option<Decimal>, format: &CurrencyFormat) -> Option<String> {
    let mut rounded = value?.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    Some(format!("{}{}{}", format.prefix, rounded, format.postfix))
}

// ---------------------------------------------------------------------------
// Parties
// ---------------------------------------------------------------------------

/// Pronouns for the two sides of the wager, from the reader's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parties {
    pub counterer: &'static str,
    pub proposer: &'static str,
}

impl Parties {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Counterer => Self {
                counterer: "you",
                proposer: "they",
            },
            Role::Proposer => Self {
                counterer: "they",
                proposer: "you",
            },
        }
    }

    pub fn counterer_possessive(&self) -> &'static str {
        possessive(self.counterer)
    }

    pub fn proposer_possessive(&self) -> &'static str {
        possessive(self.proposer)
    }
}

fn possessive(pronoun: &str) -> &'static str {
    if pronoun == "you" {
        "your"
    } else {
        "their"
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Display strings for every amount in a `PayoffFigures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedPayoffs {
    pub stake: Option<String>,
    pub bid_regardless: Option<String>,
    pub bid_if_true: Option<String>,
    pub ask_regardless: Option<String>,
    pub ask_if_true: Option<String>,
}

pub struct PayoffCalculator {
    format: CurrencyFormat,
}

impl PayoffCalculator {
    pub fn new(format: CurrencyFormat) -> Self {
        Self { format }
    }

    /// Access the currency format.
    pub fn format(&self) -> &CurrencyFormat {
        &self.format
    }

    /// Compute payoffs for a parsed bet.
    ///
    /// At price p on stake A:
    ///   regardless = A * p        (paid for the proposition up front)
    ///   if true    = A * (1 - p)  (net once the stake is paid out)
    pub fn compute(&self, bet: &ParsedBet, stake: &BetStake) -> PayoffFigures {
        let amount = stake.amount;
        let figures = PayoffFigures {
            amount,
            role: stake.role,
            bid_percent: bet.bid.map(percent),
            bid_no_percent: bet.bid.map(|p| percent(Decimal::ONE - p)),
            ask_percent: bet.ask.map(percent),
            ask_no_percent: bet.ask.map(|p| percent(Decimal::ONE - p)),
            bid_regardless: bet.bid.map(|p| amount * p),
            bid_if_true: bet.bid.map(|p| amount * (Decimal::ONE - p)),
            ask_regardless: bet.ask.map(|p| amount * p),
            ask_if_true: bet.ask.map(|p| amount * (Decimal::ONE - p)),
        };

        debug!(
            amount = %amount,
            role = %stake.role,
            bid_pct = ?figures.bid_percent,
            ask_pct = ?figures.ask_percent,
            "Payoffs computed"
        );

        figures
    }

    pub fn format_amount(&self, value: Option<Decimal>) -> Option<String> {
        format_currency(value, &self.format)
    }

    /// Format every amount in `figures`.
    pub fn formatted(&self, figures: &PayoffFigures) -> FormattedPayoffs {
        FormattedPayoffs {
            stake: self.format_amount(Some(figures.amount)),
            bid_regardless: self.format_amount(figures.bid_regardless),
            bid_if_true: self.format_amount(figures.bid_if_true),
            ask_regardless: self.format_amount(figures.ask_regardless),
            ask_if_true: self.format_amount(figures.ask_if_true),
        }
    }
}

impl Default for PayoffCalculator {
    fn default() -> Self {
        Self::new(CurrencyFormat::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
