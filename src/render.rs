//! Plain-text explanations of a parsed bet.
//!
//! Two styles are offered. The bid style talks in terms of buying and
//! selling the proposition ("sold" / "taken"). The betting style talks in
//! yes-to-no odds and the amount each side puts up.

use crate::calculator::{format_currency, Parties};
use crate::types::{CurrencyFormat, DisplayStyle, ParsedBet, PayoffFigures};

/// Render the explanation of `bet`, or `None` if it is not bet-shaped.
pub fn render(
    bet: &ParsedBet,
    figures: &PayoffFigures,
    format: &CurrencyFormat,
    style: DisplayStyle,
) -> Option<String> {
    let proposition = bet.proposition.as_deref()?;
    let ctx = Context {
        proposition,
        figures,
        format,
        parties: Parties::for_role(figures.role),
        both_sides: bet.has_both_sides(),
    };

    let lines = match style {
        DisplayStyle::Bid => ctx.bid_style(),
        DisplayStyle::Betting => ctx.betting_style(),
    };
    Some(lines.join("\n"))
}

struct Context<'a> {
    proposition: &'a str,
    figures: &'a PayoffFigures,
    format: &'a CurrencyFormat,
    parties: Parties,
    both_sides: bool,
}

impl Context<'_> {
    fn money(&self, value: Option<rust_decimal::Decimal>) -> String {
        format_currency(value, self.format).unwrap_or_default()
    }

    fn stake(&self) -> String {
        self.money(Some(self.figures.amount))
    }

    /// "70% is less than their estimate of its probability, which is less than 90%."
    fn estimate_line(&self) -> String {
        let mut line = String::new();
        if let Some(bid) = self.figures.bid_percent {
            line.push_str(&format!("{bid}% is less than "));
        }
        line.push_str(&format!(
            "{} estimate of its probability",
            self.parties.proposer_possessive()
        ));
        if let Some(ask) = self.figures.ask_percent {
            if self.figures.bid_percent.is_some() {
                line.push_str(", which");
            }
            line.push_str(&format!(" is less than {ask}%"));
        }
        line.push('.');
        capitalize(&line)
    }

    fn bid_style(&self) -> Vec<String> {
        let f = self.figures;
        let Parties { counterer, proposer } = self.parties;
        let their = self.parties.proposer_possessive();

        let mut lines = vec![
            format!(
                "You're trading on a proposal worth {} if {} resolves true,",
                self.stake(),
                self.proposition
            ),
            format!("and according to the bet {proposer}'re proposing,"),
            self.estimate_line(),
        ];

        if let Some(bid) = f.bid_percent {
            lines.push(String::new());
            lines.push(format!(
                "If {counterer} believe the true probability is less than {bid}%, then \
                 {proposer}'re buying this proposition for too much, and {counterer} \
                 should take {their} bet."
            ));
            lines.push(format!(
                "{} can accept {their} bid by saying \"sold\".",
                capitalize(counterer)
            ));
            lines.push(format!(
                "Once the proposition resolves, {proposer}'ll owe {} {} regardless for \
                 buying the proposition, but if the proposition was true, {counterer}'ll \
                 owe {} {} (which adds up to {}).",
                object(counterer),
                self.money(f.bid_regardless),
                object(proposer),
                self.stake(),
                self.money(f.bid_if_true),
            ));
        }

        if let Some(ask) = f.ask_percent {
            lines.push(String::new());
            lines.push(format!(
                "If {counterer} believe the true probability is greater than {ask}%, then \
                 {proposer}'re selling this proposition for too little, and {counterer} \
                 should take {their} bet."
            ));
            lines.push(format!(
                "{} can accept {their} ask by saying \"taken\".",
                capitalize(counterer)
            ));
            lines.push(format!(
                "Once the proposition resolves, {counterer}'ll owe {} {} regardless for \
                 buying the proposition, but if the proposition was true, {proposer}'ll \
                 owe {} {} back (which adds up to {}).",
                object(proposer),
                self.money(f.ask_regardless),
                object(counterer),
                self.stake(),
                self.money(f.ask_if_true),
            ));
        }

        lines
    }

    fn betting_style(&self) -> Vec<String> {
        let f = self.figures;
        let Parties { counterer, proposer } = self.parties;
        let theirs = self.parties.proposer_possessive();
        let yours = self.parties.counterer_possessive();

        let mut lines = vec![
            format!(
                "{}'re considering a bet worth {} if {} resolves true,",
                capitalize(counterer),
                self.stake(),
                self.proposition
            ),
            format!("and according to the bet {proposer}'re proposing,"),
            self.estimate_line(),
        ];

        if let (Some(yes), Some(no)) = (f.bid_percent, f.bid_no_percent) {
            lines.push(String::new());
            lines.push(format!(
                "{}'ll take the yes side of the bet at {yes} yes to {no} no odds:",
                capitalize(proposer)
            ));
            lines.push(format!(
                "{} {} that the claim \"{}\" is true or resolves to being true",
                capitalize(theirs),
                self.money(f.bid_regardless),
                self.proposition
            ));
            lines.push(format!(
                "to {yours} {} that it's false or resolves to being false.",
                self.money(f.bid_if_true)
            ));
            lines.push(format!(
                "{} can accept this bet by saying, for example, \"my {} no to your {} yes, \
                 we're on\". It's probably faster to say \"sold\".",
                capitalize(counterer),
                self.money(f.bid_if_true),
                self.money(f.bid_regardless)
            ));
        }

        if self.both_sides {
            lines.push(String::new());
            lines.push("OR".to_string());
        }

        if let (Some(yes), Some(no)) = (f.ask_percent, f.ask_no_percent) {
            lines.push(String::new());
            lines.push(format!(
                "{}'ll take the no side of the bet at {yes} yes to {no} no odds:",
                capitalize(proposer)
            ));
            lines.push(format!(
                "{} {} that the claim \"{}\" is true or resolves to being true",
                capitalize(yours),
                self.money(f.ask_regardless),
                self.proposition
            ));
            lines.push(format!(
                "to {theirs} {} that it's false or resolves to being false.",
                self.money(f.ask_if_true)
            ));
            lines.push(format!(
                "{} can accept this bet by saying, for example, \"my {} yes to your {} no, \
                 we're on\". It's probably faster to say \"taken\".",
                capitalize(counterer),
                self.money(f.ask_regardless),
                self.money(f.ask_if_true)
            ));
        }

        lines
    }
}

fn object(pronoun: &str) -> &str {
    if pronoun == "they" {
        "them"
    } else {
        pronoun
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
