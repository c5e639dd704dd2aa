//! Statement-to-explanation pipeline tests.
//!
//! Drives the library the way the binary and dashboard do: decode the
//! form state, parse the statement, compute payoffs, render.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bidask::calculator::{format_currency, PayoffCalculator};
use bidask::parser::{parse, ParseMemo};
use bidask::query::{Preferences, EXAMPLES};
use bidask::render::render;
use bidask::types::{BetStake, CurrencyFormat, DisplayStyle, ParsedBet, Role};

fn run(query: &str) -> (ParsedBet, Option<String>) {
    let prefs = Preferences::from_query(query).unwrap();
    let parsed = parse(&prefs.value);
    let calc = PayoffCalculator::new(prefs.currency.clone());
    let figures = calc.compute(&parsed, &prefs.stake());
    let text = render(&parsed, &figures, calc.format(), prefs.style());
    (parsed, text)
}

#[test]
fn test_all_examples_explain_in_both_styles() {
    let calc = PayoffCalculator::default();
    for ex in EXAMPLES {
        let parsed = parse(ex);
        let figures = calc.compute(&parsed, &BetStake::default());
        for style in [DisplayStyle::Bid, DisplayStyle::Betting] {
            let text = render(&parsed, &figures, calc.format(), style).unwrap();
            assert!(text.contains(parsed.proposition.as_deref().unwrap()), "{ex}");
            assert!(!text.contains("NaN"), "{ex}");
        }
    }
}

#[test]
fn test_query_to_text() {
    let (parsed, text) = run("?value=Karen+will+work+past+10pm+today%2C+70+bid+at+90&amount=50&currency_prefix=%24&currency_postfix=");
    assert_eq!(parsed.bid, Some(dec!(0.70)));
    assert_eq!(parsed.ask, Some(dec!(0.90)));
    let text = text.unwrap();
    // empty postfix in a query keeps the " points" default
    assert!(text.contains("$35.00 points regardless"));
    assert!(text.contains("$45.00 points regardless"));
}

#[test]
fn test_betting_style_from_query() {
    let (_, text) = run("value=Rain%2C+at+25&show_as_jst=false&countering=false");
    let text = text.unwrap();
    assert!(text.starts_with("They're considering a bet worth 10.00 points"));
    assert!(text.contains("You'll take the no side of the bet at 25 yes to 75 no odds:"));
}

#[test]
fn test_not_bet_shaped_renders_nothing() {
    let (parsed, text) = run("value=Just+a+sentence");
    assert_eq!(parsed, ParsedBet::unmatched());
    assert!(text.is_none());
}

#[test]
fn test_stake_identity_for_parsed_bids() {
    let calc = PayoffCalculator::default();
    for pct in 1..=99 {
        let parsed = parse(&format!("Some event, {pct} bid at {pct}"));
        let stake = BetStake::new(dec!(37.5), Role::Counterer);
        let f = calc.compute(&parsed, &stake);
        assert_eq!(f.bid_regardless.unwrap() + f.bid_if_true.unwrap(), stake.amount);
        assert_eq!(f.ask_regardless.unwrap() + f.ask_if_true.unwrap(), stake.amount);
        assert_eq!(f.bid_percent, Some(pct));
    }
}

#[test]
fn test_absent_side_never_formats_as_zero() {
    let parsed = parse("The sun will come up tomorrow, 10 bid");
    let calc = PayoffCalculator::new(CurrencyFormat {
        prefix: "$".into(),
        postfix: String::new(),
    });
    let f = calc.compute(&parsed, &BetStake::default());
    let out = calc.formatted(&f);
    assert_eq!(out.ask_regardless, None);
    assert_eq!(out.ask_if_true, None);
    assert_eq!(format_currency(parsed.ask, calc.format()), None);
    assert_eq!(out.bid_regardless.as_deref(), Some("$1.00"));
}

#[test]
fn test_memo_matches_direct_parse() {
    let mut memo = ParseMemo::new();
    for ex in EXAMPLES.iter().chain(EXAMPLES.iter()) {
        assert_eq!(memo.parse(ex), parse(ex));
    }
    assert_eq!(memo.hits(), 0);
    assert_eq!(memo.misses(), 10);
}

#[test]
fn test_reparse_of_propositions() {
    for ex in [
        "The sun will come up tomorrow, 10 bid",
        "This coin toss will come up heads, 50 bid at 50",
        "Your desk is going to collapse, at 10",
    ] {
        let first = parse(ex);
        let again = parse(first.proposition.as_deref().unwrap());
        assert_eq!(again.bid, None);
        assert_eq!(again.ask, None);
        assert_eq!(again.proposition, None);
    }
}

#[test]
fn test_share_link_round_trip() {
    let prefs = Preferences {
        value: "It snows in July, at 20 5 bid".into(),
        amount: Decimal::new(1250, 2),
        ..Preferences::default()
    };
    let decoded = Preferences::from_query(&prefs.to_query()).unwrap();
    assert_eq!(decoded, prefs);
    let parsed = parse(&decoded.value);
    assert_eq!(parsed.bid, Some(dec!(0.05)));
    assert_eq!(parsed.ask, Some(dec!(0.20)));
}
