//! Bet statement parser.
//!
//! Recognizes statements of the form `<prefix>, <clause> <suffix>` where the
//! clause quotes a bid and/or an ask in whole percent ("70 bid at 90",
//! "at 10", "bid 40"). Matching runs in two stages: a shape scan that
//! isolates the clause, then a re-scan of the clause text that fills the
//! bid and ask slots.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::types::ParsedBet;

/// Placed between the two halves of a proposition when the clause sat
/// in the middle of the sentence.
pub const ELISION: &str = " ... ";

lazy_static! {
    /// One sub-clause at the very start of the haystack. Digit boundaries
    /// and the spaces after `N bid` are checked by hand in `sub_clause_at`.
    static ref SUB_CLAUSE_AT: Regex =
        Regex::new(r"^(?:([0-9]{1,2}) *bid|at *([0-9]{1,2}) *|bid *([0-9]{1,2}) *)").unwrap();
    /// Sub-clause occurrences anywhere in an isolated clause.
    static ref SUB_CLAUSE: Regex =
        Regex::new(r"([0-9]{1,2}) *bid *|at *([0-9]{1,2}) *|bid *([0-9]{1,2}) *").unwrap();
    static ref THAT: Regex = Regex::new(r"^that *").unwrap();
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a free-text bet statement.
///
/// Never fails: a statement that is not bet-shaped yields a `ParsedBet`
/// with every field `None`.
pub fn parse(text: &str) -> ParsedBet {
    let Some(shape) = match_shape(text) else {
        trace!(len = text.len(), "Statement is not bet-shaped");
        return ParsedBet::unmatched();
    };

    let (bid, ask) = scan_clause(shape.clause);
    let proposition = join_proposition(shape.prefix, shape.suffix);

    debug!(
        clause = shape.clause,
        bid = ?bid,
        ask = ?ask,
        proposition = %proposition,
        "Bet statement parsed"
    );

    ParsedBet {
        bid,
        ask,
        proposition: Some(proposition),
    }
}

/// Memoizes the most recent parse, keyed on the exact input string.
///
/// Callers that re-render without the statement changing skip the scan.
#[derive(Debug, Default)]
pub struct ParseMemo {
    last: Option<(String, ParsedBet)>,
    hits: u64,
    misses: u64,
}

impl ParseMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&mut self, text: &str) -> ParsedBet {
        if let Some((input, parsed)) = &self.last {
            if input == text {
                self.hits += 1;
                return parsed.clone();
            }
        }
        self.misses += 1;
        let parsed = parse(text);
        self.last = Some((text.to_string(), parsed.clone()));
        parsed
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

// ---------------------------------------------------------------------------
// Stage 1: statement shape
// ---------------------------------------------------------------------------

/// A statement split around its bid/ask clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shape<'a> {
    prefix: &'a str,
    clause: &'a str,
    suffix: &'a str,
}

/// Find the shortest prefix after which `[,][ *]<clause>[that *]` matches.
fn match_shape(text: &str) -> Option<Shape<'_>> {
    let boundaries = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));

    for prefix_end in boundaries {
        // Inside a run of spaces (or just after a comma that opens one) every
        // prefix end skips to the same clause start, already tried and failed.
        if text[prefix_end..].starts_with(' ')
            && text[..prefix_end].ends_with(|c: char| c == ' ' || c == ',')
        {
            continue;
        }

        let mut start = prefix_end;
        if text[start..].starts_with(',') {
            start += 1;
        }
        start += leading_spaces(&text[start..]);

        let Some(clause_end) = match_clause(text, start) else {
            continue;
        };
        let suffix_start = clause_end + THAT.find(&text[clause_end..]).map_or(0, |m| m.end());

        return Some(Shape {
            prefix: &text[..prefix_end],
            clause: &text[start..clause_end],
            suffix: &text[suffix_start..],
        });
    }

    None
}

/// Match one or two back-to-back sub-clauses starting at `start`. Returns
/// the end offset of the clause.
fn match_clause(text: &str, start: usize) -> Option<usize> {
    let first_end = sub_clause_at(text, start)?;
    Some(sub_clause_at(text, first_end).unwrap_or(first_end))
}

/// End offset of a sub-clause beginning exactly at `pos`, if one does.
///
/// Numbers must be whole runs of one or two digits: `100 bid` and `at 123`
/// are not split into a shorter quote.
fn sub_clause_at(text: &str, pos: usize) -> Option<usize> {
    let rest = &text[pos..];
    let caps = SUB_CLAUSE_AT.captures(rest)?;
    let whole = caps.get(0)?;

    if caps.get(1).is_some() {
        // `N bid`: no digit may precede N or directly follow "bid".
        if text[..pos].ends_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let after = &rest[whole.end()..];
        if after.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let spaces = leading_spaces(after);
        let followed_by_digit = after[spaces..].starts_with(|c: char| c.is_ascii_digit());
        let consumed = if followed_by_digit { 0 } else { spaces };
        return Some(pos + whole.end() + consumed);
    }

    let digits = caps.get(2).or_else(|| caps.get(3))?;
    if rest[digits.end()..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(pos + whole.end())
}

fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|b| *b == b' ').count()
}

// ---------------------------------------------------------------------------
// Stage 2: clause re-scan
// ---------------------------------------------------------------------------

/// Collect bid and ask from an isolated clause. Later quotes of the same
/// kind overwrite earlier ones.
fn scan_clause(clause: &str) -> (Option<Decimal>, Option<Decimal>) {
    let mut bid = None;
    let mut ask = None;

    for caps in SUB_CLAUSE.captures_iter(clause) {
        if let Some(p) = percent_group(&caps, 1).or_else(|| percent_group(&caps, 3)) {
            if bid.is_some() {
                trace!(clause, "Repeated bid, keeping the later one");
            }
            bid = Some(p);
        }
        if let Some(p) = percent_group(&caps, 2) {
            if ask.is_some() {
                trace!(clause, "Repeated ask, keeping the later one");
            }
            ask = Some(p);
        }
    }

    (bid, ask)
}

/// Whole-percent capture group converted to a probability.
fn percent_group(caps: &Captures<'_>, group: usize) -> Option<Decimal> {
    let n: i64 = caps.get(group)?.as_str().parse().ok()?;
    Some(Decimal::new(n, 2))
}

fn join_proposition(prefix: &str, suffix: &str) -> String {
    let (prefix, suffix) = (prefix.trim(), suffix.trim());
    if !prefix.is_empty() && !suffix.is_empty() {
        format!("{prefix}{ELISION}{suffix}")
    } else {
        format!("{prefix}{suffix}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
