//! BIDASK — bid/ask bet statement parser and payoff calculator
//!
//! Entry point. Loads configuration, initialises structured logging,
//! restores the remembered display toggles, then either explains the
//! statements given on the command line or serves the dashboard.

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use bidask::calculator::PayoffCalculator;
use bidask::config::AppConfig;
use bidask::dashboard::{self, routes::DashboardState};
use bidask::parser::ParseMemo;
use bidask::query::{parse_amount, Preferences};
use bidask::render::render;
use bidask::storage::{self, Toggles};
use bidask::types::{DisplayStyle, Role};

const USAGE: &str = "\
usage: bidask [--amount N] [--prefix S] [--postfix S] [--style bid|betting]
              [--counterer | --proposer] [STATEMENT]...

Explains each STATEMENT, e.g. \"the sky is blue, 98 bid at 99\".
With no STATEMENT, serves the dashboard (if enabled in bidask.toml).
--style and --counterer/--proposer are remembered for next time.";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cfg = startup()?;

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    // -- Resolve preferences: config < remembered toggles < flags --------

    let prefs_file = cfg.display.preferences_file.as_str();
    let mut prefs = cfg.preferences();
    if let Some(toggles) = storage::load_toggles(Some(prefs_file))? {
        toggles.apply(&mut prefs);
    }
    args.apply(&mut prefs);

    if args.changes_toggles() {
        storage::save_toggles(&Toggles::from_preferences(&prefs), Some(prefs_file))?;
    }

    // -- Explain statements, or serve -------------------------------------

    if !args.statements.is_empty() {
        let mut memo = ParseMemo::new();
        for statement in &args.statements {
            println!("{}", explain(&mut memo, &prefs, statement));
        }
        return Ok(());
    }

    if !cfg.dashboard.enabled {
        warn!("No statements given and the dashboard is disabled");
        println!("{USAGE}");
        return Ok(());
    }

    info!(
        port = cfg.dashboard.port,
        amount = %prefs.amount,
        style = %prefs.style(),
        role = %prefs.role,
        "BIDASK dashboard starting"
    );
    dashboard::serve(Arc::new(DashboardState::new(prefs)), cfg.dashboard.port).await
}

/// Install logging, then load the config so its own events are recorded.
fn startup() -> Result<AppConfig> {
    init_logging();
    AppConfig::load_or_default()
}

/// Parse, price and render one statement for the terminal.
fn explain(memo: &mut ParseMemo, prefs: &Preferences, statement: &str) -> String {
    let parsed = memo.parse(statement);
    let calc = PayoffCalculator::new(prefs.currency.clone());
    let figures = calc.compute(&parsed, &prefs.stake());

    match render(&parsed, &figures, calc.format(), prefs.style()) {
        Some(text) => format!("{parsed}\n{}\n\n{text}\n", prefs.style()),
        None => format!("{statement:?}: {parsed}\n"),
    }
}

/// Command-line flags and statements.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    amount: Option<Decimal>,
    prefix: Option<String>,
    postfix: Option<String>,
    style: Option<DisplayStyle>,
    role: Option<Role>,
    help: bool,
    statements: Vec<String>,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut out = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .with_context(|| format!("{flag} needs a value"))
            };
            match arg.as_str() {
                "--amount" => out.amount = Some(parse_amount(&value("--amount")?)?),
                "--prefix" => out.prefix = Some(value("--prefix")?),
                "--postfix" => out.postfix = Some(value("--postfix")?),
                "--style" => out.style = Some(value("--style")?.parse()?),
                "--counterer" => out.role = Some(Role::Counterer),
                "--proposer" => out.role = Some(Role::Proposer),
                "-h" | "--help" => out.help = true,
                flag if flag.starts_with("--") => bail!("Unknown flag: {flag}\n\n{USAGE}"),
                statement => out.statements.push(statement.to_string()),
            }
        }

        Ok(out)
    }

    fn apply(&self, prefs: &mut Preferences) {
        if let Some(amount) = self.amount {
            prefs.amount = amount;
        }
        if let Some(prefix) = &self.prefix {
            prefs.currency.prefix = prefix.clone();
        }
        if let Some(postfix) = &self.postfix {
            prefs.currency.postfix = postfix.clone();
        }
        if let Some(style) = self.style {
            prefs.show_as_jst = style.is_bid_style();
        }
        if let Some(role) = self.role {
            prefs.role = role;
        }
    }

    fn changes_toggles(&self) -> bool {
        self.style.is_some() || self.role.is_some()
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bidask=info"));

    let json_logging = std::env::var("BIDASK_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
