//! Dashboard API route handlers.
//!
//! All endpoints return JSON. Form state arrives in the query string, in
//! the same encoding `Preferences::to_query` produces.

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::calculator::{FormattedPayoffs, PayoffCalculator};
use crate::parser::ParseMemo;
use crate::query::{example_links, Preferences};
use crate::render::render;
use crate::types::{BidAskError, DisplayStyle, ParsedBet, PayoffFigures};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    /// Form values used for any key the query string leaves out.
    pub defaults: Preferences,
    pub memo: Mutex<ParseMemo>,
}

impl DashboardState {
    pub fn new(defaults: Preferences) -> Self {
        Self {
            defaults,
            memo: Mutex::new(ParseMemo::new()),
        }
    }

    fn preferences(&self, query: Option<String>) -> Result<Preferences, BidAskError> {
        Preferences::from_query_over(self.defaults.clone(), query.as_deref().unwrap_or(""))
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PayoffResponse {
    pub preferences: Preferences,
    pub parsed: ParsedBet,
    pub figures: PayoffFigures,
    pub formatted: FormattedPayoffs,
    pub style: DisplayStyle,
    /// Rendered explanation; absent when the statement is not bet-shaped.
    pub text: Option<String>,
    pub share_link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExampleEntry {
    pub statement: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for BidAskError {
    fn into_response(self) -> Response {
        warn!(error = %self, "Rejected request");
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/parse
pub async fn get_parse(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ParsedBet>, BidAskError> {
    let prefs = state.preferences(query)?;
    let parsed = state.memo.lock().await.parse(&prefs.value);
    Ok(Json(parsed))
}

/// GET /api/payoffs
pub async fn get_payoffs(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<PayoffResponse>, BidAskError> {
    let prefs = state.preferences(query)?;
    let parsed = state.memo.lock().await.parse(&prefs.value);

    let calc = PayoffCalculator::new(prefs.currency.clone());
    let figures = calc.compute(&parsed, &prefs.stake());
    let formatted = calc.formatted(&figures);
    let style = prefs.style();
    let text = render(&parsed, &figures, calc.format(), style);

    debug!(matched = parsed.is_match(), style = %style, "Payoffs served");

    Ok(Json(PayoffResponse {
        share_link: prefs.to_query(),
        preferences: prefs,
        parsed,
        figures,
        formatted,
        style,
        text,
    }))
}

/// GET /api/examples
pub async fn get_examples() -> Json<Vec<ExampleEntry>> {
    Json(
        example_links("/")
            .into_iter()
            .map(|(statement, link)| ExampleEntry {
                statement: statement.to_string(),
                link,
            })
            .collect(),
    )
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
