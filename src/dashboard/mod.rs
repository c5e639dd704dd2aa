//! Dashboard — Axum web server for the bet calculator.
//!
//! Serves a JSON API over the parser and calculator plus a self-contained
//! HTML page that drives it. CORS enabled for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    response::Html,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use routes::AppState;

/// The embedded page (compiled into the binary).
const DASHBOARD_HTML: &str = include_str!("templates/index.html");

/// Run the dashboard until Ctrl+C.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    info!(port, "Dashboard server listening on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received.");
        })
        .await
        .context("Dashboard server error")?;

    Ok(())
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // API routes
        .route("/api/parse", get(routes::get_parse))
        .route("/api/payoffs", get(routes::get_payoffs))
        .route("/api/examples", get(routes::get_examples))
        .route("/health", get(routes::health))
        // Calculator page
        .route("/", get(serve_dashboard))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded HTML page.
async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Preferences;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use routes::DashboardState;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        Arc::new(DashboardState::new(Preferences::default()))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_parse_endpoint() {
        let (status, json) =
            get_json("/api/parse?value=This%20coin%20toss%20will%20come%20up%20heads%2C%2050%20bid%20at%2050").await;
        assert_eq!(status, StatusCode::OK);
        assert!((json["bid"].as_f64().unwrap() - 0.5).abs() < 1e-9);
        assert!((json["ask"].as_f64().unwrap() - 0.5).abs() < 1e-9);
        assert_eq!(json["proposition"], "This coin toss will come up heads");
    }

    #[tokio::test]
    async fn test_parse_endpoint_unmatched() {
        let (status, json) = get_json("/api/parse?value=hello").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["bid"].is_null());
        assert!(json["ask"].is_null());
        assert!(json["proposition"].is_null());
    }

    #[tokio::test]
    async fn test_payoffs_endpoint() {
        let (status, json) = get_json(
            "/api/payoffs?value=Rain%2C+70+bid+at+90&amount=20&currency_prefix=%24&currency_postfix=+USD",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["figures"]["bid_percent"], 70);
        assert_eq!(json["figures"]["ask_no_percent"], 10);
        assert_eq!(json["formatted"]["bid_regardless"], "$14.00 USD");
        assert_eq!(json["formatted"]["ask_if_true"], "$2.00 USD");
        assert_eq!(json["style"], "bid");
        assert!(json["text"].as_str().unwrap().contains("\"sold\""));
    }

    #[tokio::test]
    async fn test_payoffs_endpoint_absent_side_is_null() {
        let (_, json) = get_json("/api/payoffs?value=Rain%2C+at+10").await;
        assert!(json["formatted"]["bid_regardless"].is_null());
        assert!(json["figures"]["bid_percent"].is_null());
    }

    #[tokio::test]
    async fn test_payoffs_endpoint_rejects_bad_stake() {
        let (status, json) = get_json("/api/payoffs?value=x&amount=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("Invalid stake"));
    }

    #[tokio::test]
    async fn test_examples_endpoint() {
        let (status, json) = get_json("/api/examples").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_dashboard_html() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("BIDASK"));
        assert!(html.contains("/api/payoffs"));
    }
}
