//! Dashboard router tests over the public API.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use bidask::config::AppConfig;
use bidask::dashboard::build_router;
use bidask::dashboard::routes::DashboardState;

async fn get(uri: &str, cfg: &AppConfig) -> (StatusCode, serde_json::Value) {
    let app = build_router(Arc::new(DashboardState::new(cfg.preferences())));
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_config_defaults_flow_into_payoffs() {
    let cfg: AppConfig = toml::from_str(
        r#"
        [calculator]
        amount = 200
        currency_prefix = "€"
        currency_postfix = ""

        [display]
        show_as_jst = false
        "#,
    )
    .unwrap();

    let (status, json) = get("/api/payoffs?value=It+rains%2C+30+bid", &cfg).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["formatted"]["stake"], "€200.00");
    assert_eq!(json["formatted"]["bid_regardless"], "€60.00");
    assert_eq!(json["formatted"]["bid_if_true"], "€140.00");
    assert_eq!(json["style"], "betting");
    assert!(json["text"].as_str().unwrap().contains("30 yes to 70 no odds"));
}

#[tokio::test]
async fn test_query_overrides_config() {
    let cfg = AppConfig::default();
    let (_, json) = get("/api/payoffs?value=It+rains%2C+at+40&amount=5&show_as_jst=true", &cfg).await;
    assert_eq!(json["formatted"]["ask_regardless"], "2.00 points");
    assert_eq!(json["formatted"]["ask_if_true"], "3.00 points");
    assert_eq!(json["style"], "bid");
}

#[tokio::test]
async fn test_bad_query_is_bad_request() {
    let (status, json) = get("/api/payoffs?countering=perhaps", &AppConfig::default()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("countering"));
}

#[tokio::test]
async fn test_unmatched_statement_has_no_text() {
    let (status, json) = get("/api/payoffs?value=hello+world", &AppConfig::default()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["text"].is_null());
    assert!(json["parsed"]["proposition"].is_null());
}
