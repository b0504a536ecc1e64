//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::util::ServiceExt;

use heat_cost::api::{AppState, router};
use heat_cost::config::CalculatorConfig;

fn state_from(config: &CalculatorConfig) -> Arc<AppState> {
    Arc::new(AppState {
        tariff: config.tariff().expect("config tariff should be valid"),
        defaults: config.defaults.clone(),
    })
}

async fn post(state: Arc<AppState>, body: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}

#[tokio::test]
async fn config_defaults_apply_when_request_omits_them() {
    let config = CalculatorConfig::from_toml_file(std::path::Path::new("fixtures/net_monthly.toml"))
        .expect("fixture should parse");
    let (status, json) = post(state_from(&config), r#"{"input":{"total":0}}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["period"], "month");
    assert_eq!(json["result"]["include_vat"], false);
    assert_eq!(json["result"]["fixed_charge_for_period"], 2425.07);
}

#[tokio::test]
async fn request_fields_override_config_defaults() {
    let config = CalculatorConfig::reference();
    let body = r#"{"input":{"total":10000},"period":"year","include_vat":true}"#;
    let (status, json) = post(state_from(&config), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["energy_cost"], 2136.47);
    assert_eq!(json["result"]["blended_rate_per_kwh"], 0.2136);
}

#[tokio::test]
async fn unknown_body_field_is_rejected() {
    let config = CalculatorConfig::reference();
    let (status, _) = post(state_from(&config), r#"{"input":{"total":1},"bogus":1}"#).await;
    assert!(status.is_client_error());
}
