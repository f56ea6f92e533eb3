//! Tests for the HTTP API.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use roi_engine::api::build_router;
use roi_engine::catalog::TierCatalog;
use roi_engine::config::RoiConfig;
use roi_engine::engine::Calculator;
use roi_engine::models::{CalculationResult, ExpenseSchedule};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let (router, _state) = build_router(Calculator::default());
    router
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, value)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_list_tiers() {
    let (status, body) = send(get("/api/tiers")).await;
    assert_eq!(status, StatusCode::OK);
    let tiers = body.as_array().unwrap();
    assert_eq!(tiers.len(), 4);
    assert_eq!(tiers[1]["id"], "backyard");
    assert_eq!(tiers[1]["price"], 105000.0);
    assert_eq!(tiers[1]["suggested_nightly_rate"], 225.0);
}

#[tokio::test]
async fn test_get_tier_by_id() {
    let (status, body) = send(get("/api/tiers/residence")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 155000.0);

    let (status, body) = send(get("/api/tiers/penthouse")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("penthouse"));
}

#[tokio::test]
async fn test_defaults() {
    let (status, body) = send(get("/api/defaults")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "backyard");
    assert_eq!(body["nightly_rate"], 225.0);
    assert_eq!(body["personal_use_days"], 30);
}

#[tokio::test]
async fn test_calculate_default_scenario() {
    let (status, body) = send(post_json("/api/calculate", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookings"]["total_bookings"], 91);
    assert_eq!(body["revenue"]["total"], 51185.0);
    assert_eq!(body["total_expenses"], 3500.0);
    assert_eq!(body["net_income"], 47685.0);
    assert_eq!(body["ten_year_profit"], 371850.0);
}

#[tokio::test]
async fn test_calculate_loss_making_scenario() {
    let (status, body) = send(post_json(
        "/api/calculate",
        json!({"peak_occupancy_pct": 0, "off_peak_occupancy_pct": 0}),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["net_income"], -3500.0);
    assert_eq!(body["payback_years"], -30.0);
}

#[tokio::test]
async fn test_calculate_rejects_invalid_input() {
    let (status, body) = send(post_json(
        "/api/calculate",
        json!({"off_peak_occupancy_pct": 140}),
    ))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("off_peak_occupancy_pct"));
}

#[tokio::test]
async fn test_calculate_rejects_unknown_tier() {
    let (status, body) = send(post_json("/api/calculate", json!({"tier": "mansion"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("mansion"));
}

#[tokio::test]
async fn test_undecodable_bodies_get_json_errors() {
    let (status, body) = send(post_json(
        "/api/calculate",
        json!({"personal_use_days": -5}),
    ))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method("POST")
        .uri("/api/compare")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, body) = send(post_json("/api/batch", json!({"tier": "studio"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_calculate_break_even_payback_is_null() {
    let config = RoiConfig {
        expenses: ExpenseSchedule {
            insurance: 0.0,
            maintenance: 0.0,
            utilities: 0.0,
            ..ExpenseSchedule::default()
        },
        ..RoiConfig::default()
    };
    let (router, _state) = build_router(Calculator::new(config, TierCatalog::default()));
    let response = router
        .oneshot(post_json(
            "/api/calculate",
            json!({"peak_occupancy_pct": 0, "off_peak_occupancy_pct": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["net_income"], 0.0);
    assert!(body["payback_years"].is_null());

    let result: CalculationResult = serde_json::from_slice(&bytes).unwrap();
    assert!(result.payback_years.is_nan());
}

#[tokio::test]
async fn test_compare_tiers() {
    let (status, body) = send(post_json("/api/compare", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["tier"], "studio");
    assert_eq!(results[0]["revenue"]["peak_nightly_rate"], 240.0);

    let (_, body) = send(post_json("/api/compare", json!({"keep_rate": true}))).await;
    for result in body.as_array().unwrap() {
        assert_eq!(result["revenue"]["total"], 51185.0);
    }
}

#[tokio::test]
async fn test_batch() {
    let (status, body) = send(post_json(
        "/api/batch",
        json!([{}, {"tier": "weekender", "nightly_rate": 250}]),
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["net_income"], 47685.0);
    assert_eq!(results[1]["tier"], "weekender");
    assert_eq!(results[1]["tier_price"], 130000.0);
}
