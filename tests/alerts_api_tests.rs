mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;
use tower::ServiceExt;

use common::{response_body_json, test_state};
use pricetracker::routes;
use pricetracker::store::MemoryStore;

fn post_alert(body: serde_json::Value) -> Request<Body> {
    Request::post("/api/alerts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn create_normalizes_and_returns_201() {
    let app = routes::app(test_state(Arc::new(MemoryStore::new())));

    let res = app
        .oneshot(post_alert(json!({
            "assetType": "Crypto",
            "symbol": "btc",
            "condition": "Above",
            "targetPrice": 49000,
            "webhookUrl": "https://example.com/hook"
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = response_body_json(res).await;
    assert_eq!(body["asset_type"], "crypto");
    assert_eq!(body["symbol"], "BTC");
    assert_eq!(body["condition"], "above");
    assert_eq!(body["is_active"], true);
    assert_eq!(body["is_triggered"], false);
    assert_eq!(body["triggered_at"], serde_json::Value::Null);
    assert!(body["_id"].is_string());
}

#[tokio::test]
async fn create_rejects_unknown_condition() {
    let app = routes::app(test_state(Arc::new(MemoryStore::new())));

    let res = app
        .oneshot(post_alert(json!({
            "assetType": "crypto",
            "symbol": "BTC",
            "condition": "sideways",
            "targetPrice": 49000
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_target_price_beyond_precision() {
    let app = routes::app(test_state(Arc::new(MemoryStore::new())));

    // (18, 8) leaves ten integer digits; this has eleven.
    let res = app
        .oneshot(post_alert(json!({
            "assetType": "crypto",
            "symbol": "BTC",
            "condition": "above",
            "targetPrice": 12345678901u64
        })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_by_id_roundtrips_and_unknown_is_404() {
    let app = routes::app(test_state(Arc::new(MemoryStore::new())));

    let res = app
        .clone()
        .oneshot(post_alert(json!({
            "assetType": "stock",
            "symbol": "aapl",
            "condition": "below",
            "targetPrice": 150.25
        })))
        .await
        .unwrap();
    let created = response_body_json(res).await;
    let id = created["_id"].as_str().unwrap().to_string();

    let res = app
        .clone()
        .oneshot(
            Request::get(format!("/api/alerts/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = response_body_json(res).await;
    assert_eq!(fetched["symbol"], "AAPL");
    assert_eq!(fetched["target_price"], "150.25");

    let res = app
        .oneshot(
            Request::get("/api/alerts/ffffffffffffffffffffffff")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_created_alerts() {
    let app = routes::app(test_state(Arc::new(MemoryStore::new())));

    for symbol in ["BTC", "ETH"] {
        let res = app
            .clone()
            .oneshot(post_alert(json!({
                "assetType": "crypto",
                "symbol": symbol,
                "condition": "above",
                "targetPrice": 100
            })))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app
        .oneshot(Request::get("/api/alerts").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(response_body_json(res).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = routes::app(test_state(Arc::new(MemoryStore::new())));

    let res = app
        .clone()
        .oneshot(post_alert(json!({
            "assetType": "forex",
            "symbol": "eur",
            "condition": "below",
            "targetPrice": 0.9
        })))
        .await
        .unwrap();
    let id = response_body_json(res).await["_id"]
        .as_str()
        .unwrap()
        .to_string();

    for _ in 0..2 {
        let res = app
            .clone()
            .oneshot(
                Request::delete(format!("/api/alerts/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    let res = app
        .oneshot(Request::get("/api/alerts").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response_body_json(res).await.as_array().unwrap().len(), 0);
}
