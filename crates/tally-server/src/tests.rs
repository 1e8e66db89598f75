//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Local, NaiveDate};
use http_body_util::BodyExt;
use tally_core::db::Database;
use tally_core::insights::month_start;
use tower::ServiceExt;

fn setup_test_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let app = create_router(db.clone(), None, ServerConfig::default());
    (app, db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn this_month_start() -> NaiveDate {
    month_start(Local::now().date_naive())
}

async fn add_expense(app: &Router, amount: f64, flow: &str, date: NaiveDate) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/expenses",
            serde_json::json!({
                "amount": amount,
                "type": flow,
                "date": date.to_string(),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    get_body_json(response).await
}

// ========== Ledger API Tests ==========

#[tokio::test]
async fn test_list_expenses_empty() {
    let (app, _db) = setup_test_app();

    let response = app.oneshot(get("/api/expenses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_expense() {
    let (app, db) = setup_test_app();

    let body = serde_json::json!({
        "amount": 42.5,
        "type": "Debit",
        "description": "Groceries",
        "date": "2026-01-03"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/expenses", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["amount"], 42.5);
    assert_eq!(json["type"], "Debit");
    assert_eq!(json["description"], "Groceries");
    assert_eq!(json["date"], "2026-01-03");

    let response = app.oneshot(get("/api/expenses")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let audit = db.list_audit_log(10).unwrap();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].actor, "api");
    assert_eq!(audit[0].action, "create");
}

#[tokio::test]
async fn test_create_expense_accepts_lowercase_type() {
    let (app, _db) = setup_test_app();
    let json = add_expense(&app, 10.0, "credit", NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()).await;
    assert_eq!(json["type"], "Credit");
}

#[tokio::test]
async fn test_create_expense_validation() {
    let (app, db) = setup_test_app();

    let invalid = [
        serde_json::json!({"amount": -5.0, "type": "Debit", "date": "2026-01-03"}),
        serde_json::json!({"amount": 0, "type": "Debit", "date": "2026-01-03"}),
        serde_json::json!({"amount": 5.0, "type": "Transfer", "date": "2026-01-03"}),
        serde_json::json!({"amount": 5.0, "type": "Debit", "date": "03/01/2026"}),
        serde_json::json!({"amount": 5.0, "type": "Debit"}),
        serde_json::json!({"amount": "lots", "type": "Debit", "date": "2026-01-03"}),
    ];

    for body in invalid {
        let response = app
            .clone()
            .oneshot(post_json("/api/expenses", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json = get_body_json(response).await;
        assert!(json["error"].is_string());
    }

    assert_eq!(db.count_transactions().unwrap(), 0);
    assert!(db.list_audit_log(10).unwrap().is_empty());
}

#[tokio::test]
async fn test_create_expense_malformed_json() {
    let (app, _db) = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/expenses")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_delete_expense_is_idempotent() {
    let (app, db) = setup_test_app();
    let created = add_expense(&app, 12.0, "Debit", this_month_start()).await;
    let id = created["id"].as_i64().unwrap();

    let delete = |id: i64| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/expenses/{}", id))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete(id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted"], true);

    let response = app.clone().oneshot(delete(id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deleted"], false);

    assert_eq!(db.count_transactions().unwrap(), 0);
}

// ========== Budget API Tests ==========

#[tokio::test]
async fn test_budget_default_and_update() {
    let (app, db) = setup_test_app();

    let response = app.clone().oneshot(get("/api/budget")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["limit"], 1000.0);

    let response = app
        .clone()
        .oneshot(post_json("/api/budget", serde_json::json!({"limit": 250.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["limit"], 250.0);

    let response = app.oneshot(get("/api/budget")).await.unwrap();
    assert_eq!(get_body_json(response).await["limit"], 250.0);

    let audit = db.list_audit_log(10).unwrap();
    assert_eq!(audit[0].entity_type.as_deref(), Some("budget"));
}

#[tokio::test]
async fn test_budget_rejects_negative_limit() {
    let (app, db) = setup_test_app();

    let response = app
        .oneshot(post_json("/api/budget", serde_json::json!({"limit": -1.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(db.get_budget().unwrap().monthly_limit, 1000.0);
}

// ========== Insight API Tests ==========

#[tokio::test]
async fn test_summary_over_budget() {
    let (app, db) = setup_test_app();
    db.set_budget(1000.0).unwrap();

    let start = this_month_start();
    add_expense(&app, 2000.0, "Credit", start).await;
    add_expense(&app, 1200.0, "Debit", start).await;
    // Previous month
    add_expense(&app, 999.0, "Debit", start - Duration::days(1)).await;

    let response = app.oneshot(get("/api/summary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_spent"], 1200.0);
    assert_eq!(json["total_credit"], 2000.0);
    assert_eq!(json["limit"], 1000.0);
    assert_eq!(json["effective_limit"], 2000.0);
    assert_eq!(json["remaining"], 800.0);
    assert_eq!(json["exceeded"], true);
    assert_eq!(json["over_budget_amount"], 200.0);
}

#[tokio::test]
async fn test_summary_window_parameter() {
    let (app, _db) = setup_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/summary?window=month_to_date"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/api/summary?window=fortnight"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_missing_budget_is_internal_error() {
    let (app, db) = setup_test_app();
    db.conn().unwrap().execute("DELETE FROM budget", []).unwrap();

    let response = app.oneshot(get("/api/summary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn test_prediction_insufficient_data() {
    let (app, _db) = setup_test_app();
    let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    add_expense(&app, 10.0, "Debit", day).await;
    add_expense(&app, 20.0, "Debit", day + Duration::days(1)).await;

    let response = app.oneshot(get("/api/prediction")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "insufficient_data");
    assert_eq!(json["prediction"], 0.0);
    assert!(json.get("trend").is_none());
}

#[tokio::test]
async fn test_prediction_increasing() {
    let (app, _db) = setup_test_app();
    let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    for (offset, amount) in [10.0, 20.0, 30.0].iter().enumerate() {
        add_expense(&app, *amount, "Debit", day + Duration::days(offset as i64)).await;
    }

    let response = app.oneshot(get("/api/prediction")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["trend"], "increasing");
    assert!(json["prediction"].as_f64().unwrap() > 0.0);
}

// ========== Audit & Middleware Tests ==========

#[tokio::test]
async fn test_audit_log_lists_mutations() {
    let (app, _db) = setup_test_app();
    add_expense(&app, 5.0, "Debit", this_month_start()).await;

    let response = app.oneshot(get("/api/audit?limit=5000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["entity_type"], "transaction");
}

#[tokio::test]
async fn test_security_headers() {
    let (app, _db) = setup_test_app();

    let response = app.oneshot(get("/api/budget")).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[test]
fn test_parse_allowed_origins() {
    let origins = parse_allowed_origins(" http://localhost:5173, ,https://tally.example.com ");
    assert_eq!(
        origins,
        vec![
            "http://localhost:5173".to_string(),
            "https://tally.example.com".to_string()
        ]
    );
    assert!(parse_allowed_origins("").is_empty());
}

// ========== Query & Audit Resilience Tests ==========

#[tokio::test]
async fn test_limit_parameters_are_clamped() {
    let (app, _db) = setup_test_app();
    let start = this_month_start();
    add_expense(&app, 1.0, "Debit", start).await;
    add_expense(&app, 2.0, "Debit", start).await;

    let response = app
        .clone()
        .oneshot(get("/api/expenses?limit=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 1);

    // Zero and negative limits still return one row
    let response = app
        .clone()
        .oneshot(get("/api/audit?limit=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 1);

    let response = app.oneshot(get("/api/expenses?limit=-7")).await.unwrap();
    assert_eq!(get_body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_numeric_limit_is_json_bad_request() {
    let (app, _db) = setup_test_app();

    for uri in ["/api/expenses?limit=abc", "/api/audit?limit=abc"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);

        let json = get_body_json(response).await;
        assert_eq!(json["error"], "Invalid query parameters");
    }
}

#[tokio::test]
async fn test_write_succeeds_when_audit_insert_fails() {
    let (app, db) = setup_test_app();
    db.conn()
        .unwrap()
        .execute("DROP TABLE audit_log", [])
        .unwrap();

    let created = add_expense(&app, 30.0, "Debit", this_month_start()).await;
    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(db.count_transactions().unwrap(), 1);

    let response = app
        .oneshot(post_json("/api/budget", serde_json::json!({"limit": 400.0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(db.get_budget().unwrap().monthly_limit, 400.0);
}
