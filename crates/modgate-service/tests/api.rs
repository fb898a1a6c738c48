//! Integration tests for the moderation HTTP surface
//!
//! Covers the submit/review lifecycle, blacklist management, policy
//! precedence over the blacklist, and error-status mapping.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use std::io::Write;
use tower::ServiceExt;

use modgate_service::models::ServiceConfig;
use modgate_service::server::{build_app, build_state};
use modgate_service::state::AppState;

/// Helper: app with no policies loaded (engine disabled).
fn test_app() -> axum::Router {
    build_app(AppState::new(ServiceConfig::default()))
}

/// Helper: app with policies loaded from a YAML string.
fn test_app_with_policies(yaml: &str) -> (axum::Router, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file.flush().unwrap();

    let config = ServiceConfig {
        policy_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let state = build_state(config).unwrap();
    (build_app(state), file)
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn submit(app: &axum::Router, user_id: &str, text: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/content/submit",
            serde_json::json!({ "user_id": user_id, "text": text }),
        ))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

// -- Health and config --------------------------------------------------------

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_config_reports_disabled_engine() {
    let app = test_app();
    let response = app.oneshot(get_request("/config")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["policy_enabled"], false);
    assert_eq!(body["policies_count"], 0);
    assert_eq!(body["blacklist_keywords"], 3);
}

// -- Review queue lifecycle ---------------------------------------------------

#[tokio::test]
async fn test_review_queue_lifecycle() {
    let app = test_app();

    // No policy, no blacklist hit: pending review, queued.
    let (status, body) = submit(&app, "u1", "ordinary text").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PENDING_REVIEW");
    assert_eq!(body["reason"], "Requires manual review");
    let content_id = body["content_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get_request("/review/queue"))
        .await
        .unwrap();
    let queue = body_json(response).await;
    assert_eq!(queue["count"], 1);
    assert_eq!(queue["items"][0]["content_id"], content_id.as_str());

    // Approve it.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/review/{}", content_id),
            serde_json::json!({ "reviewer_id": "rev1", "decision": "APPROVED" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "APPROVED");

    // Removed from the queue.
    let response = app
        .clone()
        .oneshot(get_request("/review/queue"))
        .await
        .unwrap();
    let queue = body_json(response).await;
    assert_eq!(queue["count"], 0);

    // Second review must conflict.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/review/{}", content_id),
            serde_json::json!({ "reviewer_id": "rev2", "decision": "REJECTED" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_review_unknown_content_is_404() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/review/no-such-id",
            serde_json::json!({ "reviewer_id": "rev1", "decision": "APPROVED" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_invalid_decision_is_422() {
    let app = test_app();
    let (_, body) = submit(&app, "u1", "ordinary text").await;
    let content_id = body["content_id"].as_str().unwrap();

    let response = app
        .oneshot(json_request(
            Method::POST,
            &format!("/review/{}", content_id),
            serde_json::json!({ "reviewer_id": "rev1", "decision": "BLOCKED" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_queue_zero_limit_is_422() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/review/queue?limit=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// -- Blacklist ----------------------------------------------------------------

#[tokio::test]
async fn test_blacklist_round_trip() {
    let app = test_app();

    // Add "newbad": matching text is now blocked.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/blacklist",
            serde_json::json!({ "keyword": "newbad" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["added"], true);

    let (_, body) = submit(&app, "u1", "contains newbad word").await;
    assert_eq!(body["status"], "BLOCKED");
    assert_eq!(body["reason"], "Blacklisted keyword hit: newbad");

    // Adding again reports not added.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/blacklist",
            serde_json::json!({ "keyword": "newbad" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["added"], false);

    // Remove it: the same text now goes to manual review.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::DELETE,
            "/blacklist",
            serde_json::json!({ "keyword": "newbad" }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["removed"], true);

    let (_, body) = submit(&app, "u1", "contains newbad word").await;
    assert_eq!(body["status"], "PENDING_REVIEW");
}

#[tokio::test]
async fn test_blacklist_empty_keyword_is_422() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/blacklist",
            serde_json::json!({ "keyword": "  " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// -- Policies -----------------------------------------------------------------

const PRECEDENCE_POLICIES: &str = r#"
policies:
  - id: vendor-spam-exemption
    name: Vendor spam exemption
    risk_level: LOW
    reason: vendor accounts may mention spam
    condition:
      type: composite
      operator: and
      children:
        - type: keyword
          keywords: ["spam"]
        - type: identity
          exact_ids: ["vendor1"]
  - id: reject-lottery
    name: Lottery talk
    risk_level: HIGH
    condition:
      type: keyword
      keywords: ["lottery"]
"#;

#[tokio::test]
async fn test_policy_precedes_blacklist() {
    let (app, _file) = test_app_with_policies(PRECEDENCE_POLICIES);

    // Policy approves despite "spam" being blacklisted.
    let (_, body) = submit(&app, "vendor1", "this mentions spam").await;
    assert_eq!(body["status"], "APPROVED");
    let reason = body["reason"].as_str().unwrap();
    assert!(reason.starts_with("Policy decision: "));
    assert!(reason.contains("policy:vendor-spam-exemption"));

    // Everyone else still hits the blacklist.
    let (_, body) = submit(&app, "someone", "this mentions spam").await;
    assert_eq!(body["status"], "BLOCKED");
}

#[tokio::test]
async fn test_policy_rejects_high_risk() {
    let (app, _file) = test_app_with_policies(PRECEDENCE_POLICIES);
    let (_, body) = submit(&app, "u1", "win the lottery now").await;
    assert_eq!(body["status"], "REJECTED");
}

#[tokio::test]
async fn test_list_policies_and_reload() {
    let (app, _file) = test_app_with_policies(PRECEDENCE_POLICIES);

    let response = app.clone().oneshot(get_request("/policies")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["id"], "vendor-spam-exemption");

    // Reloading the unchanged source is idempotent.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/policies/reload",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["policy_enabled"], true);
    assert_eq!(body["policies_count"], 2);

    let (_, body) = submit(&app, "u1", "win the lottery now").await;
    assert_eq!(body["status"], "REJECTED");
}

// -- Submission validation ----------------------------------------------------

#[tokio::test]
async fn test_submit_empty_fields_are_422() {
    let app = test_app();

    let (status, _) = submit(&app, "  ", "text").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = submit(&app, "u1", "   ").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_submit_oversized_text_is_422() {
    let app = test_app();
    let long = "x".repeat(5001);
    let (status, body) = submit(&app, "u1", &long).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_content_is_404() {
    let app = test_app();
    let response = app.oneshot(get_request("/content/no-such-id")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_content_returns_item() {
    let app = test_app();
    let (_, body) = submit(&app, "u1", "ordinary text").await;
    let content_id = body["content_id"].as_str().unwrap();

    let response = app
        .oneshot(get_request(&format!("/content/{}", content_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let item = body_json(response).await;
    assert_eq!(item["user_id"], "u1");
    assert_eq!(item["status"], "PENDING_REVIEW");
}
