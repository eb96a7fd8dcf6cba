//! Malformed request bodies are answered with the JSON error body, never
//! axum's plain-text rejection.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json, post_raw, ScriptedGenerator};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn wrongly_typed_field_is_json_400(pool: SqlitePool) {
    let app = build_test_app(pool, ScriptedGenerator::new(vec![]));

    let response = post_json(app, "/latest-lesson", json!({ "userId": 5 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("userId"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_json_body_is_json_400(pool: SqlitePool) {
    let generator = ScriptedGenerator::new(vec![]);
    let app = build_test_app(pool, generator.clone());

    let response = post_raw(app, "/onboard-chat", "application/json", "answers=1,2,3,4").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
    assert_eq!(generator.prompt_count(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_content_type_is_json_400(pool: SqlitePool) {
    let app = build_test_app(pool, ScriptedGenerator::new(vec![]));

    let response = post_raw(app, "/finish-lesson", "text/plain", r#"{"userId":"U1"}"#).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn answers_of_wrong_type_are_json_400(pool: SqlitePool) {
    let app = build_test_app(pool, ScriptedGenerator::new(vec![]));

    let response = post_json(
        app,
        "/onboard-chat",
        json!({ "userId": "U1", "answers": "all four in one string" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}
