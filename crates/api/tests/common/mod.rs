#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use microlearn_api::config::ServerConfig;
use microlearn_api::router::build_app_router;
use microlearn_api::state::AppState;
use microlearn_delivery::{DeliveryError, LessonMailer, OutgoingEmail};
use microlearn_generation::{GenerationError, TextGenerator};
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Replays canned completions in order and records every prompt it sees.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, GenerationError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::MalformedResponse("script exhausted".into())))
    }
}

/// Keeps every email it is asked to send.
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl LessonMailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// A well-formed lesson completion about `topic`.
pub fn lesson_completion(topic: &str) -> String {
    serde_json::json!({
        "topic": topic,
        "subTopics": ["Basics"],
        "theories": [
            { "title": "One", "content": "First idea." },
            { "title": "Two", "content": "Second idea." },
            { "title": "Three", "content": "Third idea." }
        ],
        "quiz": {
            "isVisible": true,
            "attemptsMade": 1,
            "maxAttempts": 3,
            "question": "Which idea came first?",
            "options": ["One", "Two", "Three"],
            "correctAnswer": 0,
            "difficulty": "Easy"
        },
        "durationMinutes": 5,
        "level": "Advanced",
        "feedback": ""
    })
    .to_string()
}

/// Build a test `ServerConfig` with the permissive CORS default.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
    }
}

/// Build the full application router over `pool` and a scripted generator,
/// with email delivery disabled.
pub fn build_test_app(pool: SqlitePool, generator: Arc<ScriptedGenerator>) -> Router {
    build_app(pool, generator, None)
}

/// Build the full application router with a recording mailer. `generator`
/// serves both structured and daily lessons.
pub fn build_test_app_with_mailer(
    pool: SqlitePool,
    generator: Arc<ScriptedGenerator>,
    mailer: Arc<RecordingMailer>,
) -> Router {
    build_app(pool, generator, Some(mailer))
}

fn build_app(
    pool: SqlitePool,
    generator: Arc<ScriptedGenerator>,
    mailer: Option<Arc<RecordingMailer>>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        generator: generator.clone(),
        daily_generator: generator,
        mailer: mailer.map(|m| m as Arc<dyn LessonMailer>),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a POST request with a raw body and content type through the router.
pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body through the router.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
