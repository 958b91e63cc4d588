//! Axum route handlers for the quote board API.
//!
//! Handled generation outcomes — validation notices, provider failures,
//! success — all return 200 with the post-attempt board snapshot; only the
//! single-flight rejection maps to an error status (409).

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::quotes::board::BoardSnapshot;
use crate::quotes::fetcher;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetTopicRequest {
    pub topic: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/board — read-only snapshot for the presentation layer.
pub async fn handle_get_board(State(state): State<AppState>) -> Json<BoardSnapshot> {
    Json(state.board.lock().await.snapshot())
}

/// PUT /api/v1/topic — replaces the stored topic unconditionally.
/// Validation happens at generate time, not here.
pub async fn handle_set_topic(
    State(state): State<AppState>,
    Json(request): Json<SetTopicRequest>,
) -> Json<BoardSnapshot> {
    let mut board = state.board.lock().await;
    board.set_topic(request.topic);
    Json(board.snapshot())
}

/// POST /api/v1/generate — validates the stored topic and runs one
/// generation attempt. 409 while one is already in flight.
pub async fn handle_generate(
    State(state): State<AppState>,
) -> Result<Json<BoardSnapshot>, AppError> {
    let snapshot = fetcher::submit(&state.board, state.source.clone()).await?;
    Ok(Json(snapshot))
}

/// POST /api/v1/reset — clears quotes and topic. An in-flight attempt is not
/// cancelled; it publishes its outcome when it completes.
pub async fn handle_reset(State(state): State<AppState>) -> Json<BoardSnapshot> {
    let mut board = state.board.lock().await;
    board.reset();
    info!("board reset");
    Json(board.snapshot())
}

/// POST /api/v1/notice/dismiss — acknowledges the current notice.
pub async fn handle_dismiss_notice(State(state): State<AppState>) -> Json<BoardSnapshot> {
    let mut board = state.board.lock().await;
    board.dismiss_notice();
    Json(board.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::quotes::board::QuoteBoard;
    use crate::quotes::fetcher::{QuoteSource, EMPTY_TOPIC_NOTICE};
    use crate::routes::build_router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::sync::{Mutex, Notify};
    use tower::ServiceExt;

    struct StaticSource(&'static str);

    #[async_trait]
    impl QuoteSource for StaticSource {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    fn test_state(source: Arc<dyn QuoteSource>) -> AppState {
        AppState {
            board: Arc::new(Mutex::new(QuoteBoard::new())),
            source,
        }
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_set_topic_then_generate_returns_the_quotes() {
        let app = build_router(test_state(Arc::new(StaticSource("A\nB\nC"))));

        let response = app
            .clone()
            .oneshot(json_request("PUT", "/api/v1/topic", json!({"topic": "hope"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["topic"], "hope");

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/generate"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = body_json(response).await;
        assert_eq!(snapshot["quotes"], json!(["A", "B", "C"]));
        assert_eq!(snapshot["busy"], json!(false));
        assert_eq!(snapshot["notice"], Value::Null);
    }

    #[tokio::test]
    async fn test_generate_with_unset_topic_returns_a_notice_snapshot() {
        let app = build_router(test_state(Arc::new(StaticSource("unused"))));

        let response = app
            .oneshot(empty_request("POST", "/api/v1/generate"))
            .await
            .unwrap();

        // validation outcomes are snapshots, not HTTP errors
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["notice"], EMPTY_TOPIC_NOTICE);
    }

    #[tokio::test]
    async fn test_board_endpoint_reads_without_mutating() {
        let state = test_state(Arc::new(StaticSource("unused")));
        state.board.lock().await.set_topic("stoicism".to_string());
        let app = build_router(state);

        let response = app
            .oneshot(empty_request("GET", "/api/v1/board"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = body_json(response).await;
        assert_eq!(snapshot["topic"], "stoicism");
        assert_eq!(snapshot["quotes"], json!([]));
    }

    #[tokio::test]
    async fn test_reset_clears_topic_and_quotes() {
        let app = build_router(test_state(Arc::new(StaticSource("A\nB"))));

        app.clone()
            .oneshot(json_request("PUT", "/api/v1/topic", json!({"topic": "hope"})))
            .await
            .unwrap();
        app.clone()
            .oneshot(empty_request("POST", "/api/v1/generate"))
            .await
            .unwrap();

        let response = app
            .oneshot(empty_request("POST", "/api/v1/reset"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = body_json(response).await;
        assert_eq!(snapshot["topic"], "");
        assert_eq!(snapshot["quotes"], json!([]));
    }

    #[tokio::test]
    async fn test_dismiss_clears_the_notice() {
        let app = build_router(test_state(Arc::new(StaticSource("unused"))));

        // empty topic → notice
        app.clone()
            .oneshot(empty_request("POST", "/api/v1/generate"))
            .await
            .unwrap();

        let response = app
            .oneshot(empty_request("POST", "/api/v1/notice/dismiss"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["notice"], Value::Null);
    }

    #[tokio::test]
    async fn test_topic_body_without_topic_field_is_rejected() {
        let app = build_router(test_state(Arc::new(StaticSource("unused"))));

        let response = app
            .oneshot(json_request("PUT", "/api/v1/topic", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    struct GatedSource {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl QuoteSource for GatedSource {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok("Quote one.".to_string())
        }
    }

    #[tokio::test]
    async fn test_concurrent_generate_gets_conflict() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let state = test_state(Arc::new(GatedSource {
            entered: entered.clone(),
            release: release.clone(),
        }));
        state.board.lock().await.set_topic("patience".to_string());
        let app = build_router(state);

        let first = tokio::spawn(
            app.clone()
                .oneshot(empty_request("POST", "/api/v1/generate")),
        );

        entered.notified().await;
        let second = app
            .clone()
            .oneshot(empty_request("POST", "/api/v1/generate"))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let error = body_json(second).await;
        assert_eq!(error["error"]["code"], "GENERATION_IN_PROGRESS");

        release.notify_one();
        let response = first.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["quotes"], json!(["Quote one."]));
    }
}
