//! Quote Fetcher — runs one generation attempt end to end.
//!
//! Flow: busy guard → topic validation → arm board → one Gemini call →
//! publish exactly one outcome (quotes or a notice), busy off last.
//!
//! Provider failures never propagate past this module: every outcome lands on
//! the board as state the page can render. The only error a caller sees is
//! the busy rejection.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::errors::AppError;
use crate::llm_client::{GeminiClient, LlmError};
use crate::quotes::board::{BoardSnapshot, SharedBoard};
use crate::quotes::prompts::quote_prompt;

/// Minimum topic length, in characters, after trimming.
pub const MIN_TOPIC_CHARS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// User-facing notices, one per attempt outcome
// ────────────────────────────────────────────────────────────────────────────

pub const EMPTY_TOPIC_NOTICE: &str = "Please enter a topic to generate quotes.";
pub const SHORT_TOPIC_NOTICE: &str = "Please enter a topic with at least 3 characters.";
pub const EMPTY_RESULT_NOTICE: &str =
    "The AI generated an empty response for this topic. Please try a different topic.";
pub const UNEXPECTED_RESPONSE_NOTICE: &str =
    "Failed to generate quotes. The AI response was unexpected.";
pub const TIMEOUT_NOTICE: &str = "The request timed out. Please try again.";
pub const CONNECTION_NOTICE: &str =
    "Failed to generate quotes. Please check your connection and try again.";
pub const GENERIC_FAILURE_NOTICE: &str = "Failed to generate quotes. Please try again.";

// ────────────────────────────────────────────────────────────────────────────
// Source seam
// ────────────────────────────────────────────────────────────────────────────

/// Source of generated quote text.
///
/// Carried in `AppState` as `Arc<dyn QuoteSource>` — production uses
/// `GeminiClient`, tests substitute fakes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl QuoteSource for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate_content(prompt).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Submit orchestration
// ────────────────────────────────────────────────────────────────────────────

/// Validates the stored topic and, if valid, runs one generation attempt.
///
/// Steps:
/// 1. Reject with `AppError::Busy` if an attempt is already in flight —
///    checked and armed under a single lock acquisition.
/// 2. Validate the trimmed topic: empty or under `MIN_TOPIC_CHARS` publishes
///    a notice and issues no request.
/// 3. Arm the board (busy on, previous quotes and notice cleared) and render
///    the prompt from the trimmed topic.
/// 4. One `QuoteSource` call, no retries, on a detached task. Once armed,
///    the board must be released no matter what happens to the caller: a
///    disconnecting client drops the handler future at its await point, and
///    a publish step living in that future would never run, leaving the
///    busy flag armed forever. The detached task completes regardless and
///    the caller merely awaits its handle. The board lock is held only on
///    either side of the provider call, so the busy state stays observable.
/// 5. Publish exactly one outcome; the busy flag drops last.
pub async fn submit(
    board: &SharedBoard,
    source: Arc<dyn QuoteSource>,
) -> Result<BoardSnapshot, AppError> {
    let prompt = {
        let mut board = board.lock().await;

        if board.is_busy() {
            return Err(AppError::Busy);
        }

        let topic = board.topic().trim().to_string();
        if topic.is_empty() {
            board.publish_notice(EMPTY_TOPIC_NOTICE);
            return Ok(board.snapshot());
        }
        if topic.chars().count() < MIN_TOPIC_CHARS {
            board.publish_notice(SHORT_TOPIC_NOTICE);
            return Ok(board.snapshot());
        }

        board.begin_attempt();
        info!(topic = %topic, "generation attempt started");
        quote_prompt(&topic)
    };

    let attempt = tokio::spawn({
        let board = Arc::clone(board);
        async move {
            let result = source.generate(&prompt).await;

            let mut board = board.lock().await;
            match result {
                Ok(text) => {
                    let quotes = split_quotes(&text);
                    if quotes.is_empty() {
                        info!("generation attempt returned no usable lines");
                        board.publish_notice(EMPTY_RESULT_NOTICE);
                    } else {
                        info!(count = quotes.len(), "generation attempt succeeded");
                        board.publish_quotes(quotes);
                    }
                }
                Err(e) => {
                    error!("generation attempt failed: {e}");
                    board.publish_notice(notice_for_error(&e));
                }
            }
            board.snapshot()
        }
    });

    match attempt.await {
        Ok(snapshot) => Ok(snapshot),
        Err(e) => {
            // A panicked attempt must still release the flag.
            error!("generation task failed: {e}");
            let mut board = board.lock().await;
            board.publish_notice(GENERIC_FAILURE_NOTICE);
            Ok(board.snapshot())
        }
    }
}

/// Splits model output into quote lines: one quote per non-empty line,
/// surrounding whitespace trimmed. `"A\n\nB\nC"` → `["A", "B", "C"]`.
pub fn split_quotes(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps a provider failure to its user-facing notice. Provider error messages
/// pass through verbatim when present; everything else gets a fixed text.
fn notice_for_error(e: &LlmError) -> String {
    match e {
        LlmError::Api {
            message: Some(msg), ..
        } => msg.clone(),
        LlmError::Api { message: None, .. } => GENERIC_FAILURE_NOTICE.to_string(),
        LlmError::Timeout { .. } => TIMEOUT_NOTICE.to_string(),
        LlmError::Parse(_) | LlmError::MissingText => UNEXPECTED_RESPONSE_NOTICE.to_string(),
        LlmError::Http(_) => CONNECTION_NOTICE.to_string(),
    }
}
