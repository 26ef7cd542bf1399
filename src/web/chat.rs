use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AnalysisResult, Message};
use crate::services::CompanionReply;
use crate::state::SharedState;
use crate::web::error::ApiError;

#[derive(Deserialize)]
pub struct ChatRequest {
    /// Omitted on the first turn; the response carries the id to reuse.
    pub conversation_id: Option<Uuid>,
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub conversation_id: Uuid,
    /// The bot's turn as a transcript entry.
    pub message: Message,
    #[serde(flatten)]
    pub reply: CompanionReply,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", post(chat))
        .route("/analyze", post(analyze))
        .with_state(state)
}

async fn chat(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let conversation_id = payload.conversation_id.unwrap_or_else(Uuid::new_v4);
    let incoming = Message::user(payload.text);
    let generation = state.turns.begin(conversation_id).await;

    if !state.typing_delay.is_zero() {
        tokio::time::sleep(state.typing_delay).await;
    }

    // A newer message arrived while this one was "typing"; only the latest is answered.
    if !state.turns.is_current(conversation_id, generation).await {
        tracing::debug!("Dropping superseded turn {} of {}", generation, conversation_id);
        return Err(ApiError::Conflict("Superseded by a newer message"));
    }

    let reply = state
        .companion
        .respond_to(&incoming)
        .ok_or(ApiError::BadRequest("Only user messages are answered"))?;
    Ok(Json(ChatResponse {
        conversation_id,
        message: Message::bot(reply.reply_text.clone()),
        reply,
    }))
}

async fn analyze(
    State(state): State<SharedState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Json<AnalysisResult> {
    Json(state.companion.analyze(&payload.text))
}
