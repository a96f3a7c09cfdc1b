//! Chat endpoint.
//!
//! POST /chat/
//!
//! Request: `{ "user_id": "...", "message": "..." }`
//! Response: `{ "message": "<assistant reply>" }`
//!
//! Missing fields are accepted by the decoder and rejected by the gateway,
//! so a missing and an empty field produce the same 422 response.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatInput {
    /// Opaque caller-chosen conversation key.
    pub user_id: Option<String>,
    /// The user message to send to the model.
    pub message: Option<String>,
}

/// Successful chat response body.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub message: String,
}

/// POST /chat/ - run one conversation turn for `user_id`.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatInput>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(input) = payload?;
    let user_id = input.user_id.unwrap_or_default();
    let message = input.message.unwrap_or_default();

    let reply = state.gateway.handle_chat(&user_id, &message).await?;

    Ok(Json(ChatReply { message: reply }))
}
