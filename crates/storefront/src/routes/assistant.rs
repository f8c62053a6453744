//! Product assistant route handler.
//!
//! Any failure along the way, including an unconfigured assistant, yields
//! the fixed fallback message with a 200 so the chat widget always has
//! something to render.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::assistant::{ChatTurn, FALLBACK_MESSAGE};
use crate::state::AppState;

/// Request body for a chat turn.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Response body for a chat turn.
#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /products/{id}/chat - ask the assistant about a product.
#[instrument(skip(state, body), fields(product_id = %id))]
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let product = state
        .catalog()
        .get_product_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let Some(assistant) = state.assistant() else {
        return Ok(Json(ChatResponse {
            reply: FALLBACK_MESSAGE.to_string(),
        }));
    };

    let reply = match assistant.chat(&product, &body.history, &body.message).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "Assistant call failed");
            FALLBACK_MESSAGE.to_string()
        }
    };

    Ok(Json(ChatResponse { reply }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assistant::ChatRole;

    #[test]
    fn test_chat_request_history_defaults_empty() {
        let body: ChatRequest =
            serde_json::from_str(r#"{ "message": "hi" }"#).expect("parse");
        assert!(body.history.is_empty());
    }

    #[test]
    fn test_chat_request_parses_history_roles() {
        let body: ChatRequest = serde_json::from_str(
            r#"{
                "message": "and battery life?",
                "history": [
                    { "role": "user", "text": "is it wireless?" },
                    { "role": "model", "text": "Yes, fully wireless." }
                ]
            }"#,
        )
        .expect("parse");
        assert_eq!(body.history.len(), 2);
        assert_eq!(body.history[1].role, ChatRole::Model);
    }
}
