//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::{
        http::{ErrorResponse, PublishMessageRequest},
        websocket::MessageRecordDto,
    },
    ui::state::AppState,
    usecase::PublishError,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Most recent messages, oldest first
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MessageRecordDto>>, ApiError> {
    match state.get_recent_messages_usecase.execute().await {
        Ok(records) => {
            // Domain Model から DTO への変換
            Ok(Json(records.iter().map(MessageRecordDto::from).collect()))
        }
        Err(e) => {
            tracing::error!("Error fetching messages: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Error fetching messages")),
            ))
        }
    }
}

/// Publish a public message to every connected client
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PublishMessageRequest>,
) -> Result<(StatusCode, Json<MessageRecordDto>), ApiError> {
    match state
        .publish_message_usecase
        .execute(request.username, request.text)
        .await
    {
        Ok(record) => Ok((StatusCode::CREATED, Json(MessageRecordDto::from(&record)))),
        Err(PublishError::InvalidInput(e)) => {
            tracing::warn!("Rejected message: {}", e);
            Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))))
        }
        Err(PublishError::Relay(e)) => {
            tracing::error!("Failed to publish message: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("Chat relay is not running")),
            ))
        }
    }
}
