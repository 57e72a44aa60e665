//! Canned WhatsApp notifications — the operator-facing send endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::whatsapp::WhatsAppClient;

/// A fixed notification template, selected by its wire tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Laundry,
    Class,
    Task,
}

impl Notification {
    /// Look up a template by its request tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "laundry" => Some(Self::Laundry),
            "class" => Some(Self::Class),
            "task" => Some(Self::Task),
            _ => None,
        }
    }

    /// The canned message body.
    pub fn text(&self) -> &'static str {
        match self {
            Self::Laundry => "הכביסה שלך מוכנה",
            Self::Class => "הכיתה ששריינת מוכנה",
            Self::Task => "יש לך משימה חדשה",
        }
    }
}

/// Strip everything but digits from a phone number.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Shared state for the notify route.
#[derive(Clone)]
pub struct NotifyState {
    pub client: Arc<WhatsAppClient>,
}

#[derive(Debug, Deserialize)]
struct SendMessageRequest {
    to: Option<String>,
    #[serde(rename = "messageType")]
    message_type: Option<String>,
}

/// POST /api/send-message
///
/// Maps a fixed tag to its canned text and forwards it to the recipient.
async fn send_message(
    State(state): State<NotifyState>,
    Json(req): Json<SendMessageRequest>,
) -> impl IntoResponse {
    let (Some(to), Some(tag)) = (req.to.as_deref(), req.message_type.as_deref()) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    };

    let Some(notification) = Notification::from_tag(tag) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid message type");
    };

    let phone = normalize_phone(to);
    if phone.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Invalid phone number");
    }

    match state.client.send_text(&phone, notification.text()).await {
        Ok(()) => {
            info!(to = %phone, ?notification, "Notification sent");
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to send notification");
            error_response(StatusCode::BAD_GATEWAY, "Failed to send message")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Build the notification routes.
pub fn notify_routes(state: NotifyState) -> Router {
    Router::new()
        .route("/api/send-message", post(send_message))
        .with_state(state)
}

// ── Tests ───────────────────────────────────────────────────────────
