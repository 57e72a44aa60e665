//! HTTP endpoints for the provider webhook.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::webhook::event::classify;
use crate::webhook::menu::{MenuReply, route};
use crate::whatsapp::WhatsAppClient;

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookState {
    pub verify_token: Arc<str>,
    pub client: Arc<WhatsAppClient>,
}

/// Query parameters of the verify handshake.
#[derive(Debug, Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

/// GET /webhook
///
/// One-time ownership handshake: echo `hub.challenge` iff the mode is
/// "subscribe" and the token matches our configured secret. Anything else
/// is 403 with no body.
async fn verify(
    State(state): State<WebhookState>,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    let subscribe = params.mode.as_deref() == Some("subscribe");
    let token_ok = params.verify_token.as_deref() == Some(state.verify_token.as_ref());

    if subscribe && token_ok {
        info!("Webhook verified");
        (StatusCode::OK, params.challenge.unwrap_or_default()).into_response()
    } else {
        warn!("Webhook verification rejected");
        StatusCode::FORBIDDEN.into_response()
    }
}

/// POST /webhook
///
/// Classify the inbound event, pick the next menu, and send it. Always
/// acknowledges with 200 — a non-2xx here makes the provider retry the
/// delivery, which processing faults never warrant.
async fn receive(State(state): State<WebhookState>, body: String) -> impl IntoResponse {
    // Lenient parse: a body we cannot read is a payload with no message,
    // not a client error the provider should retry.
    let payload: Value = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Malformed webhook payload, acknowledging anyway");
            return ack();
        }
    };

    let Some(event) = classify(&payload) else {
        debug!("Webhook payload carried no actionable message");
        return ack();
    };

    let Some(node) = route(&event.kind) else {
        debug!(sender = %event.sender, "Unhandled message kind, acknowledging silently");
        return ack();
    };

    debug!(
        sender = %event.sender,
        selection = event.selection_id().unwrap_or("<text>"),
        ?node,
        "Routing menu selection"
    );

    let result = match node.reply() {
        MenuReply::List(menu) => state.client.send_menu(&event.sender, menu).await,
        MenuReply::Text(text) => state.client.send_text(&event.sender, text).await,
    };

    // Delivery failures do not fail the webhook; the inbound ack and the
    // outbound send are independent.
    if let Err(e) = result {
        error!(error = %e, "Failed to deliver menu message");
    }

    ack()
}

fn ack() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

/// Build the webhook routes.
pub fn webhook_routes(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook", get(verify).post(receive))
        .with_state(state)
}
