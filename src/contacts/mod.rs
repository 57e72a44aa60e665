//! Contact registry — phone numbers the operator can notify.

pub mod store;

pub use store::{ContactStore, LibSqlContacts};

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::error::DatabaseError;

/// A stored contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Shared state for the contact routes.
#[derive(Clone)]
pub struct ContactsState {
    pub store: Arc<dyn ContactStore>,
}

#[derive(Debug, Deserialize)]
struct CreateContact {
    #[serde(default)]
    name: String,
    phone_number: Option<String>,
}

/// GET /api/contacts — newest first.
async fn list_contacts(State(state): State<ContactsState>) -> impl IntoResponse {
    match state.store.list().await {
        Ok(contacts) => Json(contacts).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list contacts");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load contacts")
        }
    }
}

/// POST /api/contacts
async fn create_contact(
    State(state): State<ContactsState>,
    Json(req): Json<CreateContact>,
) -> impl IntoResponse {
    let phone = req.phone_number.as_deref().unwrap_or("").trim().to_string();
    if phone.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing phone number");
    }

    match state.store.insert(req.name.trim(), &phone).await {
        Ok(contact) => (StatusCode::CREATED, Json(contact)).into_response(),
        Err(DatabaseError::Constraint(_)) => {
            error_response(StatusCode::CONFLICT, "Phone number already exists")
        }
        Err(e) => {
            error!(error = %e, "Failed to create contact");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create contact")
        }
    }
}

/// DELETE /api/contacts/{id}
async fn delete_contact(
    State(state): State<ContactsState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(DatabaseError::NotFound { .. }) => {
            error_response(StatusCode::NOT_FOUND, "Contact not found")
        }
        Err(e) => {
            error!(error = %e, "Failed to delete contact");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete contact")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Build the contact routes.
pub fn contact_routes(state: ContactsState) -> Router {
    Router::new()
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route("/api/contacts/{id}", delete(delete_contact))
        .with_state(state)
}
