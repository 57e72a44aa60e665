use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use botox::config::AppConfig;
use botox::contacts::{ContactStore, ContactsState, LibSqlContacts, contact_routes};
use botox::notify::{NotifyState, notify_routes};
use botox::webhook::{WebhookState, webhook_routes};
use botox::whatsapp::WhatsAppClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  required: BOTOX_VERIFY_TOKEN, WHATSAPP_ACCESS_TOKEN, WHATSAPP_PHONE_NUMBER_ID");
        std::process::exit(1);
    });

    eprintln!("📱 BotOX v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook: http://0.0.0.0:{}/webhook", config.port);
    eprintln!("   Send API: http://0.0.0.0:{}/api/send-message", config.port);
    eprintln!("   Contacts: http://0.0.0.0:{}/api/contacts", config.port);
    eprintln!("   Database: {}\n", config.db_path);

    let store: Arc<dyn ContactStore> = Arc::new(
        LibSqlContacts::new_local(std::path::Path::new(&config.db_path))
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error: Failed to open database at {}: {e}", config.db_path);
                std::process::exit(1);
            }),
    );

    let client = Arc::new(WhatsAppClient::new(&config));

    let app = Router::new()
        .route("/health", get(health))
        .merge(webhook_routes(WebhookState {
            verify_token: config.verify_token.clone().into(),
            client: Arc::clone(&client),
        }))
        .merge(notify_routes(NotifyState {
            client: Arc::clone(&client),
        }))
        .merge(contact_routes(ContactsState { store }))
        // The operator screen is a browser app; every endpoint answers
        // cross-origin.
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "BotOX server started");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "botox"
    }))
}
