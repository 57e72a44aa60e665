//! WhatsApp Cloud API client — outbound message sending.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::webhook::menu::MenuList;

/// Client for the Graph API `/{phone_number_id}/messages` endpoint.
pub struct WhatsAppClient {
    client: reqwest::Client,
    api_base: String,
    phone_number_id: String,
    access_token: SecretString,
}

impl WhatsAppClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.graph_api_base.clone(),
            phone_number_id: config.phone_number_id.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_base, self.phone_number_id)
    }

    /// Send an interactive list menu.
    pub async fn send_menu(&self, to: &str, menu: &MenuList) -> Result<(), ProviderError> {
        self.post_message(to, interactive_list_payload(to, menu))
            .await
    }

    /// Send a plain text message.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<(), ProviderError> {
        self.post_message(to, text_payload(to, body)).await
    }

    async fn post_message(&self, to: &str, payload: Value) -> Result<(), ProviderError> {
        let resp = self
            .client
            .post(self.messages_url())
            .bearer_auth(self.access_token.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::SendFailed {
                to: to.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::SendFailed {
                to: to.to_string(),
                reason: format!("provider returned {status}: {body}"),
            });
        }

        tracing::debug!(to, "WhatsApp message sent");
        Ok(())
    }
}

/// Build the Cloud API body for an interactive list message.
fn interactive_list_payload(to: &str, menu: &MenuList) -> Value {
    let rows: Vec<Value> = menu
        .rows
        .iter()
        .map(|row| json!({ "id": row.id, "title": row.title }))
        .collect();

    json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": "interactive",
        "interactive": {
            "type": "list",
            "header": { "type": "text", "text": menu.header },
            "body": { "text": menu.body },
            "action": {
                "button": menu.button,
                "sections": [{ "title": menu.section_title, "rows": rows }]
            }
        }
    })
}

/// Build the Cloud API body for a plain text message.
fn text_payload(to: &str, body: &str) -> Value {
    json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": "text",
        "text": { "body": body }
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::menu::{MenuNode, MenuReply};

    fn test_config() -> AppConfig {
        AppConfig {
            verify_token: "verify".into(),
            access_token: SecretString::from("token".to_string()),
            phone_number_id: "1122334455".into(),
            graph_api_base: "https://graph.facebook.com/v18.0".into(),
            port: 8080,
            db_path: ":memory:".into(),
        }
    }

    #[test]
    fn messages_url_includes_phone_number_id() {
        let client = WhatsAppClient::new(&test_config());
        assert_eq!(
            client.messages_url(),
            "https://graph.facebook.com/v18.0/1122334455/messages"
        );
    }

    #[test]
    fn text_payload_shape() {
        let payload = text_payload("972501234567", "הכביסה שלך מוכנה");
        assert_eq!(payload["messaging_product"], "whatsapp");
        assert_eq!(payload["to"], "972501234567");
        assert_eq!(payload["type"], "text");
        assert_eq!(payload["text"]["body"], "הכביסה שלך מוכנה");
    }

    #[test]
    fn interactive_list_payload_shape() {
        let MenuReply::List(menu) = MenuNode::Root.reply() else {
            panic!("root renders a list");
        };
        let payload = interactive_list_payload("972501234567", menu);

        assert_eq!(payload["type"], "interactive");
        assert_eq!(payload["interactive"]["type"], "list");
        assert_eq!(payload["interactive"]["header"]["text"], "תפריט שירותים");
        assert_eq!(payload["interactive"]["body"]["text"], "בחר סוג שירות:");
        assert_eq!(payload["interactive"]["action"]["button"], "רשימת שירותים");

        let rows = payload["interactive"]["action"]["sections"][0]["rows"]
            .as_array()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["id"], "laundry");
        assert_eq!(rows[0]["title"], "כביסה");
        assert_eq!(rows[2]["id"], "doctor_appointment");
    }
}
