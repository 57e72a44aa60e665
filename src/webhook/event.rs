//! Inbound event classifier — pure parse of provider webhook payloads.

use serde_json::Value;

/// Semantic kind of an inbound WhatsApp message.
///
/// A selection id exists exactly when the user answered a previously sent
/// list or button menu, so it lives inside those variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Freeform text message.
    Text,
    /// Structured reply to an interactive list.
    ListReply { id: String },
    /// Structured reply to interactive buttons.
    ButtonReply { id: String },
    /// Any other message type (media, location, ...).
    Other,
}

/// A classified inbound message event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// Opaque sender identifier (the `from` phone number).
    pub sender: String,
    pub kind: EventKind,
}

impl InboundEvent {
    /// The menu option id the user picked, if this was an interactive reply.
    pub fn selection_id(&self) -> Option<&str> {
        match &self.kind {
            EventKind::ListReply { id } | EventKind::ButtonReply { id } => Some(id),
            EventKind::Text | EventKind::Other => None,
        }
    }
}

/// Classify a raw webhook payload into an [`InboundEvent`].
///
/// The message lives at `entry[0].changes[0].value.messages[0]`. A payload
/// without that path (delivery-status callbacks and the like) or without a
/// sender yields `None`; the caller acknowledges it without acting. This
/// never fails on malformed input — unknown shapes classify as
/// [`EventKind::Other`].
pub fn classify(payload: &Value) -> Option<InboundEvent> {
    let message = payload
        .get("entry")?
        .get(0)?
        .get("changes")?
        .get(0)?
        .get("value")?
        .get("messages")?
        .get(0)?;

    let sender = message.get("from").and_then(Value::as_str)?.to_string();

    let kind = match message.get("type").and_then(Value::as_str) {
        Some("text") => EventKind::Text,
        Some("interactive") => classify_interactive(message.get("interactive")),
        _ => EventKind::Other,
    };

    Some(InboundEvent { sender, kind })
}

/// Classify the `interactive` object of an interactive message.
fn classify_interactive(interactive: Option<&Value>) -> EventKind {
    let Some(interactive) = interactive else {
        return EventKind::Other;
    };

    let reply_id = |key: &str| {
        interactive
            .get(key)
            .and_then(|r| r.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    match interactive.get("type").and_then(Value::as_str) {
        Some("list_reply") => match reply_id("list_reply") {
            Some(id) => EventKind::ListReply { id },
            None => EventKind::Other,
        },
        Some("button_reply") => match reply_id("button_reply") {
            Some(id) => EventKind::ButtonReply { id },
            None => EventKind::Other,
        },
        _ => EventKind::Other,
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Wrap a message object in the provider's envelope.
    fn envelope(message: Value) -> Value {
        json!({
            "entry": [{
                "changes": [{
                    "value": { "messages": [message] }
                }]
            }]
        })
    }

    #[test]
    fn classify_text_message() {
        let payload = envelope(json!({
            "from": "972501234567",
            "type": "text",
            "text": { "body": "hi" }
        }));

        let event = classify(&payload).unwrap();
        assert_eq!(event.sender, "972501234567");
        assert_eq!(event.kind, EventKind::Text);
        assert_eq!(event.selection_id(), None);
    }

    #[test]
    fn classify_list_reply() {
        let payload = envelope(json!({
            "from": "972501234567",
            "type": "interactive",
            "interactive": {
                "type": "list_reply",
                "list_reply": { "id": "laundry", "title": "כביסה" }
            }
        }));

        let event = classify(&payload).unwrap();
        assert_eq!(event.kind, EventKind::ListReply { id: "laundry".into() });
        assert_eq!(event.selection_id(), Some("laundry"));
    }

    #[test]
    fn classify_button_reply() {
        let payload = envelope(json!({
            "from": "972501234567",
            "type": "interactive",
            "interactive": {
                "type": "button_reply",
                "button_reply": { "id": "doctor_almog" }
            }
        }));

        let event = classify(&payload).unwrap();
        assert_eq!(
            event.kind,
            EventKind::ButtonReply { id: "doctor_almog".into() }
        );
    }

    #[test]
    fn classify_unknown_message_type() {
        let payload = envelope(json!({
            "from": "972501234567",
            "type": "image",
            "image": { "id": "123" }
        }));

        let event = classify(&payload).unwrap();
        assert_eq!(event.kind, EventKind::Other);
    }

    #[test]
    fn classify_interactive_without_reply_id_is_other() {
        let payload = envelope(json!({
            "from": "972501234567",
            "type": "interactive",
            "interactive": { "type": "list_reply" }
        }));

        let event = classify(&payload).unwrap();
        assert_eq!(event.kind, EventKind::Other);
    }

    #[test]
    fn classify_unknown_interactive_type_is_other() {
        let payload = envelope(json!({
            "from": "972501234567",
            "type": "interactive",
            "interactive": { "type": "nfm_reply" }
        }));

        let event = classify(&payload).unwrap();
        assert_eq!(event.kind, EventKind::Other);
    }

    #[test]
    fn status_callback_has_no_message() {
        // Delivery-status callbacks carry `statuses`, not `messages`.
        let payload = json!({
            "entry": [{
                "changes": [{
                    "value": { "statuses": [{ "status": "delivered" }] }
                }]
            }]
        });

        assert_eq!(classify(&payload), None);
    }

    #[test]
    fn empty_payload_has_no_message() {
        assert_eq!(classify(&json!({})), None);
        assert_eq!(classify(&json!({ "entry": [] })), None);
        assert_eq!(classify(&json!({ "entry": [{ "changes": [] }] })), None);
        assert_eq!(classify(&json!(null)), None);
        assert_eq!(classify(&json!("not an object")), None);
    }

    #[test]
    fn message_without_sender_is_dropped() {
        let payload = envelope(json!({
            "type": "text",
            "text": { "body": "hi" }
        }));

        assert_eq!(classify(&payload), None);
    }
}
