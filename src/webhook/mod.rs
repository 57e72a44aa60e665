//! Webhook core — inbound event classification and menu routing.

pub mod event;
pub mod menu;
pub mod routes;

pub use event::{EventKind, InboundEvent, classify};
pub use menu::{MenuNode, MenuReply, route};
pub use routes::{WebhookState, webhook_routes};
