//! BotOX — WhatsApp interactive services bot.

pub mod config;
pub mod contacts;
pub mod error;
pub mod notify;
pub mod webhook;
pub mod whatsapp;
