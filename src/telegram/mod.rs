//! Telegram Bot API delivery client

pub mod client;

pub use client::TelegramClient;
