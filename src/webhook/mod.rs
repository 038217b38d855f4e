//! Webhook transport between the chat platform and the bot.
//!
//! The chat platform calls the bot over HTTP with JSON payloads:
//!
//! - [`payload`] - Wire format of the callbacks and of the replies
//! - [`server`] - axum routes turning callbacks into [`Commander`](crate::commands::Commander) calls
//!
//! Replies are returned synchronously in the HTTP response: `200` with the
//! message to post, `204` when there is nothing to say and `500` when the
//! storage failed.

pub mod payload;
mod server;

pub use crate::webhook::server::{router, serve};
