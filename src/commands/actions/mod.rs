//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives a
//! [`CommandContext`](crate::commands::CommandContext), processes the command,
//! and returns a [`CommandResult`](crate::commands::CommandResult).
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Receive context with the room state (members, match history)
//! 2. Validate and process the command
//! 3. Return a result with the reply and optional state changes
//!
//! # Available Handlers
//!
//! - [`handle_add`] - Register members in the league
//! - [`handle_list`] - Show the leaderboard
//! - [`handle_record`] - Record a match between registered members
//! - [`handle_remove`] - Refuse to remove members
//! - [`handle_help`] - Display help information
//! - [`handle_unknown`] - Point to the help command
//!
//! # State Changes
//!
//! Handlers don't modify state directly. Instead, they return state change requests
//! via `members_to_add` or `match_to_save` in the [`CommandResult`](crate::commands::CommandResult).

mod add;
mod help;
mod list;
mod record;
mod remove;

pub use crate::commands::actions::{
    add::handle_add,
    help::{handle_help, handle_unknown},
    list::handle_list,
    record::handle_record,
    remove::handle_remove,
};
