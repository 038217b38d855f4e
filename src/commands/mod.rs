//! Bot command parsing and execution.
//!
//! This module provides the complete command processing pipeline of the
//! foosbot, letting the members of a chat room run a table football league.
//!
//! # Overview
//!
//! The commands module handles the entire lifecycle of a chat message:
//! 1. **Parsing** - Converting message text into a structured [`command::Command`]
//! 2. **Loading** - Fetching the room state the command needs from storage
//! 3. **Execution** - Routing the command to its handler
//! 4. **Writing** - Applying the state changes the handler requested
//! 5. **Response** - Returning the [`Reply`] to post in the room
//!
//! # Architecture
//!
//! ```text
//! ChatEvent
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: handle()
//! └─────────────┘
//!      │
//!      ├── Command::parse() ───────────┐
//!      │                               ▼
//!      │                   ┌──────────────────┐
//!      │                   │  command::Command│
//!      │                   └──────────────────┘
//!      │
//!      └── execute() ─────────────────┐
//!                                     ▼
//!                          ┌─────────────────────┐
//!                          │ Action Handlers     │
//!                          │  - handle_add       │
//!                          │  - handle_list      │
//!                          │  - handle_remove    │
//!                          │  - handle_record    │
//!                          │  - handle_help      │
//!                          └─────────────────────┘
//!                                     │
//!                                     ▼
//!                          ┌────────────────────┐
//!                          │  CommandResult     │
//!                          │  - reply           │
//!                          │  - members to add  │
//!                          │  - match to save   │
//!                          └────────────────────┘
//! ```
//!
//! # Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `add` | `[members:] <name>, <name> and <name>` | Register members in the league |
//! | `list` | None | Show the leaderboard |
//! | `record` | `<team> <a>-<b> <team>` or `<team> vs <team>` | Record a match |
//! | `remove` | Anything | Not supported, answers with a refusal |
//! | `help` | None | Display help information |
//!
//! Names are separated by commas, `&` or `and`. A name can be a mention
//! (`@handle`) or `me` for the sender of the message.
//!
//! # Module Organization
//!
//! - [`commander`] - Main orchestrator loading state, executing commands and writing results
//! - [`command`] - Command enum definitions and parsing logic
//! - [`actions`] - Individual command handler implementations
//! - [`responses`] - Response formatting utilities

mod actions;
pub mod command;
mod commander;
mod responses;

pub use crate::commands::commander::Commander;
use crate::league::{Match, Member, NewMatch, Roster};

/// A message posted in a room, as delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    /// Installation the message was delivered to
    pub oauth_id: String,
    /// Room the message was posted in
    pub room_id: String,
    /// Message text, possibly starting with the command prefix
    pub text: String,
    /// Display name of the sender
    pub sender_name: String,
    /// Mentions resolved by the chat platform
    pub mentions: Vec<Mention>,
}

/// A mention of a room participant in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// Handle as typed after the `@`
    pub handle: String,
    /// Display name of the mentioned participant
    pub name: String,
}

/// Message to post back in the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text, displayed as is
    Text(String),
    /// HTML fragment, user supplied parts escaped
    Html(String),
}

/// Runtime context for command execution.
///
/// Holds the state of the room the command was issued in. The match history
/// is only loaded for the commands that need it.
#[derive(Debug, Default)]
pub struct CommandContext {
    /// Room where the command was issued
    pub room_id: String,
    /// Registered members of the room, empty for an unknown room
    pub members: Roster,
    /// Match history of the room
    pub matches: Vec<Match>,
}

/// Result of command execution.
///
/// Command handlers don't modify state directly. They return state change
/// requests through `members_to_add` and `match_to_save`, which the
/// [`Commander`] applies before sending the reply.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Message to post in the room
    pub reply: Reply,
    /// Members to register in the room
    pub members_to_add: Option<Vec<Member>>,
    /// Match to record in the room
    pub match_to_save: Option<NewMatch>,
}

impl CommandResult {
    /// A result without state change.
    pub fn reply(reply: Reply) -> Self {
        CommandResult {
            reply,
            members_to_add: None,
            match_to_save: None,
        }
    }
}
