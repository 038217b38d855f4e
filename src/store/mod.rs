//! Storage collaborators of the bot.
//!
//! The command handlers never talk to a storage engine directly. They go
//! through two traits:
//!
//! - [`InstallationStore`] - Installations, their rooms and room members
//! - [`MatchStore`] - Append-only match history of every room
//!
//! Both traits are mocked with `mockall` in the tests. The [`json`] module
//! provides implementations backed by JSON files, used by the binary.
//!
//! # Consistency
//!
//! Implementations must make [`InstallationStore::add_members`] a single
//! atomic operation: creating the room when it is missing and setting the
//! members either both happen or none does. Nothing read before a write is
//! assumed to still be valid when the write happens, so calls can be retried
//! safely.

pub mod json;

use async_trait::async_trait;
use mockall::automock;

use crate::league::{Installation, Match, Member, NewMatch};

/// Access to the installations of the bot.
#[automock]
#[async_trait]
pub trait InstallationStore: Send + Sync {
    /// Fetches an installation with its rooms, `None` if it does not exist.
    async fn get_installation(&self, oauth_id: &str) -> anyhow::Result<Option<Installation>>;

    /// Registers an installation. The rooms of an existing installation are
    /// kept, only its secret is updated.
    async fn put_installation(&self, oauth_id: &str, oauth_secret: &str) -> anyhow::Result<()>;

    /// Adds (or renames) members of a room, creating the room if needed.
    async fn add_members(
        &self,
        oauth_id: &str,
        room_id: &str,
        members: &[Member],
    ) -> anyhow::Result<()>;
}

/// Access to the match history of the rooms.
#[automock]
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Fetches every match recorded in a room, in no particular order.
    async fn get_matches(&self, room_id: &str) -> anyhow::Result<Vec<Match>>;

    /// Records a match, stamping it with its creation time and identifier.
    async fn save_match(&self, room_id: &str, new_match: NewMatch) -> anyhow::Result<Match>;
}
