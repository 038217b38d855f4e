//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, the entry point of the bot
//! for every chat message. It coordinates the storage collaborators with the
//! command parsing and execution.
//!
//! # Flow
//!
//! ```text
//! ChatEvent → installation lookup → Command::parse() → room state
//!           → execute() → CommandResult → writes → Reply
//! ```
//!
//! Only the storage calls a command needs are made: the match history is only
//! read to list a non-empty league, and nothing is written unless the handler
//! requested it.

use log::{debug, info};

use crate::{
    commands::{
        ChatEvent, CommandContext, CommandResult, Reply,
        actions::{
            handle_add, handle_help, handle_list, handle_record, handle_remove, handle_unknown,
        },
        command::Command,
    },
    config::{self, LeaderboardFormat},
    league::RatingEngine,
    store::{InstallationStore, MatchStore},
};

/// Command orchestrator for parsing and executing bot commands.
///
/// The Commander is responsible for:
/// - Looking up the installation a message was delivered to
/// - Parsing the message text into a structured command
/// - Loading the room state the command needs
/// - Routing the command to its handler
/// - Applying the state changes the handler requested
pub struct Commander<I, M> {
    /// Installations, rooms and members
    installations: I,
    /// Match history
    matches: M,
    /// Command prefix stripped from the messages
    prefix: Option<String>,
    /// Rating engine used by the leaderboard
    engine: RatingEngine,
    /// Format of the leaderboard reply
    leaderboard: LeaderboardFormat,
}

impl<I, M> Commander<I, M>
where
    I: InstallationStore,
    M: MatchStore,
{
    /// Creates a new Commander on top of the storage collaborators.
    ///
    /// # Arguments
    ///
    /// * `installations` - Installation store
    /// * `matches` - Match history store
    /// * `bot` - Bot behavior configuration
    /// * `rating` - Rating engine configuration
    pub fn new(installations: I, matches: M, bot: &config::Bot, rating: &config::Rating) -> Self {
        Commander {
            installations,
            matches,
            prefix: bot.prefix.clone(),
            engine: RatingEngine::new(rating),
            leaderboard: bot.leaderboard,
        }
    }

    /// Handles a chat message and returns the reply to post, if any.
    ///
    /// Messages delivered to an unknown installation are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage call fails. Nothing is replied in that
    /// case and a failed write may be retried by handling the message again.
    pub async fn handle(&self, event: &ChatEvent) -> anyhow::Result<Option<Reply>> {
        let Some(installation) = self.installations.get_installation(&event.oauth_id).await?
        else {
            info!(
                "ignoring message for unknown installation {}",
                event.oauth_id
            );
            return Ok(None);
        };

        let text = self.strip_prefix(&event.text);
        let command = Command::parse(text, &event.mentions, &event.sender_name);
        debug!("room {}: parsed {:?}", event.room_id, command);

        let members = installation
            .rooms
            .get(&event.room_id)
            .map(|room| room.members.clone())
            .unwrap_or_default();
        let matches = match command {
            Command::List if !members.is_empty() => {
                self.matches.get_matches(&event.room_id).await?
            }
            _ => Vec::new(),
        };
        let context = CommandContext {
            room_id: event.room_id.clone(),
            members,
            matches,
        };

        let result = self.execute(&command, &context);

        if let Some(members) = &result.members_to_add {
            self.installations
                .add_members(&event.oauth_id, &event.room_id, members)
                .await?;
        }
        if let Some(new_match) = result.match_to_save {
            let recorded = self.matches.save_match(&event.room_id, new_match).await?;
            debug!("recorded match {:?}", recorded);
        }

        Ok(Some(result.reply))
    }

    /// Registers an installation of the bot, keeping the rooms of an existing
    /// one.
    pub async fn install(&self, oauth_id: &str, oauth_secret: &str) -> anyhow::Result<()> {
        info!("installing {}", oauth_id);
        self.installations
            .put_installation(oauth_id, oauth_secret)
            .await
    }

    /// Executes a parsed command against the room state.
    fn execute(&self, command: &Command, context: &CommandContext) -> CommandResult {
        match command {
            Command::Add(members) => handle_add(members),
            Command::List => handle_list(context, &self.engine, self.leaderboard),
            Command::Remove => handle_remove(),
            Command::Record(report) => handle_record(context, report.as_ref()),
            Command::Help => handle_help(),
            Command::Unknown => handle_unknown(),
        }
    }

    /// Removes the configured prefix in front of a message, if present.
    fn strip_prefix<'a>(&self, text: &'a str) -> &'a str {
        let text = text.trim_start();
        let Some(prefix) = &self.prefix else {
            return text;
        };

        match text.get(..prefix.len()) {
            Some(start) if start.eq_ignore_ascii_case(prefix) => {
                let rest = &text[prefix.len()..];
                match rest.is_empty() || rest.starts_with(char::is_whitespace) {
                    true => rest,
                    false => text,
                }
            }
            _ => text,
        }
    }
}
