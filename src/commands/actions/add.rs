//! Add command handler.
//!
//! Registers members in the league of the room. Members already registered
//! are registered again, which updates the spelling of their name. The room
//! is created by the write if it does not exist yet.

use log::debug;

use crate::{
    commands::{
        CommandResult, Reply,
        responses::{format_members_added, format_nobody_to_add},
    },
    league::Member,
};

/// Requests the registration of `members`.
///
/// Asks who to add when `members` is empty, without requesting any write.
pub fn handle_add(members: &[Member]) -> CommandResult {
    debug!("handling add command for {:?}", members);

    if members.is_empty() {
        return CommandResult::reply(Reply::Text(format_nobody_to_add()));
    }

    let names: Vec<String> = members.iter().map(|member| member.name.clone()).collect();

    CommandResult {
        reply: Reply::Text(format_members_added(&names)),
        members_to_add: Some(members.to_vec()),
        match_to_save: None,
    }
}
