//! List command handler.
//!
//! Rates the members of the room from its match history and answers with the
//! leaderboard, as an HTML list or as plain text depending on the
//! configuration. This is a read-only command.

use log::debug;

use crate::{
    commands::{CommandContext, CommandResult, Reply, responses::format_empty_league},
    config::LeaderboardFormat,
    league::{Leaderboard, RatingEngine},
};

/// Shows the leaderboard of the room.
///
/// A room without members, including a room the bot never saw, has no
/// league running.
pub fn handle_list(
    context: &CommandContext,
    engine: &RatingEngine,
    format: LeaderboardFormat,
) -> CommandResult {
    debug!("handling list command in room {}", context.room_id);

    if context.members.is_empty() {
        return CommandResult::reply(Reply::Text(format_empty_league()));
    }

    let ratings = engine.compute_ratings(&context.members, &context.matches);
    let leaderboard = Leaderboard::new(&context.members, &ratings);

    debug!("leaderboard of room {}: {:?}", context.room_id, leaderboard);

    let reply = match format {
        LeaderboardFormat::Html => Reply::Html(leaderboard.to_html()),
        LeaderboardFormat::Text => Reply::Text(leaderboard.to_text()),
    };

    CommandResult::reply(reply)
}
