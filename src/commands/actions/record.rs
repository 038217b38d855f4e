//! Record command handler.
//!
//! Records a match between two teams of registered members.
//!
//! # Validation
//!
//! The handler validates three constraints:
//! - **Report**: The match must have been understood
//! - **Players**: Every player must be a registered member of the room
//! - **Teams**: A player cannot be in both teams
//!
//! # Errors
//!
//! Returns user-friendly error messages for each failed constraint, without
//! requesting any write.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult, Reply,
        command::MatchReport,
        responses::{
            format_match_recorded, format_player_in_both_teams, format_record_usage,
            format_unknown_players,
        },
    },
    league::{DisplayName, Member, NewMatch},
};

/// Errors that can occur while validating a match report.
#[derive(Debug)]
enum RecordError {
    /// The match report could not be parsed.
    NotUnderstood,
    /// Some players are not registered in the room.
    UnknownPlayers(Vec<DisplayName>),
    /// A player appears in both teams.
    PlayerInBothTeams(DisplayName),
}

fn format_record_error(error: RecordError) -> String {
    match error {
        RecordError::NotUnderstood => format_record_usage(),
        RecordError::UnknownPlayers(names) => format_unknown_players(&names),
        RecordError::PlayerInBothTeams(name) => format_player_in_both_teams(&name),
    }
}

/// Requests the recording of a reported match.
///
/// The reply names the players with their registered spelling.
pub fn handle_record(context: &CommandContext, report: Option<&MatchReport>) -> CommandResult {
    debug!("handling record command {:?}", report);

    let (new_match, reply) = match validate(context, report) {
        Ok(validated) => validated,
        Err(error) => {
            debug!("invalid match report: {:?}", error);
            return CommandResult::reply(Reply::Text(format_record_error(error)));
        }
    };

    CommandResult {
        reply: Reply::Text(reply),
        members_to_add: None,
        match_to_save: Some(new_match),
    }
}

fn validate(
    context: &CommandContext,
    report: Option<&MatchReport>,
) -> Result<(NewMatch, String), RecordError> {
    let report = report.ok_or(RecordError::NotUnderstood)?;
    let [first, second] = report.teams.as_slice() else {
        return Err(RecordError::NotUnderstood);
    };

    let mut unknown: Vec<DisplayName> = Vec::new();
    for player in first.iter().chain(second) {
        if !context.members.contains_key(&player.key) && !unknown.contains(&player.name) {
            unknown.push(player.name.clone());
        }
    }
    if !unknown.is_empty() {
        return Err(RecordError::UnknownPlayers(unknown));
    }

    if let Some(player) = first.iter().find(|p| second.iter().any(|o| o.key == p.key)) {
        return Err(RecordError::PlayerInBothTeams(registered_name(context, player)));
    }

    let names = |team: &[Member]| -> Vec<DisplayName> {
        team.iter().map(|p| registered_name(context, p)).collect()
    };
    let reply = format_match_recorded(
        &names(first.as_slice()),
        &names(second.as_slice()),
        report.scores.as_deref(),
    );

    let new_match = NewMatch {
        teams: report
            .teams
            .iter()
            .map(|team| team.iter().map(|p| p.key.clone()).collect())
            .collect(),
        scores: report.scores.clone(),
    };

    Ok((new_match, reply))
}

fn registered_name(context: &CommandContext, player: &Member) -> DisplayName {
    context
        .members
        .get(&player.key)
        .cloned()
        .unwrap_or_else(|| player.name.clone())
}
