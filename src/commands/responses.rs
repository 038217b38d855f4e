//! Reply texts of the bot commands.
//!
//! Every message the bot posts in a room is built here, except the
//! leaderboard which is rendered by [`crate::league::Leaderboard`]. All the
//! replies are plain text.

use crate::utils::join_names;

/// Formats the help message showing available bot commands.
///
/// # Examples
///
/// ```
/// # use foosbot::commands::responses::format_help;
/// assert!(format_help().contains("Commands:"));
/// ```
pub fn format_help() -> String {
    let body = "Commands:\n\
        - add <name>, <name> and <name>: add members to the league, `me` being yourself\n\
        - list: show the leaderboard\n\
        - record <team> <score>-<score> <team>: record a match, e.g. `record Alice & Bob 10-4 Carol & Dan`\n\
        - record <team> vs <team>: record an unscored match\n\
        - help: show this help message\n\n\
        Members are ranked by skill level, computed from the recorded matches.";

    body.to_owned()
}

/// Formats a response for an unknown command.
pub fn format_unknown_command() -> String {
    "Sorry, I didn't understand that. Type `help` for more information.".to_owned()
}

pub fn format_nobody_to_add() -> String {
    "Who do you want to add?".to_owned()
}

/// Confirms the registration of members.
///
/// # Examples
///
/// ```
/// # use foosbot::commands::responses::format_members_added;
/// let names = vec!["Someone".to_string(), "Someone Else".to_string()];
/// assert_eq!(
///     format_members_added(&names),
///     "OK, I've added Someone and Someone Else to the league."
/// );
/// ```
pub fn format_members_added(names: &[String]) -> String {
    format!("OK, I've added {} to the league.", join_names(names))
}

pub fn format_remove_unsupported() -> String {
    "Sorry, I don't know how to remove competitors from the league yet. Why would anyone want to stop playing foosball anyway?"
        .to_owned()
}

pub fn format_empty_league() -> String {
    "There is no foosball league running in this room!".to_owned()
}

/// Formats an error response for a match report that could not be understood.
pub fn format_record_usage() -> String {
    "I didn't get the match. Usage: `record <team> <score>-<score> <team>` or `record <team> vs <team>`, e.g. `record Alice & Bob 10-4 Carol & Dan`."
        .to_owned()
}

/// Formats an error response for players that are not in the league.
pub fn format_unknown_players(names: &[String]) -> String {
    let verb = match names.len() {
        1 => "isn't",
        _ => "aren't",
    };

    format!(
        "Sorry, {} {} in the league. Add them first with `add {}`.",
        join_names(names),
        verb,
        names.join(", ")
    )
}

/// Formats an error response for a player listed in both teams.
pub fn format_player_in_both_teams(name: &str) -> String {
    format!("{} can't play on both sides of the table!", name)
}

/// Confirms the recording of a two-team match.
///
/// # Arguments
///
/// * `first` - Display names of the first team
/// * `second` - Display names of the second team
/// * `scores` - Goals of both teams, `None` for an unscored match
pub fn format_match_recorded(first: &[String], second: &[String], scores: Option<&[u32]>) -> String {
    let first = join_names(first);
    let second = join_names(second);

    match scores {
        Some([a, b]) if a > b => format!("OK, I've recorded {} beating {} {}-{}.", first, second, a, b),
        Some([a, b]) if a < b => format!("OK, I've recorded {} beating {} {}-{}.", second, first, b, a),
        Some([a, b]) => format!("OK, I've recorded a {}-{} draw between {} and {}.", a, b, first, second),
        _ => format!("OK, I've recorded a match between {} and {}.", first, second),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_format_members_added() {
        assert_eq!(
            format_members_added(&names(&["Á New Member", "Another Member", "My Name"])),
            "OK, I've added Á New Member, Another Member and My Name to the league."
        );
        assert_eq!(
            format_members_added(&names(&["New Member"])),
            "OK, I've added New Member to the league."
        );
    }

    #[test]
    fn test_format_unknown_players() {
        assert_eq!(
            format_unknown_players(&names(&["Dan"])),
            "Sorry, Dan isn't in the league. Add them first with `add Dan`."
        );
        assert_eq!(
            format_unknown_players(&names(&["Dan", "Eve"])),
            "Sorry, Dan and Eve aren't in the league. Add them first with `add Dan, Eve`."
        );
    }

    #[test]
    fn test_format_match_recorded_winner_first() {
        let alice = names(&["Alice"]);
        let pair = names(&["Bob", "Carol"]);

        assert_eq!(
            format_match_recorded(&alice, &pair, Some(&[10, 4])),
            "OK, I've recorded Alice beating Bob and Carol 10-4."
        );
        assert_eq!(
            format_match_recorded(&alice, &pair, Some(&[3, 10])),
            "OK, I've recorded Bob and Carol beating Alice 10-3."
        );
    }

    #[test]
    fn test_format_match_recorded_draw_and_unscored() {
        let alice = names(&["Alice"]);
        let bob = names(&["Bob"]);

        assert_eq!(
            format_match_recorded(&alice, &bob, Some(&[5, 5])),
            "OK, I've recorded a 5-5 draw between Alice and Bob."
        );
        assert_eq!(
            format_match_recorded(&alice, &bob, None),
            "OK, I've recorded a match between Alice and Bob."
        );
    }

    #[test]
    fn test_fixed_replies() {
        assert_eq!(format_nobody_to_add(), "Who do you want to add?");
        assert_eq!(
            format_empty_league(),
            "There is no foosball league running in this room!"
        );
        assert!(format_remove_unsupported().starts_with("Sorry, I don't know how to remove"));
        assert!(format_unknown_command().contains("help"));
        assert!(format_record_usage().contains("Usage:"));
    }
}
