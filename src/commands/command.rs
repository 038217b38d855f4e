//! Command parsing.
//!
//! This module turns the free-form text of a chat message into a structured
//! [`Command`]. Parsing never fails: anything that is not understood becomes
//! [`Command::Unknown`], and a malformed `record` becomes a
//! [`Command::Record`] without report so that the user gets the usage.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::{commands::Mention, league::Member};

/// Verb and remainder of a message. The verb is a whole word, punctuation
/// right after it is dropped.
static VERB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(\p{L}+)(?:[\s,:;.!?]+|$)(.*?)\s*$")
        .expect("Failed to compile verb regex")
});

/// Punctuation that may follow a mention, e.g. `add @bob.`
const MENTION_TRAILERS: &[char] = &['.', ',', '!', '?', ':', ';'];

/// Optional `members:` label in front of the names of an `add`.
static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^members?\s*(?::|$)").expect("Failed to compile label regex")
});

/// Separators of a name list: commas, ampersands and the word `and`.
static SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:,|&|\band\b)\s*").expect("Failed to compile separator regex")
});

/// A list token only made of `@handle` words.
static MENTIONS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@\S+(?:\s+@\S+)*$").expect("Failed to compile mentions regex")
});

/// `<team> <a>-<b> <team>`
static SCORED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(.+?)\s+(\d+)\s*[-:]\s*(\d+)\s+(.+)$").expect("Failed to compile scored match regex")
});

/// `<team> vs <team>`
static UNSCORED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(.+?)\s+(?:vs\.?|versus)\s+(.+)$").expect("Failed to compile unscored match regex")
});

/// Represents a parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register members in the room's league, possibly none
    Add(Vec<Member>),
    /// Show the leaderboard
    List,
    /// Remove members, which is not supported
    Remove,
    /// Record a match, `None` if the report could not be understood
    Record(Option<MatchReport>),
    /// Display help information
    Help,
    /// Anything else
    Unknown,
}

/// A match as reported in a `record` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    /// Teams as typed, at least one member each
    pub teams: Vec<Vec<Member>>,
    /// Goals of each team, `None` for an unscored match
    pub scores: Option<Vec<u32>>,
}

impl Command {
    /// Parses a message text into a Command.
    ///
    /// # Arguments
    ///
    /// * `text` - The message text, without any command prefix
    /// * `mentions` - The mentions the chat platform resolved in the message
    /// * `sender_name` - Display name of the sender, substituted to `me`
    ///
    /// # Examples
    ///
    /// ```
    /// # use foosbot::commands::command::Command;
    /// assert_eq!(Command::parse("LIST", &[], "My Name"), Command::List);
    /// ```
    pub fn parse(text: &str, mentions: &[Mention], sender_name: &str) -> Self {
        let Some(captures) = VERB_REGEX.captures(text) else {
            return Command::Unknown;
        };
        let verb = captures[1].to_lowercase();
        let remainder = &captures[2];

        debug!("parsing command {:?} with arguments {:?}", verb, remainder);

        match verb.as_str() {
            "add" => Command::Add(parse_add(remainder, mentions, sender_name)),
            "list" => Command::List,
            "remove" | "delete" | "kick" => Command::Remove,
            "record" => Command::Record(parse_record(remainder, mentions, sender_name)),
            "help" => Command::Help,
            _ => Command::Unknown,
        }
    }
}

fn parse_add(remainder: &str, mentions: &[Mention], sender_name: &str) -> Vec<Member> {
    let names = LABEL_REGEX.replace(remainder, "");
    parse_names(&names, mentions, sender_name)
}

fn parse_record(remainder: &str, mentions: &[Mention], sender_name: &str) -> Option<MatchReport> {
    let (first, second, scores) = if let Some(captures) = SCORED_REGEX.captures(remainder) {
        let scores = vec![captures[2].parse().ok()?, captures[3].parse().ok()?];
        (captures.get(1)?, captures.get(4)?, Some(scores))
    } else if let Some(captures) = UNSCORED_REGEX.captures(remainder) {
        (captures.get(1)?, captures.get(2)?, None)
    } else {
        debug!("unable to understand match report {:?}", remainder);
        return None;
    };

    let teams = vec![
        parse_names(first.as_str(), mentions, sender_name),
        parse_names(second.as_str(), mentions, sender_name),
    ];
    if teams.iter().any(|team| team.is_empty()) {
        return None;
    }

    Some(MatchReport { teams, scores })
}

/// Parses a list of names, resolving mentions and `me`.
///
/// Names designating the same member collapse into one entry, kept at the
/// position of the first occurrence with the last spelling.
fn parse_names(list: &str, mentions: &[Mention], sender_name: &str) -> Vec<Member> {
    let mut members: Vec<Member> = Vec::new();

    let names = SEPARATOR_REGEX
        .split(list)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .flat_map(|token| resolve_token(token, mentions, sender_name));

    for name in names {
        let member = Member::new(&name);
        if member.key.is_empty() {
            continue;
        }
        match members.iter_mut().find(|m| m.key == member.key) {
            Some(existing) => existing.name = member.name,
            None => members.push(member),
        }
    }

    debug!("parsed names {:?}", members);

    members
}

fn resolve_token(token: &str, mentions: &[Mention], sender_name: &str) -> Vec<String> {
    if MENTIONS_REGEX.is_match(token) {
        return token
            .split_whitespace()
            .map(|word| resolve_mention(word[1..].trim_end_matches(MENTION_TRAILERS), mentions))
            .collect();
    }

    match token.eq_ignore_ascii_case("me") {
        true => vec![sender_name.to_owned()],
        false => vec![token.to_owned()],
    }
}

/// Display name of a mentioned handle, the handle itself if it is unknown.
fn resolve_mention(handle: &str, mentions: &[Mention]) -> String {
    mentions
        .iter()
        .find(|mention| mention.handle.to_lowercase() == handle.to_lowercase())
        .map(|mention| mention.name.clone())
        .unwrap_or_else(|| handle.to_owned())
}
