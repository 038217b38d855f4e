//! Data structures describing installations, rooms and recorded matches.
//!
//! These structures are shared by the command handlers and the storage
//! backends, which is why they all implement serde's traits.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::league::{DisplayName, MemberKey, Roster, name::collapse_whitespace, normalize};

/// One installation of the bot on a chat platform account.
///
/// The installation is identified by the OAuth client id the platform sends
/// along with every webhook call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    /// OAuth client id of the installation
    pub oauth_id: String,
    /// OAuth secret shared with the platform at install time
    pub oauth_secret: String,
    /// Rooms where a league has been started, indexed by room id
    #[serde(default)]
    pub rooms: BTreeMap<String, Room>,
}

impl Installation {
    /// Creates an installation without any room.
    pub fn new(oauth_id: &str, oauth_secret: &str) -> Self {
        Installation {
            oauth_id: oauth_id.to_owned(),
            oauth_secret: oauth_secret.to_owned(),
            rooms: BTreeMap::new(),
        }
    }
}

/// A chat room running a league.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Registered members: normalized key -> last supplied display name.
    /// New members are appended, a renamed member keeps its position.
    #[serde(default)]
    pub members: Roster,
}

/// A league member as typed in a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    /// Normalized name, see [`normalize`]
    pub key: MemberKey,
    /// Display spelling
    pub name: DisplayName,
}

impl Member {
    /// Creates a member from a display name, computing its key.
    pub fn new(name: &str) -> Self {
        Member {
            key: normalize(name),
            name: collapse_whitespace(name),
        }
    }
}

/// Identifier of a recorded match.
///
/// The identifier is a creation timestamp followed by a random suffix, e.g.
/// `2024-03-01T18:02:11.532Z#0k3f`. Comparing two identifiers as strings
/// therefore compares their creation times, the suffix only breaking ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

/// Number of base 36 digits in the random suffix of a [`MatchId`].
const SUFFIX_LEN: u32 = 4;

impl MatchId {
    /// Builds the identifier of a match created at `time` with a given suffix.
    ///
    /// Only the `SUFFIX_LEN` lowest base 36 digits of `suffix` are kept.
    pub fn new(time: DateTime<Utc>, suffix: u32) -> Self {
        let mut digits = vec![b'0'; SUFFIX_LEN as usize];
        let mut rest = suffix % 36u32.pow(SUFFIX_LEN);
        for digit in digits.iter_mut().rev() {
            *digit = b"0123456789abcdefghijklmnopqrstuvwxyz"[(rest % 36) as usize];
            rest /= 36;
        }

        MatchId(format!(
            "{}#{}",
            time.to_rfc3339_opts(SecondsFormat::Millis, true),
            String::from_utf8_lossy(&digits)
        ))
    }

    /// Builds the identifier of a match created at `time` with a random suffix.
    pub fn generate(time: DateTime<Utc>) -> Self {
        let suffix = rand::rng().random_range(0..36u32.pow(SUFFIX_LEN));
        MatchId::new(time, suffix)
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        MatchId(id.to_owned())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A match as reported in a chat room, before it gets an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    /// Teams, each one an ordered list of member keys
    pub teams: Vec<Vec<MemberKey>>,
    /// Goals scored by each team, in the order of `teams`
    pub scores: Option<Vec<u32>>,
}

/// A recorded match. Matches are never modified once saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Chronologically sortable identifier
    pub id: MatchId,
    /// Room the match was reported in
    #[serde(default)]
    pub room_id: String,
    /// Creation time, in seconds since the unix epoch
    #[serde(default)]
    pub time: i64,
    /// Teams, each one an ordered list of member keys
    pub teams: Vec<Vec<MemberKey>>,
    /// Goals scored by each team. Unscored matches are kept but not rated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<u32>>,
}

impl Match {
    /// Stamps a reported match with its creation time and identifier.
    pub fn create(room_id: &str, new_match: NewMatch, time: DateTime<Utc>) -> Self {
        Match {
            id: MatchId::generate(time),
            room_id: room_id.to_owned(),
            time: time.timestamp(),
            teams: new_match.teams,
            scores: new_match.scores,
        }
    }
}
