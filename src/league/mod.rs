//! Table football league domain.
//!
//! This module holds everything the bot knows about a league independently of
//! the chat platform and of the storage backend:
//!
//! - `structs` - Installations, rooms, members and recorded matches
//! - `name` - Normalization of display names into stable member keys
//! - `rating` - Replay of a room's match history into skill scores
//! - `leaderboard` - Ranking, decoration and formatting of the scores
//!
//! All the functions here are pure and synchronous: they never touch the
//! network or the file system, which keeps them trivial to test.
//!
//! # Examples
//!
//! ```no_run
//! use foosbot::config::Rating;
//! use foosbot::league::{Leaderboard, RatingEngine, Roster};
//!
//! let members = Roster::from([("alice".to_string(), "Alice".to_string())]);
//! let ratings = RatingEngine::new(&Rating::default()).compute_ratings(&members, &[]);
//! let leaderboard = Leaderboard::new(&members, &ratings);
//! println!("{}", leaderboard.to_text());
//! ```

use indexmap::IndexMap;

mod leaderboard;
mod name;
mod rating;
mod structs;

pub use crate::league::leaderboard::Leaderboard;
pub use crate::league::name::normalize;
pub use crate::league::rating::RatingEngine;
pub use crate::league::structs::{Installation, Match, Member, NewMatch};
#[cfg(test)]
pub use crate::league::structs::{MatchId, Room};

/// Normalized member name, unique within a room.
pub type MemberKey = String;

/// Human readable spelling of a member name, as last supplied.
pub type DisplayName = String;

/// Members of a room in registration order.
pub type Roster = IndexMap<MemberKey, DisplayName>;
