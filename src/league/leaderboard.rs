//! Leaderboard ranking and formatting.

use std::collections::BTreeMap;

use crate::{
    league::{DisplayName, MemberKey, Roster},
    utils::escape_html,
};

/// Header of every leaderboard listing.
const HEADER: &str = "Table football leaderboard, sorted by skill level:";

/// Decoration of a leaderboard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoration {
    /// Nothing special
    None,
    /// Best score of the league, when positive
    Hot,
    /// Worst score of the league, when negative
    Cold,
}

impl Decoration {
    fn suffix(&self) -> &'static str {
        match self {
            Decoration::None => "",
            Decoration::Hot => " 🔥🔥",
            Decoration::Cold => " 💩💩",
        }
    }
}

/// A ranked member.
#[derive(Debug, Clone, PartialEq)]
struct Standing {
    name: DisplayName,
    score: f64,
    decoration: Decoration,
}

/// Members of a league sorted by score, best first.
///
/// Members with the same score keep their registration order. The best
/// member(s) are marked hot if their score is positive and the worst
/// member(s) cold if their score is negative. Both comparisons use the score
/// as printed, with one decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboard {
    standings: Vec<Standing>,
}

impl Leaderboard {
    /// Ranks `members` with their `ratings`. Members without a rating are
    /// ranked with a score of `0`.
    pub fn new(
        members: &Roster,
        ratings: &BTreeMap<MemberKey, f64>,
    ) -> Self {
        let mut standings: Vec<Standing> = members
            .iter()
            .map(|(key, name)| Standing {
                name: name.clone(),
                score: ratings.get(key).copied().unwrap_or(0.0),
                decoration: Decoration::None,
            })
            .collect();

        standings.sort_by(|a, b| b.score.total_cmp(&a.score));

        let max = standings.first().map(|s| tenths(s.score)).unwrap_or(0.0);
        let min = standings.last().map(|s| tenths(s.score)).unwrap_or(0.0);
        for standing in standings.iter_mut() {
            let shown = tenths(standing.score);
            if shown > 0.0 && shown == max {
                standing.decoration = Decoration::Hot;
            } else if shown < 0.0 && shown == min {
                standing.decoration = Decoration::Cold;
            }
        }

        Leaderboard { standings }
    }

    /// Formats the leaderboard as an HTML ordered list.
    ///
    /// Display names are escaped.
    pub fn to_html(&self) -> String {
        let items: String = self
            .standings
            .iter()
            .map(|standing| format!("<li>{}</li>", format_standing(standing, true)))
            .collect();

        format!("{} <ol>{}</ol>", HEADER, items)
    }

    /// Formats the leaderboard as plain text, one numbered line per member.
    pub fn to_text(&self) -> String {
        let lines = self
            .standings
            .iter()
            .enumerate()
            .map(|(index, standing)| format!("{}. {}", index + 1, format_standing(standing, false)))
            .collect::<Vec<String>>()
            .join("\n");

        format!("{}\n{}", HEADER, lines)
    }
}

fn format_standing(standing: &Standing, html: bool) -> String {
    let name = match html {
        true => escape_html(&standing.name),
        false => standing.name.clone(),
    };

    format!(
        "{} ({}){}",
        name,
        format_score(standing.score),
        standing.decoration.suffix()
    )
}

/// Score in tenths, as printed.
fn tenths(score: f64) -> f64 {
    (score * 10.0).round()
}

/// Formats a score with one decimal, never printing a negative zero.
fn format_score(score: f64) -> String {
    let formatted = format!("{:.1}", score);
    match formatted.as_str() {
        "-0.0" => "0.0".to_owned(),
        _ => formatted,
    }
}
