//! Skill rating of league members from their match history.
//!
//! Ratings are never stored: every leaderboard request replays the full
//! history of the room. Each member starts with the default TrueSkill rating
//! and every scored match updates the ratings of its players with the
//! TrueSkill update from the `skillratings` crate.
//!
//! # Score
//!
//! The published score is the conservative estimate `μ - 3σ` of a player's
//! skill, which is exactly `0` for a player without any match. Winning raises
//! `μ` and every match lowers `σ`, so a losing player only slowly sinks below
//! zero while the uncertainty about them shrinks.
//!
//! # Margin of victory
//!
//! TrueSkill only looks at who won. To account for the margin, the update of
//! a match is weighted by `(top - bottom) / top` where `top` and `bottom` are
//! the best and worst recorded scores: a 10-0 shutout counts fully, a 10-9 win
//! counts for a tenth. Draws count fully.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use skillratings::{
    MultiTeamOutcome, Outcomes,
    trueskill::{TrueSkillConfig, TrueSkillRating, trueskill_multi_team, trueskill_two_teams},
};

use crate::{
    config::Rating,
    league::{Match, MemberKey, Roster},
};

/// Computes member scores from a room's match history.
#[derive(Debug, Clone)]
pub struct RatingEngine {
    /// TrueSkill parameters
    config: TrueSkillConfig,
}

impl RatingEngine {
    /// Creates a rating engine with the given TrueSkill parameters.
    pub fn new(settings: &Rating) -> Self {
        RatingEngine {
            config: TrueSkillConfig {
                draw_probability: settings.draw_probability,
                beta: settings.beta,
                default_dynamics: settings.dynamics,
            },
        }
    }

    /// Replays `matches` in chronological order and returns the score of
    /// every member.
    ///
    /// All the members of `members` are part of the result, with a score of
    /// `0.0` when they never played. Players of the history that are not
    /// members anymore are rated too, as they influence their opponents, but
    /// left out of the result.
    ///
    /// Unscored or malformed matches are skipped. The result only depends on
    /// the content of `matches`, not on their order in the slice.
    pub fn compute_ratings(
        &self,
        members: &Roster,
        matches: &[Match],
    ) -> BTreeMap<MemberKey, f64> {
        let mut history: Vec<&Match> = matches.iter().collect();
        // Stable: matches sharing an id keep their storage order
        history.sort_by(|a, b| a.id.cmp(&b.id));

        let mut skills: HashMap<MemberKey, TrueSkillRating> = HashMap::new();
        for played in history {
            self.replay(&mut skills, played);
        }

        members
            .keys()
            .map(|key| {
                let skill = skills.get(key).copied().unwrap_or_else(TrueSkillRating::new);
                (key.clone(), conservative_score(&skill))
            })
            .collect()
    }

    /// Applies the rating update of a single match.
    fn replay(&self, skills: &mut HashMap<MemberKey, TrueSkillRating>, played: &Match) {
        let Some(scores) = &played.scores else {
            debug!("skipping unscored match {}", played.id);
            return;
        };

        if let Err(reason) = check_match(&played.teams, scores) {
            warn!("skipping match {}: {}", played.id, reason);
            return;
        }

        let before: Vec<Vec<TrueSkillRating>> = played
            .teams
            .iter()
            .map(|team| {
                team.iter()
                    .map(|key| skills.get(key).copied().unwrap_or_else(TrueSkillRating::new))
                    .collect()
            })
            .collect();

        let after = match (before.as_slice(), scores.as_slice()) {
            ([team_one, team_two], [score_one, score_two]) => {
                let outcome = match score_one.cmp(score_two) {
                    std::cmp::Ordering::Greater => Outcomes::WIN,
                    std::cmp::Ordering::Less => Outcomes::LOSS,
                    std::cmp::Ordering::Equal => Outcomes::DRAW,
                };
                let (team_one, team_two) =
                    trueskill_two_teams(team_one, team_two, &outcome, &self.config);
                vec![team_one, team_two]
            }
            _ => {
                let teams_and_ranks: Vec<(&[TrueSkillRating], MultiTeamOutcome)> = before
                    .iter()
                    .zip(scores)
                    .map(|(team, score)| {
                        (team.as_slice(), MultiTeamOutcome::new(rank(scores, *score)))
                    })
                    .collect();
                trueskill_multi_team(&teams_and_ranks, &self.config)
            }
        };

        let weight = margin_weight(scores);
        debug!("rating match {} with weight {:.2}", played.id, weight);

        for ((team, team_before), team_after) in played.teams.iter().zip(&before).zip(&after) {
            for ((key, skill_before), skill_after) in team.iter().zip(team_before).zip(team_after) {
                skills.insert(key.clone(), blend(skill_before, skill_after, weight));
            }
        }
    }
}

/// Checks that a scored match can be rated.
fn check_match(teams: &[Vec<MemberKey>], scores: &[u32]) -> Result<(), String> {
    if teams.len() < 2 {
        return Err(format!("{} team(s), at least 2 expected", teams.len()));
    }
    if teams.len() != scores.len() {
        return Err(format!("{} teams but {} scores", teams.len(), scores.len()));
    }
    if teams.iter().any(|team| team.is_empty()) {
        return Err("empty team".to_owned());
    }

    let mut seen = Vec::new();
    for key in teams.iter().flatten() {
        if seen.contains(&key) {
            return Err(format!("{} plays more than once", key));
        }
        seen.push(key);
    }

    Ok(())
}

/// Rank of a team in a multi-team match, `1` being the best.
fn rank(scores: &[u32], score: u32) -> usize {
    1 + scores.iter().filter(|other| **other > score).count()
}

/// Share of the rating update applied for a match, between `0` and `1`.
fn margin_weight(scores: &[u32]) -> f64 {
    let top = scores.iter().copied().max().unwrap_or(0);
    let bottom = scores.iter().copied().min().unwrap_or(0);

    if top == bottom {
        return 1.0;
    }

    f64::from(top - bottom) / f64::from(top)
}

/// Moves a rating from `before` towards `after` by `weight`.
///
/// Both the mean and the variance are interpolated, so a weight of `1` gives
/// `after` back.
fn blend(before: &TrueSkillRating, after: &TrueSkillRating, weight: f64) -> TrueSkillRating {
    let variance_before = before.uncertainty.powi(2);
    let variance_after = after.uncertainty.powi(2);

    TrueSkillRating {
        rating: before.rating + weight * (after.rating - before.rating),
        uncertainty: (variance_before + weight * (variance_after - variance_before)).sqrt(),
    }
}

/// Skill estimate a player has a high confidence of exceeding.
fn conservative_score(skill: &TrueSkillRating) -> f64 {
    skill.rating - 3.0 * skill.uncertainty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::MatchId;

    fn members(keys: &[&str]) -> Roster {
        keys.iter()
            .map(|key| (key.to_string(), key.to_uppercase()))
            .collect()
    }

    fn scored(id: &str, teams: &[&[&str]], scores: &[u32]) -> Match {
        Match {
            id: MatchId::from(id),
            room_id: "12321".to_owned(),
            time: 0,
            teams: teams
                .iter()
                .map(|team| team.iter().map(|key| key.to_string()).collect())
                .collect(),
            scores: Some(scores.to_vec()),
        }
    }

    fn unscored(id: &str, teams: &[&[&str]]) -> Match {
        Match {
            scores: None,
            ..scored(id, teams, &[])
        }
    }

    fn engine() -> RatingEngine {
        RatingEngine::new(&Rating::default())
    }

    fn rounded(score: f64) -> String {
        format!("{:.1}", score)
    }

    #[test]
    fn test_members_without_matches_score_zero() {
        let ratings = engine().compute_ratings(&members(&["a", "b"]), &[]);

        assert_eq!(ratings.len(), 2);
        assert!(ratings["a"].abs() < 1e-9);
        assert!(ratings["b"].abs() < 1e-9);
    }

    #[test]
    fn test_two_shutouts() {
        let matches = vec![
            scored("match#1", &[&["<xss>"], &["a"]], &[10, 0]),
            scored("match#1", &[&["<xss>"], &["a"]], &[10, 0]),
            unscored("match#2", &[&["<xss>"], &["a"]]),
        ];

        let ratings = engine().compute_ratings(&members(&["<xss>", "a", "b"]), &matches);

        assert_eq!(rounded(ratings["<xss>"]), "11.7");
        assert_eq!(rounded(ratings["a"]), "-0.8");
        assert!(ratings["b"].abs() < 1e-9);
    }

    #[test]
    fn test_unscored_matches_are_ignored() {
        let scored_only = vec![
            scored("match#1", &[&["x"], &["a"]], &[10, 0]),
            scored("match#3", &[&["a"], &["x"]], &[10, 6]),
        ];
        let mut with_unscored = scored_only.clone();
        with_unscored.insert(1, unscored("match#2", &[&["x"], &["a"]]));

        let members = members(&["x", "a"]);
        assert_eq!(
            engine().compute_ratings(&members, &scored_only),
            engine().compute_ratings(&members, &with_unscored)
        );
    }

    #[test]
    fn test_repeated_result_has_diminishing_returns() {
        let members = members(&["x", "a"]);
        let first = scored("match#1", &[&["x"], &["a"]], &[10, 0]);
        let second = scored("match#2", &[&["x"], &["a"]], &[10, 0]);

        let once = engine().compute_ratings(&members, &[first.clone()]);
        let twice = engine().compute_ratings(&members, &[first, second]);

        let first_gain = once["x"];
        let second_gain = twice["x"] - once["x"];
        assert!(first_gain > 0.0);
        assert!(second_gain > 0.0);
        assert!(second_gain < first_gain);

        let first_move = once["a"].abs();
        let second_move = (twice["a"] - once["a"]).abs();
        assert!(second_move < first_move);
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let members = members(&["x", "a"]);
        let history = vec![
            scored("match#1", &[&["x"], &["a"]], &[10, 0]),
            scored("match#2", &[&["x"], &["a"]], &[10, 0]),
        ];
        let before = engine().compute_ratings(&members, &history);

        let mut expected = history.clone();
        expected.push(scored("match#3", &[&["x"], &["a"]], &[10, 0]));
        let mut upset = history;
        upset.push(scored("match#3", &[&["a"], &["x"]], &[10, 0]));

        let expected = engine().compute_ratings(&members, &expected);
        let upset = engine().compute_ratings(&members, &upset);

        let expected_change = (expected["x"] - before["x"]).abs();
        let upset_change = (upset["x"] - before["x"]).abs();
        assert!(upset_change > expected_change);
    }

    #[test]
    fn test_narrow_win_counts_less_than_shutout() {
        let members = members(&["x", "a"]);
        let shutout = engine().compute_ratings(&members, &[scored("m", &[&["x"], &["a"]], &[10, 0])]);
        let narrow = engine().compute_ratings(&members, &[scored("m", &[&["x"], &["a"]], &[10, 9])]);

        assert!(narrow["x"] > 0.0);
        assert!(narrow["x"] < shutout["x"]);
    }

    #[test]
    fn test_matches_are_replayed_by_id() {
        let members = members(&["x", "a"]);
        let in_order = vec![
            scored("2024-01-01T10:00:00.000Z#0000", &[&["x"], &["a"]], &[10, 0]),
            scored("2024-01-02T10:00:00.000Z#0000", &[&["a"], &["x"]], &[10, 3]),
        ];
        let reversed: Vec<Match> = in_order.iter().rev().cloned().collect();

        assert_eq!(
            engine().compute_ratings(&members, &in_order),
            engine().compute_ratings(&members, &reversed)
        );
    }

    #[test]
    fn test_computation_is_deterministic() {
        let members = members(&["x", "y", "a", "b"]);
        let history = vec![
            scored("match#1", &[&["x", "y"], &["a", "b"]], &[10, 7]),
            scored("match#2", &[&["x", "a"], &["y", "b"]], &[5, 10]),
            scored("match#3", &[&["x", "b"], &["y", "a"]], &[8, 8]),
        ];

        assert_eq!(
            engine().compute_ratings(&members, &history),
            engine().compute_ratings(&members, &history)
        );
    }

    #[test]
    fn test_doubles_winners_gain_and_losers_lose() {
        let members = members(&["x", "y", "a", "b"]);
        let ratings = engine().compute_ratings(
            &members,
            &[scored("match#1", &[&["x", "y"], &["a", "b"]], &[10, 2])],
        );

        assert!(ratings["x"] > ratings["a"]);
        assert!(ratings["y"] > ratings["b"]);
        assert!((ratings["x"] - ratings["y"]).abs() < 1e-9);
    }

    #[test]
    fn test_three_teams_are_ranked_by_score() {
        let members = members(&["x", "y", "z"]);
        let ratings = engine().compute_ratings(
            &members,
            &[scored("match#1", &[&["z"], &["x"], &["y"]], &[3, 10, 6])],
        );

        assert!(ratings["x"] > ratings["y"]);
        assert!(ratings["y"] > ratings["z"]);
    }

    #[test]
    fn test_malformed_matches_are_skipped() {
        let members = members(&["x", "a"]);
        let history = vec![
            scored("match#1", &[&["x"], &["a"]], &[10]),
            scored("match#2", &[&["x"]], &[10]),
            scored("match#3", &[&["x"], &[]], &[10, 0]),
            scored("match#4", &[&["x"], &["x"]], &[10, 0]),
        ];

        let ratings = engine().compute_ratings(&members, &history);
        assert!(ratings["x"].abs() < 1e-9);
        assert!(ratings["a"].abs() < 1e-9);
    }

    #[test]
    fn test_former_players_are_not_listed() {
        let ratings = engine().compute_ratings(
            &members(&["x"]),
            &[scored("match#1", &[&["x"], &["gone"]], &[10, 0])],
        );

        assert_eq!(ratings.len(), 1);
        assert!(ratings["x"] > 0.0);
    }

    #[test]
    fn test_margin_weight() {
        assert_eq!(margin_weight(&[10, 0]), 1.0);
        assert_eq!(margin_weight(&[4, 10]), 0.6);
        assert_eq!(margin_weight(&[5, 5]), 1.0);
        assert_eq!(margin_weight(&[0, 0]), 1.0);
    }

    #[test]
    fn test_rank() {
        assert_eq!(rank(&[3, 10, 6], 10), 1);
        assert_eq!(rank(&[3, 10, 6], 6), 2);
        assert_eq!(rank(&[3, 10, 6], 3), 3);
        assert_eq!(rank(&[10, 10, 6], 10), 1);
    }

    #[test]
    fn test_blend_full_weight_gives_update() {
        let before = TrueSkillRating::new();
        let after = TrueSkillRating {
            rating: 29.0,
            uncertainty: 7.0,
        };

        let blended = blend(&before, &after, 1.0);
        assert!((blended.rating - 29.0).abs() < 1e-9);
        assert!((blended.uncertainty - 7.0).abs() < 1e-9);

        let untouched = blend(&before, &after, 0.0);
        assert!((untouched.rating - before.rating).abs() < 1e-9);
        assert!((untouched.uncertainty - before.uncertainty).abs() < 1e-9);
    }
}
