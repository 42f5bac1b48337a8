//! Per-team opponent index derived from the game store

use crate::data::GameStore;
use crate::TeamName;
use std::collections::BTreeMap;

/// Outcome of one game from a specific team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// Every opponent a team has faced, with the outcome of each meeting.
///
/// A derived view, rebuilt from the store on demand. Multiple meetings
/// with the same opponent are all kept: "ever beat them" and "ever lost
/// to them" are independent questions, and collapsing to a single
/// outcome would answer both with whichever game happened to be last.
#[derive(Debug, Clone)]
pub struct OpponentIndex {
    team: TeamName,
    outcomes: BTreeMap<TeamName, Vec<GameOutcome>>,
}

impl OpponentIndex {
    /// Build the index for one team by scanning its games
    pub fn for_team(store: &GameStore, team: &TeamName) -> Self {
        let mut outcomes: BTreeMap<TeamName, Vec<GameOutcome>> = BTreeMap::new();

        for game in store.games_involving(team) {
            let opponent = match game.opponent_of(team) {
                Some(o) => o.clone(),
                None => continue,
            };
            let outcome = if game.won_by(team) == Some(true) {
                GameOutcome::Won
            } else {
                GameOutcome::Lost
            };
            outcomes.entry(opponent).or_default().push(outcome);
        }

        OpponentIndex {
            team: team.clone(),
            outcomes,
        }
    }

    pub fn team(&self) -> &TeamName {
        &self.team
    }

    /// Opponents faced, in name order
    pub fn opponents(&self) -> impl Iterator<Item = &TeamName> {
        self.outcomes.keys()
    }

    pub fn opponent_count(&self) -> usize {
        self.outcomes.len()
    }

    /// All recorded outcomes against one opponent, date ascending
    pub fn outcomes_against(&self, opponent: &TeamName) -> &[GameOutcome] {
        self.outcomes
            .get(opponent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Did this team win any meeting with the opponent?
    pub fn ever_beat(&self, opponent: &TeamName) -> bool {
        self.outcomes_against(opponent)
            .iter()
            .any(|o| *o == GameOutcome::Won)
    }

    /// Did this team lose any meeting with the opponent?
    pub fn ever_lost_to(&self, opponent: &TeamName) -> bool {
        self.outcomes_against(opponent)
            .iter()
            .any(|o| *o == GameOutcome::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;
    use chrono::NaiveDate;

    fn game(day: u32, winner: &str, loser: &str) -> Game {
        Game {
            date: NaiveDate::from_ymd_opt(2023, 9, day).unwrap(),
            week: "1".to_string(),
            winner: TeamName::from(winner),
            loser: TeamName::from(loser),
            winner_pts: 20,
            loser_pts: 10,
        }
    }

    #[test]
    fn test_outcomes_per_opponent() {
        let store = GameStore::from_games(vec![
            game(10, "Giants", "Cowboys"),
            game(17, "Eagles", "Giants"),
            game(24, "Cowboys", "Giants"),
        ]);

        let index = OpponentIndex::for_team(&store, &TeamName::from("Giants"));
        assert_eq!(index.opponent_count(), 2);
        assert_eq!(
            index.outcomes_against(&TeamName::from("Cowboys")),
            &[GameOutcome::Won, GameOutcome::Lost]
        );
        assert_eq!(
            index.outcomes_against(&TeamName::from("Eagles")),
            &[GameOutcome::Lost]
        );
        assert!(index.outcomes_against(&TeamName::from("Jets")).is_empty());
    }

    #[test]
    fn test_split_series_answers_both_predicates() {
        let store = GameStore::from_games(vec![
            game(10, "Giants", "Cowboys"),
            game(24, "Cowboys", "Giants"),
        ]);

        let index = OpponentIndex::for_team(&store, &TeamName::from("Giants"));
        let cowboys = TeamName::from("Cowboys");
        assert!(index.ever_beat(&cowboys));
        assert!(index.ever_lost_to(&cowboys));
    }

    #[test]
    fn test_unknown_team_has_empty_index() {
        let store = GameStore::from_games(vec![game(10, "Giants", "Cowboys")]);
        let index = OpponentIndex::for_team(&store, &TeamName::from("Jets"));
        assert_eq!(index.opponent_count(), 0);
        assert!(!index.ever_beat(&TeamName::from("Giants")));
    }
}
