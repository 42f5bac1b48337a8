//! Fixed-length win/loss history windows

use crate::data::GameStore;
use crate::{NflError, Result, TeamName};
use chrono::NaiveDate;

/// Build a team's win/loss vector from its last `size` games strictly
/// before `as_of`, oldest first (1.0 = win, 0.0 = loss).
///
/// Returns `None` when fewer than `size` qualifying games exist; a short
/// window is never padded, the sample is simply unavailable.
pub fn history_window(
    store: &GameStore,
    team: &TeamName,
    as_of: NaiveDate,
    size: usize,
) -> Option<Vec<f32>> {
    let prior: Vec<_> = store
        .games_involving(team)
        .into_iter()
        .filter(|g| g.date < as_of)
        .collect();

    if prior.len() < size {
        return None;
    }

    Some(
        prior[prior.len() - size..]
            .iter()
            .map(|g| if g.won_by(team) == Some(true) { 1.0 } else { 0.0 })
            .collect(),
    )
}

/// Like [`history_window`], but for callers that demand the window:
/// short history is an `InsufficientHistory` error reporting how many
/// qualifying games the team actually has.
pub fn require_history_window(
    store: &GameStore,
    team: &TeamName,
    as_of: NaiveDate,
    size: usize,
) -> Result<Vec<f32>> {
    history_window(store, team, as_of, size).ok_or_else(|| {
        let games = store
            .games_involving(team)
            .into_iter()
            .filter(|g| g.date < as_of)
            .count();
        NflError::InsufficientHistory {
            team: team.to_string(),
            games,
            required: size,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Game;

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

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 9, day).unwrap()
    }

    fn store() -> GameStore {
        GameStore::from_games(vec![
            game(10, "Giants", "Cowboys"),
            game(17, "Eagles", "Giants"),
        ])
    }

    #[test]
    fn test_window_oldest_first() {
        let window = history_window(&store(), &TeamName::from("Giants"), date(24), 2);
        // Won on the 10th, lost on the 17th.
        assert_eq!(window, Some(vec![1.0, 0.0]));
    }

    #[test]
    fn test_insufficient_history_is_none() {
        let window = history_window(&store(), &TeamName::from("Giants"), date(17), 5);
        assert_eq!(window, None);
    }

    #[test]
    fn test_as_of_date_is_exclusive() {
        // The game on the 17th must not count toward a window dated the 17th.
        let window = history_window(&store(), &TeamName::from("Giants"), date(17), 2);
        assert_eq!(window, None);
        let window = history_window(&store(), &TeamName::from("Giants"), date(17), 1);
        assert_eq!(window, Some(vec![1.0]));
    }

    #[test]
    fn test_window_takes_most_recent_games() {
        let store = GameStore::from_games(vec![
            game(3, "Giants", "Jets"),
            game(10, "Giants", "Cowboys"),
            game(17, "Eagles", "Giants"),
        ]);
        let window = history_window(&store, &TeamName::from("Giants"), date(24), 2);
        assert_eq!(window, Some(vec![1.0, 0.0]));
    }

    #[test]
    fn test_require_window_reports_available_history() {
        let err = require_history_window(&store(), &TeamName::from("Giants"), date(24), 5)
            .unwrap_err();
        match err {
            crate::NflError::InsufficientHistory {
                team,
                games,
                required,
            } => {
                assert_eq!(team, "Giants");
                assert_eq!(games, 2);
                assert_eq!(required, 5);
            }
            other => panic!("unexpected error: {}", other),
        }

        let window =
            require_history_window(&store(), &TeamName::from("Giants"), date(24), 2).unwrap();
        assert_eq!(window, vec![1.0, 0.0]);
    }

    #[test]
    fn test_unknown_team_has_no_window() {
        let window = history_window(&store(), &TeamName::from("Jets"), date(24), 1);
        assert_eq!(window, None);
    }
}
