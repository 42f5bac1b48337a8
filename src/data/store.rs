//! In-memory store of completed games, loaded from the CSV result feed

use crate::{Game, NflError, Result, TeamName};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

/// Columns a feed must carry. Extra columns (yards, turnovers) are ignored.
const REQUIRED_COLUMNS: [&str; 6] = ["date", "week", "winner", "loser", "winner_pts", "loser_pts"];

/// An immutable table of completed games, held for the lifetime of a run.
///
/// Games are sorted by date ascending at load time; every query returns
/// results in that order.
#[derive(Debug, Clone)]
pub struct GameStore {
    games: Vec<Game>,
}

impl GameStore {
    /// Load the feed from a CSV file.
    ///
    /// Fails with `DataUnavailable` if the file is missing, has no header,
    /// lacks a required column, or contains an unparsable date. Dates are
    /// accepted as `YYYY-MM-DD` with an optional kickoff-time suffix (the
    /// scraper stores date plus time). Rows with missing or malformed
    /// required values are dropped with a warning.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| NflError::DataUnavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Parse a feed from any reader. `source` is used in error messages.
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| NflError::DataUnavailable {
                path: source.to_string(),
                message: format!("unreadable header: {}", e),
            })?
            .clone();

        let mut columns = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for name in REQUIRED_COLUMNS {
            let idx = headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
                NflError::DataUnavailable {
                    path: source.to_string(),
                    message: format!("missing required column '{}'", name),
                }
            })?;
            columns.push(idx);
        }
        let [date_col, week_col, winner_col, loser_col, wpts_col, lpts_col] =
            [columns[0], columns[1], columns[2], columns[3], columns[4], columns[5]];

        let mut games = Vec::new();
        let mut dropped = 0usize;

        for record in rdr.records() {
            let record = record?;
            let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

            let date_str = field(date_col);
            let week = field(week_col);
            let winner = field(winner_col);
            let loser = field(loser_col);
            let winner_pts = field(wpts_col);
            let loser_pts = field(lpts_col);

            if week.is_empty() || winner.is_empty() || loser.is_empty()
                || winner_pts.is_empty() || loser_pts.is_empty()
            {
                log::warn!("Dropping row with missing fields: {:?}", record);
                dropped += 1;
                continue;
            }

            if winner == loser {
                log::warn!("Dropping row where winner equals loser: {}", winner);
                dropped += 1;
                continue;
            }

            // A garbled date means the feed itself is suspect, so abort
            // rather than silently thinning the table.
            let date = parse_feed_date(date_str).ok_or_else(|| NflError::DataUnavailable {
                path: source.to_string(),
                message: format!("unparsable date '{}'", date_str),
            })?;

            let (winner_pts, loser_pts): (u32, u32) =
                match (winner_pts.parse(), loser_pts.parse()) {
                    (Ok(w), Ok(l)) => (w, l),
                    _ => {
                        log::warn!(
                            "Dropping row with malformed scores '{}'/'{}'",
                            winner_pts,
                            loser_pts
                        );
                        dropped += 1;
                        continue;
                    }
                };

            if winner_pts < loser_pts {
                log::warn!(
                    "Dropping row where winner {} scored fewer points than loser {}",
                    winner,
                    loser
                );
                dropped += 1;
                continue;
            }

            games.push(Game {
                date,
                week: week.to_string(),
                winner: TeamName::from(winner),
                loser: TeamName::from(loser),
                winner_pts,
                loser_pts,
            });
        }

        if dropped > 0 {
            log::warn!("Dropped {} malformed rows from {}", dropped, source);
        }
        log::info!("Loaded {} games from {}", games.len(), source);

        Ok(Self::from_games(games))
    }

    /// Build a store from already-parsed games (sorts by date).
    pub fn from_games(mut games: Vec<Game>) -> Self {
        games.sort_by_key(|g| g.date);
        GameStore { games }
    }

    /// All games, date ascending
    pub fn all_games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Every team that appears in the feed, sorted by name
    pub fn teams(&self) -> Vec<TeamName> {
        let set: BTreeSet<&TeamName> = self
            .games
            .iter()
            .flat_map(|g| [&g.winner, &g.loser])
            .collect();
        set.into_iter().cloned().collect()
    }

    pub fn contains_team(&self, team: &TeamName) -> bool {
        self.games.iter().any(|g| g.involves(team))
    }

    /// Games a team played in, date ascending
    pub fn games_involving(&self, team: &TeamName) -> Vec<&Game> {
        self.games.iter().filter(|g| g.involves(team)).collect()
    }

    /// Games between two teams, regardless of which side won, date ascending
    pub fn games_between(&self, a: &TeamName, b: &TeamName) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|g| g.involves(a) && g.involves(b))
            .collect()
    }

    /// Summary counts for the status command
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            game_count: self.games.len(),
            team_count: self.teams().len(),
            earliest_game: self.games.first().map(|g| g.date),
            latest_game: self.games.last().map(|g| g.date),
        }
    }
}

/// Parse a feed date, with or without the scraper's kickoff-time suffix
fn parse_feed_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Store summary statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub game_count: usize,
    pub team_count: usize,
    pub earliest_game: Option<NaiveDate>,
    pub latest_game: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
date,week,winner,loser,winner_pts,loser_pts,yards_winner
2023-09-17,2,New York Giants,Arizona Cardinals,31,28,363
2023-09-10,1,Dallas Cowboys,New York Giants,40,0,265
2023-09-24,3,San Francisco 49ers,New York Giants,30,12,441
";

    fn store() -> GameStore {
        GameStore::from_reader(FEED.as_bytes(), "test feed").unwrap()
    }

    #[test]
    fn test_load_sorts_by_date() {
        let store = store();
        assert_eq!(store.len(), 3);
        let dates: Vec<_> = store.all_games().iter().map(|g| g.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let store = store();
        assert_eq!(store.all_games()[0].winner_pts, 40);
        assert_eq!(store.all_games()[0].week, "1");
    }

    #[test]
    fn test_missing_column_is_data_unavailable() {
        let feed = "date,week,winner,loser,winner_pts\n2023-09-10,1,A,B,20\n";
        let err = GameStore::from_reader(feed.as_bytes(), "test feed").unwrap_err();
        assert!(matches!(err, NflError::DataUnavailable { .. }));
    }

    #[test]
    fn test_unparsable_date_aborts() {
        let feed = "date,week,winner,loser,winner_pts,loser_pts\nSept 10,1,A,B,20,10\n";
        let err = GameStore::from_reader(feed.as_bytes(), "test feed").unwrap_err();
        assert!(matches!(err, NflError::DataUnavailable { .. }));
    }

    #[test]
    fn test_incomplete_rows_dropped() {
        let feed = "\
date,week,winner,loser,winner_pts,loser_pts
2023-09-10,1,A,B,20,10
2023-09-17,,A,C,21,14
2023-09-24,3,A,,28,7
2023-10-01,4,A,D,bad,7
";
        let store = GameStore::from_reader(feed.as_bytes(), "test feed").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_date_with_kickoff_time_parses() {
        let feed = "\
date,week,winner,loser,winner_pts,loser_pts
2023-09-10 13:00:00,1,A,B,20,10
";
        let store = GameStore::from_reader(feed.as_bytes(), "test feed").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.all_games()[0].date,
            NaiveDate::from_ymd_opt(2023, 9, 10).unwrap()
        );
    }

    #[test]
    fn test_winner_scoring_fewer_points_dropped() {
        let feed = "\
date,week,winner,loser,winner_pts,loser_pts
2023-09-10,1,A,B,10,20
2023-09-17,2,A,C,21,14
";
        let store = GameStore::from_reader(feed.as_bytes(), "test feed").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.all_games()[0].winner, TeamName::from("A"));
        assert_eq!(store.all_games()[0].margin(), 7);
    }

    #[test]
    fn test_winner_equals_loser_dropped() {
        let feed = "\
date,week,winner,loser,winner_pts,loser_pts
2023-09-10,1,A,A,20,10
2023-09-17,2,A,B,21,14
";
        let store = GameStore::from_reader(feed.as_bytes(), "test feed").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_file_is_data_unavailable() {
        let err = GameStore::load("no/such/feed.csv").unwrap_err();
        assert!(matches!(err, NflError::DataUnavailable { .. }));
    }

    #[test]
    fn test_teams_sorted_and_deduped() {
        let store = store();
        let teams = store.teams();
        assert_eq!(teams.len(), 4);
        assert_eq!(teams[0], TeamName::from("Arizona Cardinals"));
        assert_eq!(teams[2], TeamName::from("New York Giants"));
    }

    #[test]
    fn test_games_involving() {
        let store = store();
        let giants = TeamName::from("New York Giants");
        let games = store.games_involving(&giants);
        assert_eq!(games.len(), 3);
        // Date ascending: loss, win, loss
        assert_eq!(games[0].won_by(&giants), Some(false));
        assert_eq!(games[1].won_by(&giants), Some(true));
    }

    #[test]
    fn test_games_between_is_symmetric() {
        let store = store();
        let giants = TeamName::from("New York Giants");
        let cowboys = TeamName::from("Dallas Cowboys");
        let ab = store.games_between(&giants, &cowboys);
        let ba = store.games_between(&cowboys, &giants);
        assert_eq!(ab.len(), 1);
        assert_eq!(ab.len(), ba.len());
        assert_eq!(ab[0].date, ba[0].date);
    }

    #[test]
    fn test_stats() {
        let stats = store().stats();
        assert_eq!(stats.game_count, 3);
        assert_eq!(stats.team_count, 4);
        assert_eq!(stats.earliest_game, NaiveDate::from_ymd_opt(2023, 9, 10));
        assert_eq!(stats.latest_game, NaiveDate::from_ymd_opt(2023, 9, 24));
    }
}
