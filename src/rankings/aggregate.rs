//! Global ranking built from all pairwise comparisons

use crate::data::GameStore;
use crate::rankings::compare::compare_indexed;
use crate::rankings::opponents::OpponentIndex;
use crate::TeamName;
use serde::Serialize;

/// One team's accumulated comparison results
#[derive(Debug, Clone, Serialize)]
pub struct TeamStanding {
    pub team: TeamName,
    /// Total points earned across all pairwise comparisons
    pub points: u32,
    /// Pairs this team was evaluated in, including (0,0) pairs and pairs
    /// with no shared opponents
    pub comparisons: u32,
    /// Points per comparison, the ranking key
    pub average: f64,
}

impl TeamStanding {
    fn new(team: TeamName) -> Self {
        TeamStanding {
            team,
            points: 0,
            comparisons: 0,
            average: 0.0,
        }
    }
}

/// Compare every unordered pair of teams once and rank by average points.
///
/// Ties on average break by team name ascending, so the output is fully
/// determined by the store contents.
pub fn rank_all(store: &GameStore) -> Vec<TeamStanding> {
    let teams = store.teams();

    log::info!(
        "Ranking {} teams over {} pairwise comparisons",
        teams.len(),
        teams.len() * teams.len().saturating_sub(1) / 2
    );

    // One index per team; each pairwise comparison is read-only after this.
    let indexes: Vec<OpponentIndex> = teams
        .iter()
        .map(|t| OpponentIndex::for_team(store, t))
        .collect();

    let mut standings: Vec<TeamStanding> =
        teams.into_iter().map(TeamStanding::new).collect();

    for i in 0..indexes.len() {
        for j in (i + 1)..indexes.len() {
            let result = compare_indexed(&indexes[i], &indexes[j]);
            log::debug!(
                "{} vs {}: {}-{} over {} shared opponents",
                result.team1,
                result.team2,
                result.points1,
                result.points2,
                result.shared_opponent_count()
            );
            standings[i].points += result.points1;
            standings[j].points += result.points2;
            standings[i].comparisons += 1;
            standings[j].comparisons += 1;
        }
    }

    for standing in &mut standings {
        if standing.comparisons > 0 {
            standing.average = standing.points as f64 / standing.comparisons as f64;
        }
    }

    standings.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then_with(|| a.team.cmp(&b.team))
    });

    standings
}
