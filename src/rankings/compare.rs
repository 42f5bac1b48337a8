//! Pairwise team comparison over shared opponents

use crate::data::GameStore;
use crate::rankings::opponents::OpponentIndex;
use crate::TeamName;
use serde::Serialize;

/// How both sides fared against one shared opponent
#[derive(Debug, Clone, Serialize)]
pub struct OpponentVerdict {
    pub opponent: TeamName,
    /// True iff team1 won any meeting with this opponent
    pub team1_beat: bool,
    /// True iff team2 won any meeting with this opponent
    pub team2_beat: bool,
}

impl OpponentVerdict {
    /// Points awarded to (team1, team2) for this opponent
    pub fn points(&self) -> (u32, u32) {
        match (self.team1_beat, self.team2_beat) {
            (true, false) => (1, 0),
            (false, true) => (0, 1),
            _ => (0, 0),
        }
    }
}

/// Result of comparing two teams on common-opponent record
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub team1: TeamName,
    pub team2: TeamName,
    pub points1: u32,
    pub points2: u32,
    /// Per-opponent verdicts, sorted by opponent name
    pub shared: Vec<OpponentVerdict>,
}

impl Comparison {
    pub fn shared_opponent_count(&self) -> usize {
        self.shared.len()
    }

    /// Team with the higher point total, or None on a tie
    pub fn predicted_winner(&self) -> Option<&TeamName> {
        match self.points1.cmp(&self.points2) {
            std::cmp::Ordering::Greater => Some(&self.team1),
            std::cmp::Ordering::Less => Some(&self.team2),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Swap the two sides (points and verdicts follow)
    pub fn flipped(self) -> Comparison {
        Comparison {
            team1: self.team2,
            team2: self.team1,
            points1: self.points2,
            points2: self.points1,
            shared: self
                .shared
                .into_iter()
                .map(|v| OpponentVerdict {
                    opponent: v.opponent,
                    team1_beat: v.team2_beat,
                    team2_beat: v.team1_beat,
                })
                .collect(),
        }
    }
}

/// Compare two teams on results against their shared opponents.
///
/// One point goes to the side that beat a shared opponent the other side
/// never beat. Both-beat, neither-beat, and split-both-ways award
/// nothing. Pure function of the store; comparing a team with itself is
/// the caller's bug and is rejected by the aggregator.
pub fn compare(store: &GameStore, team1: &TeamName, team2: &TeamName) -> Comparison {
    let index1 = OpponentIndex::for_team(store, team1);
    let index2 = OpponentIndex::for_team(store, team2);
    compare_indexed(&index1, &index2)
}

/// Comparison from prebuilt indexes; the aggregator builds each team's
/// index once instead of twice per pair.
pub(crate) fn compare_indexed(index1: &OpponentIndex, index2: &OpponentIndex) -> Comparison {
    let team1 = index1.team();
    let team2 = index2.team();

    let mut shared = Vec::new();
    let mut points1 = 0;
    let mut points2 = 0;

    // BTreeMap keys come out sorted, so the verdict list is already in
    // lexicographic opponent order.
    for opponent in index1.opponents() {
        if opponent == team1 || opponent == team2 {
            // A team listed as its own opponent is a feed quirk; never
            // count the compared teams as shared opponents.
            continue;
        }
        if index2.outcomes_against(opponent).is_empty() {
            continue;
        }

        let verdict = OpponentVerdict {
            opponent: opponent.clone(),
            team1_beat: index1.ever_beat(opponent),
            team2_beat: index2.ever_beat(opponent),
        };
        let (p1, p2) = verdict.points();
        points1 += p1;
        points2 += p2;
        shared.push(verdict);
    }

    Comparison {
        team1: team1.clone(),
        team2: team2.clone(),
        points1,
        points2,
        shared,
    }
}
