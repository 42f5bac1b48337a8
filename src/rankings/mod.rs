//! Common-opponent comparative ranking
//!
//! Scores team pairs on their results against shared opponents and
//! aggregates the pairwise points into a global ranking.

pub mod aggregate;
pub mod compare;
pub mod opponents;

pub use aggregate::{rank_all, TeamStanding};
pub use compare::{compare, Comparison};
pub use opponents::OpponentIndex;
