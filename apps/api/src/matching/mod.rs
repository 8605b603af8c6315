// Matching engine: canonical skill keys, deadline helpers, opportunity and peer scoring, ranking.
// Pure functions over in-memory records; handlers are the only async surface.

pub mod canonical;
pub mod dates;
pub mod handlers;
pub mod match_scorer;
pub mod peer;
pub mod ranking;
