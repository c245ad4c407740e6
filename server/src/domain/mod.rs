//! Domain services

pub mod leaderboard;

pub use leaderboard::{LeaderboardError, LeaderboardPage, LeaderboardService, RankedScore};
