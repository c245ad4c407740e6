//! Request and response types for leaderboard endpoints
//!
//! Response field names are load-bearing: existing game-mod clients parse
//! them, so they must not change.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::types::{validate_instrument, validate_page};
use crate::core::constants::MAX_SONG_TEXT_LENGTH;
use crate::data::types::{NewScore, NewSong};
use crate::domain::{LeaderboardPage, RankedScore};

// =============================================================================
// Query parameters
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct LeaderboardQuery {
    #[validate(custom(function = "validate_instrument"))]
    pub instrument: String,

    #[validate(custom(function = "validate_page"))]
    pub page: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OwnScoreQuery {
    #[validate(custom(function = "validate_instrument"))]
    pub instrument: String,
}

// =============================================================================
// Request bodies
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitScoreRequest {
    #[validate(custom(function = "validate_instrument"))]
    pub instrument: String,

    #[validate(range(min = 0))]
    pub score: i64,

    #[validate(range(min = 0))]
    pub note_count: i64,

    #[validate(range(min = 0))]
    pub notes_hit_perfect: i64,

    #[validate(range(min = 0))]
    pub notes_hit_good: i64,

    #[validate(range(min = 0))]
    pub misses: i64,

    #[validate(range(min = 0))]
    pub strikes: i64,

    #[validate(range(min = 0))]
    pub difficulty: i64,
}

impl SubmitScoreRequest {
    pub fn into_new_score(self) -> NewScore {
        NewScore {
            instrument: self.instrument,
            score: self.score,
            note_count: self.note_count,
            notes_hit_perfect: self.notes_hit_perfect,
            notes_hit_good: self.notes_hit_good,
            misses: self.misses,
            strikes: self.strikes,
            difficulty: self.difficulty,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSongRequest {
    #[validate(length(min = 1, max = MAX_SONG_TEXT_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_SONG_TEXT_LENGTH))]
    pub artist: String,

    #[validate(length(max = MAX_SONG_TEXT_LENGTH))]
    pub album: String,

    #[validate(length(max = MAX_SONG_TEXT_LENGTH))]
    pub charters: String,

    #[validate(length(max = MAX_SONG_TEXT_LENGTH))]
    pub source: String,

    /// -1 means the instrument is not charted
    #[validate(range(min = -1))]
    pub diff_guitar: i64,

    #[validate(range(min = -1))]
    pub diff_bass: i64,

    #[validate(range(min = -1))]
    pub diff_drums: i64,

    #[validate(range(min = -1))]
    pub diff_vocals: i64,

    /// Song length in seconds
    #[validate(range(min = 0))]
    pub song_length: i64,
}

impl CreateSongRequest {
    pub fn into_new_song(self) -> NewSong {
        NewSong {
            title: self.title,
            artist: self.artist,
            album: self.album,
            charters: self.charters,
            source: self.source,
            diff_guitar: self.diff_guitar,
            diff_bass: self.diff_bass,
            diff_drums: self.diff_drums,
            diff_vocals: self.diff_vocals,
            song_length: self.song_length,
        }
    }
}

// =============================================================================
// Response bodies
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SubmitterDto {
    pub display_name: String,
    pub username: String,
    pub discord_id: String,
}

#[derive(Debug, Serialize)]
pub struct RunDto {
    pub uuid: String,
    pub score: i64,
    pub note_count: i64,
    pub notes_hit_perfect: i64,
    pub notes_hit_good: i64,
    pub misses: i64,
    pub strikes: i64,
    pub instrument: String,
    pub difficulty: i64,
}

#[derive(Debug, Serialize)]
pub struct PositionDto {
    pub position: u64,
}

#[derive(Debug, Serialize)]
pub struct ScoreEntryDto {
    pub submitter: SubmitterDto,
    pub run: RunDto,
    pub leaderboard: PositionDto,
}

impl From<RankedScore> for ScoreEntryDto {
    fn from(ranked: RankedScore) -> Self {
        let entry = ranked.entry;
        Self {
            submitter: SubmitterDto {
                display_name: entry.display_name,
                username: entry.username,
                discord_id: entry.discord_id,
            },
            run: RunDto {
                uuid: entry.run.playthrough_id,
                score: entry.run.score,
                note_count: entry.run.note_count,
                notes_hit_perfect: entry.run.notes_hit_perfect,
                notes_hit_good: entry.run.notes_hit_good,
                misses: entry.run.misses,
                strikes: entry.run.strikes,
                instrument: entry.run.instrument,
                difficulty: entry.run.difficulty,
            },
            leaderboard: PositionDto {
                position: ranked.position,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardContextDto {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_scores: u64,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub scores: Vec<ScoreEntryDto>,
    pub context: LeaderboardContextDto,
}

impl From<LeaderboardPage> for LeaderboardResponse {
    fn from(page: LeaderboardPage) -> Self {
        Self {
            context: LeaderboardContextDto {
                current_page: page.current_page,
                total_pages: page.total_pages,
                total_scores: page.total_scores,
            },
            scores: page.entries.into_iter().map(ScoreEntryDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}
