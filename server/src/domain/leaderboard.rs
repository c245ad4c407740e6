//! Leaderboard domain service
//!
//! Orchestrates identity, blacklist, denylist, and song-existence policies on
//! top of the repositories, and computes absolute positions. Transport layers
//! (HTTP, the Discord bot) stay thin: they map this service's errors to their
//! own wire shapes.

use std::sync::Arc;

use sqlx::SqlitePool;
use thiserror::Error;

use crate::core::constants::LEADERBOARD_PAGE_SIZE;
use crate::core::denylist::Denylist;
use crate::data::SqliteService;
use crate::data::sqlite::SqliteError;
use crate::data::sqlite::repositories::{score, song, user};
use crate::data::types::{NewScore, NewSong, ScoreWithSubmitter, SongRow, UserRow};
use crate::utils::auth_key;

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Authorization header is required")]
    MissingCredential,

    #[error("Unknown auth key")]
    InvalidCredential,

    #[error("User is blacklisted")]
    Blacklisted,

    #[error("Song hash is denylisted")]
    Denylisted,

    #[error("Song not found")]
    SongNotFound,

    #[error("No score on this leaderboard")]
    ScoreNotFound,

    #[error("Song already exists")]
    SongExists,

    #[error("Storage error: {0}")]
    Storage(#[from] SqliteError),
}

/// One ranked entry with its absolute 1-based position
#[derive(Debug, Clone)]
pub struct RankedScore {
    pub position: u64,
    pub entry: ScoreWithSubmitter,
}

/// One page of a (song, instrument) leaderboard
#[derive(Debug, Clone)]
pub struct LeaderboardPage {
    pub entries: Vec<RankedScore>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_scores: u64,
}

pub struct LeaderboardService {
    database: Arc<SqliteService>,
    denylist: Arc<Denylist>,
}

impl LeaderboardService {
    pub fn new(database: Arc<SqliteService>, denylist: Arc<Denylist>) -> Self {
        Self { database, denylist }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        self.database.pool()
    }

    /// Resolve a bearer credential to a user.
    ///
    /// An absent or malformed header is a request-shape problem
    /// (`MissingCredential`); a well-formed key that resolves to no user is
    /// `InvalidCredential`. Blacklist is enforced per operation, not here,
    /// because song creation accepts blacklisted users.
    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<UserRow, LeaderboardError> {
        let header = authorization.ok_or(LeaderboardError::MissingCredential)?;
        let key = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or(LeaderboardError::MissingCredential)?;

        if !auth_key::is_valid_key(key) {
            return Err(LeaderboardError::InvalidCredential);
        }

        user::by_auth_key(self.pool(), key)
            .await?
            .ok_or(LeaderboardError::InvalidCredential)
    }

    /// Create-or-refetch a user for a Discord identity.
    ///
    /// The first call issues an auth key; every later call returns the same
    /// record, so a user can always re-fetch their key.
    pub async fn register_user(
        &self,
        discord_id: &str,
        username: &str,
        display_name: &str,
    ) -> Result<UserRow, LeaderboardError> {
        if let Some(existing) = user::by_discord_id(self.pool(), discord_id).await? {
            return Ok(existing);
        }

        let key = auth_key::generate_key();
        match user::create(self.pool(), discord_id, username, display_name, &key).await {
            Ok(created) => {
                tracing::info!(discord_id, "Registered new user");
                Ok(created)
            }
            // Concurrent registration for the same identity: the winner's
            // record is the canonical one
            Err(e) if e.is_conflict() => user::by_discord_id(self.pool(), discord_id)
                .await?
                .ok_or(LeaderboardError::Storage(e)),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn user_by_discord_id(
        &self,
        discord_id: &str,
    ) -> Result<Option<UserRow>, LeaderboardError> {
        Ok(user::by_discord_id(self.pool(), discord_id).await?)
    }

    pub async fn user_by_user_id(&self, user_id: i64) -> Result<Option<UserRow>, LeaderboardError> {
        Ok(user::by_user_id(self.pool(), user_id).await?)
    }

    /// Submit a run, replacing any previous score in the same slot.
    pub async fn submit_score(
        &self,
        submitter: &UserRow,
        song_hash: &str,
        run: NewScore,
    ) -> Result<(), LeaderboardError> {
        // Denylist first so barred hashes leak nothing about catalog state
        if self.denylist.contains(song_hash) {
            return Err(LeaderboardError::Denylisted);
        }
        if submitter.blacklisted {
            return Err(LeaderboardError::Blacklisted);
        }
        if !song::exists(self.pool(), song_hash).await? {
            return Err(LeaderboardError::SongNotFound);
        }

        let stored = score::replace(self.pool(), submitter.user_id, song_hash, &run).await?;
        tracing::debug!(
            user_id = submitter.user_id,
            song_hash,
            instrument = %run.instrument,
            score = run.score,
            playthrough_id = %stored.playthrough_id,
            "Score submitted"
        );
        Ok(())
    }

    /// Create a song entry. The submitter's identity must resolve, but
    /// blacklisted users may still contribute catalog metadata.
    pub async fn create_song(
        &self,
        song_hash: &str,
        song: NewSong,
    ) -> Result<SongRow, LeaderboardError> {
        if self.denylist.contains(song_hash) {
            return Err(LeaderboardError::Denylisted);
        }

        match song::create(self.pool(), song_hash, &song).await {
            Ok(created) => {
                tracing::info!(song_hash, title = %created.title, "Song created");
                Ok(created)
            }
            Err(e) if e.is_conflict() => Err(LeaderboardError::SongExists),
            Err(e) => Err(e.into()),
        }
    }

    /// One page of the ranked standings for a (song, instrument) board.
    ///
    /// Pages are 1-based and fixed-size; a page past the end yields an empty
    /// entry list with the real totals. An unknown song is `SongNotFound`.
    pub async fn ranked_page(
        &self,
        song_hash: &str,
        instrument: &str,
        page: u32,
    ) -> Result<LeaderboardPage, LeaderboardError> {
        if !song::exists(self.pool(), song_hash).await? {
            return Err(LeaderboardError::SongNotFound);
        }

        let total_scores = score::count(self.pool(), song_hash, instrument).await? as u64;
        let total_pages = total_scores.div_ceil(LEADERBOARD_PAGE_SIZE as u64);

        let offset = (page as u64 - 1) * LEADERBOARD_PAGE_SIZE as u64;
        let rows = score::list_ranked(
            self.pool(),
            song_hash,
            instrument,
            LEADERBOARD_PAGE_SIZE as i64,
            offset as i64,
        )
        .await?;

        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedScore {
                position: offset + i as u64 + 1,
                entry,
            })
            .collect();

        Ok(LeaderboardPage {
            entries,
            current_page: page,
            total_pages,
            total_scores,
        })
    }

    /// A user's own ranked entry on one board; absent means no score there.
    pub async fn own_rank(
        &self,
        requester: &UserRow,
        song_hash: &str,
        instrument: &str,
    ) -> Result<RankedScore, LeaderboardError> {
        if requester.blacklisted {
            return Err(LeaderboardError::Blacklisted);
        }

        match score::find_rank(self.pool(), requester.user_id, song_hash, instrument).await? {
            Some((position, entry)) => Ok(RankedScore { position, entry }),
            None => Err(LeaderboardError::ScoreNotFound),
        }
    }

    /// Remove a user's score from one board (moderation surface). Idempotent.
    pub async fn remove_score(
        &self,
        user_id: i64,
        song_hash: &str,
        instrument: &str,
    ) -> Result<bool, LeaderboardError> {
        Ok(score::remove(self.pool(), user_id, song_hash, instrument).await?)
    }

    /// Catalog snapshot for the external search collaborator
    pub async fn song_snapshot(&self) -> Result<Vec<SongRow>, LeaderboardError> {
        Ok(song::get_all(self.pool()).await?)
    }
}
