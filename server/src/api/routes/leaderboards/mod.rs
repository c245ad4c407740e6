//! Leaderboard API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};

use crate::api::auth::{Auth, AuthState, require_auth};
use crate::api::extractors::{SongHashPath, ValidatedJson, ValidatedQuery};
use crate::api::types::ApiError;
use crate::domain::LeaderboardService;

use types::{
    CreateSongRequest, LeaderboardQuery, LeaderboardResponse, OwnScoreQuery, ScoreEntryDto,
    StatusResponse, SubmitScoreRequest,
};

/// Shared state for Leaderboard API endpoints
#[derive(Clone)]
pub struct LeaderboardsApiState {
    pub service: Arc<LeaderboardService>,
}

/// Build Leaderboard API routes
pub fn routes(service: Arc<LeaderboardService>) -> Router<()> {
    let state = LeaderboardsApiState {
        service: service.clone(),
    };
    let auth_state = AuthState { service };

    let public = Router::new().route("/{song_hash}", get(get_leaderboard));

    let authed = Router::new()
        .route("/{song_hash}/submit", post(submit_score))
        .route("/{song_hash}/create", post(create_song))
        .route("/{song_hash}/me", get(get_own_score))
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    public.merge(authed).with_state(state)
}

/// Get one ranked page of a (song, instrument) leaderboard
pub async fn get_leaderboard(
    State(state): State<LeaderboardsApiState>,
    path: SongHashPath,
    ValidatedQuery(query): ValidatedQuery<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let page = state
        .service
        .ranked_page(&path.song_hash, &query.instrument, query.page)
        .await?;

    Ok(Json(LeaderboardResponse::from(page)))
}

/// Submit a run, replacing any previous score in the same slot
pub async fn submit_score(
    State(state): State<LeaderboardsApiState>,
    auth: Auth,
    path: SongHashPath,
    ValidatedJson(body): ValidatedJson<SubmitScoreRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .service
        .submit_score(&auth.user, &path.song_hash, body.into_new_score())
        .await?;

    Ok(Json(StatusResponse::ok()))
}

/// Create a song catalog entry
pub async fn create_song(
    State(state): State<LeaderboardsApiState>,
    _auth: Auth,
    path: SongHashPath,
    ValidatedJson(body): ValidatedJson<CreateSongRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .service
        .create_song(&path.song_hash, body.into_new_song())
        .await?;

    Ok(Json(StatusResponse::ok()))
}

/// Get the authenticated user's own ranked entry on one leaderboard
pub async fn get_own_score(
    State(state): State<LeaderboardsApiState>,
    auth: Auth,
    path: SongHashPath,
    ValidatedQuery(query): ValidatedQuery<OwnScoreQuery>,
) -> Result<Json<ScoreEntryDto>, ApiError> {
    let ranked = state
        .service
        .own_rank(&auth.user, &path.song_hash, &query.instrument)
        .await?;

    Ok(Json(ScoreEntryDto::from(ranked)))
}
