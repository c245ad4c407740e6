//! Score ledger repository
//!
//! One logical slot per (user, song, instrument). Ranking order everywhere is
//! score descending, then earliest surviving submission (`row_order`), so ties
//! are stable across list and rank queries.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{NewScore, ScoreRow, ScoreWithSubmitter};

type ScoreJoinTuple = (
    String,
    i64,
    String,
    String,
    i64,
    i64,
    i64,
    i64,
    i64,
    i64,
    i64,
    i64,
    String,
    String,
    String,
);

const SCORE_JOIN_COLUMNS: &str = "s.playthrough_id, s.user_id, s.song_hash, s.instrument, \
     s.score, s.note_count, s.notes_hit_perfect, s.notes_hit_good, s.misses, s.strikes, \
     s.difficulty, s.submitted_at, u.username, u.display_name, u.discord_id";

fn map_joined(row: ScoreJoinTuple) -> ScoreWithSubmitter {
    let (
        playthrough_id,
        user_id,
        song_hash,
        instrument,
        score,
        note_count,
        notes_hit_perfect,
        notes_hit_good,
        misses,
        strikes,
        difficulty,
        submitted_at,
        username,
        display_name,
        discord_id,
    ) = row;
    ScoreWithSubmitter {
        run: ScoreRow {
            playthrough_id,
            user_id,
            song_hash,
            instrument,
            score,
            note_count,
            notes_hit_perfect,
            notes_hit_good,
            misses,
            strikes,
            difficulty,
            submitted_at,
        },
        username,
        display_name,
        discord_id,
    }
}

/// Replace the score in a (user, song, instrument) slot.
///
/// Delete + insert run inside one transaction; the unique slot index backstops
/// the invariant if two replacements race. On a unique violation the whole
/// operation is retried once, then the error is surfaced.
pub async fn replace(
    pool: &SqlitePool,
    user_id: i64,
    song_hash: &str,
    run: &NewScore,
) -> Result<ScoreRow, SqliteError> {
    match replace_once(pool, user_id, song_hash, run).await {
        Err(e) if e.is_conflict() => {
            tracing::debug!(user_id, song_hash, "Score replace raced, retrying once");
            replace_once(pool, user_id, song_hash, run).await
        }
        other => other,
    }
}

async fn replace_once(
    pool: &SqlitePool,
    user_id: i64,
    song_hash: &str,
    run: &NewScore,
) -> Result<ScoreRow, SqliteError> {
    let playthrough_id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().timestamp();

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM scores WHERE user_id = ? AND song_hash = ? AND instrument = ?")
        .bind(user_id)
        .bind(song_hash)
        .bind(&run.instrument)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO scores (playthrough_id, user_id, song_hash, instrument, score, \
         note_count, notes_hit_perfect, notes_hit_good, misses, strikes, difficulty, submitted_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&playthrough_id)
    .bind(user_id)
    .bind(song_hash)
    .bind(&run.instrument)
    .bind(run.score)
    .bind(run.note_count)
    .bind(run.notes_hit_perfect)
    .bind(run.notes_hit_good)
    .bind(run.misses)
    .bind(run.strikes)
    .bind(run.difficulty)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(SqliteError::from_query)?;

    tx.commit().await.map_err(SqliteError::from_query)?;

    Ok(ScoreRow {
        playthrough_id,
        user_id,
        song_hash: song_hash.to_string(),
        instrument: run.instrument.clone(),
        score: run.score,
        note_count: run.note_count,
        notes_hit_perfect: run.notes_hit_perfect,
        notes_hit_good: run.notes_hit_good,
        misses: run.misses,
        strikes: run.strikes,
        difficulty: run.difficulty,
        submitted_at: now,
    })
}

/// One ranking window, joined with submitter identity
pub async fn list_ranked(
    pool: &SqlitePool,
    song_hash: &str,
    instrument: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<ScoreWithSubmitter>, SqliteError> {
    let rows = sqlx::query_as::<_, ScoreJoinTuple>(&format!(
        "SELECT {} FROM scores s \
         JOIN users u ON u.user_id = s.user_id \
         WHERE s.song_hash = ? AND s.instrument = ? \
         ORDER BY s.score DESC, s.row_order ASC \
         LIMIT ? OFFSET ?",
        SCORE_JOIN_COLUMNS
    ))
    .bind(song_hash)
    .bind(instrument)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(map_joined).collect())
}

/// Number of scores on one (song, instrument) board
pub async fn count(
    pool: &SqlitePool,
    song_hash: &str,
    instrument: &str,
) -> Result<i64, SqliteError> {
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM scores WHERE song_hash = ? AND instrument = ?")
            .bind(song_hash)
            .bind(instrument)
            .fetch_one(pool)
            .await?;
    Ok(total)
}

/// Find a user's 1-based rank on one board, with the ranked row.
///
/// Uses the same ordering as `list_ranked`, so the reported position matches
/// the position the row occupies in the paginated listing.
pub async fn find_rank(
    pool: &SqlitePool,
    user_id: i64,
    song_hash: &str,
    instrument: &str,
) -> Result<Option<(u64, ScoreWithSubmitter)>, SqliteError> {
    type RankedTuple = (
        String,
        i64,
        String,
        String,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        i64,
        String,
        String,
        String,
        i64,
    );

    let row = sqlx::query_as::<_, RankedTuple>(&format!(
        "SELECT * FROM ( \
             SELECT {}, \
                    ROW_NUMBER() OVER (ORDER BY s.score DESC, s.row_order ASC) AS position \
             FROM scores s \
             JOIN users u ON u.user_id = s.user_id \
             WHERE s.song_hash = ? AND s.instrument = ? \
         ) WHERE user_id = ?",
        SCORE_JOIN_COLUMNS
    ))
    .bind(song_hash)
    .bind(instrument)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| {
        let position = r.15 as u64;
        let joined = map_joined((
            r.0, r.1, r.2, r.3, r.4, r.5, r.6, r.7, r.8, r.9, r.10, r.11, r.12, r.13, r.14,
        ));
        (position, joined)
    }))
}

/// Remove a user's score from one board. Idempotent; returns whether a row
/// was deleted.
pub async fn remove(
    pool: &SqlitePool,
    user_id: i64,
    song_hash: &str,
    instrument: &str,
) -> Result<bool, SqliteError> {
    let result =
        sqlx::query("DELETE FROM scores WHERE user_id = ? AND song_hash = ? AND instrument = ?")
            .bind(user_id)
            .bind(song_hash)
            .bind(instrument)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}
