//! Song catalog repository

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{NewSong, SongRow};

type SongTuple = (
    String,
    String,
    String,
    String,
    String,
    String,
    i64,
    i64,
    i64,
    i64,
    i64,
    i64,
);

const SONG_COLUMNS: &str = "song_hash, title, artist, album, charters, source, \
     diff_guitar, diff_bass, diff_drums, diff_vocals, song_length, created_at";

fn map_song(row: SongTuple) -> SongRow {
    let (
        song_hash,
        title,
        artist,
        album,
        charters,
        source,
        diff_guitar,
        diff_bass,
        diff_drums,
        diff_vocals,
        song_length,
        created_at,
    ) = row;
    SongRow {
        song_hash,
        title,
        artist,
        album,
        charters,
        source,
        diff_guitar,
        diff_bass,
        diff_drums,
        diff_vocals,
        song_length,
        created_at,
    }
}

/// Create a song. A duplicate hash surfaces as `Conflict`.
pub async fn create(
    pool: &SqlitePool,
    song_hash: &str,
    song: &NewSong,
) -> Result<SongRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO songs (song_hash, title, artist, album, charters, source, \
         diff_guitar, diff_bass, diff_drums, diff_vocals, song_length, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(song_hash)
    .bind(&song.title)
    .bind(&song.artist)
    .bind(&song.album)
    .bind(&song.charters)
    .bind(&song.source)
    .bind(song.diff_guitar)
    .bind(song.diff_bass)
    .bind(song.diff_drums)
    .bind(song.diff_vocals)
    .bind(song.song_length)
    .bind(now)
    .execute(pool)
    .await
    .map_err(SqliteError::from_query)?;

    Ok(SongRow {
        song_hash: song_hash.to_string(),
        title: song.title.clone(),
        artist: song.artist.clone(),
        album: song.album.clone(),
        charters: song.charters.clone(),
        source: song.source.clone(),
        diff_guitar: song.diff_guitar,
        diff_bass: song.diff_bass,
        diff_drums: song.diff_drums,
        diff_vocals: song.diff_vocals,
        song_length: song.song_length,
        created_at: now,
    })
}

/// Check whether a song exists
pub async fn exists(pool: &SqlitePool, song_hash: &str) -> Result<bool, SqliteError> {
    let found: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM songs WHERE song_hash = ?")
        .bind(song_hash)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

/// Get a song by hash
pub async fn get(pool: &SqlitePool, song_hash: &str) -> Result<Option<SongRow>, SqliteError> {
    let row = sqlx::query_as::<_, SongTuple>(&format!(
        "SELECT {} FROM songs WHERE song_hash = ?",
        SONG_COLUMNS
    ))
    .bind(song_hash)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_song))
}

/// Snapshot of the whole catalog (for the external search collaborator)
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<SongRow>, SqliteError> {
    let rows = sqlx::query_as::<_, SongTuple>(&format!(
        "SELECT {} FROM songs ORDER BY title COLLATE NOCASE ASC",
        SONG_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(map_song).collect())
}
