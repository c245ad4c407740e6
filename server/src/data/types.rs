//! Shared data types for the storage layer

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub user_id: i64,
    pub discord_id: String,
    pub username: String,
    pub display_name: String,
    pub auth_key: String,
    pub blacklisted: bool,
    pub created_at: i64,
}

/// A song in the catalog, keyed by chart content hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRow {
    pub song_hash: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub charters: String,
    pub source: String,
    pub diff_guitar: i64,
    pub diff_bass: i64,
    pub diff_drums: i64,
    pub diff_vocals: i64,
    pub song_length: i64,
    pub created_at: i64,
}

/// Song metadata accepted at catalog-creation time
#[derive(Debug, Clone)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub charters: String,
    pub source: String,
    pub diff_guitar: i64,
    pub diff_bass: i64,
    pub diff_drums: i64,
    pub diff_vocals: i64,
    pub song_length: i64,
}

/// A stored run for one (user, song, instrument) slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub playthrough_id: String,
    pub user_id: i64,
    pub song_hash: String,
    pub instrument: String,
    pub score: i64,
    pub note_count: i64,
    pub notes_hit_perfect: i64,
    pub notes_hit_good: i64,
    pub misses: i64,
    pub strikes: i64,
    pub difficulty: i64,
    pub submitted_at: i64,
}

/// A run submission before it is assigned a playthrough id
#[derive(Debug, Clone)]
pub struct NewScore {
    pub instrument: String,
    pub score: i64,
    pub note_count: i64,
    pub notes_hit_perfect: i64,
    pub notes_hit_good: i64,
    pub misses: i64,
    pub strikes: i64,
    pub difficulty: i64,
}

/// A score row joined with the submitter's public identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreWithSubmitter {
    pub run: ScoreRow,
    pub username: String,
    pub display_name: String,
    pub discord_id: String,
}
