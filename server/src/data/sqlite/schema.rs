//! SQLite schema definitions
//!
//! Initial schema with all tables. No migrations needed for first version.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Users
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    discord_id TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL,
    display_name TEXT NOT NULL,
    auth_key TEXT NOT NULL UNIQUE,
    blacklisted INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

-- =============================================================================
-- 2. Songs (keyed by client-supplied chart content hash)
-- =============================================================================
CREATE TABLE IF NOT EXISTS songs (
    song_hash TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    artist TEXT NOT NULL,
    album TEXT NOT NULL,
    charters TEXT NOT NULL,
    source TEXT NOT NULL,
    diff_guitar INTEGER NOT NULL DEFAULT -1,
    diff_bass INTEGER NOT NULL DEFAULT -1,
    diff_drums INTEGER NOT NULL DEFAULT -1,
    diff_vocals INTEGER NOT NULL DEFAULT -1,
    song_length INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL
);

-- =============================================================================
-- 3. Scores (one slot per user/song/instrument)
-- =============================================================================
-- row_order is the monotonic insertion order; ties on score are broken by
-- earliest surviving submission, so it must never be reused.
CREATE TABLE IF NOT EXISTS scores (
    row_order INTEGER PRIMARY KEY AUTOINCREMENT,
    playthrough_id TEXT NOT NULL UNIQUE,
    user_id INTEGER NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    song_hash TEXT NOT NULL REFERENCES songs(song_hash) ON DELETE CASCADE,
    instrument TEXT NOT NULL,
    score INTEGER NOT NULL,
    note_count INTEGER NOT NULL,
    notes_hit_perfect INTEGER NOT NULL,
    notes_hit_good INTEGER NOT NULL,
    misses INTEGER NOT NULL,
    strikes INTEGER NOT NULL,
    difficulty INTEGER NOT NULL,
    submitted_at INTEGER NOT NULL
);

-- Storage-level backstop for the one-score-per-slot invariant
CREATE UNIQUE INDEX IF NOT EXISTS idx_scores_slot
    ON scores(user_id, song_hash, instrument);

-- Index-assisted ordered scans for ranking queries
CREATE INDEX IF NOT EXISTS idx_scores_ranking
    ON scores(song_hash, instrument, score DESC, row_order ASC);

CREATE INDEX IF NOT EXISTS idx_scores_user ON scores(user_id);
"#;
