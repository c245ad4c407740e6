//! Application-wide constants

// =============================================================================
// Application Identity
// =============================================================================

/// Application name (used for platform data directories)
pub const APP_NAME: &str = "ChartBoard";

/// Lowercase application name (used for logging filters)
pub const APP_NAME_LOWER: &str = "chartboard";

/// Dot-folder name for fallback data/config locations
pub const APP_DOT_FOLDER: &str = ".chartboard";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "chartboard.json";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "CHARTBOARD_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "CHARTBOARD_PORT";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "CHARTBOARD_CONFIG";

/// Environment variable for data directory override
pub const ENV_DATA_DIR: &str = "CHARTBOARD_DATA_DIR";

/// Environment variable for log filter (falls back to RUST_LOG)
pub const ENV_LOG: &str = "CHARTBOARD_LOG";

/// Environment variable for denylist file path
pub const ENV_DENYLIST: &str = "CHARTBOARD_DENYLIST";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5380;

/// Default body limit for API requests (256 KB)
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Graceful shutdown timeout for background tasks (seconds)
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "chartboard.db";

/// SQLite connection pool size
pub const SQLITE_MAX_CONNECTIONS: u32 = 10;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 5;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Leaderboards
// =============================================================================

/// Fixed number of entries per leaderboard page
pub const LEADERBOARD_PAGE_SIZE: u32 = 10;

/// Maximum accepted song hash length
pub const MAX_SONG_HASH_LENGTH: usize = 128;

/// Maximum accepted instrument identifier length
pub const MAX_INSTRUMENT_LENGTH: usize = 32;

/// Maximum length for song text fields (title, artist, album, charters, source)
pub const MAX_SONG_TEXT_LENGTH: u64 = 512;

// =============================================================================
// Auth Keys
// =============================================================================

/// Auth key prefix (identifies ChartBoard keys in logs and support requests)
pub const AUTH_KEY_PREFIX: &str = "ck-";

/// Number of random characters after the prefix
pub const AUTH_KEY_RANDOM_LENGTH: usize = 40;
