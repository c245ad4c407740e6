//! Data storage layer
//!
//! - `sqlite` - embedded SQLite service, schema, and repositories
//! - `types` - row structs shared between repositories and the domain layer

pub mod sqlite;
pub mod types;

pub use sqlite::{SqliteError, SqliteService};
