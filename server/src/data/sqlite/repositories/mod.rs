//! SQLite repositories
//!
//! Free async functions over `&SqlitePool`. Point lookups return `Option`;
//! absence is not an error. Unique-constraint violations surface as
//! `SqliteError::Conflict`.

pub mod score;
pub mod song;
pub mod user;
