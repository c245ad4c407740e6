//! HTTP API layer

pub mod auth;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod types;

pub use server::ApiServer;
