//! Core application infrastructure

pub mod cli;
pub mod config;
pub mod constants;
pub mod denylist;
pub mod shutdown;
pub mod storage;

pub use crate::app::CoreApp;
pub use config::AppConfig;
pub use denylist::Denylist;
pub use shutdown::ShutdownService;
pub use storage::{AppStorage, DataSubdir};
