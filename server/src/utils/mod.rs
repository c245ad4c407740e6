//! Utility functions for the application

pub mod auth_key;
pub mod crypto;
pub mod file;
