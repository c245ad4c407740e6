//! Bearer auth key authentication

pub mod extractors;
pub mod middleware;

pub use extractors::{Auth, AuthUser};
pub use middleware::{AuthState, require_auth};
