//! Auth key generation and validation
//!
//! Keys are opaque bearer credentials issued once per user. They are stored
//! verbatim because a user must be able to re-fetch the exact key later.

use rand::Rng;
use rand::rngs::OsRng;

use crate::core::constants::{AUTH_KEY_PREFIX, AUTH_KEY_RANDOM_LENGTH};

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate an opaque auth key: ck-{random_40chars}
/// Uses OsRng (CSPRNG) for cryptographic security
pub fn generate_key() -> String {
    let random: String = (0..AUTH_KEY_RANDOM_LENGTH)
        .map(|_| CHARSET[OsRng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{}{}", AUTH_KEY_PREFIX, random)
}

/// Validate key format: ck-{40 lowercase alphanumeric chars}
pub fn is_valid_key(key: &str) -> bool {
    key.starts_with(AUTH_KEY_PREFIX)
        && key.len() == AUTH_KEY_PREFIX.len() + AUTH_KEY_RANDOM_LENGTH
        && key[AUTH_KEY_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key() {
        let key = generate_key();
        assert!(key.starts_with(AUTH_KEY_PREFIX));
        assert_eq!(key.len(), AUTH_KEY_PREFIX.len() + AUTH_KEY_RANDOM_LENGTH);
        assert!(is_valid_key(&key));
    }

    #[test]
    fn test_generate_key_uniqueness() {
        let key1 = generate_key();
        let key2 = generate_key();
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_is_valid_key() {
        // Valid key
        assert!(is_valid_key(
            "ck-a1b2c3d4e5f6g7h8i9j0k1l2m3n4o5p6q7r8s9t0"
        ));

        // Too short
        assert!(!is_valid_key("ck-a1b2c3"));

        // Wrong prefix
        assert!(!is_valid_key(
            "xx-a1b2c3d4e5f6g7h8i9j0k1l2m3n4o5p6q7r8s9t0"
        ));

        // Invalid characters (uppercase)
        assert!(!is_valid_key(
            "ck-A1B2C3D4E5F6G7H8I9J0K1L2M3N4O5P6Q7R8S9T0"
        ));

        // Invalid characters (special)
        assert!(!is_valid_key(
            "ck-a1b2c3d4e5f6g7h8i9j0k1l2m3n4o5p6q7r8s9-0"
        ));
    }
}
