//! Denylisted song hashes
//!
//! A plain text file with one song hash per line. Blank lines and `#`
//! comments are ignored. The file is read once at startup; listed hashes
//! cannot receive scores or catalog entries.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug, Default)]
pub struct Denylist {
    hashes: HashSet<String>,
}

impl Denylist {
    /// A denylist with no entries (used when no file is configured)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a denylist from a file, or an empty list when no path is set
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("No denylist configured");
            return Ok(Self::empty());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read denylist file: {}", path.display()))?;

        let hashes: HashSet<String> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        tracing::info!(
            path = %path.display(),
            count = hashes.len(),
            "Denylist loaded"
        );
        Ok(Self { hashes })
    }

    /// Whether a song hash is denylisted. Comparison is case-insensitive.
    pub fn contains(&self, song_hash: &str) -> bool {
        self.hashes.contains(&song_hash.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    #[cfg(test)]
    pub fn from_hashes<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hashes: hashes.into_iter().map(|h| h.into().to_lowercase()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty() {
        let denylist = Denylist::empty();
        assert!(denylist.is_empty());
        assert!(!denylist.contains("anything"));
    }

    #[test]
    fn test_load_none_path() {
        let denylist = Denylist::load(None).unwrap();
        assert!(denylist.is_empty());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# stolen charts").unwrap();
        writeln!(file, "abc123").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  DEF456  ").unwrap();
        file.flush().unwrap();

        let denylist = Denylist::load(Some(file.path())).unwrap();
        assert_eq!(denylist.len(), 2);
        assert!(denylist.contains("abc123"));
        // Case-insensitive both ways
        assert!(denylist.contains("def456"));
        assert!(denylist.contains("DEF456"));
        assert!(!denylist.contains("# stolen charts"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = Denylist::load(Some(Path::new("/nonexistent/denylist.txt"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read denylist file"));
    }
}
