//! Persisted display configuration: a single key holding the screen id.
//!
//! Read once at startup, written on a successful configuration save.
//! A missing file is the recognized "not configured yet" state.

use std::path::PathBuf;

/// Single-key file store for the configured screen id.
pub struct ScreenIdFile {
    path: PathBuf,
}

impl ScreenIdFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the configured screen id, or `None` when not configured.
    ///
    /// An unreadable file is logged and treated as unconfigured -- the
    /// first-run flow takes over rather than the display failing.
    pub fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let id = contents.trim();
                if id.is_empty() {
                    None
                } else {
                    Some(id.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read screen configuration");
                None
            }
        }
    }

    /// Persist the configured screen id.
    pub fn save(&self, screen_id: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, screen_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vitrina-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_file_is_unconfigured() {
        let file = ScreenIdFile::new(temp_path("missing"));
        assert_eq!(file.load(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_path("roundtrip");
        let file = ScreenIdFile::new(&path);

        file.save("s1").unwrap();
        assert_eq!(file.load(), Some("s1".to_string()));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn blank_file_is_unconfigured() {
        let path = temp_path("blank");
        std::fs::write(&path, "  \n").unwrap();

        let file = ScreenIdFile::new(&path);
        assert_eq!(file.load(), None);

        std::fs::remove_file(path).ok();
    }
}
