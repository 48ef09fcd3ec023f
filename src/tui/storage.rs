use std::path::{Path, PathBuf};

/// Persists the single "tutorial seen" flag as a marker file, the terminal
/// stand-in for the browser's key/value storage.
#[derive(Debug, Clone)]
pub struct TutorialMarker {
    path: PathBuf,
}

impl TutorialMarker {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's home directory, falling back to the
    /// system temp dir.
    pub fn default_location() -> Self {
        let base = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(std::env::temp_dir);
        Self { path: base.join(".poker-dojo-tutorial-seen") }
    }

    pub fn seen(&self) -> bool {
        self.path.exists()
    }

    /// Best effort; storage failures never interrupt play.
    pub fn mark_seen(&self) {
        let _ = std::fs::write(&self.path, b"1");
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
