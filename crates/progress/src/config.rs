//! Where progress is stored.

use std::path::PathBuf;

const APP_DIR: &str = "crush";
const FILENAME: &str = "progress.json";

/// Progress store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    /// Create from environment variables
    ///
    /// `CRUSH_PROGRESS_PATH` wins when set and non-empty; otherwise see
    /// [`default_path`].
    pub fn from_env() -> Self {
        let path = std::env::var("CRUSH_PROGRESS_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_path);
        Self { path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// `$XDG_CONFIG_HOME/crush/progress.json`, else `~/.config/crush/progress.json`,
/// else `./progress.json`
pub fn default_path() -> PathBuf {
    let xdg = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|x| !x.is_empty())
        .map(PathBuf::from);
    let home = || {
        std::env::var("HOME")
            .ok()
            .filter(|h| !h.is_empty())
            .map(|h| PathBuf::from(h).join(".config"))
    };

    match xdg.or_else(home) {
        Some(base) => base.join(APP_DIR).join(FILENAME),
        None => PathBuf::from(FILENAME),
    }
}
