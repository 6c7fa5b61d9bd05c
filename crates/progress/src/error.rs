use std::path::PathBuf;

/// Persistence failures, surfaced to the caller instead of dropping progress.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("progress file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("progress file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
