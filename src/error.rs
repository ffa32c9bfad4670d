use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the site's content or configuration.
///
/// None of these are fatal: callers log them and fall back to the bundled
/// defaults.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("content file {} has no sections", .0.display())]
    EmptyContent(PathBuf),
}

pub type Result<T> = std::result::Result<T, SiteError>;
