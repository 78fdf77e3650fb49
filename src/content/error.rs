//! Content loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with a single content file. Every variant names the file.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("`{0}` does not start with a `+++` front matter block")]
    MissingFrontMatter(PathBuf),

    #[error("`{0}`: slug `{1}` must be non-empty and contain only letters, digits, `-` or `_`")]
    InvalidSlug(PathBuf, String),
}
