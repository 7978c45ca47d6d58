//! CLI error types.

use std::path::PathBuf;

use docnav_config::ConfigError;
use docnav_tree::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No titled Markdown pages directly in {}", .0.display())]
    EmptySection(PathBuf),
}
