use std::path::PathBuf;

/// Errors produced by hole detection and its helpers.
#[derive(thiserror::Error, Debug)]
pub enum HoleError {
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("vision library unavailable: {0}")]
    DependencyUnavailable(#[from] DependencyError),

    #[error("invalid detector config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why the vision library could not serve a call.
#[derive(thiserror::Error, Debug)]
pub enum DependencyError {
    #[error("vision library not initialized")]
    NotReady,

    #[error(transparent)]
    Vision(#[from] opencv::Error),
}

impl From<opencv::Error> for HoleError {
    fn from(err: opencv::Error) -> Self {
        Self::DependencyUnavailable(DependencyError::Vision(err))
    }
}

impl HoleError {
    /// True for every failure that comes from the vision library rather than the input.
    pub fn is_dependency_unavailable(&self) -> bool {
        matches!(self, Self::DependencyUnavailable(_))
    }
}

pub type Result<T, E = HoleError> = std::result::Result<T, E>;
