use std::path::PathBuf;

use cuida_council::CouncilError;
use cuida_documents::DocumentError;
use cuida_status::StatusError;
use cuida_temporal::TemporalError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read table file {path}: {source}", path = path.display())]
    TableRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("status table error: {0}")]
    Status(#[from] StatusError),

    #[error("council table error: {0}")]
    Council(#[from] CouncilError),
}

/// Type alias for Results that can fail with a [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
