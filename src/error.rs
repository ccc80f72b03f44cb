use std::{io, path::PathBuf};

use thiserror::Error;

/// Conditions that abort a run.
///
/// Everything else is recoverable and reported as an [`crate::issues::Issue`].
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    StoreReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
