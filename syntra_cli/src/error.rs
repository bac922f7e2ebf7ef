use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the command-line glue itself, as opposed to rejected programs.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
