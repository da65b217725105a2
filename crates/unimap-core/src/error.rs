// ── Core error types ──
//
// Only the two mandatory export files can fail a run. Problems with the
// optional files are reported as skipped files by the loader instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Required export file {file} not found in {}", dir.display())]
    MissingInput { file: String, dir: PathBuf },

    #[error("Invalid JSON in {file}: {source}")]
    InvalidInput {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
