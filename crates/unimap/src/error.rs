//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use unimap_config::ConfigError;
use unimap_core::CoreError;

/// Process exit codes. Usage errors exit with 2 from clap itself.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const MISSING_INPUT: i32 = 4;
    pub const INVALID_INPUT: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────

    #[error("Required export file {file} not found")]
    #[diagnostic(
        code(unimap::missing_input),
        help(
            "Looked in: {dir}\n\
             networks.json and devices.json must be present; pass the export \
             directory as the first argument, e.g. unimap ./unifi-export"
        )
    )]
    MissingInput { file: String, dir: String },

    #[error("{file} is not a valid export document")]
    #[diagnostic(
        code(unimap::invalid_input),
        help("Expected a JSON object with a top-level \"data\" array of records.")
    )]
    InvalidInput {
        file: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Cannot read {path}")]
    #[diagnostic(code(unimap::read_failed))]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Output ───────────────────────────────────────────────────────

    #[error("Cannot write {path}")]
    #[diagnostic(
        code(unimap::write_failed),
        help("Check that the output directory is writable, or set UNIMAP_OUTPUT_DIR.")
    )]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Ignoring configuration file {path}")]
    #[diagnostic(
        code(unimap::config),
        severity(Warning),
        help("Fix or remove the file; built-in defaults are used for this run.")
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingInput { file, dir } => Self::MissingInput {
                file,
                dir: dir.display().to_string(),
            },
            CoreError::InvalidInput { file, source } => Self::InvalidInput {
                file,
                source: Box::new(source),
            },
            CoreError::Io { path, source } => Self::ReadFailed {
                path: path.display().to_string(),
                source,
            },
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput { .. } => exit_code::MISSING_INPUT,
            Self::InvalidInput { .. } => exit_code::INVALID_INPUT,
            Self::ReadFailed { .. } | Self::WriteFailed { .. } | Self::Config { .. } => {
                exit_code::GENERAL
            }
        }
    }
}
