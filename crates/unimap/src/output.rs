//! Terminal progress output and document writing.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;

use unimap_core::{Report, ReportKind, SkipReason, SkippedFile, combined_document};

use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Progress lines on stdout, warnings on stderr.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    color: bool,
}

impl Progress {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn ok(&self, line: &str) {
        if self.color {
            println!("{} {line}", "✔".green());
        } else {
            println!("✔ {line}");
        }
    }

    pub fn loaded(&self, collection: &str, count: usize) {
        self.ok(&format!("Loaded {count} {collection}"));
    }

    pub fn skipped(&self, skipped: &SkippedFile) {
        let line = match &skipped.reason {
            SkipReason::Missing => {
                format!("Optional file not found: {} (using defaults)", skipped.file)
            }
            SkipReason::Invalid(reason) => format!("{reason} (using defaults)"),
        };
        if self.color {
            eprintln!("{} {line}", "⚠".yellow());
        } else {
            eprintln!("⚠ {line}");
        }
    }

    pub fn generating(&self, kind: ReportKind) {
        let line = format!("Generating {}", kind.title().to_lowercase());
        if self.color {
            println!("{} {line}", "→".cyan());
        } else {
            println!("→ {line}");
        }
    }

    pub fn written(&self, path: &Path) {
        self.ok(&format!("Wrote {}", path.display()));
    }

    pub fn finished(&self, dir: &Path) {
        let line = format!("All network documentation generated in {}", dir.display());
        if self.color {
            println!("{}", line.bold());
        } else {
            println!("{line}");
        }
    }
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf, CliError> {
    fs::write(&path, contents).map_err(|source| CliError::WriteFailed {
        path: path.display().to_string(),
        source,
    })?;
    Ok(path)
}

/// Write one file per report plus the combined document into `dir`,
/// creating it if needed. Returns the written paths in order.
pub fn write_documents(
    dir: &Path,
    combined_file: &str,
    reports: &[Report],
) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::WriteFailed {
        path: dir.display().to_string(),
        source,
    })?;

    let mut written = Vec::with_capacity(reports.len() + 1);
    for report in reports {
        written.push(write_file(
            dir.join(report.kind.file_name()),
            &report.document(),
        )?);
    }
    written.push(write_file(
        dir.join(combined_file),
        &combined_document(reports),
    )?);
    Ok(written)
}
