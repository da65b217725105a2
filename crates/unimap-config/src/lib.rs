//! Layered configuration for unimap.
//!
//! Serialized defaults, then `config.toml` from the platform config
//! directory, then `UNIMAP_*` environment variables. Every key is
//! optional; with no file and no environment the defaults apply.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Directory the generated documents are written to, relative to the
    /// working directory unless absolute.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the combined document inside `output_dir`.
    #[serde(default = "default_combined_file")]
    pub combined_file: String,

    /// Fallback log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            combined_file: default_combined_file(),
            log_level: default_log_level(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("network-diagrams")
}
fn default_combined_file() -> String {
    "network-documentation.md".into()
}
fn default_log_level() -> String {
    "warn".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unimap", "unimap").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("unimap");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from an explicit file path plus environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("UNIMAP_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config from the platform config file plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    fn load(path: &Path) -> figment::error::Result<Config> {
        load_config_from(path).map_err(|ConfigError::Figment(err)| *err)
    }

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|jail| {
            let config = load(&jail.directory().join("absent.toml"))?;
            assert_eq!(config, Config::default());
            assert_eq!(config.output_dir, PathBuf::from("network-diagrams"));
            assert_eq!(config.combined_file, "network-documentation.md");
            assert_eq!(config.log_level, "warn");
            Ok(())
        });
    }

    #[test]
    fn file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    output_dir = "docs/network"
                    log_level = "info"
                "#,
            )?;
            let config = load(&jail.directory().join("config.toml"))?;
            assert_eq!(config.output_dir, PathBuf::from("docs/network"));
            assert_eq!(config.log_level, "info");
            assert_eq!(config.combined_file, "network-documentation.md");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", r#"combined_file = "from-file.md""#)?;
            jail.set_env("UNIMAP_COMBINED_FILE", "from-env.md");
            jail.set_env("UNIMAP_OUTPUT_DIR", "out");
            let config = load(&jail.directory().join("config.toml"))?;
            assert_eq!(config.combined_file, "from-env.md");
            assert_eq!(config.output_dir, PathBuf::from("out"));
            Ok(())
        });
    }

    #[test]
    fn malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "output_dir = [")?;
            assert!(load(&jail.directory().join("config.toml")).is_err());
            Ok(())
        });
    }
}
