mod cli;
mod error;
mod output;

use clap::Parser;
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

use unimap_config::Config;
use unimap_core::{Report, ReportKind};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::Progress;

fn main() {
    let cli = Cli::parse();

    // A broken config file is reported, never fatal.
    let (config, config_warning) = match unimap_config::load_config() {
        Ok(config) => (config, None),
        Err(source) => (
            Config::default(),
            Some(CliError::Config {
                path: unimap_config::config_path().display().to_string(),
                source,
            }),
        ),
    };

    init_tracing(&config.log_level);
    if let Some(warning) = config_warning {
        eprintln!("{:?}", miette::Report::new(warning));
    }

    let progress = Progress::new(output::should_color());
    if let Err(err) = run(&cli, &config, progress) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, config: &Config, progress: Progress) -> Result<(), CliError> {
    tracing::debug!(input = %cli.input_dir.display(), "loading export");
    let outcome = unimap_core::load_dir(&cli.input_dir)?;

    for (file, count) in outcome.counts() {
        progress.loaded(file.collection(), count);
    }
    for skipped in &outcome.skipped {
        progress.skipped(skipped);
    }

    let reports: Vec<Report> = ReportKind::iter()
        .map(|kind| {
            progress.generating(kind);
            Report::new(kind, &outcome.inventory)
        })
        .collect();

    let written = output::write_documents(&config.output_dir, &config.combined_file, &reports)?;
    for path in &written {
        progress.written(path);
    }
    progress.finished(&config.output_dir);
    Ok(())
}
