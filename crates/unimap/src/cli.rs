//! Clap derive structure for the `unimap` CLI.

use std::path::PathBuf;

use clap::Parser;

/// unimap -- network documentation from UniFi controller exports
#[derive(Debug, Parser)]
#[command(
    name = "unimap",
    version,
    about = "Generate Mermaid topology diagrams and Markdown reports from UniFi exports",
    long_about = "Reads the JSON collections exported from a UniFi controller \
        (networks.json and devices.json, optionally port-profiles.json, \
        firewall-rules.json and firewall-groups.json) and writes physical and \
        logical topology diagrams, port mapping tables, per-switch diagrams and \
        a firewall overview, plus one combined document.\n\n\
        Output location and log level come from the config file or UNIMAP_* \
        environment variables (UNIMAP_OUTPUT_DIR, UNIMAP_COMBINED_FILE, \
        UNIMAP_LOG_LEVEL)."
)]
pub struct Cli {
    /// Directory containing the exported JSON files
    #[arg(value_name = "INPUT_DIR", default_value = ".")]
    pub input_dir: PathBuf,
}
