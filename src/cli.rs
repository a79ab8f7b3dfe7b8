//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Track which catalogue apps are installed on this machine.
#[derive(Parser, Debug, Default)]
#[command(name = "nk-apps")]
#[command(version)]
#[command(about = "Track which catalogue apps are installed on this machine", long_about = None)]
pub struct Args {
    /// Catalogue file to read (default from config: ../apps.json)
    #[arg(long)]
    pub catalogue: Option<PathBuf>,

    /// Directory holding nk-apps.json (default from config: ~/.config)
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,

    /// Reconcile and save without starting the list view, printing every record
    #[arg(long)]
    pub print: bool,
}
