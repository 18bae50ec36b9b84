pub mod categories;
pub mod demo;
pub mod session;
pub mod splash;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quid", about = "Session-scoped expense logger with Excel export.")]
pub struct Cli {
    /// Skip the startup splash screen.
    #[arg(long = "no-splash", global = true)]
    pub no_splash: bool,

    /// Directory for exported spreadsheets (default: from settings).
    #[arg(long = "export-dir", global = true)]
    pub export_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a session pre-loaded with sample expenses to explore quid.
    Demo,
    /// List the selectable expense categories.
    Categories,
}
