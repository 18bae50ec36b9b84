mod categories;
mod cli;
mod effects;
mod error;
mod fmt;
mod ledger;
mod models;
mod session;
mod settings;
mod tui;
mod xlsx;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::session::run(cli.no_splash, cli.export_dir.as_deref()),
        Some(Commands::Demo) => cli::demo::run(cli.no_splash, cli.export_dir.as_deref()),
        Some(Commands::Categories) => cli::categories::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
