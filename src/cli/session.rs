use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use super::splash;
use crate::error::Result;
use crate::fmt::money;
use crate::ledger::Ledger;
use crate::session::SessionView;
use crate::settings::{load_settings, save_settings, settings_file_exists};

pub fn run(no_splash: bool, export_dir: Option<&str>) -> Result<()> {
    start(Ledger::new(), no_splash, export_dir)
}

/// Shared session bootstrap: resolve the export directory, show the splash
/// unless suppressed, run the view, and print the exit summary. `demo`
/// enters here with a pre-seeded ledger.
pub(crate) fn start(ledger: Ledger, no_splash: bool, export_dir: Option<&str>) -> Result<()> {
    let settings = load_settings();
    if !settings_file_exists() {
        // First run: write the defaults so they are discoverable. Failure
        // here must not keep the session from starting.
        let _ = save_settings(&settings);
    }
    let export_dir = export_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&settings.export_dir));

    if !no_splash && settings.splash {
        splash::run()?;
    }

    let mut view = SessionView::new(ledger, export_dir);
    view.run()?;
    print_summary(view.ledger());
    Ok(())
}

/// The ledger dies with the session, so leave its final state on stdout.
fn print_summary(ledger: &Ledger) {
    if ledger.is_empty() {
        println!("No expenses recorded this session.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Category", "Amount"]);
    for exp in ledger.records() {
        table.add_row(vec![
            Cell::new(&exp.date),
            Cell::new(&exp.description),
            Cell::new(&exp.category),
            Cell::new(money(exp.amount)),
        ]);
    }
    println!("{table}");

    let n = ledger.count();
    let noun = if n == 1 { "expense" } else { "expenses" };
    let total = money(ledger.total());
    println!("{n} {noun}, session total {}", total.bold());
}
