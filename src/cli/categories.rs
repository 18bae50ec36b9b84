use comfy_table::Table;

use crate::categories::CATEGORIES;
use crate::error::Result;

pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Category"]);
    for (i, name) in CATEGORIES.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), (*name).to_string()]);
    }
    println!("{table}");
    Ok(())
}
