use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::fmt::today_string;
use crate::models::Expense;

pub const SHEET_NAME: &str = "Expenses";
pub const HEADER: [&str; 4] = ["Date", "Description", "Category", "Amount"];

/// Serialize a ledger snapshot into an .xlsx workbook: a header row, one row
/// per record in snapshot order, one blank spacer row, then a totals row.
/// The totals row position is derived from the data length so it always
/// lands exactly one row below the last record. An empty snapshot still
/// produces a valid workbook with a zero total.
pub fn build_workbook(expenses: &[Expense]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in HEADER.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *title, &bold)?;
    }

    for (i, exp) in expenses.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write(row, 0, exp.date.as_str())?;
        sheet.write(row, 1, exp.description.as_str())?;
        sheet.write(row, 2, exp.category.as_str())?;
        sheet.write(row, 3, exp.amount)?;
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    let total_row = expenses.len() as u32 + 2;
    sheet.write_with_format(total_row, 2, "Total:", &bold)?;
    sheet.write_with_format(total_row, 3, total, &bold)?;

    Ok(workbook.save_to_buffer()?)
}

/// The export filename carries the export date, not any record's date.
pub fn export_filename() -> String {
    format!("expenses_{}.xlsx", today_string())
}

/// Write the workbook for a snapshot into `dir`, creating it if needed.
/// Returns the path written.
pub fn export(expenses: &[Expense], dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename());
    std::fs::write(&path, build_workbook(expenses)?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add("12.50", "Coffee", "Food & Dining", "2024-01-15")
            .unwrap();
        ledger
            .add("40.00", "Gas", "Transportation", "2024-01-16")
            .unwrap();
        ledger
    }

    fn read_expenses_sheet(bytes: Vec<u8>) -> calamine::Range<Data> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        workbook.worksheet_range(SHEET_NAME).unwrap()
    }

    fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> Data {
        range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
    }

    #[test]
    fn header_row_is_exact() {
        let bytes = build_workbook(&sample_ledger().snapshot()).unwrap();
        let range = read_expenses_sheet(bytes);
        for (col, title) in HEADER.iter().enumerate() {
            assert_eq!(cell(&range, 0, col as u32), Data::String(title.to_string()));
        }
    }

    #[test]
    fn data_rows_follow_snapshot_order() {
        let bytes = build_workbook(&sample_ledger().snapshot()).unwrap();
        let range = read_expenses_sheet(bytes);

        assert_eq!(cell(&range, 1, 0), Data::String("2024-01-15".into()));
        assert_eq!(cell(&range, 1, 1), Data::String("Coffee".into()));
        assert_eq!(cell(&range, 1, 2), Data::String("Food & Dining".into()));
        assert_eq!(cell(&range, 1, 3), Data::Float(12.50));

        assert_eq!(cell(&range, 2, 0), Data::String("2024-01-16".into()));
        assert_eq!(cell(&range, 2, 1), Data::String("Gas".into()));
        assert_eq!(cell(&range, 2, 2), Data::String("Transportation".into()));
        assert_eq!(cell(&range, 2, 3), Data::Float(40.00));
    }

    #[test]
    fn totals_row_sits_below_a_blank_spacer() {
        let ledger = sample_ledger();
        let bytes = build_workbook(&ledger.snapshot()).unwrap();
        let range = read_expenses_sheet(bytes);

        // Row 3 (after 2 data rows) is the spacer, row 4 carries the total.
        for col in 0..4 {
            assert_eq!(cell(&range, 3, col), Data::Empty);
        }
        assert_eq!(cell(&range, 4, 2), Data::String("Total:".into()));
        assert_eq!(cell(&range, 4, 3), Data::Float(ledger.total()));
        assert_eq!(range.height(), 5);
    }

    #[test]
    fn totals_row_tracks_data_length() {
        let mut ledger = sample_ledger();
        ledger.add("5.00", "Snack", "Food & Dining", "2024-01-17").unwrap();
        let bytes = build_workbook(&ledger.snapshot()).unwrap();
        let range = read_expenses_sheet(bytes);

        assert_eq!(cell(&range, 5, 2), Data::String("Total:".into()));
        assert_eq!(cell(&range, 5, 3), Data::Float(57.50));
    }

    #[test]
    fn empty_snapshot_yields_header_and_zero_total() {
        let bytes = build_workbook(&[]).unwrap();
        let range = read_expenses_sheet(bytes);

        assert_eq!(cell(&range, 0, 0), Data::String("Date".into()));
        for col in 0..4 {
            assert_eq!(cell(&range, 1, col), Data::Empty);
        }
        assert_eq!(cell(&range, 2, 2), Data::String("Total:".into()));
        assert_eq!(cell(&range, 2, 3), Data::Float(0.0));
        assert_eq!(range.height(), 3);
    }

    #[test]
    fn export_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export(&sample_ledger().snapshot(), dir.path()).unwrap();
        assert!(path.exists());
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            format!("expenses_{}.xlsx", today_string())
        );
    }

    #[test]
    fn export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("deep");
        let path = export(&[], &nested).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }
}
