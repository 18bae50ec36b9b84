use chrono::{Duration, Local};

use crate::error::{QuidError, Result};
use crate::ledger::Ledger;

struct DemoExpense {
    days_ago: i64,
    description: &'static str,
    category: &'static str,
    amount: &'static str,
}

/// A week and a half of plausible spending, oldest first so the seeded
/// ledger reads like a real session's entry order.
const SAMPLE: &[DemoExpense] = &[
    DemoExpense { days_ago: 10, description: "Groceries at the co-op", category: "Food & Dining", amount: "84.12" },
    DemoExpense { days_ago: 9, description: "Monthly bus pass", category: "Transportation", amount: "64.00" },
    DemoExpense { days_ago: 8, description: "Electric bill", category: "Bills & Utilities", amount: "112.40" },
    DemoExpense { days_ago: 7, description: "Paperback for the flight", category: "Shopping", amount: "16.99" },
    DemoExpense { days_ago: 6, description: "Movie night", category: "Entertainment", amount: "24.50" },
    DemoExpense { days_ago: 5, description: "Pharmacy refill", category: "Healthcare", amount: "9.80" },
    DemoExpense { days_ago: 4, description: "Hostel deposit", category: "Travel", amount: "45.00" },
    DemoExpense { days_ago: 3, description: "Evening pottery class", category: "Education", amount: "38.00" },
    DemoExpense { days_ago: 2, description: "Returned toaster", category: "Shopping", amount: "-29.99" },
    DemoExpense { days_ago: 1, description: "Coffee with Sam", category: "Food & Dining", amount: "7.60" },
    DemoExpense { days_ago: 0, description: "Stamps", category: "Other", amount: "5.75" },
];

pub fn run(no_splash: bool, export_dir: Option<&str>) -> Result<()> {
    let today = Local::now().date_naive();
    let mut ledger = Ledger::new();
    for item in SAMPLE {
        let date = (today - Duration::days(item.days_ago))
            .format("%Y-%m-%d")
            .to_string();
        ledger
            .add(item.amount, item.description, item.category, &date)
            .map_err(|e| QuidError::Other(format!("demo seed rejected: {e}")))?;
    }
    super::session::start(ledger, no_splash, export_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_rows_all_seed_cleanly() {
        let mut ledger = Ledger::new();
        for item in SAMPLE {
            ledger
                .add(item.amount, item.description, item.category, "2024-01-01")
                .unwrap();
        }
        assert_eq!(ledger.count(), SAMPLE.len());
    }

    #[test]
    fn sample_uses_only_known_categories() {
        for item in SAMPLE {
            assert!(
                crate::categories::CATEGORIES.contains(&item.category),
                "unknown category {}",
                item.category
            );
        }
    }
}
