use chrono::Utc;
use thiserror::Error;

use crate::models::Expense;

/// Why an add was rejected. A rejection never changes ledger state; the
/// variant names the first field that failed so the form can say so.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddError {
    #[error("amount is required")]
    MissingAmount,

    #[error("amount is not a number")]
    InvalidAmount,

    #[error("description is required")]
    MissingDescription,

    #[error("category is required")]
    MissingCategory,
}

/// The in-memory expense ledger for one session. Records are kept in entry
/// order; nothing survives the process. Presentation decides display order
/// (the session table shows newest first).
pub struct Ledger {
    records: Vec<Expense>,
    epoch_ms: i64,
    seq: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            epoch_ms: Utc::now().timestamp_millis(),
            seq: 0,
        }
    }

    /// Session timestamp plus a per-ledger counter. Opaque to callers;
    /// uniqueness within the ledger is the only contract.
    fn next_id(&mut self) -> String {
        self.seq += 1;
        format!("{}-{}", self.epoch_ms, self.seq)
    }

    /// Validate the raw form fields and append a new record. The amount must
    /// parse as a finite float — unparseable input is rejected the same way
    /// a missing amount is, rather than letting a NaN poison the total.
    pub fn add(
        &mut self,
        amount_input: &str,
        description: &str,
        category: &str,
        date: &str,
    ) -> Result<Expense, AddError> {
        let amount_input = amount_input.trim();
        if amount_input.is_empty() {
            return Err(AddError::MissingAmount);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(AddError::MissingDescription);
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(AddError::MissingCategory);
        }
        let amount: f64 = amount_input.parse().map_err(|_| AddError::InvalidAmount)?;
        if !amount.is_finite() {
            return Err(AddError::InvalidAmount);
        }

        let expense = Expense {
            id: self.next_id(),
            amount,
            description: description.to_string(),
            category: category.to_string(),
            date: date.to_string(),
        };
        self.records.push(expense.clone());
        Ok(expense)
    }

    /// Remove the record with the given id. Returns whether anything was
    /// removed; a missing id is a no-op, not an error.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|e| e.id != id);
        self.records.len() != before
    }

    /// Current records in entry order, borrowed for display.
    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    /// Owned copy of the current records. Later mutations never show up in
    /// a snapshot, so the exporter's output is fixed at the moment of the
    /// export request.
    pub fn snapshot(&self) -> Vec<Expense> {
        self.records.clone()
    }

    pub fn total(&self) -> f64 {
        self.records.iter().map(|e| e.amount).sum()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
