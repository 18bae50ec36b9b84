/// One logged expense. Immutable once created; `id` is an opaque token used
/// only to find the record again for deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    /// Calendar date in YYYY-MM-DD form. Not validated chronologically —
    /// future dates and duplicates are fine.
    pub date: String,
}
