/// The selectable expense categories, in display order. The ledger itself
/// accepts any non-empty category string; only the entry form restricts the
/// user's choice to this set.
pub const CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Other",
];

/// Case-insensitive substring filter over the category set, preserving
/// display order. An empty query matches everything so the picker always
/// has something to offer.
pub fn filter(query: &str) -> Vec<(usize, &'static str)> {
    let q = query.trim().to_lowercase();
    CATEGORIES
        .iter()
        .enumerate()
        .filter(|(_, name)| q.is_empty() || name.to_lowercase().contains(&q))
        .map(|(i, name)| (i, *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn there_are_nine_categories() {
        assert_eq!(CATEGORIES.len(), 9);
        assert_eq!(CATEGORIES[0], "Food & Dining");
        assert_eq!(CATEGORIES[8], "Other");
    }

    #[test]
    fn empty_query_matches_all() {
        assert_eq!(filter("").len(), CATEGORIES.len());
        assert_eq!(filter("   ").len(), CATEGORIES.len());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let hits = filter("tra");
        let names: Vec<&str> = hits.iter().map(|(_, n)| *n).collect();
        assert_eq!(names, vec!["Transportation", "Travel"]);
    }

    #[test]
    fn filter_keeps_original_indices() {
        let hits = filter("health");
        assert_eq!(hits, vec![(5, "Healthcare")]);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter("zzz").is_empty());
    }
}
