//! Free-text and structured filtering over in-memory collections.
//!
//! # Responsibility
//! - Turn a query string into lower-cased terms.
//! - Combine terms with AND: every term must occur in some searchable field.
//! - Apply typed per-kind filters (status sets, ranges).
//!
//! # Invariants
//! - Output preserves input order.
//! - A blank query plus an empty filter returns the input unchanged.

pub mod filter;
pub mod text;

pub use filter::{
    DateRange, EventFilter, FilterError, GoalFilter, NoteFilter, ProgressRange, RecordFilter,
    TaskFilter,
};
pub use text::{Searchable, TextQuery};

/// Ordered subsequence of `records` matching both `query` and `filter`.
pub fn filter_records<R, F>(records: &[R], query: &str, filter: &F) -> Vec<R>
where
    R: Searchable + Clone,
    F: RecordFilter<R>,
{
    let text = TextQuery::parse(query);
    if text.is_empty() && filter.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| text.matches(*record) && filter.matches(record))
        .cloned()
        .collect()
}
