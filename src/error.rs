use thiserror::Error;

/// Errors reported by a [SkipList](crate::SkipList).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipListError {
    /// The list was configured with a level count outside `1..=limit`.
    #[error("invalid maximum level count {requested}, expected 1..={limit}")]
    InvalidMaxLevels { requested: usize, limit: usize },

    /// A delete targeted a value that is not in the list.
    #[error("value {0} doesn't exist")]
    NotFound(i64),

    /// Only produced by [check_invariants](crate::SkipList::check_invariants).
    #[error("corrupted structure at level {level}: {reason}")]
    Corrupted { level: usize, reason: String },
}
