use thiserror::Error;

use crate::category::Category;

/// Failure reported by a [`ScoreStore`](crate::store::ScoreStore) read.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store backend error: {0}")]
    Backend(String),

    #[error("invalid {category} score record {id}: {reason}")]
    InvalidRecord {
        category: Category,
        id: i32,
        reason: String,
    },
}

/// Failure of the standings pipeline as a whole.
#[derive(Debug, Error)]
pub enum StandingsError {
    /// A category read failed; nothing is computed from a partial read.
    #[error("aggregation unavailable: {0}")]
    AggregationUnavailable(#[from] StoreError),
}
