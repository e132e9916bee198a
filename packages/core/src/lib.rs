//! Department point aggregation: per-category sums, the arts/sports merge,
//! and view-dependent ranking for the leaderboard.

pub mod aggregate;
pub mod category;
pub mod error;
pub mod merge;
pub mod rank;
pub mod store;

pub use aggregate::{CategoryAggregate, CategoryPoints, DepartmentMark, aggregate};
pub use category::{Category, View};
pub use error::{StandingsError, StoreError};
pub use merge::{DepartmentStanding, Palette, merge};
pub use rank::{RankedStanding, max_points, rank};
pub use store::{ScoreStore, category_aggregate, compute_standings};
