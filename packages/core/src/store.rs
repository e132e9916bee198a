use async_trait::async_trait;
use tracing::debug;

use crate::aggregate::{CategoryAggregate, DepartmentMark, aggregate};
use crate::category::{Category, View};
use crate::error::{StandingsError, StoreError};
use crate::merge::{Palette, merge};
use crate::rank::{RankedStanding, rank};

/// Read access to the live score table.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Active score rows of `category` whose department is also active.
    async fn category_marks(&self, category: Category) -> Result<Vec<DepartmentMark>, StoreError>;
}

/// Read one category and sum it per department.
pub async fn category_aggregate<S>(
    store: &S,
    category: Category,
) -> Result<CategoryAggregate, StandingsError>
where
    S: ScoreStore + ?Sized,
{
    let rows = store.category_marks(category).await?;
    debug!(%category, rows = rows.len(), "Aggregating category");
    Ok(aggregate(rows))
}

/// Run the full pipeline: both category reads, merge, and rank by `view`.
///
/// Either read failing fails the whole computation.
pub async fn compute_standings<S>(
    store: &S,
    view: View,
    palette: &Palette,
) -> Result<Vec<RankedStanding>, StandingsError>
where
    S: ScoreStore + ?Sized,
{
    let (arts, sports) = futures::try_join!(
        category_aggregate(store, Category::Arts),
        category_aggregate(store, Category::Sports),
    )?;

    let merged = merge(&arts, &sports, palette);
    debug!(%view, departments = merged.len(), "Ranking standings");
    Ok(rank(merged, view))
}
