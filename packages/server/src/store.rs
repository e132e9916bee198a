use async_trait::async_trait;
use pointtable_core::{Category, DepartmentMark, ScoreStore, StoreError};
use sea_orm::*;

use crate::entity::{department, score};

/// Score store backed by the `score` and `department` tables.
#[derive(Clone)]
pub struct DbScoreStore {
    db: DatabaseConnection,
}

impl DbScoreStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct MarkRow {
    id: i32,
    department_name: String,
    mark: i32,
}

impl MarkRow {
    fn into_mark(self, category: Category) -> Result<DepartmentMark, StoreError> {
        let mark = u32::try_from(self.mark).map_err(|_| StoreError::InvalidRecord {
            category,
            id: self.id,
            reason: format!("negative mark {}", self.mark),
        })?;
        Ok(DepartmentMark::new(self.department_name, mark))
    }
}

#[async_trait]
impl ScoreStore for DbScoreStore {
    async fn category_marks(&self, category: Category) -> Result<Vec<DepartmentMark>, StoreError> {
        let rows = score::Entity::find()
            .select_only()
            .column(score::Column::Id)
            .column_as(department::Column::Name, "department_name")
            .column(score::Column::Mark)
            .inner_join(department::Entity)
            .filter(score::Column::Category.eq(category))
            .filter(score::Column::IsActive.eq(true))
            .filter(department::Column::IsActive.eq(true))
            .into_model::<MarkRow>()
            .all(&self.db)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        rows.into_iter().map(|r| r.into_mark(category)).collect()
    }
}
