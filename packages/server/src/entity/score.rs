use pointtable_core::Category;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "score")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub category: Category,
    /// Participant display name, lowercased.
    pub name: String,
    pub participant_code: String,
    /// Event within the category, lowercased.
    pub event_code: String,
    /// Never negative; enforced on write.
    pub mark: i32,
    pub position: i32,
    /// Cleared instead of deleting the row.
    pub is_active: bool,

    pub department_id: i32,
    #[sea_orm(belongs_to, from = "department_id", to = "id")]
    pub department: HasOne<super::department::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
