#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition domain a score belongs to.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "arts"))]
    Arts,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "sports"))]
    Sports,
}

impl Category {
    pub const ALL: &'static [Category] = &[Self::Arts, Self::Sports];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arts => "arts",
            Self::Sports => "sports",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranking metric selected by the leaderboard.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Total,
    Arts,
    Sports,
}

impl View {
    pub const ALL: &'static [View] = &[Self::Total, Self::Arts, Self::Sports];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Arts => "arts",
            Self::Sports => "sports",
        }
    }
}

impl From<Category> for View {
    fn from(category: Category) -> Self {
        match category {
            Category::Arts => Self::Arts,
            Category::Sports => Self::Sports,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
