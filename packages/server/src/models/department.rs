use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{validate_optional_code, validate_text};
use crate::error::AppError;

const MAX_CODE_LEN: usize = 50;
const MAX_NAME_LEN: usize = 255;

/// Request body for creating a department.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDepartmentRequest {
    /// Unique short code. Stored lowercased.
    #[schema(example = "cse")]
    pub code: String,
    /// Display name, also the key departments are ranked under.
    #[schema(example = "Computer Science")]
    pub name: String,
}

/// Partial update of a department. Absent fields are left unchanged.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateDepartmentRequest {
    #[schema(example = "cse")]
    pub code: Option<String>,
    #[schema(example = "Computer Science & Engineering")]
    pub name: Option<String>,
    /// Set to `true` to restore a deactivated department.
    pub is_active: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DepartmentResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "cse")]
    pub code: String,
    #[schema(example = "Computer Science")]
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::entity::department::Model> for DepartmentResponse {
    fn from(m: crate::entity::department::Model) -> Self {
        Self {
            id: m.id,
            code: m.code,
            name: m.name,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_code(code: &str) -> Result<(), AppError> {
    validate_text(code, "Code", MAX_CODE_LEN)?;
    validate_optional_code(code, "Code", MAX_CODE_LEN)
}

pub fn validate_create_department(req: &CreateDepartmentRequest) -> Result<(), AppError> {
    validate_code(&req.code)?;
    validate_text(&req.name, "Name", MAX_NAME_LEN)
}

pub fn validate_update_department(req: &UpdateDepartmentRequest) -> Result<(), AppError> {
    if let Some(ref code) = req.code {
        validate_code(code)?;
    }
    if let Some(ref name) = req.name {
        validate_text(name, "Name", MAX_NAME_LEN)?;
    }
    Ok(())
}
