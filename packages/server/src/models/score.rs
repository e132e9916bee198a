use chrono::{DateTime, Utc};
use pointtable_core::Category;
use serde::{Deserialize, Serialize};

use super::shared::{
    Pagination, validate_batch_len, validate_non_negative, validate_optional_code, validate_text,
};
use crate::entity::{department, score};
use crate::error::AppError;

/// Largest batch accepted by a single bulk submission.
pub const MAX_BATCH: usize = 500;

const MAX_NAME_LEN: usize = 255;
const MAX_PARTICIPANT_CODE_LEN: usize = 10;
const MAX_EVENT_CODE_LEN: usize = 255;

/// One participant's result inside a bulk submission.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ScoreEntryRequest {
    /// Participant name. Stored lowercased.
    #[schema(example = "Asha Menon")]
    pub name: String,
    /// Participant chest/registration code. Stored lowercased.
    #[serde(default)]
    #[schema(example = "A102")]
    pub participant_code: String,
    /// Event the result belongs to. Stored lowercased.
    #[serde(default)]
    #[schema(example = "solo-dance")]
    pub event_code: String,
    /// Points awarded (>= 0).
    #[schema(example = 10)]
    pub mark: i32,
    /// ID of an active department.
    #[schema(example = 1)]
    pub department_id: i32,
    /// Finishing position (>= 0). Defaults to 0.
    #[schema(example = 1)]
    pub position: Option<i32>,
}

/// Request body for submitting a batch of results in one category.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct BulkAddScoresRequest {
    /// 1-500 entries. The batch is stored atomically.
    pub participants: Vec<ScoreEntryRequest>,
}

/// Partial update of a score record. Absent fields are left unchanged.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateScoreRequest {
    pub name: Option<String>,
    pub participant_code: Option<String>,
    pub event_code: Option<String>,
    pub mark: Option<i32>,
    pub department_id: Option<i32>,
    pub position: Option<i32>,
}

/// Query parameters for listing scores.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScoreListQuery {
    #[param(example = 1)]
    pub page: Option<u64>,
    #[param(example = 50)]
    pub per_page: Option<u64>,
    /// Only results of this event (case-insensitive).
    #[param(example = "solo-dance")]
    pub event_code: Option<String>,
    /// Only results of this department. Results of deactivated departments stay listed.
    #[param(example = 1)]
    pub department_id: Option<i32>,
    /// Sort field: `created_at` (default), `position`, `mark`.
    #[param(example = "created_at")]
    pub sort_by: Option<String>,
    /// Sort direction: `asc` or `desc` (default). Anything else is rejected.
    #[param(example = "desc")]
    pub sort_order: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ScoreResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub category: Category,
    #[schema(example = "asha menon")]
    pub name: String,
    #[schema(example = "a102")]
    pub participant_code: String,
    #[schema(example = "solo-dance")]
    pub event_code: String,
    #[schema(example = 10)]
    pub mark: i32,
    #[schema(example = 1)]
    pub position: i32,
    #[schema(example = 1)]
    pub department_id: i32,
    /// Null if the department row no longer exists.
    #[schema(example = "cse")]
    pub department_code: Option<String>,
    #[schema(example = "Computer Science")]
    pub department_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScoreResponse {
    pub fn new(m: score::Model, dept: Option<&department::Model>) -> Self {
        Self {
            id: m.id,
            category: m.category,
            name: m.name,
            participant_code: m.participant_code,
            event_code: m.event_code,
            mark: m.mark,
            position: m.position,
            department_id: m.department_id,
            department_code: dept.map(|d| d.code.clone()),
            department_name: dept.map(|d| d.name.clone()),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ScoreListResponse {
    pub data: Vec<ScoreResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BulkAddScoresResponse {
    /// Stored records, in request order.
    pub created: Vec<ScoreResponse>,
}

fn validate_codes(participant_code: &str, event_code: &str) -> Result<(), AppError> {
    validate_optional_code(participant_code, "Participant code", MAX_PARTICIPANT_CODE_LEN)?;
    if event_code.trim().chars().count() > MAX_EVENT_CODE_LEN {
        return Err(AppError::Validation(format!(
            "Event code must be at most {MAX_EVENT_CODE_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_score_entry(entry: &ScoreEntryRequest) -> Result<(), AppError> {
    validate_text(&entry.name, "Name", MAX_NAME_LEN)?;
    validate_codes(&entry.participant_code, &entry.event_code)?;
    validate_non_negative(entry.mark, "Mark")?;
    if let Some(position) = entry.position {
        validate_non_negative(position, "Position")?;
    }
    Ok(())
}

pub fn validate_bulk_add_scores(req: &BulkAddScoresRequest) -> Result<(), AppError> {
    validate_batch_len(req.participants.len(), "participants", MAX_BATCH)?;
    for (index, entry) in req.participants.iter().enumerate() {
        validate_score_entry(entry).map_err(|e| match e {
            AppError::Validation(msg) => {
                AppError::Validation(format!("participants[{index}]: {msg}"))
            }
            other => other,
        })?;
    }
    Ok(())
}

pub fn validate_update_score(req: &UpdateScoreRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_text(name, "Name", MAX_NAME_LEN)?;
    }
    validate_codes(
        req.participant_code.as_deref().unwrap_or_default(),
        req.event_code.as_deref().unwrap_or_default(),
    )?;
    if let Some(mark) = req.mark {
        validate_non_negative(mark, "Mark")?;
    }
    if let Some(position) = req.position {
        validate_non_negative(position, "Position")?;
    }
    Ok(())
}
