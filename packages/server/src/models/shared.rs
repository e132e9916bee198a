use serde::Serialize;

use crate::error::AppError;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
}

/// Trim and case-fold an identifier for storage.
pub fn normalize_code(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Validate a trimmed free-text field (1-`max` Unicode characters).
pub fn validate_text(value: &str, field: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate a code-like field: may be empty, at most `max` characters, no whitespace inside.
pub fn validate_optional_code(value: &str, field: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(AppError::Validation(format!(
            "{field} must not contain whitespace"
        )));
    }
    Ok(())
}

/// Validate a non-negative integer field.
pub fn validate_non_negative(value: i32, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::Validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

/// Validate the size of a batch (non-empty, at most `max`).
pub fn validate_batch_len(len: usize, name: &str, max: usize) -> Result<(), AppError> {
    if len == 0 {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }
    if len > max {
        return Err(AppError::Validation(format!("Too many {name}: max {max}")));
    }
    Ok(())
}

/// Resolve `page`/`per_page` query values to clamped numbers.
pub fn page_bounds(page: Option<u64>, per_page: Option<u64>) -> (u64, u64) {
    let page = Ord::max(page.unwrap_or(1), 1);
    let per_page = per_page.unwrap_or(50).clamp(1, 200);
    (page, per_page)
}

/// Row offset of `page`, saturating at the largest offset SQL accepts.
pub fn page_offset(page: u64, per_page: u64) -> u64 {
    page.saturating_sub(1)
        .saturating_mul(per_page)
        .min(i64::MAX as u64)
}
