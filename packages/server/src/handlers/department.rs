use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use sea_orm::sea_query::Expr;
use tracing::instrument;

use crate::entity::department;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::{AppJson, AppPath};
use crate::models::department::*;
use crate::models::shared::normalize_code;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Departments",
    operation_id = "listDepartments",
    summary = "List active departments",
    description = "Returns every active department ordered by name. Public.",
    responses(
        (status = 200, description = "Active departments", body = Vec<DepartmentResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentResponse>>, AppError> {
    let departments = department::Entity::find()
        .filter(department::Column::IsActive.eq(true))
        .order_by_asc(department::Column::Name)
        .order_by_asc(department::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        departments
            .into_iter()
            .map(DepartmentResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Departments",
    operation_id = "createDepartment",
    summary = "Create a department",
    description = "Creates a department. The code is trimmed and lowercased and must be unique, including against deactivated departments. Requires `department:manage` permission.",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Code already used (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(code = %payload.code))]
pub async fn create_department(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDepartmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("department:manage")?;
    validate_create_department(&payload)?;

    let code = normalize_code(&payload.code);
    ensure_code_available(&state.db, &code, None).await?;

    let now = chrono::Utc::now();
    let model = department::ActiveModel {
        code: Set(code.clone()),
        name: Set(payload.name.trim().to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| map_code_conflict(e, &code))?;

    tracing::info!(id = model.id, user_id = auth_user.user_id, "Department created");

    Ok((StatusCode::CREATED, Json(DepartmentResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Departments",
    operation_id = "getDepartment",
    summary = "Get an active department",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = DepartmentResponse),
        (status = 404, description = "Missing or deactivated (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_department(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<DepartmentResponse>, AppError> {
    let model = find_department(&state.db, id).await?;
    if !model.is_active {
        return Err(AppError::NotFound("Department not found".into()));
    }
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Departments",
    operation_id = "updateDepartment",
    summary = "Update a department",
    description = "Partially updates a department using PATCH semantics, including deactivated ones so they can be restored with `is_active: true`. Requires `department:manage` permission. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Department ID")),
    request_body = UpdateDepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = DepartmentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Department not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Code already used (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_department(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateDepartmentRequest>,
) -> Result<Json<DepartmentResponse>, AppError> {
    auth_user.require_permission("department:manage")?;
    validate_update_department(&payload)?;

    if payload == UpdateDepartmentRequest::default() {
        let existing = find_department(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_department(&txn, id).await?;
    let mut active: department::ActiveModel = existing.into();

    let mut new_code = None;
    if let Some(ref code) = payload.code {
        let code = normalize_code(code);
        ensure_code_available(&txn, &code, Some(id)).await?;
        active.code = Set(code.clone());
        new_code = Some(code);
    }
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await.map_err(|e| match new_code {
        Some(ref code) => map_code_conflict(e, code),
        None => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Departments",
    operation_id = "deleteDepartment",
    summary = "Deactivate a department",
    description = "Soft-deletes a department. Its scores stay stored but stop counting toward standings. Requires `department:manage` permission.",
    params(("id" = i32, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deactivated"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Missing or already deactivated (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_department(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("department:manage")?;

    let result = department::Entity::update_many()
        .col_expr(department::Column::IsActive, Expr::value(false))
        .col_expr(department::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(department::Column::Id.eq(id))
        .filter(department::Column::IsActive.eq(true))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Department not found".into()));
    }

    tracing::info!(id, user_id = auth_user.user_id, "Department deactivated");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn find_department<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<department::Model, AppError> {
    department::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Department not found".into()))
}

async fn ensure_code_available<C: ConnectionTrait>(
    db: &C,
    code: &str,
    except_id: Option<i32>,
) -> Result<(), AppError> {
    let mut select = department::Entity::find().filter(department::Column::Code.eq(code));
    if let Some(id) = except_id {
        select = select.filter(department::Column::Id.ne(id));
    }
    if select.one(db).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Department code '{code}' is already used"
        )));
    }
    Ok(())
}

fn map_code_conflict(err: DbErr, code: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Department code race: unique constraint caught on write");
            AppError::Conflict(format!("Department code '{code}' is already used"))
        }
        _ => AppError::from(err),
    }
}
