use std::collections::{BTreeSet, HashMap};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use pointtable_core::Category;
use sea_orm::*;
use sea_orm::sea_query::Expr;
use tracing::instrument;

use crate::entity::{department, score};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::{AppJson, AppPath, AppQuery};
use crate::models::score::*;
use crate::models::shared::{Pagination, normalize_code, page_bounds, page_offset};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/{category}",
    tag = "Scores",
    operation_id = "bulkAddScores",
    summary = "Submit results for a category",
    description = "Stores a batch of 1-500 participant results in one category. Text fields are trimmed and lowercased. Every referenced department must exist and be active. The batch is stored atomically: any invalid entry rejects the whole request. Requires `score:manage` permission.",
    params(("category" = Category, Path, description = "`arts` or `sports`")),
    request_body = BulkAddScoresRequest,
    responses(
        (status = 201, description = "Results stored", body = BulkAddScoresResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(category = %category, count = payload.participants.len()))]
pub async fn bulk_add_scores(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath(category): AppPath<Category>,
    AppJson(payload): AppJson<BulkAddScoresRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("score:manage")?;
    validate_bulk_add_scores(&payload)?;

    let txn = state.db.begin().await?;

    let wanted: BTreeSet<i32> = payload.participants.iter().map(|p| p.department_id).collect();
    let departments: HashMap<i32, department::Model> = department::Entity::find()
        .filter(department::Column::Id.is_in(wanted))
        .filter(department::Column::IsActive.eq(true))
        .all(&txn)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    if let Some((index, entry)) = payload
        .participants
        .iter()
        .enumerate()
        .find(|(_, p)| !departments.contains_key(&p.department_id))
    {
        return Err(AppError::Validation(format!(
            "participants[{index}]: department {} does not exist or is inactive",
            entry.department_id
        )));
    }

    let now = chrono::Utc::now();
    let mut created = Vec::with_capacity(payload.participants.len());
    for entry in payload.participants {
        let model = score::ActiveModel {
            category: Set(category),
            name: Set(normalize_code(&entry.name)),
            participant_code: Set(normalize_code(&entry.participant_code)),
            event_code: Set(normalize_code(&entry.event_code)),
            mark: Set(entry.mark),
            position: Set(entry.position.unwrap_or(0)),
            is_active: Set(true),
            department_id: Set(entry.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        let dept = departments.get(&model.department_id);
        created.push(ScoreResponse::new(model, dept));
    }

    txn.commit().await?;

    tracing::info!(
        count = created.len(),
        user_id = auth_user.user_id,
        "Scores recorded"
    );

    Ok((StatusCode::CREATED, Json(BulkAddScoresResponse { created })))
}

#[utoipa::path(
    get,
    path = "/{category}",
    tag = "Scores",
    operation_id = "listScores",
    summary = "List results in a category",
    description = "Returns a paginated list of active results with their department. Filter by `event_code` (case-insensitive) or `department_id`. Sort by `created_at` (default, desc), `position`, or `mark`. Public.",
    params(("category" = Category, Path, description = "`arts` or `sports`"), ScoreListQuery),
    responses(
        (status = 200, description = "Results", body = ScoreListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(category = %category))]
pub async fn list_scores(
    State(state): State<AppState>,
    AppPath(category): AppPath<Category>,
    AppQuery(query): AppQuery<ScoreListQuery>,
) -> Result<Json<ScoreListResponse>, AppError> {
    let (page, per_page) = page_bounds(query.page, query.per_page);

    let mut select = score::Entity::find()
        .filter(score::Column::Category.eq(category))
        .filter(score::Column::IsActive.eq(true));

    if let Some(ref event_code) = query.event_code {
        let event_code = normalize_code(event_code);
        if !event_code.is_empty() {
            select = select.filter(score::Column::EventCode.eq(event_code));
        }
    }
    if let Some(department_id) = query.department_id {
        select = select.filter(score::Column::DepartmentId.eq(department_id));
    }

    let sort_by = query.sort_by.as_deref().unwrap_or("created_at");
    let sort_order = match query.sort_order.as_deref() {
        None | Some("desc") => Order::Desc,
        Some("asc") => Order::Asc,
        Some(_) => {
            return Err(AppError::Validation(
                "sort_order must be one of: asc, desc".into(),
            ));
        }
    };
    let sort_column = match sort_by {
        "created_at" => score::Column::CreatedAt,
        "position" => score::Column::Position,
        "mark" => score::Column::Mark,
        _ => {
            return Err(AppError::Validation(
                "sort_by must be one of: created_at, position, mark".into(),
            ));
        }
    };

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let rows = select
        .order_by(sort_column, sort_order.clone())
        .order_by(score::Column::Id, sort_order)
        .find_also_related(department::Entity)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    let data = rows
        .into_iter()
        .map(|(s, d)| ScoreResponse::new(s, d.as_ref()))
        .collect();

    Ok(Json(ScoreListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/{category}/{id}",
    tag = "Scores",
    operation_id = "getScore",
    summary = "Get one result",
    params(
        ("category" = Category, Path, description = "`arts` or `sports`"),
        ("id" = i32, Path, description = "Score ID"),
    ),
    responses(
        (status = 200, description = "Result", body = ScoreResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Missing or deleted (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(category = %category, id))]
pub async fn get_score(
    State(state): State<AppState>,
    AppPath((category, id)): AppPath<(Category, i32)>,
) -> Result<Json<ScoreResponse>, AppError> {
    let (model, dept) = score::Entity::find_by_id(id)
        .filter(score::Column::Category.eq(category))
        .filter(score::Column::IsActive.eq(true))
        .find_also_related(department::Entity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Score not found".into()))?;

    Ok(Json(ScoreResponse::new(model, dept.as_ref())))
}

#[utoipa::path(
    patch,
    path = "/{category}/{id}",
    tag = "Scores",
    operation_id = "updateScore",
    summary = "Correct a result",
    description = "Partially updates a result using PATCH semantics with the same validation as submission. Moving a result to another department requires that department to be active. Requires `score:manage` permission.",
    params(
        ("category" = Category, Path, description = "`arts` or `sports`"),
        ("id" = i32, Path, description = "Score ID"),
    ),
    request_body = UpdateScoreRequest,
    responses(
        (status = 200, description = "Result updated", body = ScoreResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Missing or deleted (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(category = %category, id))]
pub async fn update_score(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath((category, id)): AppPath<(Category, i32)>,
    AppJson(payload): AppJson<UpdateScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    auth_user.require_permission("score:manage")?;
    validate_update_score(&payload)?;

    let txn = state.db.begin().await?;
    let existing = find_active_score(&txn, category, id).await?;

    if payload == UpdateScoreRequest::default() {
        let dept = department::Entity::find_by_id(existing.department_id)
            .one(&txn)
            .await?;
        txn.commit().await?;
        return Ok(Json(ScoreResponse::new(existing, dept.as_ref())));
    }

    let department_id = payload.department_id.unwrap_or(existing.department_id);
    let dept = department::Entity::find_by_id(department_id).one(&txn).await?;
    if payload.department_id.is_some() && !dept.as_ref().is_some_and(|d| d.is_active) {
        return Err(AppError::Validation(format!(
            "Department {department_id} does not exist or is inactive"
        )));
    }

    let mut active: score::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(normalize_code(name));
    }
    if let Some(ref participant_code) = payload.participant_code {
        active.participant_code = Set(normalize_code(participant_code));
    }
    if let Some(ref event_code) = payload.event_code {
        active.event_code = Set(normalize_code(event_code));
    }
    if let Some(mark) = payload.mark {
        active.mark = Set(mark);
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
    }
    if let Some(department_id) = payload.department_id {
        active.department_id = Set(department_id);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(id, user_id = auth_user.user_id, "Score updated");
    Ok(Json(ScoreResponse::new(model, dept.as_ref())))
}

#[utoipa::path(
    delete,
    path = "/{category}/{id}",
    tag = "Scores",
    operation_id = "deleteScore",
    summary = "Withdraw a result",
    description = "Soft-deletes a result so it no longer counts toward standings. Requires `score:manage` permission.",
    params(
        ("category" = Category, Path, description = "`arts` or `sports`"),
        ("id" = i32, Path, description = "Score ID"),
    ),
    responses(
        (status = 204, description = "Result withdrawn"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Missing or already deleted (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(category = %category, id))]
pub async fn delete_score(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppPath((category, id)): AppPath<(Category, i32)>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("score:manage")?;

    let result = score::Entity::update_many()
        .col_expr(score::Column::IsActive, Expr::value(false))
        .col_expr(score::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(score::Column::Id.eq(id))
        .filter(score::Column::Category.eq(category))
        .filter(score::Column::IsActive.eq(true))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Score not found".into()));
    }

    tracing::info!(id, user_id = auth_user.user_id, "Score withdrawn");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_active_score<C: ConnectionTrait>(
    db: &C,
    category: Category,
    id: i32,
) -> Result<score::Model, AppError> {
    score::Entity::find_by_id(id)
        .filter(score::Column::Category.eq(category))
        .filter(score::Column::IsActive.eq(true))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Score not found".into()))
}
