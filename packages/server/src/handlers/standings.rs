use axum::Json;
use axum::extract::State;
use pointtable_core::{Category, CategoryPoints, category_aggregate, compute_standings};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::{AppPath, AppQuery};
use crate::models::standings::{StandingsQuery, StandingsResponse};
use crate::state::AppState;
use crate::store::DbScoreStore;

#[utoipa::path(
    get,
    path = "/{category}",
    tag = "Standings",
    operation_id = "getPointTable",
    summary = "Per-category point table",
    description = "Sums active results of active departments in one category. Ordered by points descending, then department name. Departments without results in the category are absent. Public.",
    params(("category" = Category, Path, description = "`arts` or `sports`")),
    responses(
        (status = 200, description = "Point table", body = Vec<CategoryPoints>),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Score store unreachable (AGGREGATION_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(category = %category))]
pub async fn point_table(
    State(state): State<AppState>,
    AppPath(category): AppPath<Category>,
) -> Result<Json<Vec<CategoryPoints>>, AppError> {
    let store = DbScoreStore::new(state.db.clone());
    let aggregate = category_aggregate(&store, category).await?;
    Ok(Json(aggregate.ranked()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Standings",
    operation_id = "getStandings",
    summary = "Combined department standings",
    description = "Merges both categories per department (missing side counts as 0), ranks by the requested view and reports each department's share of the leader's points. Public.",
    params(StandingsQuery),
    responses(
        (status = 200, description = "Ranked standings", body = StandingsResponse),
        (status = 400, description = "Unknown view (VALIDATION_ERROR)", body = ErrorBody),
        (status = 503, description = "Score store unreachable (AGGREGATION_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn standings(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<StandingsQuery>,
) -> Result<Json<StandingsResponse>, AppError> {
    let view = query.view.unwrap_or_default();
    let store = DbScoreStore::new(state.db.clone());
    let palette = state.config.standings.palette();

    let ranked = compute_standings(&store, view, &palette).await?;
    tracing::debug!(%view, departments = ranked.len(), "Standings computed");

    Ok(Json(StandingsResponse::new(view, ranked)))
}
