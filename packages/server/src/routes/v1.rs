use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/departments", department_routes())
        .nest("/scores", score_routes())
        .nest("/standings", standings_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn department_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::department::list_departments,
            handlers::department::create_department
        ))
        .routes(routes!(
            handlers::department::get_department,
            handlers::department::update_department,
            handlers::department::delete_department
        ))
}

fn score_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::score::list_scores,
            handlers::score::bulk_add_scores
        ))
        .routes(routes!(
            handlers::score::get_score,
            handlers::score::update_score,
            handlers::score::delete_score
        ))
}

fn standings_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::standings::standings))
        .routes(routes!(handlers::standings::point_table))
}
