use crate::record::TitleMatch;
use crate::todo::TodoService;
use crate::web::AppState;
use crate::web::api::{LookupQuery, ServerErrorResponse};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use std::sync::Arc;

/// Handler for GET /api/search_todo - Returns the todos whose title contains `q`.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/search_todo",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive title substring; blank returns no matches")
    ),
    responses(
        (status = 200, description = "Matching todos, oldest first", body = Vec<TitleMatch>),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Todo"
)]
pub async fn search_todo_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Vec<TitleMatch>>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = TodoService::new(&state.db);

    match service.search_titles(&query.q).await {
        Ok(matches) => Ok(Json(matches)),
        Err(err) => {
            tracing::error!("Failed to search todos: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to search todos".to_string(),
                )),
            ))
        }
    }
}

/// Creates and returns the todo API router.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search_todo", get(search_todo_handler))
        .with_state(state)
}
