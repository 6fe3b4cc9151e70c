use crate::record::TitleMatch;
use crate::note::NoteService;
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

/// Handler for GET /api/search_notes - Returns the notes whose title contains `q`.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/search_notes",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive title substring; blank returns no matches")
    ),
    responses(
        (status = 200, description = "Matching notes, oldest first", body = Vec<TitleMatch>),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Notes"
)]
pub async fn search_notes_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Vec<TitleMatch>>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = NoteService::new(&state.db);

    match service.search_titles(&query.q).await {
        Ok(matches) => Ok(Json(matches)),
        Err(err) => {
            tracing::error!("Failed to search notes: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to search notes".to_string(),
                )),
            ))
        }
    }
}

/// Creates and returns the note API router.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search_notes", get(search_notes_handler))
        .with_state(state)
}
