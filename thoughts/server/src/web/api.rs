use std::sync::Arc;

use axum::{Router, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::record::TitleMatch;
use crate::web::AppState;

/// Standard error payload returned by the JSON API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerErrorResponse {
    /// Human readable description of the failure
    message: String,
}

impl ServerErrorResponse {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

/// Query parameters of the autocomplete endpoints.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LookupQuery {
    /// Substring to look for in record titles
    #[serde(default)]
    pub q: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::todo::api::search_todo_handler,
        crate::note::api::search_notes_handler,
    ),
    components(schemas(TitleMatch, ServerErrorResponse)),
    tags(
        (name = "Todo", description = "Todo title lookup"),
        (name = "Notes", description = "Note title lookup"),
    )
)]
pub struct ApiDoc;

/// Handler for GET /api/openapi.json
#[tracing::instrument]
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(state: Arc<AppState>) -> Router {
    let todo_router = crate::todo::api::create_api_router(state.clone());
    let note_router = crate::note::api::create_api_router(state);
    let api_routes = todo_router
        .merge(note_router)
        .route("/openapi.json", get(openapi_handler));
    Router::new().nest("/api", api_routes)
}
