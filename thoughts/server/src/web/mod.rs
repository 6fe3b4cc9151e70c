use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::note::web::create_note_router;
use crate::record::RecordError;
use crate::todo::web::create_todo_router;

pub mod api;

/// Shared state handed to every router. Built once at startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }
}

/// Custom error type for web handler operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Represents an error during template rendering.
    /// The specific `askama::Error` is captured as the source of this error.
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
    /// Represents a failed record store operation.
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, user_facing_error_message) = match &self {
            WebError::Record(RecordError::NotFound(_) | RecordError::InvalidId(_)) => (
                StatusCode::NOT_FOUND,
                "The record you are looking for does not exist.",
            ),
            _ => {
                tracing::error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred while processing your request. Please try again later.",
                )
            }
        };

        let error_template = ErrorPageTemplate::new(status_code, user_facing_error_message);
        let Ok(rendered) = error_template.render() else {
            return status_code.into_response();
        };

        (status_code, Html(rendered)).into_response()
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPageTemplate {
    status: u16,
    reason: &'static str,
    message: &'static str,
}

impl ErrorPageTemplate {
    pub fn new(status_code: StatusCode, message: &'static str) -> Self {
        Self {
            status: status_code.as_u16(),
            reason: status_code.canonical_reason().unwrap_or("Error"),
            message,
        }
    }
}

/// Builds the application router around an already migrated database.
pub fn create_app(db: DatabaseConnection) -> Router {
    let state = Arc::new(AppState::new(db));

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_check_handler))
        .merge(create_todo_router(state.clone()))
        .merge(create_note_router(state.clone()))
        .merge(api::create_api_router(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let db = Database::connect(&config.db_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let server_address = config.server_address();
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    axum::serve(listener, create_app(db)).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn index_handler() -> Redirect {
    Redirect::to("/todo")
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
