use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::record::{ListFilter, ListQuery, RecordDraft, parse_record_id};
use crate::note::{Note, NoteService};
use crate::web::{AppState, WebError};

const NOTE_LIST_PATH: &str = "/notes";

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tag: String,
}

impl NoteForm {
    fn draft(&self) -> Option<RecordDraft> {
        RecordDraft::new(&self.title, &self.description, &self.tag)
    }
}

#[derive(Template)]
#[template(path = "notes/list.html")]
struct NoteListTemplate {
    notes: Vec<Note>,
    tags: Vec<String>,
    active: ListFilter,
}

#[derive(Template)]
#[template(path = "notes/edit.html")]
struct EditNoteTemplate {
    note: Note,
}

impl EditNoteTemplate {
    pub fn new(note: Note) -> Self {
        Self { note }
    }
}

/// Handler for GET /notes that lists notes with the requested filters applied.
#[tracing::instrument(skip(state))]
async fn note_list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, WebError> {
    let note_service = NoteService::new(&state.db);
    let active = ListFilter::from(query);
    let notes = note_service.list(&active).await?;
    let tags = note_service.distinct_tags().await?;

    let template = NoteListTemplate {
        notes,
        tags,
        active,
    };
    template.render().map(Html).map_err(WebError::from)
}

/// Handler for creating a new note via POST request.
/// A blank title is dropped without feedback.
#[tracing::instrument(skip(state))]
async fn create_note_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect, WebError> {
    if let Some(draft) = form.draft() {
        NoteService::new(&state.db).create(draft).await?;
    }
    Ok(Redirect::to(NOTE_LIST_PATH))
}

/// Handler for serving the edit note form.
#[tracing::instrument(skip(state))]
async fn edit_note_form_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_record_id(&id)?;
    let note = NoteService::new(&state.db).get(id).await?;
    EditNoteTemplate::new(note)
        .render()
        .map(Html)
        .map_err(WebError::from)
}

/// Handler for updating a note via POST request.
/// A blank title leaves the note untouched and shows the form again.
#[tracing::instrument(skip(state))]
async fn update_note_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<NoteForm>,
) -> Result<Response, WebError> {
    let id = parse_record_id(&id)?;
    let note_service = NoteService::new(&state.db);

    match form.draft() {
        Some(draft) => {
            note_service.update(id, draft).await?;
            Ok(Redirect::to(NOTE_LIST_PATH).into_response())
        }
        None => {
            let note = note_service.get(id).await?;
            let html = EditNoteTemplate::new(note).render()?;
            Ok(Html(html).into_response())
        }
    }
}

/// Handler for deleting a note via POST request.
#[tracing::instrument(skip(state))]
async fn delete_note_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let id = parse_record_id(&id)?;
    NoteService::new(&state.db).delete(id).await?;
    Ok(Redirect::to(NOTE_LIST_PATH))
}

/// Creates and returns the note router with all note page routes.
pub fn create_note_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            NOTE_LIST_PATH,
            get(note_list_handler).post(create_note_handler),
        )
        .route(
            "/notes/edit/{id}",
            get(edit_note_form_handler).post(update_note_handler),
        )
        .route("/notes/delete/{id}", post(delete_note_handler))
        .with_state(state)
}
