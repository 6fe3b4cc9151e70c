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
use crate::todo::{Todo, TodoService};
use crate::web::{AppState, WebError};

const TODO_LIST_PATH: &str = "/todo";

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    title: String,
    #[serde(default)]
    comments: String,
    #[serde(default)]
    tag: String,
}

impl TodoForm {
    fn draft(&self) -> Option<RecordDraft> {
        RecordDraft::new(&self.title, &self.comments, &self.tag)
    }
}

#[derive(Template)]
#[template(path = "todo/list.html")]
struct TodoListTemplate {
    todos: Vec<Todo>,
    tags: Vec<String>,
    active: ListFilter,
}

#[derive(Template)]
#[template(path = "todo/edit.html")]
struct EditTodoTemplate {
    todo: Todo,
}

impl EditTodoTemplate {
    pub fn new(todo: Todo) -> Self {
        Self { todo }
    }
}

/// Handler for GET /todo that lists todos with the requested filters applied.
#[tracing::instrument(skip(state))]
async fn todo_list_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, WebError> {
    let todo_service = TodoService::new(&state.db);
    let active = ListFilter::from(query);
    let todos = todo_service.list(&active).await?;
    let tags = todo_service.distinct_tags().await?;

    let template = TodoListTemplate {
        todos,
        tags,
        active,
    };
    template.render().map(Html).map_err(WebError::from)
}

/// Handler for creating a new todo via POST request.
/// A blank title is dropped without feedback.
#[tracing::instrument(skip(state))]
async fn create_todo_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TodoForm>,
) -> Result<Redirect, WebError> {
    if let Some(draft) = form.draft() {
        TodoService::new(&state.db).create(draft).await?;
    }
    Ok(Redirect::to(TODO_LIST_PATH))
}

/// Handler for serving the edit todo form.
#[tracing::instrument(skip(state))]
async fn edit_todo_form_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let id = parse_record_id(&id)?;
    let todo = TodoService::new(&state.db).get(id).await?;
    EditTodoTemplate::new(todo)
        .render()
        .map(Html)
        .map_err(WebError::from)
}

/// Handler for updating a todo via POST request.
/// A blank title leaves the todo untouched and shows the form again.
#[tracing::instrument(skip(state))]
async fn update_todo_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<TodoForm>,
) -> Result<Response, WebError> {
    let id = parse_record_id(&id)?;
    let todo_service = TodoService::new(&state.db);

    match form.draft() {
        Some(draft) => {
            todo_service.update(id, draft).await?;
            Ok(Redirect::to(TODO_LIST_PATH).into_response())
        }
        None => {
            let todo = todo_service.get(id).await?;
            let html = EditTodoTemplate::new(todo).render()?;
            Ok(Html(html).into_response())
        }
    }
}

/// Handler for deleting a todo via POST request.
#[tracing::instrument(skip(state))]
async fn delete_todo_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    let id = parse_record_id(&id)?;
    TodoService::new(&state.db).delete(id).await?;
    Ok(Redirect::to(TODO_LIST_PATH))
}

/// Creates and returns the todo router with all todo page routes.
pub fn create_todo_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            TODO_LIST_PATH,
            get(todo_list_handler).post(create_todo_handler),
        )
        .route(
            "/todo/edit/{id}",
            get(edit_todo_form_handler).post(update_todo_handler),
        )
        .route("/todo/delete/{id}", post(delete_todo_handler))
        .with_state(state)
}
