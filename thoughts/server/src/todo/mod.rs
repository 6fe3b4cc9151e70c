use crate::entities::todo;
use crate::record::{self, ListFilter, RecordColumns, RecordDraft, RecordError, TitleMatch};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

pub mod api;
pub mod web;

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Todo {
    id: i32,
    title: String,
    comments: Option<String>,
    tag: Option<String>,
    created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(
        id: i32,
        title: String,
        comments: Option<String>,
        tag: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            comments,
            tag,
            created_at,
        }
    }

    /// Returns the ID of the todo.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the title of the todo.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the comments of the todo, if any.
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Returns the tag of the todo, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns when the todo was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn created_at_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl From<todo::Model> for Todo {
    fn from(model: todo::Model) -> Self {
        Todo::new(
            model.id,
            model.title,
            model.comments,
            model.tag,
            model.created_at,
        )
    }
}

const COLUMNS: RecordColumns<todo::Column> = RecordColumns {
    id: todo::Column::Id,
    title: todo::Column::Title,
    tag: todo::Column::Tag,
    created_at: todo::Column::CreatedAt,
};

pub struct TodoService<'a> {
    db: &'a DatabaseConnection,
}

impl TodoService<'_> {
    pub fn new(db: &DatabaseConnection) -> TodoService<'_> {
        TodoService { db }
    }

    /// Creates a new todo stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `draft` - The trimmed title, comments and tag.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Todo` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, draft: RecordDraft) -> Result<Todo, RecordError> {
        let (title, comments, tag) = draft.into_parts();
        let active_model = todo::ActiveModel {
            title: ActiveValue::Set(title),
            comments: ActiveValue::Set(comments),
            tag: ActiveValue::Set(tag),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        tracing::info!("Created todo {}", created_model.id);
        Ok(Todo::from(created_model))
    }

    /// Retrieves a todo by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Todo, RecordError> {
        let model = todo::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(RecordError::NotFound(id))?;
        Ok(Todo::from(model))
    }

    /// Replaces the title, comments and tag of a todo. The creation time is kept.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the todo to edit.
    /// * `draft` - The new field values.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Todo` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i32, draft: RecordDraft) -> Result<Todo, RecordError> {
        let todo_to_update = todo::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(RecordError::NotFound(id))?;

        let (title, comments, tag) = draft.into_parts();
        let mut active_model: todo::ActiveModel = todo_to_update.into();
        active_model.title = ActiveValue::Set(title);
        active_model.comments = ActiveValue::Set(comments);
        active_model.tag = ActiveValue::Set(tag);
        let updated_model = active_model.update(self.db).await?;

        tracing::info!("Updated todo {}", id);
        Ok(Todo::from(updated_model))
    }

    /// Deletes a todo by its ID.
    ///
    /// # Returns
    ///
    /// A `Result` containing the deleted `Todo` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Todo, RecordError> {
        let todo_to_delete = todo::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(RecordError::NotFound(id))?;

        let todo_copy = Todo::from(todo_to_delete);
        todo::Entity::delete_by_id(id).exec(self.db).await?;
        tracing::info!("Deleted todo {}", id);
        Ok(todo_copy)
    }

    /// Lists the todos matching the filter.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Todo>, RecordError> {
        let todos = record::filtered_select::<todo::Entity>(COLUMNS, filter)
            .all(self.db)
            .await?
            .into_iter()
            .map(Todo::from)
            .collect();
        Ok(todos)
    }

    /// Returns every tag in use, independent of any listing filter.
    #[tracing::instrument(skip(self))]
    pub async fn distinct_tags(&self) -> Result<Vec<String>, RecordError> {
        let tags = record::distinct_tags::<todo::Entity, _>(self.db, COLUMNS).await?;
        Ok(tags)
    }

    /// Autocomplete lookup over todo titles.
    #[tracing::instrument(skip(self))]
    pub async fn search_titles(&self, query: &str) -> Result<Vec<TitleMatch>, RecordError> {
        let matches = record::title_matches::<todo::Entity, _>(self.db, COLUMNS, query).await?;
        Ok(matches)
    }
}
