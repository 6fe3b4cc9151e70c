use crate::entities::note;
use crate::record::{self, ListFilter, RecordColumns, RecordDraft, RecordError, TitleMatch};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

pub mod api;
pub mod web;

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Note {
    id: i32,
    title: String,
    description: Option<String>,
    tag: Option<String>,
    created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(
        id: i32,
        title: String,
        description: Option<String>,
        tag: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            tag,
            created_at,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description of the note, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns when the note was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn created_at_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl From<note::Model> for Note {
    fn from(model: note::Model) -> Self {
        Note::new(
            model.id,
            model.title,
            model.description,
            model.tag,
            model.created_at,
        )
    }
}

const COLUMNS: RecordColumns<note::Column> = RecordColumns {
    id: note::Column::Id,
    title: note::Column::Title,
    tag: note::Column::Tag,
    created_at: note::Column::CreatedAt,
};

pub struct NoteService<'a> {
    db: &'a DatabaseConnection,
}

impl NoteService<'_> {
    pub fn new(db: &DatabaseConnection) -> NoteService<'_> {
        NoteService { db }
    }

    /// Creates a new note stamped with the current time.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, draft: RecordDraft) -> Result<Note, RecordError> {
        let (title, description, tag) = draft.into_parts();
        let active_model = note::ActiveModel {
            title: ActiveValue::Set(title),
            description: ActiveValue::Set(description),
            tag: ActiveValue::Set(tag),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        tracing::info!("Created note {}", created_model.id);
        Ok(Note::from(created_model))
    }

    /// Retrieves a note by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Note, RecordError> {
        let model = note::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(RecordError::NotFound(id))?;
        Ok(Note::from(model))
    }

    /// Replaces the title, description and tag of a note.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i32, draft: RecordDraft) -> Result<Note, RecordError> {
        let note_to_update = note::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(RecordError::NotFound(id))?;

        let (title, description, tag) = draft.into_parts();
        let mut active_model: note::ActiveModel = note_to_update.into();
        active_model.title = ActiveValue::Set(title);
        active_model.description = ActiveValue::Set(description);
        active_model.tag = ActiveValue::Set(tag);
        let updated_model = active_model.update(self.db).await?;

        tracing::info!("Updated note {}", id);
        Ok(Note::from(updated_model))
    }

    /// Deletes a note by its ID, returning what was removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<Note, RecordError> {
        let note_to_delete = note::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(RecordError::NotFound(id))?;

        let note_copy = Note::from(note_to_delete);
        note::Entity::delete_by_id(id).exec(self.db).await?;
        tracing::info!("Deleted note {}", id);
        Ok(note_copy)
    }

    /// Lists the notes matching the filter.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<Note>, RecordError> {
        let notes = record::filtered_select::<note::Entity>(COLUMNS, filter)
            .all(self.db)
            .await?
            .into_iter()
            .map(Note::from)
            .collect();
        Ok(notes)
    }

    /// Returns every tag in use, independent of any listing filter.
    #[tracing::instrument(skip(self))]
    pub async fn distinct_tags(&self) -> Result<Vec<String>, RecordError> {
        let tags = record::distinct_tags::<note::Entity, _>(self.db, COLUMNS).await?;
        Ok(tags)
    }

    /// Autocomplete lookup over note titles.
    #[tracing::instrument(skip(self))]
    pub async fn search_titles(&self, query: &str) -> Result<Vec<TitleMatch>, RecordError> {
        let matches = record::title_matches::<note::Entity, _>(self.db, COLUMNS, query).await?;
        Ok(matches)
    }
}
