use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const IDX_TODO_TAG: &str = "idx-todo-tag";
const IDX_NOTE_TAG: &str = "idx-note-tag";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(IDX_TODO_TAG)
                    .table(Todo::Table)
                    .col(Todo::Tag)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTE_TAG)
                    .table(Note::Table)
                    .col(Note::Tag)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(IDX_NOTE_TAG).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name(IDX_TODO_TAG).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Todo {
    Table,
    Tag,
}

#[derive(DeriveIden)]
enum Note {
    Table,
    Tag,
}
