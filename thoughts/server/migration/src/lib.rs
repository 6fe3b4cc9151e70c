pub use sea_orm_migration::prelude::*;

mod m20261014_000001_create_todo_table;
mod m20261014_000002_create_note_table;
mod m20261014_000003_add_tag_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261014_000001_create_todo_table::Migration),
            Box::new(m20261014_000002_create_note_table::Migration),
            Box::new(m20261014_000003_add_tag_indexes::Migration),
        ]
    }
}
