pub mod config;
pub mod entities;
pub mod note;
pub mod record;
pub mod todo;
pub mod web;
