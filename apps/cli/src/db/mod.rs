//! SQLite collection written into a package.

pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::{CollectionRepository, NoteRepository, SqliteRepository};
