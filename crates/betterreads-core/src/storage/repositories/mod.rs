mod author_repository;
mod book_repository;

pub use author_repository::{AuthorRepository, SqliteAuthorRepository};
pub use book_repository::{BookRepository, SqliteBookRepository};

use crate::error::Result;

/// Keyed store operations shared by every entity table.
pub trait Repository {
    type Entity;
    type Id: ?Sized;

    fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>>;
    /// Insert-or-replace by primary key.
    fn save(&self, entity: &Self::Entity) -> Result<()>;
}
