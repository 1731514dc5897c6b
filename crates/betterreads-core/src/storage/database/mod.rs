mod connection;
mod schema;

pub use connection::ConnectionPool;
pub use schema::init_schema;

use std::path::Path;

use crate::error::{LoaderError, Result};
use crate::models::{Author, Book};

use super::repositories::{
    AuthorRepository, BookRepository, Repository, SqliteAuthorRepository, SqliteBookRepository,
};

pub fn open_database(path: &Path) -> Result<ConnectionPool> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let pool = ConnectionPool::open(path)?;
    init_schema(&pool.get_connection())?;
    Ok(pool)
}

pub fn open_in_memory() -> Result<ConnectionPool> {
    let pool = ConnectionPool::open_in_memory()?;
    init_schema(&pool.get_connection())?;
    Ok(pool)
}

/// Store client for the `author_by_id` and `book_by_id` tables.
///
/// Every method takes the connection guard for its own duration only, so a
/// lookup and an upsert can be interleaved freely by one caller.
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let pool = open_database(path)?;
        Ok(Self { pool })
    }

    pub fn open_in_memory() -> Result<Self> {
        let pool = open_in_memory()?;
        Ok(Self { pool })
    }

    pub fn path(&self) -> Option<&str> {
        self.pool.path()
    }

    // ─── Authors ───────────────────────────────────────────

    pub fn upsert_author(&self, author: &Author) -> Result<()> {
        let repo = SqliteAuthorRepository::new(self.pool.get_connection());
        repo.save(author)
    }

    pub fn find_author(&self, id: &str) -> Result<Option<Author>> {
        let repo = SqliteAuthorRepository::new(self.pool.get_connection());
        repo.find_by_id(id)
    }

    pub fn get_author(&self, id: &str) -> Result<Author> {
        self.find_author(id)?
            .ok_or_else(|| LoaderError::AuthorNotFound(id.to_string()))
    }

    pub fn count_authors(&self) -> Result<usize> {
        let repo = SqliteAuthorRepository::new(self.pool.get_connection());
        repo.count()
    }

    // ─── Books ─────────────────────────────────────────────

    pub fn upsert_book(&self, book: &Book) -> Result<()> {
        let repo = SqliteBookRepository::new(self.pool.get_connection());
        repo.save(book)
    }

    pub fn find_book(&self, id: &str) -> Result<Option<Book>> {
        let repo = SqliteBookRepository::new(self.pool.get_connection());
        repo.find_by_id(id)
    }

    pub fn get_book(&self, id: &str) -> Result<Book> {
        self.find_book(id)?
            .ok_or_else(|| LoaderError::BookNotFound(id.to_string()))
    }

    pub fn count_books(&self) -> Result<usize> {
        let repo = SqliteBookRepository::new(self.pool.get_connection());
        repo.count()
    }
}
