use rusqlite::{params, Connection, OptionalExtension};
use std::sync::MutexGuard;

use crate::error::Result;
use crate::models::Author;

use super::Repository;

pub trait AuthorRepository: Repository<Entity = Author, Id = str> {
    fn count(&self) -> Result<usize>;
}

pub struct SqliteAuthorRepository<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl<'a> SqliteAuthorRepository<'a> {
    pub fn new(conn: MutexGuard<'a, Connection>) -> Self {
        Self { conn }
    }

    fn row_to_author(row: &rusqlite::Row) -> rusqlite::Result<Author> {
        Ok(Author {
            id: row.get(0)?,
            name: row.get(1)?,
            personal_name: row.get(2)?,
        })
    }
}

impl<'a> Repository for SqliteAuthorRepository<'a> {
    type Entity = Author;
    type Id = str;

    fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>> {
        let author = self
            .conn
            .query_row(
                "SELECT author_id, author_name, personal_name FROM author_by_id WHERE author_id = ?1",
                params![id],
                Self::row_to_author,
            )
            .optional()?;
        Ok(author)
    }

    fn save(&self, author: &Self::Entity) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO author_by_id (author_id, author_name, personal_name)
             VALUES (?1, ?2, ?3)",
            params![author.id, author.name, author.personal_name],
        )?;
        Ok(())
    }
}

impl<'a> AuthorRepository for SqliteAuthorRepository<'a> {
    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM author_by_id", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
