use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::MutexGuard;

use crate::error::Result;
use crate::models::Book;

use super::Repository;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait BookRepository: Repository<Entity = Book, Id = str> {
    fn count(&self) -> Result<usize>;
}

pub struct SqliteBookRepository<'a> {
    conn: MutexGuard<'a, Connection>,
}

impl<'a> SqliteBookRepository<'a> {
    pub fn new(conn: MutexGuard<'a, Connection>) -> Self {
        Self { conn }
    }

    fn row_to_book(row: &rusqlite::Row) -> rusqlite::Result<Book> {
        let published: Option<String> = row.get(3)?;
        let published_date = published
            .map(|s| {
                NaiveDate::parse_from_str(&s, DATE_FORMAT)
                    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))
            })
            .transpose()?;

        Ok(Book {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            published_date,
            cover_ids: json_list(row, 4)?,
            author_ids: json_list(row, 5)?,
            author_names: json_list(row, 6)?,
        })
    }
}

fn json_list(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl<'a> Repository for SqliteBookRepository<'a> {
    type Entity = Book;
    type Id = str;

    fn find_by_id(&self, id: &Self::Id) -> Result<Option<Self::Entity>> {
        let book = self
            .conn
            .query_row(
                "SELECT book_id, book_name, book_description, published_date,
                        cover_ids, author_ids, author_names
                 FROM book_by_id WHERE book_id = ?1",
                params![id],
                Self::row_to_book,
            )
            .optional()?;
        Ok(book)
    }

    fn save(&self, book: &Self::Entity) -> Result<()> {
        let cover_ids_json = serde_json::to_string(&book.cover_ids)?;
        let author_ids_json = serde_json::to_string(&book.author_ids)?;
        let author_names_json = serde_json::to_string(&book.author_names)?;
        let published = book.published_date.map(|d| d.format(DATE_FORMAT).to_string());

        self.conn.execute(
            "INSERT OR REPLACE INTO book_by_id
                (book_id, book_name, book_description, published_date,
                 cover_ids, author_ids, author_names)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                book.id,
                book.name,
                book.description.as_deref(),
                published,
                cover_ids_json,
                author_ids_json,
                author_names_json,
            ],
        )?;
        Ok(())
    }
}

impl<'a> BookRepository for SqliteBookRepository<'a> {
    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM book_by_id", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
