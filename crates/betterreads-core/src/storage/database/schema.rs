use rusqlite::Connection;

use crate::error::Result;

pub fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        ",
    )?;
    Ok(())
}

/// Two independent key-value tables. No foreign keys: `author_ids` on a book
/// may reference authors that were never loaded.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS author_by_id (
            author_id     TEXT PRIMARY KEY,
            author_name   TEXT NOT NULL DEFAULT '',
            personal_name TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS book_by_id (
            book_id          TEXT PRIMARY KEY,
            book_name        TEXT NOT NULL DEFAULT '',
            book_description TEXT,
            published_date   TEXT,
            cover_ids        TEXT NOT NULL DEFAULT '[]',
            author_ids       TEXT NOT NULL DEFAULT '[]',
            author_names     TEXT NOT NULL DEFAULT '[]'
        );
        ",
    )?;
    Ok(())
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    create_tables(conn)
}
