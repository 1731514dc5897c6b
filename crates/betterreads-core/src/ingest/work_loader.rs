use std::io::BufRead;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, info};

use super::author_loader::AUTHOR_KEY_PREFIX;
use super::dump::{drain_dump, open_dump, RecordOutcome};
use super::error::RecordError;
use super::fields::{
    as_object, optional_array, optional_object, parse_object, required_object, required_str,
    string_or_default, strip_namespace, JsonObject,
};
use super::report::{LoadReport, Phase};
use super::resolver::{AuthorLookup, AuthorNameResolver};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::models::Book;
use crate::storage::database::Database;

pub const WORK_KEY_PREFIX: &str = "/works/";

/// `created.value` timestamps: `2009-12-11T01:57:19.964652`.
/// The fraction is mandatory and exactly six digits.
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f";

/// Build a [`Book`] from one work record, without author names.
///
/// `key` is required here, unlike on author records. The nested
/// `authors[i].author.key` path is strict as well.
pub fn parse_work(json: &str) -> std::result::Result<Book, RecordError> {
    let obj = parse_object(json)?;

    let key = required_str(&obj, "key", "key")?;
    let id = strip_namespace(key, WORK_KEY_PREFIX);
    if id.is_empty() {
        return Err(RecordError::EmptyId);
    }

    let mut book = Book::new(id);
    book.name = string_or_default(&obj, "title");
    book.description = optional_object(&obj, "description").map(|d| string_or_default(d, "value"));

    if let Some(authors) = optional_array(&obj, "authors") {
        book.author_ids = author_ids(authors)?;
    }
    if let Some(covers) = optional_array(&obj, "covers") {
        book.cover_ids = cover_ids(covers)?;
    }
    if let Some(created) = optional_object(&obj, "created") {
        book.published_date = Some(parse_created(created)?);
    }

    Ok(book)
}

fn author_ids(authors: &[Value]) -> std::result::Result<Vec<String>, RecordError> {
    authors
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let path = format!("authors[{i}]");
            let entry = as_object(entry, &path)?;
            let author = required_object(entry, "author", &format!("{path}.author"))?;
            let key = required_str(author, "key", &format!("{path}.author.key"))?;
            Ok(strip_namespace(key, AUTHOR_KEY_PREFIX).to_string())
        })
        .collect()
}

fn cover_ids(covers: &[Value]) -> std::result::Result<Vec<String>, RecordError> {
    covers
        .iter()
        .enumerate()
        .map(|(i, cover)| match cover {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(RecordError::WrongType {
                path: format!("covers[{i}]"),
                expected: "a string or number",
            }),
        })
        .collect()
}

fn parse_created(created: &JsonObject) -> std::result::Result<NaiveDate, RecordError> {
    let value = string_or_default(created, "value");
    NaiveDateTime::parse_from_str(&value, CREATED_FORMAT)
        .map(|ts| ts.date())
        .map_err(|source| RecordError::InvalidTimestamp { value, source })
}

/// Pair each author id on `book` with its resolved name, in order.
fn resolve_author_names<L: AuthorLookup + ?Sized>(
    book: &mut Book,
    authors: &mut AuthorNameResolver<'_, L>,
) -> Result<()> {
    let ids = std::mem::take(&mut book.author_ids);
    book.author_names.clear();
    for id in ids {
        let name = authors.resolve(&id)?;
        book.push_author(id, name);
    }
    Ok(())
}

/// Stream the work dump at `path` into the book table.
///
/// The author table must already be loaded; names are resolved against it as
/// each line is processed.
pub fn load_works(db: &Database, path: &Path, config: &IngestConfig) -> Result<LoadReport> {
    let reader = open_dump(path)?;
    load_works_from(db, reader, path, config)
}

pub fn load_works_from<R: BufRead>(
    db: &Database,
    reader: R,
    source: &Path,
    config: &IngestConfig,
) -> Result<LoadReport> {
    info!(dump = %source.display(), cache = config.cache_author_names, "loading works");
    let mut authors = AuthorNameResolver::new(db, config.cache_author_names);

    let report = drain_dump(reader, source, Phase::Works, config.progress_interval, |json| {
        let mut book = match parse_work(json) {
            Ok(book) => book,
            Err(err) => return Ok(RecordOutcome::Skipped(err)),
        };
        resolve_author_names(&mut book, &mut authors)?;

        db.upsert_book(&book)?;
        debug!(id = %book.id, name = %book.name, "saved book");
        Ok(RecordOutcome::Saved)
    })?;

    debug!(lookups = authors.lookups(), "author lookups issued");
    Ok(report)
}
