use std::io::BufRead;
use std::path::Path;

use tracing::{debug, info};

use super::dump::{drain_dump, open_dump, RecordOutcome};
use super::error::RecordError;
use super::fields::{parse_object, string_or_default, strip_namespace};
use super::report::{LoadReport, Phase};
use crate::config::IngestConfig;
use crate::error::Result;
use crate::models::Author;
use crate::storage::database::Database;

pub const AUTHOR_KEY_PREFIX: &str = "/authors/";

/// Build an [`Author`] from one author record.
///
/// Every field is optional and defaults to `""`; only malformed JSON fails.
pub fn parse_author(json: &str) -> std::result::Result<Author, RecordError> {
    let obj = parse_object(json)?;
    let key = string_or_default(&obj, "key");

    Ok(Author {
        id: strip_namespace(&key, AUTHOR_KEY_PREFIX).to_string(),
        name: string_or_default(&obj, "name"),
        personal_name: string_or_default(&obj, "personal_name"),
    })
}

/// Stream the author dump at `path` into the author table.
pub fn load_authors(db: &Database, path: &Path, config: &IngestConfig) -> Result<LoadReport> {
    let reader = open_dump(path)?;
    load_authors_from(db, reader, path, config)
}

pub fn load_authors_from<R: BufRead>(
    db: &Database,
    reader: R,
    source: &Path,
    config: &IngestConfig,
) -> Result<LoadReport> {
    info!(dump = %source.display(), "loading authors");

    drain_dump(reader, source, Phase::Authors, config.progress_interval, |json| {
        let author = match parse_author(json) {
            Ok(author) if author.id.is_empty() => return Ok(RecordOutcome::Skipped(RecordError::EmptyId)),
            Ok(author) => author,
            Err(err) => return Ok(RecordOutcome::Skipped(err)),
        };

        debug!(id = %author.id, name = %author.name, "saving author");
        db.upsert_author(&author)?;
        Ok(RecordOutcome::Saved)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(db: &Database, dump: &str) -> LoadReport {
        let reader = Cursor::new(dump.as_bytes().to_vec());
        load_authors_from(db, reader, Path::new("authors.txt"), &IngestConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_author_line() {
        let author = parse_author(r#"{"key":"/authors/A1","name":"Jane Doe","personal_name":"J. Doe"}"#).unwrap();
        assert_eq!(author, Author {
            id: "A1".to_string(),
            name: "Jane Doe".to_string(),
            personal_name: "J. Doe".to_string(),
        });
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let author = parse_author(r#"{"key":"/authors/A1","name":42}"#).unwrap();
        assert_eq!(author.id, "A1");
        assert_eq!(author.name, "");
        assert_eq!(author.personal_name, "");

        let keyless = parse_author("{}").unwrap();
        assert_eq!(keyless.id, "");
    }

    #[test]
    fn test_malformed_json_fails_parse() {
        assert!(matches!(parse_author(r#"{"key": "/authors/A1""#), Err(RecordError::Json(_))));
    }

    #[test]
    fn test_load_extracts_after_prefix() {
        let db = Database::open_in_memory().unwrap();
        let report = load(
            &db,
            "xxx{\"key\":\"/authors/A1\",\"name\":\"Jane Doe\",\"personal_name\":\"J. Doe\"}\n",
        );

        assert_eq!(report.saved, 1);
        let author = db.get_author("A1").unwrap();
        assert_eq!(author.name, "Jane Doe");
        assert_eq!(author.personal_name, "J. Doe");
    }

    #[test]
    fn test_missing_name_is_saved_as_empty() {
        let db = Database::open_in_memory().unwrap();
        let report = load(&db, "/type/author\t{\"key\":\"/authors/A2\"}\n");

        assert_eq!(report.skipped, 0);
        assert_eq!(db.get_author("A2").unwrap().name, "");
    }

    #[test]
    fn test_bad_lines_do_not_stop_the_stream() {
        let db = Database::open_in_memory().unwrap();
        let dump = "\
no json at all
x{\"key\":\"/authors/A1\",\"name\":\"Jane\"
x{\"name\":\"Nobody\"}
x{\"key\":\"/authors/A2\",\"name\":\"Second\"}
";
        let report = load(&db, dump);

        assert_eq!(report.lines_read, 4);
        assert_eq!(report.saved, 1);
        assert_eq!(report.skipped, 3);
        assert!(db.find_author("A1").unwrap().is_none());
        assert!(db.find_author("").unwrap().is_none());
        assert_eq!(db.get_author("A2").unwrap().name, "Second");
    }

    #[test]
    fn test_reloading_is_idempotent_and_last_line_wins() {
        let dump = "\
x{\"key\":\"/authors/A1\",\"name\":\"Old Name\"}
x{\"key\":\"/authors/A2\",\"name\":\"Other\"}
x{\"key\":\"/authors/A1\",\"name\":\"New Name\"}
";
        let db = Database::open_in_memory().unwrap();
        load(&db, dump);
        let once = (db.count_authors().unwrap(), db.get_author("A1").unwrap(), db.get_author("A2").unwrap());

        load(&db, dump);
        let twice = (db.count_authors().unwrap(), db.get_author("A1").unwrap(), db.get_author("A2").unwrap());

        assert_eq!(once, twice);
        assert_eq!(once.0, 2);
        assert_eq!(once.1.name, "New Name");
    }
}
