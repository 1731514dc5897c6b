//! Two-phase loading of author and work dumps.
//!
//! Phase one fills the author table; phase two loads works and resolves their
//! author ids against it. Both phases upsert by a key taken from the record, so
//! a rerun after a crash simply starts over.

mod author_loader;
mod dump;
mod error;
mod fields;
mod line;
mod report;
mod resolver;
mod work_loader;

pub use author_loader::{load_authors, load_authors_from, parse_author, AUTHOR_KEY_PREFIX};
pub use dump::{drain_dump, open_dump, RecordOutcome};
pub use error::RecordError;
pub use fields::{
    optional_array, optional_object, parse_object, required_object, required_str, string_or_default,
    strip_namespace, JsonObject,
};
pub use line::{decode_line, extract_json};
pub use report::{LoadReport, Phase, PipelineReport};
pub use resolver::{AuthorLookup, AuthorNameResolver, UNKNOWN_AUTHOR};
pub use work_loader::{load_works, load_works_from, parse_work, CREATED_FORMAT, WORK_KEY_PREFIX};

use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::storage::database::Database;

/// Load the author dump, then the work dump.
///
/// A fatal error in the author phase stops the run before any work is read.
pub fn run_pipeline(db: &Database, config: &AppConfig) -> Result<PipelineReport> {
    let author_dump = config.author_dump_path()?;
    let works_dump = config.works_dump_path()?;

    let authors = load_authors(db, &author_dump, &config.ingest)?;
    let works = load_works(db, &works_dump, &config.ingest)?;

    info!(
        authors_saved = authors.saved,
        books_saved = works.saved,
        skipped = authors.skipped + works.skipped,
        "load complete"
    );
    Ok(PipelineReport { authors, works })
}
