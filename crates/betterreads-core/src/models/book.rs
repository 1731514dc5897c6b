use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Book ───────────────────────────────────────────────────

/// A work from the dump, denormalized for reads.
///
/// `author_names` is a snapshot taken when the work was loaded. It is kept
/// parallel to `author_ids` and is not refreshed when an author changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,

    /// Work title.
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub author_ids: Vec<String>,

    #[serde(default)]
    pub author_names: Vec<String>,

    /// Opaque cover image identifiers.
    #[serde(default)]
    pub cover_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
}

impl Book {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Append an author reference together with its resolved name.
    pub fn push_author(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.author_ids.push(id.into());
        self.author_names.push(name.into());
    }

    /// `(author_id, author_name)` pairs in source order.
    pub fn authors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.author_ids
            .iter()
            .zip(self.author_names.iter())
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }
}
