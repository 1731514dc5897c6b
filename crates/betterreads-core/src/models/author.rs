use serde::{Deserialize, Serialize};

/// An author as stored in the `author_by_id` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub personal_name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            personal_name: String::new(),
        }
    }
}
