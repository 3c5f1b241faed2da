use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved article. Owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<i32>,
    pub url: String,
    pub title: Option<String>,
    pub is_archived: bool,
    pub is_starred: bool,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            title: None,
            is_archived: false,
            is_starred: false,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
