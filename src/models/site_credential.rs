use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login used when fetching content from a paywalled or private site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCredential {
    pub id: Option<i32>,
    pub host: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl SiteCredential {
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            host: host.into(),
            username: username.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }
}
