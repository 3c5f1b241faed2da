use serde::{Deserialize, Serialize};

use crate::config::UserDefaultsConfig;

/// Per-user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub id: Option<i32>,
    pub theme: String,
    pub items_per_page: i32,
    pub language: String,
    pub reading_speed: i32,
    pub feed_token: Option<String>,
    pub feed_limit: Option<i32>,
}

impl UserConfig {
    #[must_use]
    pub fn from_defaults(defaults: &UserDefaultsConfig) -> Self {
        Self {
            id: None,
            theme: defaults.theme.clone(),
            items_per_page: defaults.items_per_page,
            language: defaults.language.clone(),
            reading_speed: defaults.reading_speed,
            feed_token: None,
            feed_limit: Some(defaults.feed_limit),
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self::from_defaults(&UserDefaultsConfig::default())
    }
}
