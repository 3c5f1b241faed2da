use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};

use crate::entities::{prelude::*, user_configs};
use crate::models::UserConfig;

impl From<user_configs::Model> for UserConfig {
    fn from(model: user_configs::Model) -> Self {
        Self {
            id: Some(model.id),
            theme: model.theme,
            items_per_page: model.items_per_page,
            language: model.language,
            reading_speed: model.reading_speed,
            feed_token: model.feed_token,
            feed_limit: model.feed_limit,
        }
    }
}

pub struct UserConfigRepository {
    conn: DatabaseConnection,
}

impl UserConfigRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts the user's config, or overwrites the existing one.
    pub async fn upsert(&self, user_id: i32, config: &UserConfig) -> Result<UserConfig> {
        let existing = UserConfigs::find()
            .filter(user_configs::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query user config")?;

        let Some(existing) = existing else {
            return insert_config(&self.conn, user_id, config).await;
        };

        let mut active: user_configs::ActiveModel = existing.into();
        active.theme = Set(config.theme.clone());
        active.items_per_page = Set(config.items_per_page);
        active.language = Set(config.language.clone());
        active.reading_speed = Set(config.reading_speed);
        active.feed_token = Set(config.feed_token.clone());
        active.feed_limit = Set(config.feed_limit);
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update user config")?;

        Ok(UserConfig::from(model))
    }
}

pub(crate) async fn insert_config<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    config: &UserConfig,
) -> Result<UserConfig> {
    let model = user_configs::ActiveModel {
        user_id: Set(user_id),
        theme: Set(config.theme.clone()),
        items_per_page: Set(config.items_per_page),
        language: Set(config.language.clone()),
        reading_speed: Set(config.reading_speed),
        feed_token: Set(config.feed_token.clone()),
        feed_limit: Set(config.feed_limit),
        ..Default::default()
    }
    .insert(conn)
    .await
    .context("Failed to insert user config")?;

    Ok(UserConfig::from(model))
}
