use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

use crate::entities::{entries, prelude::*};
use crate::models::Entry;

impl From<entries::Model> for Entry {
    fn from(model: entries::Model) -> Self {
        Self {
            id: Some(model.id),
            url: model.url,
            title: model.title,
            is_archived: model.is_archived,
            is_starred: model.is_starred,
            created_at: model.created_at,
        }
    }
}

pub struct EntryRepository {
    conn: DatabaseConnection,
}

impl EntryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, user_id: i32, entry: &Entry) -> Result<Entry> {
        let model = entries::ActiveModel {
            user_id: Set(user_id),
            url: Set(entry.url.clone()),
            title: Set(entry.title.clone()),
            is_archived: Set(entry.is_archived),
            is_starred: Set(entry.is_starred),
            created_at: Set(entry.created_at),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert entry")?;

        Ok(Entry::from(model))
    }

    pub async fn count_for_user(&self, user_id: i32) -> Result<u64> {
        Entries::find()
            .filter(entries::Column::UserId.eq(user_id))
            .count(&self.conn)
            .await
            .context("Failed to count entries")
    }
}
