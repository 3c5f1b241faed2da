use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::entities::site_credentials;
use crate::models::SiteCredential;

impl From<site_credentials::Model> for SiteCredential {
    fn from(model: site_credentials::Model) -> Self {
        Self {
            id: Some(model.id),
            host: model.host,
            username: model.username,
            password: model.password,
            created_at: model.created_at,
        }
    }
}

pub struct SiteCredentialRepository {
    conn: DatabaseConnection,
}

impl SiteCredentialRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, user_id: i32, credential: &SiteCredential) -> Result<SiteCredential> {
        let model = site_credentials::ActiveModel {
            user_id: Set(user_id),
            host: Set(credential.host.clone()),
            username: Set(credential.username.clone()),
            password: Set(credential.password.clone()),
            created_at: Set(credential.created_at),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert site credential")?;

        Ok(SiteCredential::from(model))
    }
}
