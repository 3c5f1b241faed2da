use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};

use crate::entities::{oauth_clients, prelude::*};
use crate::models::Client;

impl TryFrom<oauth_clients::Model> for Client {
    type Error = anyhow::Error;

    fn try_from(model: oauth_clients::Model) -> Result<Self> {
        let redirect_uris = serde_json::from_str(&model.redirect_uris)
            .with_context(|| format!("Invalid redirect URIs for client {}", model.id))?;

        Ok(Self {
            id: Some(model.id),
            name: model.name,
            random_id: model.random_id,
            secret: model.secret,
            redirect_uris,
        })
    }
}

pub struct ClientRepository {
    conn: DatabaseConnection,
}

impl ClientRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, user_id: i32, client: &Client) -> Result<Client> {
        insert_client(&self.conn, user_id, client).await
    }

    /// Owner of the client holding `secret`.
    pub async fn owner_of_secret(&self, secret: &str) -> Result<Option<i32>> {
        let client = OauthClients::find()
            .filter(oauth_clients::Column::Secret.eq(secret))
            .one(&self.conn)
            .await
            .context("Failed to query API client by secret")?;

        Ok(client.map(|c| c.user_id))
    }
}

pub(crate) async fn insert_client<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    client: &Client,
) -> Result<Client> {
    let model = oauth_clients::ActiveModel {
        user_id: Set(user_id),
        name: Set(client.name.clone()),
        random_id: Set(client.random_id.clone()),
        secret: Set(client.secret.clone()),
        redirect_uris: Set(serde_json::to_string(&client.redirect_uris)?),
        ..Default::default()
    }
    .insert(conn)
    .await
    .context("Failed to insert API client")?;

    Client::try_from(model)
}
