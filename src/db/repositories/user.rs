use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, LoaderTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::debug;

use super::client::insert_client;
use super::user_config::insert_config;
use crate::entities::{
    entries, oauth_clients, prelude::*, site_credentials, user_configs, users,
};
use crate::models::{
    AuthenticatorTwoFactor, Client, EmailTwoFactor, Entry, SiteCredential, User, UserConfig,
};

/// Rows removed by [`UserRepository::delete`], per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    pub entries: u64,
    pub config: u64,
    pub site_credentials: u64,
    pub clients: u64,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert or update the user row, stamping timestamps first.
    ///
    /// Owned collections are not written here; they have their own
    /// repositories.
    pub async fn save(&self, user: &mut User) -> Result<()> {
        user.stamp(Utc::now());
        let active = active_model(user)?;

        if user.id().is_some() {
            active
                .update(&self.conn)
                .await
                .with_context(|| format!("Failed to update user {}", user.username()))?;
        } else {
            let model = active
                .insert(&self.conn)
                .await
                .with_context(|| format!("Failed to insert user {}", user.username()))?;
            user.assign_id(model.id);
            debug!(user_id = model.id, username = %model.username, "Inserted user");
        }

        Ok(())
    }

    /// Insert a new user together with its config and first client.
    ///
    /// All three rows are written in one transaction; on failure nothing is
    /// kept and the user stays without an id.
    pub async fn create_account(
        &self,
        user: &mut User,
        config: &UserConfig,
        client: &Client,
    ) -> Result<()> {
        if user.id().is_some() {
            anyhow::bail!("User {} is already stored", user.username());
        }

        user.stamp(Utc::now());
        let active = active_model(user)?;

        let txn = self.conn.begin().await?;

        let model = active
            .insert(&txn)
            .await
            .with_context(|| format!("Failed to insert user {}", user.username()))?;
        insert_config(&txn, model.id, config).await?;
        insert_client(&txn, model.id, client).await?;

        txn.commit().await?;

        user.assign_id(model.id);
        debug!(user_id = model.id, username = %model.username, "Created account");
        Ok(())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        self.hydrate_one(user).await
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user by username")?;

        self.hydrate_one(user).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = Users::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        self.hydrate_one(user).await
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        self.hydrate(rows).await
    }

    /// Remove a user and everything it owns.
    ///
    /// Child tables carry no ON DELETE CASCADE, so dependents go first, in a
    /// fixed order: entries, config, site credentials, clients. Returns
    /// `None` when the user does not exist.
    pub async fn delete(&self, id: i32) -> Result<Option<DeletionReport>> {
        let txn = self.conn.begin().await?;

        if Users::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(None);
        }

        let report = DeletionReport {
            entries: delete_entries(&txn, id).await?,
            config: delete_config(&txn, id).await?,
            site_credentials: delete_site_credentials(&txn, id).await?,
            clients: delete_clients(&txn, id).await?,
        };

        Users::delete_by_id(id)
            .exec(&txn)
            .await
            .context("Failed to delete user row")?;

        txn.commit().await?;

        debug!(user_id = id, ?report, "Deleted user");
        Ok(Some(report))
    }

    async fn hydrate_one(&self, model: Option<users::Model>) -> Result<Option<User>> {
        let Some(model) = model else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    /// Build domain users with their owned collections loaded in id order.
    async fn hydrate(&self, rows: Vec<users::Model>) -> Result<Vec<User>> {
        let entries = rows.load_many(Entries, &self.conn).await?;
        let configs = rows.load_one(UserConfigs, &self.conn).await?;
        let credentials = rows.load_many(SiteCredentials, &self.conn).await?;
        let clients = rows.load_many(OauthClients, &self.conn).await?;

        let mut users = Vec::with_capacity(rows.len());

        for ((((row, mut entries), config), mut credentials), mut clients) in rows
            .into_iter()
            .zip(entries)
            .zip(configs)
            .zip(credentials)
            .zip(clients)
        {
            let mut user = user_from_row(row)?;

            entries.sort_by_key(|e| e.id);
            for entry in entries {
                user.add_entry(Entry::from(entry));
            }

            user.set_config(config.map(UserConfig::from));

            credentials.sort_by_key(|c| c.id);
            for credential in credentials {
                user.add_site_credential(SiteCredential::from(credential));
            }

            clients.sort_by_key(|c| c.id);
            for client in clients {
                user.add_client(Client::try_from(client)?);
            }

            users.push(user);
        }

        Ok(users)
    }
}

fn active_model(user: &User) -> Result<users::ActiveModel> {
    let created_at = user
        .created_at()
        .ok_or_else(|| anyhow::anyhow!("User has no creation time after stamping"))?;
    let updated_at = user
        .updated_at()
        .ok_or_else(|| anyhow::anyhow!("User has no update time after stamping"))?;
    let roles = serde_json::to_string(user.roles()).context("Failed to encode roles")?;

    Ok(users::ActiveModel {
        id: user.id().map_or(NotSet, Set),
        name: Set(user.name().map(str::to_string)),
        username: Set(user.username().to_string()),
        email: Set(user.email().to_string()),
        enabled: Set(user.is_enabled()),
        last_login: Set(user.last_login()),
        roles: Set(roles),
        created_at: Set(created_at),
        updated_at: Set(updated_at),
        auth_code: Set(user.email_auth_code()),
        google_authenticator_secret: Set(user.google_authenticator_secret().map(str::to_string)),
        email_two_factor: Set(user.is_email_two_factor()),
    })
}

fn user_from_row(row: users::Model) -> Result<User> {
    let roles: Vec<String> = serde_json::from_str(&row.roles)
        .with_context(|| format!("Invalid roles for user {}", row.id))?;

    let mut user = User::new(row.username, row.email);
    user.assign_id(row.id);
    user.restore_timestamps(row.created_at, row.updated_at);
    user.set_name(row.name);
    user.set_enabled(row.enabled);
    user.set_last_login(row.last_login);
    user.set_roles(roles);
    user.set_email_two_factor(row.email_two_factor);
    user.set_google_authenticator_secret(row.google_authenticator_secret);
    if let Some(code) = row.auth_code {
        user.set_email_auth_code(code);
    }

    Ok(user)
}

async fn delete_entries<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64> {
    let res = Entries::delete_many()
        .filter(entries::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .context("Failed to delete entries")?;
    Ok(res.rows_affected)
}

async fn delete_config<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64> {
    let res = UserConfigs::delete_many()
        .filter(user_configs::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .context("Failed to delete user config")?;
    Ok(res.rows_affected)
}

async fn delete_site_credentials<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64> {
    let res = SiteCredentials::delete_many()
        .filter(site_credentials::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .context("Failed to delete site credentials")?;
    Ok(res.rows_affected)
}

async fn delete_clients<C: ConnectionTrait>(conn: &C, user_id: i32) -> Result<u64> {
    let res = OauthClients::delete_many()
        .filter(oauth_clients::Column::UserId.eq(user_id))
        .exec(conn)
        .await
        .context("Failed to delete API clients")?;
    Ok(res.rows_affected)
}
