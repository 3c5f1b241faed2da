use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::{Client, Entry, SiteCredential, User, UserConfig};

pub mod migrator;
pub mod repositories;

pub use repositories::user::DeletionReport;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn entry_repo(&self) -> repositories::entry::EntryRepository {
        repositories::entry::EntryRepository::new(self.conn.clone())
    }

    fn user_config_repo(&self) -> repositories::user_config::UserConfigRepository {
        repositories::user_config::UserConfigRepository::new(self.conn.clone())
    }

    fn site_credential_repo(&self) -> repositories::site_credential::SiteCredentialRepository {
        repositories::site_credential::SiteCredentialRepository::new(self.conn.clone())
    }

    fn client_repo(&self) -> repositories::client::ClientRepository {
        repositories::client::ClientRepository::new(self.conn.clone())
    }

    /// Persist the user row, setting `created_at`/`updated_at` on the record.
    pub async fn save_user(&self, user: &mut User) -> Result<()> {
        self.user_repo().save(user).await
    }

    /// Insert a new user with its config and first API client atomically.
    pub async fn create_account(
        &self,
        user: &mut User,
        config: &UserConfig,
        client: &Client,
    ) -> Result<()> {
        self.user_repo().create_account(user, config, client).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn find_user_by_client_secret(&self, secret: &str) -> Result<Option<User>> {
        match self.client_repo().owner_of_secret(secret).await? {
            Some(user_id) => self.get_user(user_id).await,
            None => Ok(None),
        }
    }

    pub async fn delete_user(&self, id: i32) -> Result<Option<DeletionReport>> {
        self.user_repo().delete(id).await
    }

    pub async fn add_entry(&self, user_id: i32, entry: &Entry) -> Result<Entry> {
        self.entry_repo().add(user_id, entry).await
    }

    pub async fn count_entries(&self, user_id: i32) -> Result<u64> {
        self.entry_repo().count_for_user(user_id).await
    }

    pub async fn set_user_config(&self, user_id: i32, config: &UserConfig) -> Result<UserConfig> {
        self.user_config_repo().upsert(user_id, config).await
    }

    pub async fn add_site_credential(
        &self,
        user_id: i32,
        credential: &SiteCredential,
    ) -> Result<SiteCredential> {
        self.site_credential_repo().add(user_id, credential).await
    }

    pub async fn add_client(&self, user_id: i32, client: &Client) -> Result<Client> {
        self.client_repo().add(user_id, client).await
    }
}
