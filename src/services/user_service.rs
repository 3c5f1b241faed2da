//! Domain service for account management.
//!
//! Registration, profile updates, two-factor settings, API clients and
//! account removal. Shared by the HTTP API and the CLI.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::db::DeletionReport;
use crate::models::{Client, User};

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Conflict(format!(
                "Username or email is already taken ({detail})"
            )),
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        // Storage errors arrive wrapped in context; unique violations still
        // surface as conflicts.
        if let Some(db_err) = err.downcast_ref::<DbErr>()
            && let Some(SqlErr::UniqueConstraintViolation(detail)) = db_err.sql_err()
        {
            return Self::Conflict(format!("Username or email is already taken ({detail})"));
        }
        Self::Internal(format!("{err:#}"))
    }
}

/// Input for [`UserService::register`].
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: Option<String>,
    /// Name of the API client created with the account. Falls back to the
    /// configured default.
    pub client_name: Option<String>,
}

/// Domain service trait for accounts.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Creates an account with its default config and first API client.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Conflict`] if the username or email is taken.
    async fn register(&self, new_user: NewUser) -> Result<User, UserError>;

    async fn get(&self, username: &str) -> Result<User, UserError>;

    async fn list(&self) -> Result<Vec<User>, UserError>;

    /// Changes display name and/or email. `None` leaves a field untouched.
    async fn update_profile(
        &self,
        username: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, UserError>;

    async fn set_email_two_factor(&self, username: &str, enabled: bool)
    -> Result<User, UserError>;

    /// Stores or clears the authenticator secret. A non-empty secret
    /// enables authenticator-based two-factor.
    async fn set_authenticator_secret(
        &self,
        username: &str,
        secret: Option<String>,
    ) -> Result<User, UserError>;

    async fn set_enabled(&self, username: &str, enabled: bool) -> Result<User, UserError>;

    async fn add_role(&self, username: &str, role: &str) -> Result<User, UserError>;

    async fn remove_role(&self, username: &str, role: &str) -> Result<User, UserError>;

    async fn create_client(&self, username: &str, name: &str) -> Result<Client, UserError>;

    /// Resolves the enabled user owning the API client with this secret.
    async fn authenticate_client(&self, secret: &str) -> Result<Option<User>, UserError>;

    /// Deletes the account and every record it owns.
    async fn delete(&self, username: &str) -> Result<DeletionReport, UserError>;
}
