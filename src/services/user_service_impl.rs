//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::UserDefaultsConfig;
use crate::db::{DeletionReport, Store};
use crate::models::{AuthenticatorTwoFactor, Client, User, UserConfig};
use crate::services::user_service::{NewUser, UserError, UserService};
use crate::services::validation::{
    validate_client_name, validate_email, validate_role, validate_username,
};

pub struct SeaOrmUserService {
    store: Store,
    defaults: UserDefaultsConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, defaults: UserDefaultsConfig) -> Self {
        Self { store, defaults }
    }

    async fn load(&self, username: &str) -> Result<User, UserError> {
        self.store
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }

    async fn ensure_email_free(&self, email: &str, owner: Option<i32>) -> Result<(), UserError> {
        if let Some(existing) = self.store.get_user_by_email(email).await?
            && existing.id() != owner
        {
            return Err(UserError::Conflict(format!("Email '{email}' is already used")));
        }
        Ok(())
    }

    /// Apply `change` to the stored user and save it.
    async fn modify<F>(&self, username: &str, change: F) -> Result<User, UserError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut user = self.load(username).await?;
        change(&mut user);
        self.store.save_user(&mut user).await?;
        Ok(user)
    }

    fn user_id(user: &User) -> Result<i32, UserError> {
        user.id()
            .ok_or_else(|| UserError::Internal(format!("User {} has no id", user.username())))
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register(&self, new_user: NewUser) -> Result<User, UserError> {
        let username = validate_username(&new_user.username)?;
        let email = validate_email(&new_user.email)?;
        let client_name = match new_user.client_name.as_deref() {
            Some(name) => validate_client_name(name)?,
            None => self.defaults.client_name.as_str(),
        };

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(UserError::Conflict(format!(
                "Username '{username}' is already taken"
            )));
        }
        self.ensure_email_free(email, None).await?;

        let mut user = User::new(username, email);
        user.set_name(new_user.name.filter(|n| !n.trim().is_empty()));
        self.store
            .create_account(
                &mut user,
                &UserConfig::from_defaults(&self.defaults),
                &Client::generate(client_name),
            )
            .await?;

        let user_id = Self::user_id(&user)?;
        info!(user_id, username = %user.username(), "Registered user");

        self.store
            .get_user(user_id)
            .await?
            .ok_or_else(|| UserError::Internal(format!("User {user_id} vanished after creation")))
    }

    async fn get(&self, username: &str) -> Result<User, UserError> {
        self.load(username).await
    }

    async fn list(&self) -> Result<Vec<User>, UserError> {
        Ok(self.store.list_users().await?)
    }

    async fn update_profile(
        &self,
        username: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, UserError> {
        let mut user = self.load(username).await?;

        if let Some(email) = email {
            let email = validate_email(&email)?;
            self.ensure_email_free(email, user.id()).await?;
            user.set_email(email);
        }

        if let Some(name) = name {
            user.set_name(Some(name).filter(|n| !n.trim().is_empty()));
        }

        self.store.save_user(&mut user).await?;
        Ok(user)
    }

    async fn set_email_two_factor(
        &self,
        username: &str,
        enabled: bool,
    ) -> Result<User, UserError> {
        let user = self
            .modify(username, |u| u.set_email_two_factor(enabled))
            .await?;
        info!(username, enabled, "Email two-factor updated");
        Ok(user)
    }

    async fn set_authenticator_secret(
        &self,
        username: &str,
        secret: Option<String>,
    ) -> Result<User, UserError> {
        let user = self
            .modify(username, |u| u.set_google_authenticator_secret(secret))
            .await?;
        info!(
            username,
            enabled = user.is_google_authenticator_enabled(),
            "Authenticator two-factor updated"
        );
        Ok(user)
    }

    async fn set_enabled(&self, username: &str, enabled: bool) -> Result<User, UserError> {
        let user = self.modify(username, |u| u.set_enabled(enabled)).await?;
        info!(username, enabled, "Account activation changed");
        Ok(user)
    }

    async fn add_role(&self, username: &str, role: &str) -> Result<User, UserError> {
        let role = validate_role(role)?;
        self.modify(username, |u| u.add_role(role)).await
    }

    async fn remove_role(&self, username: &str, role: &str) -> Result<User, UserError> {
        let role = validate_role(role)?;
        let mut user = self.load(username).await?;

        if !user.remove_role(role) {
            return Err(UserError::Validation(format!(
                "User {username} does not have role {}",
                role.to_uppercase()
            )));
        }

        self.store.save_user(&mut user).await?;
        Ok(user)
    }

    async fn create_client(&self, username: &str, name: &str) -> Result<Client, UserError> {
        let name = validate_client_name(name)?;
        let user = self.load(username).await?;
        let user_id = Self::user_id(&user)?;

        let client = self.store.add_client(user_id, &Client::generate(name)).await?;
        info!(user_id, client_id = %client.public_id(), "Created API client");
        Ok(client)
    }

    async fn authenticate_client(&self, secret: &str) -> Result<Option<User>, UserError> {
        let user = self.store.find_user_by_client_secret(secret).await?;
        Ok(user.filter(User::is_enabled))
    }

    async fn delete(&self, username: &str) -> Result<DeletionReport, UserError> {
        let user = self.load(username).await?;
        let user_id = Self::user_id(&user)?;

        let report = self
            .store
            .delete_user(user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))?;

        info!(
            user_id,
            username,
            entries = report.entries,
            site_credentials = report.site_credentials,
            clients = report.clients,
            "Deleted user"
        );
        Ok(report)
    }
}
