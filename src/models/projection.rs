//! Serialized views of a [`User`] exposed over the API.
//!
//! `user_api` carries identity fields only; `user_api_with_client`
//! additionally embeds the first API client, which is returned once when an
//! account is created.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::client::Client;
use super::user::User;

/// Named serialization groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    UserApi,
    UserApiWithClient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientView {
    pub client_id: String,
    pub client_secret: String,
    pub name: String,
}

impl From<&Client> for ClientView {
    fn from(client: &Client) -> Self {
        Self {
            client_id: client.public_id(),
            client_secret: client.secret.clone(),
            name: client.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub username: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            name: user.name().map(str::to_string),
            username: user.username().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithClientView {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub username: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub default_client: Option<ClientView>,
}

impl From<&User> for UserWithClientView {
    fn from(user: &User) -> Self {
        let UserView {
            id,
            name,
            username,
            email,
            created_at,
            updated_at,
        } = UserView::from(user);

        Self {
            id,
            name,
            username,
            email,
            created_at,
            updated_at,
            default_client: user.first_client().map(ClientView::from),
        }
    }
}

impl User {
    pub fn to_json(&self, projection: Projection) -> Result<serde_json::Value> {
        let value = match projection {
            Projection::UserApi => serde_json::to_value(UserView::from(self)),
            Projection::UserApiWithClient => serde_json::to_value(UserWithClientView::from(self)),
        };
        value.context("Failed to serialize user")
    }

    /// XML rendering with a `<user>` root element.
    pub fn to_xml(&self, projection: Projection) -> Result<String> {
        let xml = match projection {
            Projection::UserApi => quick_xml::se::to_string_with_root("user", &UserView::from(self)),
            Projection::UserApiWithClient => {
                quick_xml::se::to_string_with_root("user", &UserWithClientView::from(self))
            }
        };
        xml.context("Failed to serialize user as XML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new("alice", "alice@example.com");
        user.assign_id(4);
        user.set_name(Some("Alice".to_string()));
        user.set_email_two_factor(true);
        user
    }

    #[test]
    fn minimal_projection_has_identity_fields_only() {
        let json = sample_user().to_json(Projection::UserApi).unwrap();
        let obj = json.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["created_at", "email", "id", "name", "updated_at", "username"]
        );
        assert_eq!(json["username"], "alice");
        assert_eq!(json["id"], 4);
    }

    #[test]
    fn client_projection_embeds_first_client() {
        let mut user = sample_user();
        let mut client = Client::generate("Created with the account");
        client.id = Some(11);
        user.add_client(client.clone());
        user.add_client(Client::generate("Later"));

        let json = user.to_json(Projection::UserApiWithClient).unwrap();

        assert_eq!(json["username"], "alice");
        assert_eq!(
            json["default_client"]["client_id"],
            format!("11_{}", client.random_id)
        );
        assert_eq!(json["default_client"]["client_secret"], client.secret);
        assert_eq!(json["default_client"]["name"], "Created with the account");
    }

    #[test]
    fn client_projection_without_clients_is_null() {
        let json = sample_user()
            .to_json(Projection::UserApiWithClient)
            .unwrap();
        assert!(json["default_client"].is_null());
    }

    #[test]
    fn xml_uses_user_root() {
        let xml = sample_user().to_xml(Projection::UserApi).unwrap();
        assert!(xml.starts_with("<user>"));
        assert!(xml.contains("<username>alice</username>"));
        assert!(xml.ends_with("</user>"));
    }
}
