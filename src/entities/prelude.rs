pub use super::entries::Entity as Entries;
pub use super::oauth_clients::Entity as OauthClients;
pub use super::site_credentials::Entity as SiteCredentials;
pub use super::user_configs::Entity as UserConfigs;
pub use super::users::Entity as Users;
