pub mod prelude;

pub mod entries;
pub mod oauth_clients;
pub mod site_credentials;
pub mod user_configs;
pub mod users;
