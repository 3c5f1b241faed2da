pub mod client;
pub mod entry;
pub mod site_credential;
pub mod user;
pub mod user_config;
