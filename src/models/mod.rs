pub mod client;
pub mod entry;
pub mod projection;
pub mod site_credential;
pub mod two_factor;
pub mod user;
pub mod user_config;

pub use client::Client;
pub use entry::Entry;
pub use projection::{ClientView, Projection, UserView, UserWithClientView};
pub use site_credential::SiteCredential;
pub use two_factor::{AuthenticatorTwoFactor, EmailTwoFactor, Principal};
pub use user::{ROLE_SUPER_ADMIN, ROLE_USER, User};
pub use user_config::UserConfig;
