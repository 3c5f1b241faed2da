use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use super::client::Client;
use super::entry::Entry;
use super::site_credential::SiteCredential;
use super::two_factor::{AuthenticatorTwoFactor, EmailTwoFactor, Principal};
use super::user_config::UserConfig;

/// Role every account carries unless explicitly replaced.
pub const ROLE_USER: &str = "ROLE_USER";

pub const ROLE_SUPER_ADMIN: &str = "ROLE_SUPER_ADMIN";

/// A user account together with the records it owns.
///
/// The record performs no validation. Uniqueness of `username` and `email`
/// is enforced by the storage layer, and `id`/timestamps are only ever set
/// by the store when the record is saved or loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Option<i32>,
    name: Option<String>,
    username: String,
    email: String,
    enabled: bool,
    last_login: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    roles: BTreeSet<String>,

    auth_code: Option<i32>,
    google_authenticator_secret: Option<String>,
    email_two_factor: bool,

    entries: Vec<Entry>,
    config: Option<UserConfig>,
    site_credentials: Vec<SiteCredential>,
    clients: Vec<Client>,
}

impl User {
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            username: username.into(),
            email: email.into(),
            enabled: true,
            last_login: None,
            created_at: None,
            updated_at: None,
            roles: BTreeSet::from([ROLE_USER.to_string()]),
            auth_code: None,
            google_authenticator_secret: None,
            email_two_factor: false,
            entries: Vec::new(),
            config: None,
            site_credentials: Vec::new(),
            clients: Vec::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> Option<i32> {
        self.id
    }

    /// Records the identifier generated by the database. Ignored once set.
    pub(crate) fn assign_id(&mut self, id: i32) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    pub(crate) fn restore_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
    }

    /// Lifecycle timestamps, called by the store before every write.
    pub fn stamp(&mut self, now: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub const fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    pub fn set_last_login(&mut self, at: Option<DateTime<Utc>>) {
        self.last_login = at;
    }

    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    #[must_use]
    pub const fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn set_roles<I, S>(&mut self, roles: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roles = roles
            .into_iter()
            .map(|r| r.as_ref().to_uppercase())
            .collect();
    }

    pub fn add_role(&mut self, role: &str) {
        self.roles.insert(role.to_uppercase());
    }

    /// Returns `true` if the role was present.
    pub fn remove_role(&mut self, role: &str) -> bool {
        self.roles.remove(&role.to_uppercase())
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(&role.to_uppercase())
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.has_role(ROLE_SUPER_ADMIN)
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub const fn config(&self) -> Option<&UserConfig> {
        self.config.as_ref()
    }

    pub fn set_config(&mut self, config: Option<UserConfig>) {
        self.config = config;
    }

    pub fn add_site_credential(&mut self, credential: SiteCredential) {
        self.site_credentials.push(credential);
    }

    #[must_use]
    pub fn site_credentials(&self) -> &[SiteCredential] {
        &self.site_credentials
    }

    pub fn add_client(&mut self, client: Client) {
        self.clients.push(client);
    }

    #[must_use]
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// First client in collection order.
    ///
    /// Only meaningful right after account creation, when the single client
    /// created alongside the user is returned to the API caller.
    #[must_use]
    pub fn first_client(&self) -> Option<&Client> {
        self.clients.first()
    }

    /// Same principal iff the usernames match. Ids and every other field
    /// are ignored.
    #[must_use]
    pub fn is_equal_to(&self, other: &impl Principal) -> bool {
        self.username == other.username()
    }

    #[must_use]
    pub const fn is_email_two_factor(&self) -> bool {
        self.email_two_factor
    }

    pub fn set_email_two_factor(&mut self, enabled: bool) {
        self.email_two_factor = enabled;
    }

    /// Mirrors [`Self::is_email_two_factor`] for the authenticator method.
    #[must_use]
    pub fn is_google_two_factor(&self) -> bool {
        self.is_google_authenticator_enabled()
    }

    pub fn clear_email_auth_code(&mut self) {
        self.auth_code = None;
    }
}

impl Principal for User {
    fn username(&self) -> &str {
        &self.username
    }
}

impl EmailTwoFactor for User {
    fn is_email_auth_enabled(&self) -> bool {
        self.email_two_factor
    }

    fn email_auth_recipient(&self) -> &str {
        &self.email
    }

    fn email_auth_code(&self) -> Option<i32> {
        self.auth_code
    }

    fn set_email_auth_code(&mut self, code: i32) {
        self.auth_code = Some(code);
    }
}

impl AuthenticatorTwoFactor for User {
    fn is_google_authenticator_enabled(&self) -> bool {
        self.google_authenticator_secret
            .as_deref()
            .is_some_and(|s| !s.is_empty())
    }

    fn google_authenticator_username(&self) -> &str {
        &self.username
    }

    fn google_authenticator_secret(&self) -> Option<&str> {
        self.google_authenticator_secret.as_deref()
    }

    fn set_google_authenticator_secret(&mut self, secret: Option<String>) {
        self.google_authenticator_secret = secret;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Named(&'static str);

    impl Principal for Named {
        fn username(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn new_user_defaults() {
        let user = User::new("alice", "alice@example.com");

        assert!(user.entries().is_empty());
        assert_eq!(
            user.roles().iter().map(String::as_str).collect::<Vec<_>>(),
            vec![ROLE_USER]
        );
        assert!(!user.is_email_auth_enabled());
        assert!(!user.is_google_authenticator_enabled());
        assert!(user.is_enabled());
        assert_eq!(user.id(), None);
        assert_eq!(user.created_at(), None);
        assert!(user.first_client().is_none());
    }

    #[test]
    fn authenticator_enabled_follows_secret_presence() {
        let mut user = User::new("alice", "alice@example.com");

        user.set_google_authenticator_secret(Some(String::new()));
        assert!(!user.is_google_authenticator_enabled());
        assert!(!user.is_google_two_factor());

        user.set_google_authenticator_secret(Some("JBSWY3DPEHPK3PXP".to_string()));
        assert!(user.is_google_authenticator_enabled());
        assert!(user.is_google_two_factor());
        assert_eq!(user.google_authenticator_username(), "alice");

        user.set_google_authenticator_secret(None);
        assert!(!user.is_google_authenticator_enabled());
    }

    #[test]
    fn email_auth_reports_last_value_set() {
        let mut user = User::new("alice", "alice@example.com");

        user.set_email_two_factor(true);
        assert!(user.is_email_auth_enabled());
        user.set_email_two_factor(false);
        assert!(!user.is_email_auth_enabled());
        assert!(!user.is_email_two_factor());
    }

    #[test]
    fn email_challenge_uses_address_and_pending_code() {
        let mut user = User::new("alice", "alice@example.com");
        assert_eq!(user.email_auth_code(), None);

        user.set_email_auth_code(482_913);
        assert_eq!(user.email_auth_code(), Some(482_913));
        assert_eq!(user.email_auth_recipient(), "alice@example.com");

        user.clear_email_auth_code();
        assert_eq!(user.email_auth_code(), None);
    }

    #[test]
    fn first_client_is_in_insertion_order() {
        let mut user = User::new("alice", "alice@example.com");
        let a = Client::generate("first");
        let b = Client::generate("second");

        user.add_client(a.clone());
        user.add_client(b);

        assert_eq!(user.first_client(), Some(&a));
        assert_eq!(user.clients().len(), 2);
    }

    #[test]
    fn equality_check_only_compares_usernames() {
        let mut a = User::new("alice", "alice@example.com");
        a.assign_id(1);
        a.set_name(Some("Alice".to_string()));

        let mut b = User::new("alice", "someone-else@example.com");
        b.assign_id(2);
        b.set_email_two_factor(true);

        assert!(a.is_equal_to(&b));
        assert!(b.is_equal_to(&a));
        assert!(a.is_equal_to(&Named("alice")));

        let c = User::new("Alice", "alice@example.com");
        assert!(!a.is_equal_to(&c));
    }

    #[test]
    fn add_entry_grows_collection_by_one() {
        let mut user = User::new("alice", "alice@example.com");
        let entry = Entry::new("https://example.com/article").with_title("Article");

        user.add_entry(entry.clone());

        assert_eq!(user.entries().len(), 1);
        assert!(user.entries().contains(&entry));
    }

    #[test]
    fn stamp_keeps_creation_time() {
        let mut user = User::new("alice", "alice@example.com");
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap();

        user.stamp(t1);
        assert_eq!(user.created_at(), Some(t1));
        assert_eq!(user.updated_at(), Some(t1));

        user.stamp(t2);
        assert_eq!(user.created_at(), Some(t1));
        assert_eq!(user.updated_at(), Some(t2));
    }

    #[test]
    fn id_is_assigned_once() {
        let mut user = User::new("alice", "alice@example.com");
        user.assign_id(3);
        user.assign_id(9);
        assert_eq!(user.id(), Some(3));
    }

    #[test]
    fn roles_are_normalized() {
        let mut user = User::new("alice", "alice@example.com");
        user.add_role("role_super_admin");

        assert!(user.is_super_admin());
        assert!(user.has_role("ROLE_USER"));
        assert!(user.remove_role("ROLE_SUPER_ADMIN"));
        assert!(!user.remove_role("ROLE_SUPER_ADMIN"));

        user.set_roles(["role_editor"]);
        assert!(user.has_role("ROLE_EDITOR"));
        assert!(!user.has_role(ROLE_USER));
    }
}
