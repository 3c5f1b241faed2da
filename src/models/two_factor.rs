//! Capability traits queried by the two-factor verification layer.
//!
//! Code generation, delivery and validation live outside this crate; a
//! record only has to answer whether a method is enabled and hand over the
//! values the verifier needs.

/// An authenticated principal, identified by its username.
pub trait Principal {
    fn username(&self) -> &str;
}

/// Email-code based two-factor authentication.
pub trait EmailTwoFactor {
    /// Whether the user opted into email codes.
    fn is_email_auth_enabled(&self) -> bool;

    /// Address the challenge code is sent to.
    fn email_auth_recipient(&self) -> &str;

    /// Code of the pending challenge, if one was issued.
    fn email_auth_code(&self) -> Option<i32>;

    fn set_email_auth_code(&mut self, code: i32);
}

/// Authenticator-app (TOTP) based two-factor authentication.
pub trait AuthenticatorTwoFactor {
    /// Enabled iff a non-empty secret is stored.
    fn is_google_authenticator_enabled(&self) -> bool;

    /// Account label shown in the authenticator app.
    fn google_authenticator_username(&self) -> &str;

    fn google_authenticator_secret(&self) -> Option<&str>;

    fn set_google_authenticator_secret(&mut self, secret: Option<String>);
}
