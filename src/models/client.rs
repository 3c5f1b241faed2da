use serde::{Deserialize, Serialize};

/// API credentials issued to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Option<i32>,
    pub name: String,
    pub random_id: String,
    pub secret: String,
    pub redirect_uris: Vec<String>,
}

impl Client {
    /// Creates a client with freshly generated credentials.
    #[must_use]
    pub fn generate(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            random_id: random_token(24),
            secret: random_token(32),
            redirect_uris: Vec::new(),
        }
    }

    /// Public client identifier in the `{id}_{random_id}` form.
    ///
    /// Unsaved clients only expose the random part.
    #[must_use]
    pub fn public_id(&self) -> String {
        match self.id {
            Some(id) => format!("{id}_{}", self.random_id),
            None => self.random_id.clone(),
        }
    }
}

/// Hex token built from `len` random bytes.
#[must_use]
pub fn random_token(len: usize) -> String {
    use rand::Rng;
    use std::fmt::Write;

    let mut rng = rand::rng();
    (0..len).fold(String::with_capacity(len * 2), |mut acc, _| {
        let byte: u8 = rng.random();
        let _ = write!(acc, "{byte:02x}");
        acc
    })
}
