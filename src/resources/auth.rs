//! Authentication operations and the session model.

use crate::{client::Client, error::Result, request::RequestSpec};
use http::Method;
use serde::Deserialize;
use std::collections::HashMap;

/// The authenticated principal returned by login and profile calls.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: HashMap<String, Vec<String>>,
}

/// A successful login: the bearer token, its lifetime, and the user it
/// belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
    pub user: User,
}

impl Client {
    /// Authenticates with email and password, storing the returned bearer
    /// credential for subsequent calls.
    ///
    /// The login request itself is unauthenticated. On success the previous
    /// credential (if any) is replaced wholesale.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession> {
        let spec = RequestSpec::new(Method::POST, "/auth/login")
            .public()
            .with_body(serde_json::json!({
                "email": email,
                "password": password,
            }));

        let session: AuthSession = self.execute(spec).await?;
        self.token_state()
            .set_credential(session.token.as_str(), session.expires_in);

        Ok(session)
    }

    /// Fetches the authenticated user's profile.
    pub async fn profile(&self) -> Result<User> {
        self.execute(RequestSpec::new(Method::GET, "/auth/profile"))
            .await
    }
}
