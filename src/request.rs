//! Per-call request descriptions.

use http::Method;

/// Everything needed to issue one logical API call.
///
/// A `RequestSpec` is immutable once built: constructed per call, consumed
/// once by the executor. Paths are relative to the client's versioned API
/// prefix (`/api/{version}`).
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// The HTTP method.
    pub method: Method,

    /// The request path, e.g. `/cust/{id}`.
    pub path: String,

    /// Query parameters. Keys are unique; setting a key twice keeps the
    /// latest value.
    pub query: Vec<(String, String)>,

    /// Optional JSON request body.
    pub body: Option<serde_json::Value>,

    /// Whether to attach the bearer credential. Defaults to `true`; the
    /// login call is the notable exception.
    pub requires_auth: bool,
}

impl RequestSpec {
    /// Creates an authenticated spec with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            requires_auth: true,
        }
    }

    /// Marks the request as not requiring authentication.
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Adds a query parameter, replacing any existing value for the key.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.query.retain(|(existing, _)| *existing != key);
        self.query.push((key, value.into()));
        self
    }

    /// Adds multiple query parameters.
    pub fn with_query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        for (key, value) in pairs {
            self = self.with_query(key, value);
        }
        self
    }

    /// Sets the JSON request body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_keys_stay_unique() {
        let spec = RequestSpec::new(Method::GET, "/task")
            .with_query("page", "1")
            .with_query("page", "2");

        assert_eq!(spec.query, vec![("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn defaults_require_auth() {
        let spec = RequestSpec::new(Method::GET, "/task");
        assert!(spec.requires_auth);

        let login = RequestSpec::new(Method::POST, "/auth/login").public();
        assert!(!login.requires_auth);
    }
}
