//! Customer CRUD operations.

use crate::{
    client::Client,
    error::Result,
    pagination::{Page, PageQuery},
    request::RequestSpec,
    resources::to_body,
};
use http::Method;
use serde::{Deserialize, Serialize};

/// A customer record as the server returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub primary_phone: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub primary_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub created_ts: String,
    pub updated_ts: String,
    #[serde(default = "default_active")]
    pub active_flag: bool,
}

fn default_active() -> bool {
    true
}

/// Input for creating a customer. Only `name` is required.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl CustomerCreate {
    /// Creates an input with the required name and no optional fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_phone: None,
            primary_email: None,
            primary_address: None,
            city: None,
            province: None,
            postal_code: None,
            country: None,
        }
    }
}

/// Partial update for a customer; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Client {
    /// Lists customers with paging and optional search.
    pub async fn list_customers(&self, query: PageQuery) -> Result<Page<Customer>> {
        let spec =
            RequestSpec::new(Method::GET, "/cust").with_query_pairs(query.to_query_pairs());
        self.execute(spec).await
    }

    /// Fetches one customer by id.
    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer> {
        self.execute(RequestSpec::new(Method::GET, format!("/cust/{customer_id}")))
            .await
    }

    /// Creates a new customer.
    pub async fn create_customer(&self, input: CustomerCreate) -> Result<Customer> {
        let spec = RequestSpec::new(Method::POST, "/cust").with_body(to_body(&input)?);
        self.execute(spec).await
    }

    /// Updates a customer; only the fields set on `input` are sent.
    pub async fn update_customer(
        &self,
        customer_id: &str,
        input: CustomerUpdate,
    ) -> Result<Customer> {
        let spec = RequestSpec::new(Method::PUT, format!("/cust/{customer_id}"))
            .with_body(to_body(&input)?);
        self.execute(spec).await
    }

    /// Deletes a customer by id.
    pub async fn delete_customer(&self, customer_id: &str) -> Result<()> {
        self.execute_empty(RequestSpec::new(
            Method::DELETE,
            format!("/cust/{customer_id}"),
        ))
        .await
    }

    /// Searches customers by exact phone number.
    pub async fn search_customers_by_phone(&self, phone: &str) -> Result<Page<Customer>> {
        let spec = RequestSpec::new(Method::GET, "/cust")
            .with_query_pairs(PageQuery::default().to_query_pairs())
            .with_query("query_primary_phone", phone);
        self.execute(spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_input_skips_unset_fields() {
        let input = CustomerCreate::new("John Doe");
        let body = serde_json::to_value(&input).unwrap();

        assert_eq!(body, serde_json::json!({"name": "John Doe"}));
    }

    #[test]
    fn update_input_sends_only_set_fields() {
        let input = CustomerUpdate {
            city: Some("Toronto".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&input).unwrap();

        assert_eq!(body, serde_json::json!({"city": "Toronto"}));
    }

    #[test]
    fn customer_defaults_active() {
        let json = r#"{
            "id": "c-1",
            "name": "Jane",
            "created_ts": "2025-01-01T00:00:00Z",
            "updated_ts": "2025-01-01T00:00:00Z"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();

        assert!(customer.active_flag);
        assert_eq!(customer.primary_phone, None);
    }
}
