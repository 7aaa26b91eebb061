//! Entity linkage (relationship) operations.

use crate::{
    client::Client,
    error::Result,
    pagination::{Page, PageQuery},
    request::RequestSpec,
    resources::to_body,
};
use http::Method;
use serde::{Deserialize, Serialize};

/// A parent/child relationship between two platform entities.
#[derive(Debug, Clone, Deserialize)]
pub struct Linkage {
    pub id: String,
    pub parent_entity_type: String,
    pub parent_entity_id: String,
    pub child_entity_type: String,
    pub child_entity_id: String,
    #[serde(default)]
    pub relationship_type: Option<String>,
}

/// Input for creating a linkage.
#[derive(Debug, Clone, Serialize)]
pub struct LinkageCreate {
    pub parent_entity_type: String,
    pub parent_entity_id: String,
    pub child_entity_type: String,
    pub child_entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,
}

/// Listing filters: paging plus an optional parent scope.
#[derive(Debug, Clone, Default)]
pub struct LinkageQuery {
    pub page: PageQuery,
    pub parent_entity_type: Option<String>,
    pub parent_entity_id: Option<String>,
}

impl LinkageQuery {
    /// Scopes the listing to children of one parent entity.
    pub fn for_parent(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            page: PageQuery::default(),
            parent_entity_type: Some(entity_type.into()),
            parent_entity_id: Some(entity_id.into()),
        }
    }

    fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.page.to_query_pairs();
        if let Some(entity_type) = &self.parent_entity_type {
            pairs.push(("parent_entity_type".to_string(), entity_type.clone()));
        }
        if let Some(entity_id) = &self.parent_entity_id {
            pairs.push(("parent_entity_id".to_string(), entity_id.clone()));
        }
        pairs
    }
}

impl Client {
    /// Lists linkages, optionally scoped to one parent entity.
    pub async fn list_linkages(&self, query: LinkageQuery) -> Result<Page<Linkage>> {
        let spec = RequestSpec::new(Method::GET, "/entity-linkage")
            .with_query_pairs(query.to_query_pairs());
        self.execute(spec).await
    }

    /// Creates a linkage between two entities.
    pub async fn create_linkage(&self, input: LinkageCreate) -> Result<Linkage> {
        let spec = RequestSpec::new(Method::POST, "/entity-linkage").with_body(to_body(&input)?);
        self.execute(spec).await
    }

    /// Deletes a linkage by id.
    pub async fn delete_linkage(&self, linkage_id: &str) -> Result<()> {
        self.execute_empty(RequestSpec::new(
            Method::DELETE,
            format!("/entity-linkage/{linkage_id}"),
        ))
        .await
    }
}
