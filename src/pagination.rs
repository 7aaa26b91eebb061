//! Page-cursor types for paginated list endpoints.
//!
//! List endpoints respond with `{results: [...], pagination: {...}}`; callers
//! advance `page` and reissue until `has_more` is false. [`fetch_all_pages`]
//! captures that loop once.

use crate::error::Result;
use serde::Deserialize;
use std::future::Future;

/// Cursor fields attached to every paginated response.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    /// Total number of matching records across all pages.
    pub total: u64,
    /// The 1-indexed page this response covers.
    pub page: u32,
    /// Page size the server applied.
    pub limit: u32,
    /// Total number of pages at this limit.
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    /// Whether another page exists after this one.
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// One page of results plus its cursor.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// The records on this page, in server order.
    pub results: Vec<T>,
    /// Cursor describing where this page sits.
    pub pagination: Pagination,
}

/// Query parameters shared by all list endpoints.
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// 1-indexed page to request.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Optional free-text search filter.
    pub search: Option<String>,
}

impl PageQuery {
    /// A query for the given page with the default limit of 20.
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    /// Sets the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Sets the free-text search filter.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Renders the query as request parameters.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: None,
        }
    }
}

/// Walks every page of a listing, accumulating results in page order.
///
/// `fetch` is called with page numbers 1, 2, 3... until a page reports
/// `has_more == false`. The first error aborts the traversal.
///
/// # Examples
///
/// ```no_run
/// use pmo_client::{fetch_all_pages, Client, PageQuery};
///
/// # async fn example(client: Client) -> pmo_client::Result<()> {
/// let all = fetch_all_pages(|page| {
///     let client = client.clone();
///     async move {
///         client
///             .list_customers(PageQuery::page(page).with_limit(100))
///             .await
///     }
/// })
/// .await?;
/// println!("fetched {} customers", all.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_all_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut page = 1;
    let mut all = Vec::new();

    loop {
        let batch = fetch(page).await?;
        let has_more = batch.pagination.has_more;
        all.extend(batch.results);

        if !has_more {
            return Ok(all);
        }
        page += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_fields_use_wire_names() {
        let json = r#"{
            "results": [1, 2, 3],
            "pagination": {"total": 7, "page": 1, "limit": 3, "totalPages": 3, "hasMore": true}
        }"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();

        assert_eq!(page.results, vec![1, 2, 3]);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_more);
    }

    #[test]
    fn page_query_renders_pairs() {
        let query = PageQuery::page(2).with_limit(50).with_search("doe");

        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("search".to_string(), "doe".to_string()),
            ]
        );
    }

    #[test]
    fn page_query_floors_at_one() {
        let query = PageQuery::page(0).with_limit(0);

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 1);
    }

    #[tokio::test]
    async fn traversal_accumulates_in_page_order() {
        let pages = vec![
            (vec!["a", "b"], true),
            (vec!["c"], true),
            (vec!["d", "e"], false),
        ];

        let all = fetch_all_pages(|page| {
            let (results, has_more) = pages[(page - 1) as usize].clone();
            async move {
                Ok(Page {
                    results,
                    pagination: Pagination {
                        total: 5,
                        page,
                        limit: 2,
                        total_pages: 3,
                        has_more,
                    },
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(all, vec!["a", "b", "c", "d", "e"]);
    }
}
