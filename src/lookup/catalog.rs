use std::time::Duration;

use async_trait::async_trait;

use super::{CatalogItem, CatalogLookup, LookupError};

// ============================================================================
// Catalog Service Client
// ============================================================================

pub struct HttpCatalogClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl CatalogLookup for HttpCatalogClient {
    async fn items_by_ids(&self, ids: &[String]) -> Result<Vec<CatalogItem>, LookupError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = format!("{}/catalogs", self.base_url);

        let response = self
            .http
            .get(&endpoint)
            .query(&[("ids", ids.join(","))])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        let items: Vec<CatalogItem> = response.json().await?;
        Ok(items)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
