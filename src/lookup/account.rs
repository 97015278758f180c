use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{Account, AccountLookup, LookupError};

// ============================================================================
// Account Service Client
// ============================================================================

pub struct HttpAccountClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAccountClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

#[async_trait]
impl AccountLookup for HttpAccountClient {
    async fn account_by_id(&self, id: &str) -> Result<Option<Account>, LookupError> {
        let endpoint = format!("{}/accounts/{}", self.base_url, id);

        let response = self.http.get(&endpoint).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let account: Account = response.json().await?;
                Ok(Some(account))
            }
            status => Err(LookupError::UnexpectedStatus {
                endpoint,
                status: status.as_u16(),
            }),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
