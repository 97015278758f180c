use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Collaborator Lookups - Account and Catalog Capabilities
// ============================================================================
//
// The order pipeline consumes two read capabilities owned by other services.
// They are modelled as traits so the orchestration layer receives them as
// explicitly constructed dependencies and tests can substitute doubles.
//
// ============================================================================

mod account;
mod catalog;

pub use account::HttpAccountClient;
pub use catalog::HttpCatalogClient;

/// An account as the account service reports it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// A catalog entry as the catalog service reports it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unit_price: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },
}

/// Resolve a single account by its id.
///
/// `Ok(None)` means the account does not exist; errors mean the collaborator
/// could not answer at all.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn account_by_id(&self, id: &str) -> Result<Option<Account>, LookupError>;
}

/// Resolve a set of catalog entries by id.
///
/// Ids with no catalog entry are simply absent from the result; that is not
/// an error.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn items_by_ids(&self, ids: &[String]) -> Result<Vec<CatalogItem>, LookupError>;
}
