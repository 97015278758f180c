use crate::lookup::LookupError;
use crate::store::StoreError;

// ============================================================================
// Order Business Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("account not found: {account_id}")]
    AccountNotFound { account_id: String },

    #[error("order has no purchasable line items")]
    EmptyOrder,

    #[error("account service unavailable: {0}")]
    AccountUnavailable(#[source] LookupError),

    #[error("catalog service unavailable: {0}")]
    CatalogUnavailable(#[source] LookupError),

    #[error("order storage failed: {0}")]
    Storage(#[from] StoreError),
}

impl OrderError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccountNotFound { .. } => "account_not_found",
            Self::EmptyOrder => "empty_order",
            Self::AccountUnavailable(_) => "account_unavailable",
            Self::CatalogUnavailable(_) => "catalog_unavailable",
            Self::Storage(_) => "storage",
        }
    }
}
