//! Error types for the indexer.

use od_ingestion::IngestionError;
use od_types::{AccountId, TypeError};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while building an aggregate.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// Error from the ingestion layer.
    #[error("ingestion error: {0}")]
    Ingestion(#[from] IngestionError),

    /// The raw identifier could not be normalized.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(#[from] TypeError),

    /// The identifier resolved, but OpenDota does not know the account.
    #[error("account {account_id} not found. {hint}")]
    AccountNotFound { account_id: AccountId, hint: String },

    /// The build did not finish within the configured deadline.
    #[error("aggregate build exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),
}

impl IndexerError {
    /// Returns true when the account does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            IndexerError::AccountNotFound { .. } => true,
            IndexerError::Ingestion(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Returns true when retrying later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            IndexerError::Ingestion(err) => err.is_transient(),
            IndexerError::DeadlineExceeded(_) => true,
            _ => false,
        }
    }

    /// Convert an upstream 404 for `account_id` into [`IndexerError::AccountNotFound`].
    pub(crate) fn from_lookup(account_id: AccountId, err: IngestionError) -> Self {
        match err {
            IngestionError::NotFound { hint, .. } => IndexerError::AccountNotFound { account_id, hint },
            other => IndexerError::Ingestion(other),
        }
    }
}
