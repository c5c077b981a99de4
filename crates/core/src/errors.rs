use thiserror::Error;

use crate::domain::product::ProductId;

/// Business-rule failures raised by the domain service. Transport maps these
/// to status codes per endpoint.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid product input: {0}")]
    Validation(String),
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("business rule violated: {0}")]
    BusinessRule(String),
}

/// Operation outcome as seen by callers of the domain service: either a
/// domain failure or a storage-layer one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Storage(String),
}
