use async_trait::async_trait;
use thiserror::Error;

use stockly_core::domain::product::{Product, ProductId};

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Key-addressed product store consumed by the domain service.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Every stored record, in storage order (ascending id).
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Insert-or-update. A record without an id is inserted and returned
    /// with the assigned one; a record with an id overwrites that row.
    async fn save(&self, product: Product) -> Result<Product, RepositoryError>;

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError>;
}
