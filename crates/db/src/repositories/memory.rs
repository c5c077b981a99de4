use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use stockly_core::domain::product::{Product, ProductId};

use super::{ProductRepository, RepositoryError};

/// Test double with the same id-assignment contract as the SQL store.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<i64, Product>>,
    next_id: AtomicI64,
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.get(&id.0).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by_key(|product| product.id.map(|id| id.0));
        Ok(all)
    }

    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;
        let saved = match product.id {
            Some(id) => {
                products.insert(id.0, product.clone());
                product
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                let assigned = Product { id: Some(ProductId(id)), ..product };
                products.insert(id, assigned.clone());
                assigned
            }
        };
        Ok(saved)
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut products = self.products.write().await;
        products.remove(&id.0);
        Ok(())
    }
}
