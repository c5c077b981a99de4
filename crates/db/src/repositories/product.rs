use rust_decimal::Decimal;
use sqlx::Row;

use stockly_core::domain::product::{Product, ProductId};

use super::{ProductRepository, RepositoryError};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

// Prices are stored as canonical decimal strings; SQLite REAL would round-trip
// through binary floats.
fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price_str: String =
        row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let quantity: i64 =
        row.try_get("quantity").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let description: Option<String> =
        row.try_get("description").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    let price = price_str.parse::<Decimal>().map_err(|e| {
        RepositoryError::Decode(format!("invalid stored price `{price_str}`: {e}"))
    })?;

    Ok(Product { id: Some(ProductId(id)), name, price, quantity, description })
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, price, quantity, description FROM product WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_product(r)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, price, quantity, description FROM product ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }

    async fn save(&self, product: Product) -> Result<Product, RepositoryError> {
        let price_str = product.price.to_string();

        match product.id {
            Some(id) => {
                sqlx::query(
                    "UPDATE product SET name = ?, price = ?, quantity = ?, description = ?
                     WHERE id = ?",
                )
                .bind(&product.name)
                .bind(&price_str)
                .bind(product.quantity)
                .bind(&product.description)
                .bind(id.0)
                .execute(&self.pool)
                .await?;

                Ok(product)
            }
            None => {
                let result = sqlx::query(
                    "INSERT INTO product (name, price, quantity, description)
                     VALUES (?, ?, ?, ?)",
                )
                .bind(&product.name)
                .bind(&price_str)
                .bind(product.quantity)
                .bind(&product.description)
                .execute(&self.pool)
                .await?;

                let assigned = ProductId(result.last_insert_rowid());
                Ok(Product { id: Some(assigned), ..product })
            }
        }
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM product WHERE id = ?").bind(id.0).execute(&self.pool).await?;
        Ok(())
    }
}
