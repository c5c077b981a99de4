//! The inventory domain service: every business rule lives here, and every
//! read or write goes through the repository it mediates. Each operation
//! emits exactly one audit record on success.

use std::sync::Arc;

use rust_decimal::Decimal;

use stockly_core::audit::{AuditAction, AuditRecord, AuditSink};
use stockly_core::domain::product::{inventory_value, Product, ProductDraft, ProductId};
use stockly_core::errors::{DomainError, ServiceError};
use stockly_db::repositories::{ProductRepository, RepositoryError};

/// Audit sink that writes rendered audit lines through `tracing`.
#[derive(Clone, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn emit(&self, record: AuditRecord) {
        tracing::info!(
            event_name = "audit.recorded",
            audit_event_id = %record.event_id,
            action = %record.action,
            "{}",
            record.render()
        );
    }
}

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    audit: Arc<dyn AuditSink>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>, audit: Arc<dyn AuditSink>) -> Self {
        Self { repository, audit }
    }

    fn storage(error: RepositoryError) -> ServiceError {
        ServiceError::Storage(error.to_string())
    }

    async fn require(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::storage)?
            .ok_or_else(|| DomainError::NotFound(id).into())
    }

    /// Validates the candidate, applies the bulk discount, and persists it.
    pub async fn create(&self, candidate: ProductDraft) -> Result<Product, ServiceError> {
        let mut product = candidate.into_product()?;
        product.apply_bulk_discount();

        let saved = self.repository.save(product).await.map_err(Self::storage)?;
        self.audit.emit(AuditRecord::new(AuditAction::Create, Some(saved.name.clone())));
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self.repository.find_all().await.map_err(Self::storage)?;
        self.audit.emit(AuditRecord::new(AuditAction::Retrieve, None));
        Ok(products)
    }

    /// Absence is an empty result, not an error; the audit record is only
    /// emitted on a hit.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        let product = self.repository.find_by_id(id).await.map_err(Self::storage)?;
        if let Some(product) = &product {
            self.audit.emit(AuditRecord::new(AuditAction::GetById, Some(product.name.clone())));
        }
        Ok(product)
    }

    /// Overwrites name/price/quantity/description on an existing record and
    /// re-evaluates the discount against the incoming quantity and price.
    pub async fn update(
        &self,
        id: ProductId,
        details: ProductDraft,
    ) -> Result<Product, ServiceError> {
        let existing = self.require(id).await?;

        let mut updated = details.into_product()?;
        updated.id = existing.id;
        updated.apply_bulk_discount();

        let saved = self.repository.save(updated).await.map_err(Self::storage)?;
        self.audit.emit(AuditRecord::new(AuditAction::Update, Some(saved.name.clone())));
        Ok(saved)
    }

    /// Deletion is only permitted once the stock has been drawn down to zero.
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        let existing = self.require(id).await?;

        if existing.quantity > 0 {
            return Err(DomainError::BusinessRule(
                "cannot delete product with remaining stock".to_string(),
            )
            .into());
        }

        self.repository.delete_by_id(id).await.map_err(Self::storage)?;
        self.audit.emit(AuditRecord::new(AuditAction::Delete, Some(existing.name)));
        Ok(())
    }

    pub async fn increase_stock(
        &self,
        id: ProductId,
        amount: i64,
    ) -> Result<Product, ServiceError> {
        let mut product = self.require(id).await?;

        if amount <= 0 {
            return Err(
                DomainError::Validation("stock amount must be positive".to_string()).into()
            );
        }

        product.quantity = product.quantity.checked_add(amount).ok_or_else(|| {
            DomainError::BusinessRule("stock quantity would overflow".to_string())
        })?;
        let saved = self.repository.save(product).await.map_err(Self::storage)?;
        self.audit.emit(AuditRecord::new(AuditAction::IncreaseStock, Some(saved.name.clone())));
        Ok(saved)
    }

    pub async fn decrease_stock(
        &self,
        id: ProductId,
        amount: i64,
    ) -> Result<Product, ServiceError> {
        let mut product = self.require(id).await?;

        if amount <= 0 {
            return Err(
                DomainError::Validation("stock amount must be positive".to_string()).into()
            );
        }

        if product.quantity < amount {
            return Err(DomainError::BusinessRule("insufficient stock".to_string()).into());
        }

        product.quantity -= amount;
        let saved = self.repository.save(product).await.map_err(Self::storage)?;
        self.audit.emit(AuditRecord::new(AuditAction::DecreaseStock, Some(saved.name.clone())));
        Ok(saved)
    }

    /// Sum of `price * quantity` over every stored record.
    pub async fn inventory_value(&self) -> Result<Decimal, ServiceError> {
        let products = self.repository.find_all().await.map_err(Self::storage)?;
        let total = inventory_value(&products);
        self.audit.emit(AuditRecord::new(AuditAction::CalculateInventory, None));
        Ok(total)
    }
}
