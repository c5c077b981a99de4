pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;

pub use audit::{AuditAction, AuditRecord, AuditSink, InMemoryAuditSink};
pub use domain::product::{inventory_value, Product, ProductDraft, ProductId};
pub use errors::{DomainError, ServiceError};
