use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain operation recorded in the audit trail. Rendered with the
/// SCREAMING_SNAKE action names the audit line format uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Retrieve,
    GetById,
    Update,
    Delete,
    IncreaseStock,
    DecreaseStock,
    CalculateInventory,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Retrieve => "RETRIEVE",
            Self::GetById => "GET_BY_ID",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::IncreaseStock => "INCREASE_STOCK",
            Self::DecreaseStock => "DECREASE_STOCK",
            Self::CalculateInventory => "CALCULATE_INVENTORY",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit trail entry: which operation ran and, when one applies, the
/// name of the product it touched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub event_id: String,
    pub action: AuditAction,
    pub product_name: Option<String>,
    pub occurred_at: DateTime<Local>,
}

impl AuditRecord {
    pub fn new(action: AuditAction, product_name: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            action,
            product_name,
            occurred_at: Local::now(),
        }
    }

    /// Human-readable audit line: local ISO time, action name, product name
    /// (`N/A` when the operation has no single subject).
    pub fn render(&self) -> String {
        format!(
            "[{}] Action: {}, Product: {}",
            self.occurred_at.format("%H:%M:%S%.3f"),
            self.action,
            self.product_name.as_deref().unwrap_or("N/A"),
        )
    }
}

/// Destination for audit records. Emission is synchronous and best-effort;
/// sinks must not fail the operation they describe.
pub trait AuditSink: Send + Sync {
    fn emit(&self, record: AuditRecord);
}

#[derive(Clone, Default)]
pub struct InMemoryAuditSink {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl InMemoryAuditSink {
    pub fn records(&self) -> Vec<AuditRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AuditSink for InMemoryAuditSink {
    fn emit(&self, record: AuditRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}
