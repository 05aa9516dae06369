//! Purchase order domain type and the canonical order status.

use super::{StatusCategory, double_option};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Canonical purchase order status.
///
/// Older rows spell statuses the way projects do; those spellings are mapped
/// here and logged so they can be found and migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    /// Open order
    #[default]
    Active,
    /// Delivered in full
    Completed,
    /// Withdrawn
    Canceled,
}

impl PurchaseOrderStatus {
    /// Parses a stored status, translating legacy spellings.
    ///
    /// `pending`, `in-progress` and `delayed` are open orders and become
    /// `Active`; `cancelled` becomes `Canceled`. Unknown values become `Active`.
    #[must_use]
    pub fn from_storage_str(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "completed" => Self::Completed,
            "canceled" => Self::Canceled,
            "pending" | "in-progress" | "delayed" => {
                warn!("Legacy purchase order status '{}' mapped to active", value);
                Self::Active
            }
            "cancelled" => {
                warn!("Legacy purchase order status '{}' mapped to canceled", value);
                Self::Canceled
            }
            other => {
                warn!("Unknown purchase order status '{}', treating as active", other);
                Self::Active
            }
        }
    }

    /// Whether `value` is not one of the canonical spellings.
    #[must_use]
    pub fn is_non_canonical(value: &str) -> bool {
        !Self::ALL.iter().any(|status| status.as_str() == value)
    }
}

impl StatusCategory for PurchaseOrderStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Completed, Self::Canceled];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

/// An order for parts placed with a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    /// Storage id
    pub id: String,
    /// Purchase order number
    pub po_number: String,
    /// Ordered part
    pub part_name: String,
    /// Ordered quantity, positive
    pub quantity: u32,
    /// Lifecycle status
    pub status: PurchaseOrderStatus,
    /// Date the order was placed
    pub date_created: Option<NaiveDate>,
    /// Ordered; the first entry is the primary contractual deadline
    pub contractual_deadlines: Vec<NaiveDate>,
    /// Actual shipment date
    pub shipment_date: Option<NaiveDate>,
    /// Who placed the order
    pub placed_by: String,
    /// Completion percentage, 0..=100
    pub progress: u8,
    /// Free-text notes
    pub notes: String,
    /// Soft reference to the project
    pub project_id: Option<String>,
    /// Soft reference to the supplier
    pub supplier_id: Option<String>,
    /// Soft reference to the client
    pub client_id: Option<String>,
    /// Cache of the client's name, rewritten whenever `client_id` is written
    pub client_name: String,
    /// Set once on insert
    pub created_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    /// The primary contractual deadline, if any deadline is set.
    #[must_use]
    pub fn primary_deadline(&self) -> Option<NaiveDate> {
        self.contractual_deadlines.first().copied()
    }
}

/// Partial write for a [`PurchaseOrder`].
///
/// There is deliberately no `client_name`: it is derived from `client_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PurchaseOrderPatch {
    /// Purchase order number
    pub po_number: Option<String>,
    /// Ordered part
    pub part_name: Option<String>,
    /// Ordered quantity, positive
    pub quantity: Option<u32>,
    /// Lifecycle status
    pub status: Option<PurchaseOrderStatus>,
    /// Date the order was placed
    #[serde(deserialize_with = "double_option")]
    pub date_created: Option<Option<NaiveDate>>,
    /// Deadlines in order; the first is the primary one
    pub contractual_deadlines: Option<Vec<NaiveDate>>,
    /// Actual shipment date
    #[serde(deserialize_with = "double_option")]
    pub shipment_date: Option<Option<NaiveDate>>,
    /// Who placed the order
    pub placed_by: Option<String>,
    /// Completion percentage, 0..=100
    pub progress: Option<u8>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Soft reference to the project
    #[serde(deserialize_with = "double_option")]
    pub project_id: Option<Option<String>>,
    /// Soft reference to the supplier
    #[serde(deserialize_with = "double_option")]
    pub supplier_id: Option<Option<String>>,
    /// Soft reference to the client
    #[serde(deserialize_with = "double_option")]
    pub client_id: Option<Option<String>>,
}
