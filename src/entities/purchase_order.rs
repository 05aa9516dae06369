//! Purchase order entity - An order for parts placed with a supplier on behalf of a project.
//!
//! The primary contractual deadline lives in `contractual_deadline`; any further
//! deadlines are stored in order as a JSON array of ISO dates in
//! `additional_deadlines`. `client_name` is a cache of the referenced client's
//! name, rewritten whenever `client_id` is written.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order database row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    /// Opaque identifier assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display identifier such as `PO-2025-001`
    pub po_number: String,
    pub part_name: Option<String>,
    pub quantity: Option<i32>,
    /// Canonical values are `active`, `completed`, `canceled`
    pub status: Option<String>,
    /// Date the order was placed
    pub date_created: Option<Date>,
    /// Primary contractual deadline
    pub contractual_deadline: Option<Date>,
    /// JSON array of additional deadlines, e.g. `["2025-03-01","2025-04-15"]`
    pub additional_deadlines: Option<String>,
    /// Date the parts shipped, `NULL` until shipped
    pub shipment_date: Option<Date>,
    /// Team member name who placed the order
    pub placed_by: Option<String>,
    /// Completion percentage (0-100)
    pub progress: Option<i32>,
    /// Free-text notes
    pub notes: Option<String>,
    pub project_id: Option<String>,
    pub supplier_id: Option<String>,
    pub client_id: Option<String>,
    /// Denormalized copy of the client's name
    pub client_name: Option<String>,
    /// When the row was inserted
    pub created_at: Option<DateTimeUtc>,
}

/// Orders reference projects, suppliers and clients by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
