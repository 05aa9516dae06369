//! Project entity - A manufacturing project tracked on the dashboard.
//!
//! Supplier and client references are soft: no foreign key constraint is
//! declared, so deleting a supplier or client leaves its projects in place.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Opaque identifier assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Project name
    pub name: String,
    /// One of `pending`, `in-progress`, `delayed`, `completed`
    pub status: Option<String>,
    /// Completion percentage (0-100)
    pub progress: Option<i32>,
    /// Planned start date
    pub start_date: Option<Date>,
    /// Delivery deadline
    pub deadline: Option<Date>,
    /// Budget in the reporting currency
    pub budget: Option<f64>,
    /// Free-text location, e.g. "New York, USA"
    pub location: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Team member name of the project manager
    pub project_manager: Option<String>,
    /// Team member name of the manufacturing manager
    pub manufacturing_manager: Option<String>,
    /// Supplier producing this project
    pub supplier_id: Option<String>,
    /// Client the project is delivered to
    pub client_id: Option<String>,
    /// Denormalized copy of the client's name
    pub client_name: Option<String>,
    /// When the row was inserted
    pub created_at: Option<DateTimeUtc>,
}

/// Projects reference other tables by id only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
