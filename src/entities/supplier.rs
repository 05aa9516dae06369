//! Supplier entity - A manufacturer or vendor producing parts for projects.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database row
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Opaque identifier assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Supplier name
    pub name: String,
    /// Country of the supplier's main plant
    pub country: Option<String>,
    /// Name of the contact person
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Quality rating from 0 to 5, fractional allowed
    pub rating: Option<f64>,
    /// Stored on-time delivery percentage (0-100)
    pub on_time_delivery_rate: Option<f64>,
    /// Free-text location
    pub location: Option<String>,
    /// When the row was inserted
    pub created_at: Option<DateTimeUtc>,
}

/// Suppliers are referenced softly by projects, orders and comments
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
