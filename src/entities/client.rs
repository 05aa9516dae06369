//! Client entity - A customer receiving project deliveries.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Opaque identifier assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Postal address, free text
    pub address: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTimeUtc>,
}

/// Clients are referenced softly by projects and purchase orders
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
