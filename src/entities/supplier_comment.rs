//! Supplier comment entity - Feedback about a supplier left by staff.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier comment database row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier_comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub supplier_id: Option<String>,
    pub text: String,
    /// One of `positive`, `negative`, `neutral`
    #[sea_orm(column_name = "type")]
    pub comment_type: Option<String>,
    pub date: Option<Date>,
    pub author: Option<String>,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
