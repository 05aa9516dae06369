//! External link entity - A pointer to an outside document (report, control sheet, tracking page).
//!
//! `url` is opaque: it may be a web address or a local filesystem path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// External link database row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "external_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    /// Link category, e.g. `weekly-report`
    #[sea_orm(column_name = "type")]
    pub link_type: Option<String>,
    pub date_added: Option<Date>,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub purchase_order_id: Option<String>,
    pub supplier_id: Option<String>,
    pub client_id: Option<String>,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
