//! Team member entity - Internal staff referenced by name from projects and orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Team member database row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// Free-text role, e.g. "Project Manager"
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    /// Reference to a profile photo (URL or path)
    pub photo_url: Option<String>,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
