//! Milestone entity - A dated checkpoint within a project.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Milestone database row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "milestones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Project this milestone belongs to
    pub project_id: Option<String>,
    pub title: String,
    pub due_date: Option<Date>,
    pub completed: Option<bool>,
    pub created_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
