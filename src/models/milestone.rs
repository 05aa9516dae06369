//! Milestone domain type.

use super::double_option;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A dated checkpoint within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Storage id
    pub id: String,
    /// Soft reference to the project
    pub project_id: Option<String>,
    /// Short title
    pub title: String,
    /// Due date, if scheduled
    pub due_date: Option<NaiveDate>,
    /// Whether it is done
    pub completed: bool,
    /// Set once on insert
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial write for a [`Milestone`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MilestonePatch {
    /// Soft reference to the project
    #[serde(deserialize_with = "double_option")]
    pub project_id: Option<Option<String>>,
    /// Short title
    pub title: Option<String>,
    /// Due date, if scheduled
    #[serde(deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    /// Whether it is done
    pub completed: Option<bool>,
}
