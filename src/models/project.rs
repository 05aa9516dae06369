//! Project domain type and its status enum.

use super::{Milestone, StatusCategory, double_option};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Not started
    #[default]
    Pending,
    /// Being manufactured
    InProgress,
    /// Behind schedule
    Delayed,
    /// Delivered
    Completed,
}

impl ProjectStatus {
    /// Parses a stored status, falling back to `Pending` for unknown values.
    #[must_use]
    pub fn from_storage_str(value: &str) -> Self {
        match value {
            "pending" => Self::Pending,
            "in-progress" => Self::InProgress,
            "delayed" => Self::Delayed,
            "completed" => Self::Completed,
            other => {
                warn!("Unknown project status '{}', treating as pending", other);
                Self::Pending
            }
        }
    }
}

impl StatusCategory for ProjectStatus {
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::InProgress,
        Self::Delayed,
        Self::Completed,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Delayed => "delayed",
            Self::Completed => "completed",
        }
    }
}

/// A manufacturing project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Storage id
    pub id: String,
    /// Display name
    pub name: String,
    /// Lifecycle status
    pub status: ProjectStatus,
    /// Completion percentage, always within 0..=100
    pub progress: u8,
    /// Planned start
    pub start_date: Option<NaiveDate>,
    /// Contractual deadline
    pub deadline: Option<NaiveDate>,
    /// Total budget
    pub budget: f64,
    /// Free text; only ever substring-matched, never geocoded
    pub location: String,
    /// Free-text description
    pub description: String,
    /// Responsible project manager
    pub project_manager: String,
    /// Responsible manufacturing manager
    pub manufacturing_manager: String,
    /// Soft reference to the supplier
    pub supplier_id: Option<String>,
    /// Soft reference to the client
    pub client_id: Option<String>,
    /// Name of the client at the time `client_id` was last written
    pub client_name: String,
    /// Filled only by the composed fetch; rows never carry it
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Set once on insert
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial write for a [`Project`].
///
/// There is no `client_name`: it is derived from `client_id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPatch {
    /// Display name
    pub name: Option<String>,
    /// Lifecycle status
    pub status: Option<ProjectStatus>,
    /// Completion percentage, 0..=100
    pub progress: Option<u8>,
    /// Planned start
    #[serde(deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    /// Contractual deadline
    #[serde(deserialize_with = "double_option")]
    pub deadline: Option<Option<NaiveDate>>,
    /// Total budget
    pub budget: Option<f64>,
    /// Free-text location
    pub location: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Responsible project manager
    pub project_manager: Option<String>,
    /// Responsible manufacturing manager
    pub manufacturing_manager: Option<String>,
    /// Soft reference to the supplier
    #[serde(deserialize_with = "double_option")]
    pub supplier_id: Option<Option<String>>,
    /// Soft reference to the client
    #[serde(deserialize_with = "double_option")]
    pub client_id: Option<Option<String>>,
}

impl ProjectPatch {
    /// Minimal patch for creating a project with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
