//! Team member domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Internal staff member. Projects and orders refer to members by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Storage id
    pub id: String,
    /// Display name
    pub name: String,
    /// Job role
    pub role: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Department
    pub department: String,
    /// Photo URL, opaque
    pub photo_url: String,
    /// Set once on insert
    pub created_at: Option<DateTime<Utc>>,
}

impl TeamMember {
    /// Whether the free-text role names a manager, ignoring case.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.role.to_lowercase().contains("manager")
    }
}

/// Partial write for a [`TeamMember`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamMemberPatch {
    /// Display name
    pub name: Option<String>,
    /// Job role
    pub role: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Department
    pub department: Option<String>,
    /// Photo URL, opaque
    pub photo_url: Option<String>,
}
