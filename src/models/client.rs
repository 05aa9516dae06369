//! Client domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer receiving deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Storage id
    pub id: String,
    /// Display name
    pub name: String,
    /// Main contact
    pub contact_person: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Postal address
    pub address: String,
    /// Country name
    pub country: String,
    /// Free-text notes
    pub notes: String,
    /// Set once on insert
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial write for a [`Client`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientPatch {
    /// Display name
    pub name: Option<String>,
    /// Main contact
    pub contact_person: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Country name
    pub country: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}
