//! External link domain type.

use super::double_option;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Category of an external document link.
///
/// Unrecognised stored values are kept verbatim in `Other` so they survive
/// a read-modify-write cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LinkType {
    /// Weekly progress report
    #[default]
    WeeklyReport,
    /// Manufacturing control sheet
    ManufacturingControl,
    /// Shipping documents
    Shipment,
    /// Photo album
    Photos,
    /// Carrier tracking page
    Tracking,
    /// Any other category, kept verbatim
    Other(String),
}

impl LinkType {
    /// Storage spelling
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::WeeklyReport => "weekly-report",
            Self::ManufacturingControl => "manufacturing-control",
            Self::Shipment => "shipment",
            Self::Photos => "photos",
            Self::Tracking => "tracking",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for LinkType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "weekly-report" => Self::WeeklyReport,
            "manufacturing-control" => Self::ManufacturingControl,
            "shipment" => Self::Shipment,
            "photos" => Self::Photos,
            "tracking" => Self::Tracking,
            _ => Self::Other(value),
        }
    }
}

impl From<LinkType> for String {
    fn from(value: LinkType) -> Self {
        value.as_str().to_string()
    }
}

/// A pointer to a document kept outside the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLink {
    /// Storage id
    pub id: String,
    /// Short title
    pub title: String,
    /// Web address or local path, never interpreted
    pub url: String,
    /// Link category
    #[serde(rename = "type")]
    pub link_type: LinkType,
    /// Date the link was added
    pub date_added: Option<NaiveDate>,
    /// Free-text description
    pub description: String,
    /// Soft reference to the project
    pub project_id: Option<String>,
    /// Soft reference to the purchase order
    pub purchase_order_id: Option<String>,
    /// Soft reference to the supplier
    pub supplier_id: Option<String>,
    /// Soft reference to the client
    pub client_id: Option<String>,
    /// Set once on insert
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial write for an [`ExternalLink`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExternalLinkPatch {
    /// Short title
    pub title: Option<String>,
    /// Target URL, opaque
    pub url: Option<String>,
    /// Link category
    #[serde(rename = "type")]
    pub link_type: Option<LinkType>,
    /// Date the link was added
    #[serde(deserialize_with = "double_option")]
    pub date_added: Option<Option<NaiveDate>>,
    /// Free-text description
    pub description: Option<String>,
    /// Soft reference to the project
    #[serde(deserialize_with = "double_option")]
    pub project_id: Option<Option<String>>,
    /// Soft reference to the purchase order
    #[serde(deserialize_with = "double_option")]
    pub purchase_order_id: Option<Option<String>>,
    /// Soft reference to the supplier
    #[serde(deserialize_with = "double_option")]
    pub supplier_id: Option<Option<String>>,
    /// Soft reference to the client
    #[serde(deserialize_with = "double_option")]
    pub client_id: Option<Option<String>>,
}
