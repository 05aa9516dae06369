//! Supplier and supplier comment domain types.

use super::double_option;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A vendor producing parts for projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Storage id
    pub id: String,
    /// Display name
    pub name: String,
    /// Country name
    pub country: String,
    /// Main contact
    pub contact_person: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// 0 to 5, fractional allowed
    pub rating: f64,
    /// Stored percentage (0-100); see `core::metrics::on_time_delivery_rate` for the derived value
    pub on_time_delivery_rate: f64,
    /// Free-text location
    pub location: String,
    /// Free-text comments
    #[serde(default)]
    pub comments: Vec<SupplierComment>,
    /// Set once on insert
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial write for a [`Supplier`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupplierPatch {
    /// Display name
    pub name: Option<String>,
    /// Country name
    pub country: Option<String>,
    /// Main contact
    pub contact_person: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Rating out of 5
    pub rating: Option<f64>,
    /// Recorded on-time delivery percentage
    pub on_time_delivery_rate: Option<f64>,
    /// Free-text location
    pub location: Option<String>,
}

impl SupplierPatch {
    /// Minimal patch for creating a supplier with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Sentiment of a supplier comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentType {
    /// Praise
    Positive,
    /// Complaint
    Negative,
    /// Plain note
    #[default]
    Neutral,
}

impl CommentType {
    /// Storage spelling
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Parses a stored value, falling back to `Neutral`.
    #[must_use]
    pub fn from_storage_str(value: &str) -> Self {
        match value {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            "neutral" => Self::Neutral,
            other => {
                warn!("Unknown comment type '{}', treating as neutral", other);
                Self::Neutral
            }
        }
    }
}

/// Staff feedback about a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierComment {
    /// Storage id
    pub id: String,
    /// Soft reference to the supplier
    pub supplier_id: Option<String>,
    /// Comment body
    pub text: String,
    /// Comment category
    #[serde(rename = "type")]
    pub comment_type: CommentType,
    /// Date the comment refers to
    pub date: Option<NaiveDate>,
    /// Who wrote it
    pub author: String,
    /// Set once on insert
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial write for a [`SupplierComment`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupplierCommentPatch {
    /// Soft reference to the supplier
    #[serde(deserialize_with = "double_option")]
    pub supplier_id: Option<Option<String>>,
    /// Comment body
    pub text: Option<String>,
    /// Comment category
    #[serde(rename = "type")]
    pub comment_type: Option<CommentType>,
    /// Date the comment refers to
    #[serde(deserialize_with = "double_option")]
    pub date: Option<Option<NaiveDate>>,
    /// Who wrote it
    pub author: Option<String>,
}
