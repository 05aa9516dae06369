//! Domain model - the camelCase shapes views and repositories exchange.
//!
//! Every entity comes with a `*Patch` companion describing a partial write.
//! Patch fields follow one rule: `None` means "leave the column alone", and
//! for nullable columns `Some(None)` means "clear it".

pub mod client;
pub mod external_link;
pub mod milestone;
pub mod project;
pub mod purchase_order;
pub mod supplier;
pub mod team_member;

pub use client::{Client, ClientPatch};
pub use external_link::{ExternalLink, ExternalLinkPatch, LinkType};
pub use milestone::{Milestone, MilestonePatch};
pub use project::{Project, ProjectPatch, ProjectStatus};
pub use purchase_order::{PurchaseOrder, PurchaseOrderPatch, PurchaseOrderStatus};
pub use supplier::{CommentType, Supplier, SupplierComment, SupplierCommentPatch, SupplierPatch};
pub use team_member::{TeamMember, TeamMemberPatch};

use serde::{Deserialize, Deserializer};

/// A closed set of status values used as chart categories.
///
/// `ALL` fixes both the category set and its display order.
pub trait StatusCategory: Copy + Eq + std::fmt::Debug + 'static {
    /// Every value, in display order
    const ALL: &'static [Self];

    /// Storage spelling of the value
    fn as_str(self) -> &'static str;
}

/// Deserializes a present field (including an explicit `null`) as `Some(..)`.
///
/// Combined with `#[serde(default)]` this keeps "absent" and "null" apart.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
