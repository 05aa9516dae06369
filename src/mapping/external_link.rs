//! `external_links` row <-> [`ExternalLink`].

use super::{set_if, set_some};
use crate::entities::external_link;
use crate::models::{ExternalLink, ExternalLinkPatch, LinkType};
use sea_orm::ActiveValue::NotSet;

/// Builds a [`ExternalLink`] from a stored row.
#[must_use]
pub fn from_storage(row: external_link::Model) -> ExternalLink {
    ExternalLink {
        id: row.id,
        title: row.title,
        url: row.url.unwrap_or_default(),
        link_type: row.link_type.map_or_else(LinkType::default, LinkType::from),
        date_added: row.date_added,
        description: row.description.unwrap_or_default(),
        project_id: row.project_id,
        purchase_order_id: row.purchase_order_id,
        supplier_id: row.supplier_id,
        client_id: row.client_id,
        created_at: row.created_at,
    }
}

/// Builds the partial row for a [`ExternalLinkPatch`].
#[must_use]
pub fn to_storage(patch: &ExternalLinkPatch) -> external_link::ActiveModel {
    external_link::ActiveModel {
        id: NotSet,
        title: set_if(patch.title.clone()),
        url: set_some(patch.url.clone()),
        link_type: set_some(patch.link_type.clone().map(String::from)),
        date_added: set_if(patch.date_added),
        description: set_some(patch.description.clone()),
        project_id: set_if(patch.project_id.clone()),
        purchase_order_id: set_if(patch.purchase_order_id.clone()),
        supplier_id: set_if(patch.supplier_id.clone()),
        client_id: set_if(patch.client_id.clone()),
        created_at: NotSet,
    }
}

/// Builds the full row for a [`ExternalLink`].
#[must_use]
pub fn to_row(entity: &ExternalLink) -> external_link::Model {
    external_link::Model {
        id: entity.id.clone(),
        title: entity.title.clone(),
        url: Some(entity.url.clone()),
        link_type: Some(entity.link_type.as_str().to_string()),
        date_added: entity.date_added,
        description: Some(entity.description.clone()),
        project_id: entity.project_id.clone(),
        purchase_order_id: entity.purchase_order_id.clone(),
        supplier_id: entity.supplier_id.clone(),
        client_id: entity.client_id.clone(),
        created_at: entity.created_at,
    }
}
