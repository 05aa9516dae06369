//! `purchase_orders` row <-> [`PurchaseOrder`].
//!
//! The ordered deadline list is split across two columns: the first entry in
//! `contractual_deadline`, the rest as a JSON array in `additional_deadlines`.

use super::{percent_from_storage, set_if, set_some};
use crate::entities::purchase_order;
use crate::models::{PurchaseOrder, PurchaseOrderPatch, PurchaseOrderStatus, StatusCategory};
use chrono::NaiveDate;
use sea_orm::ActiveValue::{NotSet, Set};
use tracing::warn;

/// Builds a [`PurchaseOrder`] from a stored row.
///
/// A malformed `additional_deadlines` value is logged and read as no
/// additional deadlines.
#[must_use]
pub fn from_storage(row: purchase_order::Model) -> PurchaseOrder {
    let mut contractual_deadlines: Vec<NaiveDate> = row.contractual_deadline.into_iter().collect();
    contractual_deadlines.extend(decode_additional_deadlines(
        &row.id,
        row.additional_deadlines.as_deref(),
    ));

    PurchaseOrder {
        id: row.id,
        po_number: row.po_number,
        part_name: row.part_name.unwrap_or_default(),
        quantity: u32::try_from(row.quantity.unwrap_or(0)).unwrap_or(0),
        status: row
            .status
            .as_deref()
            .map_or_else(PurchaseOrderStatus::default, PurchaseOrderStatus::from_storage_str),
        date_created: row.date_created,
        contractual_deadlines,
        shipment_date: row.shipment_date,
        placed_by: row.placed_by.unwrap_or_default(),
        progress: percent_from_storage(row.progress),
        notes: row.notes.unwrap_or_default(),
        project_id: row.project_id,
        supplier_id: row.supplier_id,
        client_id: row.client_id,
        client_name: row.client_name.unwrap_or_default(),
        created_at: row.created_at,
    }
}

/// Builds the partial row for a [`PurchaseOrderPatch`].
///
/// `client_name` is left `NotSet`; the repository writes it from the client id.
#[must_use]
pub fn to_storage(patch: &PurchaseOrderPatch) -> purchase_order::ActiveModel {
    let (contractual_deadline, additional_deadlines) = match &patch.contractual_deadlines {
        Some(deadlines) => {
            let (primary, rest) = split_deadlines(deadlines);
            (Set(primary), Set(rest))
        }
        None => (NotSet, NotSet),
    };

    purchase_order::ActiveModel {
        id: NotSet,
        po_number: set_if(patch.po_number.clone()),
        part_name: set_some(patch.part_name.clone()),
        quantity: set_some(patch.quantity.map(quantity_to_storage)),
        status: set_some(patch.status.map(|s| s.as_str().to_string())),
        date_created: set_if(patch.date_created),
        contractual_deadline,
        additional_deadlines,
        shipment_date: set_if(patch.shipment_date),
        placed_by: set_some(patch.placed_by.clone()),
        progress: set_some(patch.progress.map(i32::from)),
        notes: set_some(patch.notes.clone()),
        project_id: set_if(patch.project_id.clone()),
        supplier_id: set_if(patch.supplier_id.clone()),
        client_id: set_if(patch.client_id.clone()),
        client_name: NotSet,
        created_at: NotSet,
    }
}

/// Builds the full row for a [`PurchaseOrder`].
#[must_use]
pub fn to_row(entity: &PurchaseOrder) -> purchase_order::Model {
    let (contractual_deadline, additional_deadlines) = split_deadlines(&entity.contractual_deadlines);
    purchase_order::Model {
        id: entity.id.clone(),
        po_number: entity.po_number.clone(),
        part_name: Some(entity.part_name.clone()),
        quantity: Some(quantity_to_storage(entity.quantity)),
        status: Some(entity.status.as_str().to_string()),
        date_created: entity.date_created,
        contractual_deadline,
        additional_deadlines,
        shipment_date: entity.shipment_date,
        placed_by: Some(entity.placed_by.clone()),
        progress: Some(i32::from(entity.progress)),
        notes: Some(entity.notes.clone()),
        project_id: entity.project_id.clone(),
        supplier_id: entity.supplier_id.clone(),
        client_id: entity.client_id.clone(),
        client_name: Some(entity.client_name.clone()),
        created_at: entity.created_at,
    }
}

fn quantity_to_storage(quantity: u32) -> i32 {
    i32::try_from(quantity).unwrap_or(i32::MAX)
}

/// Splits an ordered deadline list into the primary column and the JSON tail.
pub(crate) fn split_deadlines(deadlines: &[NaiveDate]) -> (Option<NaiveDate>, Option<String>) {
    match deadlines.split_first() {
        None => (None, None),
        Some((primary, [])) => (Some(*primary), None),
        Some((primary, rest)) => (
            Some(*primary),
            serde_json::to_string(rest)
                .inspect_err(|e| warn!("Failed to encode additional deadlines: {}", e))
                .ok(),
        ),
    }
}

fn decode_additional_deadlines(order_id: &str, raw: Option<&str>) -> Vec<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => Vec::new(),
        Some(text) => serde_json::from_str(text).unwrap_or_else(|e| {
            warn!(
                "Ignoring malformed additional deadlines on purchase order {}: {}",
                order_id, e
            );
            Vec::new()
        }),
    }
}
