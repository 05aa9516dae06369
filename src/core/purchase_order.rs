//! Purchase order repository.
//!
//! Besides the uniform repository shape, writes here keep the denormalized
//! `client_name` in step with `client_id`: whenever a patch sets the client,
//! the client's current name is looked up and written alongside it. A patch
//! that clears the client clears the name too.

use super::{
    check_percent, client_name_for, new_id, non_blank, required_text, storage_failure,
    update_failure,
};
use crate::{
    entities::{PurchaseOrder as PurchaseOrders, purchase_order},
    errors::{Error, Result},
    mapping,
    models::{PurchaseOrder, PurchaseOrderPatch, PurchaseOrderStatus, StatusCategory},
};
use chrono::Utc;
use sea_orm::{
    ActiveValue::{Set, Unchanged},
    QueryOrder,
    prelude::*,
};
use tracing::{info, instrument};

fn validate(patch: &PurchaseOrderPatch) -> Result<()> {
    non_blank("PO number", patch.po_number.as_deref())?;
    check_percent("Order progress", patch.progress)?;
    if patch.quantity == Some(0) {
        return Err(Error::validation("Quantity must be a positive integer"));
    }
    Ok(())
}

/// Retrieves every purchase order, newest first by creation date.
#[instrument(skip(db))]
pub async fn list_purchase_orders(db: &DatabaseConnection) -> Result<Vec<PurchaseOrder>> {
    let rows = PurchaseOrders::find()
        .order_by_desc(purchase_order::Column::DateCreated)
        .all(db)
        .await
        .map_err(storage_failure("list purchase orders"))?;
    Ok(rows
        .into_iter()
        .map(mapping::purchase_order::from_storage)
        .collect())
}

/// Retrieves a purchase order by storage id, `None` if it does not exist.
#[instrument(skip(db))]
pub async fn get_purchase_order_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<PurchaseOrder>> {
    let row = PurchaseOrders::find_by_id(id)
        .one(db)
        .await
        .map_err(storage_failure("get purchase order"))?;
    Ok(row.map(mapping::purchase_order::from_storage))
}

async fn list_filtered(
    db: &DatabaseConnection,
    column: purchase_order::Column,
    value: &str,
    operation: &'static str,
) -> Result<Vec<PurchaseOrder>> {
    let rows = PurchaseOrders::find()
        .filter(column.eq(value))
        .order_by_desc(purchase_order::Column::DateCreated)
        .all(db)
        .await
        .map_err(storage_failure(operation))?;
    Ok(rows
        .into_iter()
        .map(mapping::purchase_order::from_storage)
        .collect())
}

/// Purchase orders placed for one project.
#[instrument(skip(db))]
pub async fn list_purchase_orders_by_project(
    db: &DatabaseConnection,
    project_id: &str,
) -> Result<Vec<PurchaseOrder>> {
    list_filtered(
        db,
        purchase_order::Column::ProjectId,
        project_id,
        "list purchase orders by project",
    )
    .await
}

/// Purchase orders placed with one supplier.
#[instrument(skip(db))]
pub async fn list_purchase_orders_by_supplier(
    db: &DatabaseConnection,
    supplier_id: &str,
) -> Result<Vec<PurchaseOrder>> {
    list_filtered(
        db,
        purchase_order::Column::SupplierId,
        supplier_id,
        "list purchase orders by supplier",
    )
    .await
}

/// Purchase orders billed to one client.
#[instrument(skip(db))]
pub async fn list_purchase_orders_by_client(
    db: &DatabaseConnection,
    client_id: &str,
) -> Result<Vec<PurchaseOrder>> {
    list_filtered(
        db,
        purchase_order::Column::ClientId,
        client_id,
        "list purchase orders by client",
    )
    .await
}

/// Creates a purchase order.
///
/// # Errors
/// Returns an error if:
/// - The PO number is missing or blank, or the quantity is missing or zero
/// - Progress is above 100
/// - The selected client does not exist
/// - The database insert fails
#[instrument(skip(db, patch), fields(po_number = ?patch.po_number))]
pub async fn create_purchase_order(
    db: &DatabaseConnection,
    patch: PurchaseOrderPatch,
) -> Result<PurchaseOrder> {
    let po_number = required_text("PO number", patch.po_number.as_deref())?;
    if patch.quantity.is_none() {
        return Err(Error::validation("Quantity is required"));
    }
    validate(&patch)?;

    let now = Utc::now();
    let mut active = mapping::purchase_order::to_storage(&patch);
    active.client_name = client_name_for(db, patch.client_id.as_ref()).await?;
    active.id = Set(new_id());
    active.po_number = Set(po_number);
    if patch.status.is_none() {
        active.status = Set(Some(PurchaseOrderStatus::default().as_str().to_string()));
    }
    if patch.date_created.is_none() {
        active.date_created = Set(Some(now.date_naive()));
    }
    active.created_at = Set(Some(now));

    let row = active
        .insert(db)
        .await
        .map_err(storage_failure("create purchase order"))?;
    info!("Created purchase order {} ({})", row.po_number, row.id);
    Ok(mapping::purchase_order::from_storage(row))
}

/// Applies a partial update to a purchase order.
///
/// # Errors
/// Returns `Error::NotFound` if the order or the newly selected client does
/// not exist, `Error::Validation` for invalid fields, or `Error::Database`.
#[instrument(skip(db, patch))]
pub async fn update_purchase_order(
    db: &DatabaseConnection,
    id: &str,
    patch: PurchaseOrderPatch,
) -> Result<PurchaseOrder> {
    validate(&patch)?;

    let mut active = mapping::purchase_order::to_storage(&patch);
    if !active.is_changed() {
        return get_purchase_order_by_id(db, id)
            .await?
            .ok_or_else(|| Error::not_found("PurchaseOrder", id));
    }
    active.client_name = client_name_for(db, patch.client_id.as_ref()).await?;
    if let Some(po_number) = &patch.po_number {
        active.po_number = Set(po_number.trim().to_string());
    }
    active.id = Unchanged(id.to_string());

    let row = active
        .update(db)
        .await
        .map_err(update_failure("PurchaseOrder", id))?;
    info!("Updated purchase order {}", id);
    Ok(mapping::purchase_order::from_storage(row))
}

/// Hard-deletes a purchase order. Links pointing at it are left in place.
#[instrument(skip(db))]
pub async fn delete_purchase_order(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = PurchaseOrders::delete_by_id(id)
        .exec(db)
        .await
        .map_err(storage_failure("delete purchase order"))?;
    Ok(result.rows_affected > 0)
}
