//! Supplier repository - storage operations for suppliers.
//!
//! Deleting a supplier is a hard delete of the supplier row only: projects,
//! purchase orders and comments that reference it stay fetchable.

use super::{
    check_amount, new_id, non_blank, required_text, storage_failure, update_failure,
};
use crate::{
    entities::{Supplier as Suppliers, supplier},
    errors::{Error, Result},
    mapping,
    models::{Supplier, SupplierPatch},
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ActiveValue::Unchanged, QueryOrder, prelude::*};
use tracing::{info, instrument};

fn validate(patch: &SupplierPatch) -> Result<()> {
    non_blank("Supplier name", patch.name.as_deref())?;
    check_amount("Supplier rating", patch.rating, 5.0)?;
    check_amount("On-time delivery rate", patch.on_time_delivery_rate, 100.0)
}

/// Retrieves every supplier, ordered by name.
#[instrument(skip(db))]
pub async fn list_suppliers(db: &DatabaseConnection) -> Result<Vec<Supplier>> {
    let rows = Suppliers::find()
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(storage_failure("list suppliers"))?;
    Ok(rows.into_iter().map(mapping::supplier::from_storage).collect())
}

/// Retrieves a supplier by id, `None` if it does not exist.
#[instrument(skip(db))]
pub async fn get_supplier_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Supplier>> {
    let row = Suppliers::find_by_id(id)
        .one(db)
        .await
        .map_err(storage_failure("get supplier"))?;
    Ok(row.map(mapping::supplier::from_storage))
}

/// Retrieves a supplier together with its comments, newest first.
pub async fn get_supplier_with_comments(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<Supplier>> {
    let Some(mut supplier) = get_supplier_by_id(db, id).await? else {
        return Ok(None);
    };
    supplier.comments = super::supplier_comment::list_comments_by_supplier(db, id).await?;
    Ok(Some(supplier))
}

/// Creates a supplier.
///
/// # Errors
/// Returns an error if:
/// - The name is missing or blank
/// - The rating is outside 0..=5 or the on-time rate outside 0..=100
/// - The database insert fails
#[instrument(skip(db, patch), fields(name = ?patch.name))]
pub async fn create_supplier(db: &DatabaseConnection, patch: SupplierPatch) -> Result<Supplier> {
    let name = required_text("Supplier name", patch.name.as_deref())?;
    validate(&patch)?;

    let mut active = mapping::supplier::to_storage(&patch);
    active.id = Set(new_id());
    active.name = Set(name);
    active.created_at = Set(Some(Utc::now()));

    let row = active
        .insert(db)
        .await
        .map_err(storage_failure("create supplier"))?;
    info!("Created supplier '{}' ({})", row.name, row.id);
    Ok(mapping::supplier::from_storage(row))
}

/// Applies a partial update to a supplier.
#[instrument(skip(db, patch))]
pub async fn update_supplier(
    db: &DatabaseConnection,
    id: &str,
    patch: SupplierPatch,
) -> Result<Supplier> {
    validate(&patch)?;

    let mut active = mapping::supplier::to_storage(&patch);
    if !active.is_changed() {
        return get_supplier_by_id(db, id)
            .await?
            .ok_or_else(|| Error::not_found("Supplier", id));
    }
    if let Some(name) = &patch.name {
        active.name = Set(name.trim().to_string());
    }
    active.id = Unchanged(id.to_string());

    let row = active
        .update(db)
        .await
        .map_err(update_failure("Supplier", id))?;
    info!("Updated supplier {}", id);
    Ok(mapping::supplier::from_storage(row))
}

/// Hard-deletes a supplier. Returns `false` when no supplier had this id.
#[instrument(skip(db))]
pub async fn delete_supplier(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = Suppliers::delete_by_id(id)
        .exec(db)
        .await
        .map_err(storage_failure("delete supplier"))?;
    Ok(result.rows_affected > 0)
}

/// Recomputes a supplier's stored on-time delivery rate from its purchase orders.
pub async fn refresh_supplier_on_time_rate(db: &DatabaseConnection, id: &str) -> Result<Supplier> {
    let orders = super::purchase_order::list_purchase_orders_by_supplier(db, id).await?;
    let rate = super::metrics::on_time_delivery_rate(id, &orders);
    info!("Supplier {} on-time delivery rate is now {:.1}%", id, rate);

    let patch = SupplierPatch {
        on_time_delivery_rate: Some(rate),
        ..SupplierPatch::default()
    };
    update_supplier(db, id, patch).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{project, purchase_order};
    use crate::models::{PurchaseOrderPatch, PurchaseOrderStatus, SupplierCommentPatch};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_supplier_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_supplier(&db, SupplierPatch::default()).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let patch = SupplierPatch {
            rating: Some(5.5),
            ..SupplierPatch::named("Too Good")
        };
        let result = create_supplier(&db, patch).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let patch = SupplierPatch {
            on_time_delivery_rate: Some(101.0),
            ..SupplierPatch::named("Too Punctual")
        };
        let result = create_supplier(&db, patch).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_fractional_rating_is_kept() -> Result<()> {
        let db = setup_test_db().await?;
        let patch = SupplierPatch {
            rating: Some(4.3),
            contact_person: Some("Jun Park".to_string()),
            ..SupplierPatch::named("Precision Castings")
        };
        let supplier = create_supplier(&db, patch).await?;
        let fetched = get_supplier_by_id(&db, &supplier.id).await?.unwrap();
        assert_eq!(fetched.rating, 4.3);
        assert_eq!(fetched.contact_person, "Jun Park");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_supplier_with_comments() -> Result<()> {
        let (db, supplier) = setup_with_supplier().await?;
        crate::core::supplier_comment::create_comment(
            &db,
            SupplierCommentPatch {
                supplier_id: Some(Some(supplier.id.clone())),
                text: Some("Reliable packaging".to_string()),
                ..SupplierCommentPatch::default()
            },
        )
        .await?;

        let composed = get_supplier_with_comments(&db, &supplier.id).await?.unwrap();
        assert_eq!(composed.comments.len(), 1);
        assert_eq!(composed.comments[0].text, "Reliable packaging");
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_on_time_rate() -> Result<()> {
        let (db, supplier) = setup_with_supplier().await?;
        for (number, shipped) in [("PO-1", date(2025, 3, 10)), ("PO-2", date(2025, 3, 20))] {
            let patch = PurchaseOrderPatch {
                supplier_id: Some(Some(supplier.id.clone())),
                status: Some(PurchaseOrderStatus::Completed),
                contractual_deadlines: Some(vec![date(2025, 3, 15)]),
                shipment_date: Some(Some(shipped)),
                ..order_patch(number)
            };
            purchase_order::create_purchase_order(&db, patch).await?;
        }

        let refreshed = refresh_supplier_on_time_rate(&db, &supplier.id).await?;
        assert_eq!(refreshed.on_time_delivery_rate, 50.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_supplier_does_not_cascade() -> Result<()> {
        let (db, supplier) = setup_with_supplier().await?;
        let client = create_test_client(&db, "Delta Transit").await?;
        let project = create_test_project(&db, "Pantographs", Some(&supplier.id)).await?;
        let order = create_test_purchase_order(
            &db,
            "PO-2025-014",
            Some(&project.id),
            Some(&supplier.id),
            Some(&client.id),
        )
        .await?;

        assert!(delete_supplier(&db, &supplier.id).await?);
        assert!(get_supplier_by_id(&db, &supplier.id).await?.is_none());

        let project_after = project::get_project_by_id(&db, &project.id).await?.unwrap();
        assert_eq!(project_after.supplier_id.as_deref(), Some(supplier.id.as_str()));
        let order_after = purchase_order::get_purchase_order_by_id(&db, &order.id)
            .await?
            .unwrap();
        assert_eq!(order_after.supplier_id.as_deref(), Some(supplier.id.as_str()));
        assert_eq!(order_after.client_name, "Delta Transit");
        Ok(())
    }
}
