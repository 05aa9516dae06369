//! Supplier comment repository.

use super::{new_id, non_blank, required_text, storage_failure, update_failure};
use crate::{
    entities::{SupplierComment as SupplierComments, supplier_comment},
    errors::{Error, Result},
    mapping,
    models::{SupplierComment, SupplierCommentPatch},
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ActiveValue::Unchanged, QueryOrder, prelude::*};
use tracing::instrument;

/// Retrieves every supplier comment, newest first.
#[instrument(skip(db))]
pub async fn list_comments(db: &DatabaseConnection) -> Result<Vec<SupplierComment>> {
    let rows = SupplierComments::find()
        .order_by_desc(supplier_comment::Column::Date)
        .all(db)
        .await
        .map_err(storage_failure("list supplier comments"))?;
    Ok(rows
        .into_iter()
        .map(mapping::supplier_comment::from_storage)
        .collect())
}

/// Retrieves a comment by id, `None` if it does not exist.
#[instrument(skip(db))]
pub async fn get_comment_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<SupplierComment>> {
    let row = SupplierComments::find_by_id(id)
        .one(db)
        .await
        .map_err(storage_failure("get supplier comment"))?;
    Ok(row.map(mapping::supplier_comment::from_storage))
}

/// Comments left on one supplier, newest first.
#[instrument(skip(db))]
pub async fn list_comments_by_supplier(
    db: &DatabaseConnection,
    supplier_id: &str,
) -> Result<Vec<SupplierComment>> {
    let rows = SupplierComments::find()
        .filter(supplier_comment::Column::SupplierId.eq(supplier_id))
        .order_by_desc(supplier_comment::Column::Date)
        .all(db)
        .await
        .map_err(storage_failure("list supplier comments by supplier"))?;
    Ok(rows
        .into_iter()
        .map(mapping::supplier_comment::from_storage)
        .collect())
}

/// Creates a comment. Text and supplier are required; the date defaults to today.
#[instrument(skip(db, patch))]
pub async fn create_comment(
    db: &DatabaseConnection,
    patch: SupplierCommentPatch,
) -> Result<SupplierComment> {
    let text = required_text("Comment text", patch.text.as_deref())?;
    let supplier_id = required_text(
        "Comment supplier",
        patch.supplier_id.as_ref().and_then(Option::as_deref),
    )?;

    let now = Utc::now();
    let mut active = mapping::supplier_comment::to_storage(&patch);
    active.id = Set(new_id());
    active.text = Set(text);
    active.supplier_id = Set(Some(supplier_id));
    if patch.date.is_none() {
        active.date = Set(Some(now.date_naive()));
    }
    active.created_at = Set(Some(now));

    let row = active
        .insert(db)
        .await
        .map_err(storage_failure("create supplier comment"))?;
    Ok(mapping::supplier_comment::from_storage(row))
}

/// Applies a partial update to a comment.
#[instrument(skip(db, patch))]
pub async fn update_comment(
    db: &DatabaseConnection,
    id: &str,
    patch: SupplierCommentPatch,
) -> Result<SupplierComment> {
    non_blank("Comment text", patch.text.as_deref())?;

    let mut active = mapping::supplier_comment::to_storage(&patch);
    if !active.is_changed() {
        return get_comment_by_id(db, id)
            .await?
            .ok_or_else(|| Error::not_found("SupplierComment", id));
    }
    active.id = Unchanged(id.to_string());

    let row = active
        .update(db)
        .await
        .map_err(update_failure("SupplierComment", id))?;
    Ok(mapping::supplier_comment::from_storage(row))
}

/// Hard-deletes a comment.
#[instrument(skip(db))]
pub async fn delete_comment(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = SupplierComments::delete_by_id(id)
        .exec(db)
        .await
        .map_err(storage_failure("delete supplier comment"))?;
    Ok(result.rows_affected > 0)
}
