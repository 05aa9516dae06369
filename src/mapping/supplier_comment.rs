//! `supplier_comments` row <-> [`SupplierComment`].

use super::{set_if, set_some};
use crate::entities::supplier_comment;
use crate::models::{CommentType, SupplierComment, SupplierCommentPatch};
use sea_orm::ActiveValue::NotSet;

/// Builds a [`SupplierComment`] from a stored row.
#[must_use]
pub fn from_storage(row: supplier_comment::Model) -> SupplierComment {
    SupplierComment {
        id: row.id,
        supplier_id: row.supplier_id,
        text: row.text,
        comment_type: row
            .comment_type
            .as_deref()
            .map_or_else(CommentType::default, CommentType::from_storage_str),
        date: row.date,
        author: row.author.unwrap_or_default(),
        created_at: row.created_at,
    }
}

/// Builds the partial row for a [`SupplierCommentPatch`].
#[must_use]
pub fn to_storage(patch: &SupplierCommentPatch) -> supplier_comment::ActiveModel {
    supplier_comment::ActiveModel {
        id: NotSet,
        supplier_id: set_if(patch.supplier_id.clone()),
        text: set_if(patch.text.clone()),
        comment_type: set_some(patch.comment_type.map(|t| t.as_str().to_string())),
        date: set_if(patch.date),
        author: set_some(patch.author.clone()),
        created_at: NotSet,
    }
}

/// Builds the full row for a [`SupplierComment`].
#[must_use]
pub fn to_row(entity: &SupplierComment) -> supplier_comment::Model {
    supplier_comment::Model {
        id: entity.id.clone(),
        supplier_id: entity.supplier_id.clone(),
        text: entity.text.clone(),
        comment_type: Some(entity.comment_type.as_str().to_string()),
        date: entity.date,
        author: Some(entity.author.clone()),
        created_at: entity.created_at,
    }
}
