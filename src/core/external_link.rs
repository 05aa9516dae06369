//! External link repository.
//!
//! A link may hang off a project, a purchase order, a supplier or a client;
//! each association has its own listing.

use super::{new_id, non_blank, required_text, storage_failure, update_failure};
use crate::{
    entities::{ExternalLink as ExternalLinks, external_link},
    errors::{Error, Result},
    mapping,
    models::{ExternalLink, ExternalLinkPatch},
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ActiveValue::Unchanged, QueryOrder, prelude::*};
use tracing::{info, instrument};

/// Retrieves every link, most recently added first.
#[instrument(skip(db))]
pub async fn list_links(db: &DatabaseConnection) -> Result<Vec<ExternalLink>> {
    let rows = ExternalLinks::find()
        .order_by_desc(external_link::Column::DateAdded)
        .all(db)
        .await
        .map_err(storage_failure("list external links"))?;
    Ok(rows.into_iter().map(mapping::external_link::from_storage).collect())
}

/// Retrieves a link by id, `None` if it does not exist.
#[instrument(skip(db))]
pub async fn get_link_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<ExternalLink>> {
    let row = ExternalLinks::find_by_id(id)
        .one(db)
        .await
        .map_err(storage_failure("get external link"))?;
    Ok(row.map(mapping::external_link::from_storage))
}

async fn list_filtered(
    db: &DatabaseConnection,
    column: external_link::Column,
    value: &str,
    operation: &'static str,
) -> Result<Vec<ExternalLink>> {
    let rows = ExternalLinks::find()
        .filter(column.eq(value))
        .order_by_desc(external_link::Column::DateAdded)
        .all(db)
        .await
        .map_err(storage_failure(operation))?;
    Ok(rows.into_iter().map(mapping::external_link::from_storage).collect())
}

/// Links attached to a project.
pub async fn list_links_by_project(
    db: &DatabaseConnection,
    project_id: &str,
) -> Result<Vec<ExternalLink>> {
    list_filtered(
        db,
        external_link::Column::ProjectId,
        project_id,
        "list external links by project",
    )
    .await
}

/// Links attached to a purchase order.
pub async fn list_links_by_purchase_order(
    db: &DatabaseConnection,
    purchase_order_id: &str,
) -> Result<Vec<ExternalLink>> {
    list_filtered(
        db,
        external_link::Column::PurchaseOrderId,
        purchase_order_id,
        "list external links by purchase order",
    )
    .await
}

/// Links attached to a supplier.
pub async fn list_links_by_supplier(
    db: &DatabaseConnection,
    supplier_id: &str,
) -> Result<Vec<ExternalLink>> {
    list_filtered(
        db,
        external_link::Column::SupplierId,
        supplier_id,
        "list external links by supplier",
    )
    .await
}

/// Links attached to a client.
pub async fn list_links_by_client(
    db: &DatabaseConnection,
    client_id: &str,
) -> Result<Vec<ExternalLink>> {
    list_filtered(
        db,
        external_link::Column::ClientId,
        client_id,
        "list external links by client",
    )
    .await
}

/// Creates a link. Title and url are required; the url is stored verbatim.
#[instrument(skip(db, patch), fields(title = ?patch.title))]
pub async fn create_link(db: &DatabaseConnection, patch: ExternalLinkPatch) -> Result<ExternalLink> {
    let title = required_text("Link title", patch.title.as_deref())?;
    if patch.url.as_deref().is_none_or(|url| url.trim().is_empty()) {
        return Err(Error::validation("Link url cannot be empty"));
    }

    let now = Utc::now();
    let mut active = mapping::external_link::to_storage(&patch);
    active.id = Set(new_id());
    active.title = Set(title);
    if patch.date_added.is_none() {
        active.date_added = Set(Some(now.date_naive()));
    }
    active.created_at = Set(Some(now));

    let row = active
        .insert(db)
        .await
        .map_err(storage_failure("create external link"))?;
    info!("Created external link '{}' ({})", row.title, row.id);
    Ok(mapping::external_link::from_storage(row))
}

/// Applies a partial update to a link.
#[instrument(skip(db, patch))]
pub async fn update_link(
    db: &DatabaseConnection,
    id: &str,
    patch: ExternalLinkPatch,
) -> Result<ExternalLink> {
    non_blank("Link title", patch.title.as_deref())?;
    non_blank("Link url", patch.url.as_deref())?;

    let mut active = mapping::external_link::to_storage(&patch);
    if !active.is_changed() {
        return get_link_by_id(db, id)
            .await?
            .ok_or_else(|| Error::not_found("ExternalLink", id));
    }
    active.id = Unchanged(id.to_string());

    let row = active
        .update(db)
        .await
        .map_err(update_failure("ExternalLink", id))?;
    Ok(mapping::external_link::from_storage(row))
}

/// Hard-deletes a link. Returns `false` when no link had this id.
#[instrument(skip(db))]
pub async fn delete_link(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = ExternalLinks::delete_by_id(id)
        .exec(db)
        .await
        .map_err(storage_failure("delete external link"))?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::LinkType;
    use crate::test_utils::*;

    fn link(title: &str) -> ExternalLinkPatch {
        ExternalLinkPatch {
            title: Some(title.to_string()),
            url: Some("https://reports.example.com/w12".to_string()),
            link_type: Some(LinkType::WeeklyReport),
            ..ExternalLinkPatch::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_url() -> Result<()> {
        let db = setup_test_db().await?;
        let patch = ExternalLinkPatch {
            url: None,
            ..link("No url")
        };
        let result = create_link(&db, patch).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_links_by_association() -> Result<()> {
        let db = setup_test_db().await?;
        let on_project = ExternalLinkPatch {
            project_id: Some(Some("p1".to_string())),
            ..link("Week 12 report")
        };
        let on_order = ExternalLinkPatch {
            purchase_order_id: Some(Some("po1".to_string())),
            supplier_id: Some(Some("s1".to_string())),
            link_type: Some(LinkType::Tracking),
            ..link("Carrier tracking")
        };
        create_link(&db, on_project).await?;
        create_link(&db, on_order).await?;

        assert_eq!(list_links_by_project(&db, "p1").await?.len(), 1);
        let by_order = list_links_by_purchase_order(&db, "po1").await?;
        assert_eq!(by_order.len(), 1);
        assert_eq!(by_order[0].link_type, LinkType::Tracking);
        assert_eq!(list_links_by_supplier(&db, "s1").await?.len(), 1);
        assert!(list_links_by_client(&db, "c1").await?.is_empty());
        assert_eq!(list_links(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_link() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_link(&db, link("Control sheet")).await?;

        let patch = ExternalLinkPatch {
            url: Some("/mnt/qa/control-sheet.pdf".to_string()),
            link_type: Some(LinkType::ManufacturingControl),
            ..ExternalLinkPatch::default()
        };
        let updated = update_link(&db, &created.id, patch).await?;
        assert_eq!(updated.url, "/mnt/qa/control-sheet.pdf");
        assert_eq!(updated.title, "Control sheet");

        assert!(delete_link(&db, &created.id).await?);
        assert!(get_link_by_id(&db, &created.id).await?.is_none());
        Ok(())
    }
}
