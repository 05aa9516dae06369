//! Milestone repository.

use super::{new_id, non_blank, required_text, storage_failure, update_failure};
use crate::{
    entities::{Milestone as Milestones, milestone},
    errors::{Error, Result},
    mapping,
    models::{Milestone, MilestonePatch},
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ActiveValue::Unchanged, QueryOrder, prelude::*};
use tracing::{info, instrument};

/// Retrieves every milestone, ordered by due date.
#[instrument(skip(db))]
pub async fn list_milestones(db: &DatabaseConnection) -> Result<Vec<Milestone>> {
    let rows = Milestones::find()
        .order_by_asc(milestone::Column::DueDate)
        .all(db)
        .await
        .map_err(storage_failure("list milestones"))?;
    Ok(rows.into_iter().map(mapping::milestone::from_storage).collect())
}

/// Retrieves a milestone by id, `None` if it does not exist.
#[instrument(skip(db))]
pub async fn get_milestone_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Milestone>> {
    let row = Milestones::find_by_id(id)
        .one(db)
        .await
        .map_err(storage_failure("get milestone"))?;
    Ok(row.map(mapping::milestone::from_storage))
}

/// Retrieves the milestones of one project, ordered by due date.
#[instrument(skip(db))]
pub async fn list_milestones_by_project(
    db: &DatabaseConnection,
    project_id: &str,
) -> Result<Vec<Milestone>> {
    let rows = Milestones::find()
        .filter(milestone::Column::ProjectId.eq(project_id))
        .order_by_asc(milestone::Column::DueDate)
        .all(db)
        .await
        .map_err(storage_failure("list milestones by project"))?;
    Ok(rows.into_iter().map(mapping::milestone::from_storage).collect())
}

/// Creates a milestone; the title is required.
#[instrument(skip(db, patch))]
pub async fn create_milestone(db: &DatabaseConnection, patch: MilestonePatch) -> Result<Milestone> {
    let title = required_text("Milestone title", patch.title.as_deref())?;

    let mut active = mapping::milestone::to_storage(&patch);
    active.id = Set(new_id());
    active.title = Set(title);
    if patch.completed.is_none() {
        active.completed = Set(Some(false));
    }
    active.created_at = Set(Some(Utc::now()));

    let row = active
        .insert(db)
        .await
        .map_err(storage_failure("create milestone"))?;
    info!("Created milestone '{}' ({})", row.title, row.id);
    Ok(mapping::milestone::from_storage(row))
}

/// Applies a partial update to a milestone.
#[instrument(skip(db, patch))]
pub async fn update_milestone(
    db: &DatabaseConnection,
    id: &str,
    patch: MilestonePatch,
) -> Result<Milestone> {
    non_blank("Milestone title", patch.title.as_deref())?;

    let mut active = mapping::milestone::to_storage(&patch);
    if !active.is_changed() {
        return get_milestone_by_id(db, id)
            .await?
            .ok_or_else(|| Error::not_found("Milestone", id));
    }
    if let Some(title) = &patch.title {
        active.title = Set(title.trim().to_string());
    }
    active.id = Unchanged(id.to_string());

    let row = active
        .update(db)
        .await
        .map_err(update_failure("Milestone", id))?;
    Ok(mapping::milestone::from_storage(row))
}

/// Flips the completion flag of a milestone.
pub async fn toggle_milestone(db: &DatabaseConnection, id: &str) -> Result<Milestone> {
    let current = get_milestone_by_id(db, id)
        .await?
        .ok_or_else(|| Error::not_found("Milestone", id))?;
    let patch = MilestonePatch {
        completed: Some(!current.completed),
        ..MilestonePatch::default()
    };
    update_milestone(db, id, patch).await
}

/// Hard-deletes a milestone.
#[instrument(skip(db))]
pub async fn delete_milestone(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = Milestones::delete_by_id(id)
        .exec(db)
        .await
        .map_err(storage_failure("delete milestone"))?;
    Ok(result.rows_affected > 0)
}
