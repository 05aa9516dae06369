//! `projects` row <-> [`Project`].

use super::{percent_from_storage, set_if, set_some};
use crate::entities::project;
use crate::models::{Project, ProjectPatch, ProjectStatus, StatusCategory};
use sea_orm::ActiveValue::NotSet;

/// Builds a [`Project`] from a stored row. Milestones start empty.
#[must_use]
pub fn from_storage(row: project::Model) -> Project {
    Project {
        id: row.id,
        name: row.name,
        status: row
            .status
            .as_deref()
            .map_or_else(ProjectStatus::default, ProjectStatus::from_storage_str),
        progress: percent_from_storage(row.progress),
        start_date: row.start_date,
        deadline: row.deadline,
        budget: row.budget.unwrap_or(0.0),
        location: row.location.unwrap_or_default(),
        description: row.description.unwrap_or_default(),
        project_manager: row.project_manager.unwrap_or_default(),
        manufacturing_manager: row.manufacturing_manager.unwrap_or_default(),
        supplier_id: row.supplier_id,
        client_id: row.client_id,
        client_name: row.client_name.unwrap_or_default(),
        milestones: Vec::new(),
        created_at: row.created_at,
    }
}

/// Builds the partial row for a [`ProjectPatch`]. The client name is left
/// for the repository to resolve.
#[must_use]
pub fn to_storage(patch: &ProjectPatch) -> project::ActiveModel {
    project::ActiveModel {
        id: NotSet,
        name: set_if(patch.name.clone()),
        status: set_some(patch.status.map(|s| s.as_str().to_string())),
        progress: set_some(patch.progress.map(i32::from)),
        start_date: set_if(patch.start_date),
        deadline: set_if(patch.deadline),
        budget: set_some(patch.budget),
        location: set_some(patch.location.clone()),
        description: set_some(patch.description.clone()),
        project_manager: set_some(patch.project_manager.clone()),
        manufacturing_manager: set_some(patch.manufacturing_manager.clone()),
        supplier_id: set_if(patch.supplier_id.clone()),
        client_id: set_if(patch.client_id.clone()),
        client_name: NotSet,
        created_at: NotSet,
    }
}

/// Builds the full row for a [`Project`].
#[must_use]
pub fn to_row(entity: &Project) -> project::Model {
    project::Model {
        id: entity.id.clone(),
        name: entity.name.clone(),
        status: Some(entity.status.as_str().to_string()),
        progress: Some(i32::from(entity.progress)),
        start_date: entity.start_date,
        deadline: entity.deadline,
        budget: Some(entity.budget),
        location: Some(entity.location.clone()),
        description: Some(entity.description.clone()),
        project_manager: Some(entity.project_manager.clone()),
        manufacturing_manager: Some(entity.manufacturing_manager.clone()),
        supplier_id: entity.supplier_id.clone(),
        client_id: entity.client_id.clone(),
        client_name: Some(entity.client_name.clone()),
        created_at: entity.created_at,
    }
}
