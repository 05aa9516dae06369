//! Project repository - Handles all project-related storage operations.
//!
//! Projects reference their supplier and client softly. Only two paths read
//! other tables: writes that set `client_id` look up the client's name for the
//! denormalized `client_name`, and [`get_project_with_milestones`] composes a
//! project with its milestone list.

use super::{
    check_amount, check_percent, client_name_for, new_id, non_blank, required_text,
    storage_failure, update_failure,
};
use crate::{
    entities::{Project as Projects, project},
    errors::{Error, Result},
    mapping,
    models::{Project, ProjectPatch},
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ActiveValue::Unchanged, QueryOrder, prelude::*};
use tracing::{info, instrument};

fn validate(patch: &ProjectPatch) -> Result<()> {
    non_blank("Project name", patch.name.as_deref())?;
    check_percent("Project progress", patch.progress)?;
    check_amount("Project budget", patch.budget, f64::MAX)
}

/// Retrieves every project, ordered by name.
#[instrument(skip(db))]
pub async fn list_projects(db: &DatabaseConnection) -> Result<Vec<Project>> {
    let rows = Projects::find()
        .order_by_asc(project::Column::Name)
        .all(db)
        .await
        .map_err(storage_failure("list projects"))?;
    Ok(rows.into_iter().map(mapping::project::from_storage).collect())
}

/// Retrieves a project by id, `None` if it does not exist.
#[instrument(skip(db))]
pub async fn get_project_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Project>> {
    let row = Projects::find_by_id(id)
        .one(db)
        .await
        .map_err(storage_failure("get project"))?;
    Ok(row.map(mapping::project::from_storage))
}

/// Retrieves the projects produced by a supplier.
#[instrument(skip(db))]
pub async fn list_projects_by_supplier(
    db: &DatabaseConnection,
    supplier_id: &str,
) -> Result<Vec<Project>> {
    let rows = Projects::find()
        .filter(project::Column::SupplierId.eq(supplier_id))
        .order_by_asc(project::Column::Name)
        .all(db)
        .await
        .map_err(storage_failure("list projects by supplier"))?;
    Ok(rows.into_iter().map(mapping::project::from_storage).collect())
}

/// Retrieves the projects delivered to a client.
#[instrument(skip(db))]
pub async fn list_projects_by_client(
    db: &DatabaseConnection,
    client_id: &str,
) -> Result<Vec<Project>> {
    let rows = Projects::find()
        .filter(project::Column::ClientId.eq(client_id))
        .order_by_asc(project::Column::Name)
        .all(db)
        .await
        .map_err(storage_failure("list projects by client"))?;
    Ok(rows.into_iter().map(mapping::project::from_storage).collect())
}

/// Retrieves a project together with its milestones, sorted by due date.
pub async fn get_project_with_milestones(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<Project>> {
    let Some(mut project) = get_project_by_id(db, id).await? else {
        return Ok(None);
    };
    project.milestones = super::milestone::list_milestones_by_project(db, id).await?;
    Ok(Some(project))
}

/// Creates a project. The id and creation timestamp are assigned here.
///
/// # Errors
/// Returns an error if:
/// - The name is missing or blank
/// - Progress is above 100 or the budget is negative or not finite
/// - The selected client does not exist
/// - The database insert fails
#[instrument(skip(db, patch), fields(name = ?patch.name))]
pub async fn create_project(db: &DatabaseConnection, patch: ProjectPatch) -> Result<Project> {
    let name = required_text("Project name", patch.name.as_deref())?;
    validate(&patch)?;

    let mut active = mapping::project::to_storage(&patch);
    active.client_name = client_name_for(db, patch.client_id.as_ref()).await?;
    active.id = Set(new_id());
    active.name = Set(name);
    active.created_at = Set(Some(Utc::now()));

    let row = active
        .insert(db)
        .await
        .map_err(storage_failure("create project"))?;
    info!("Created project '{}' ({})", row.name, row.id);
    Ok(mapping::project::from_storage(row))
}

/// Applies a partial update to a project. Fields absent from the patch keep
/// their stored values.
///
/// # Errors
/// Returns `Error::NotFound` if no project or selected client has this id, `Error::Validation`
/// for invalid fields, or `Error::Database` if the update fails.
#[instrument(skip(db, patch))]
pub async fn update_project(
    db: &DatabaseConnection,
    id: &str,
    patch: ProjectPatch,
) -> Result<Project> {
    validate(&patch)?;

    let mut active = mapping::project::to_storage(&patch);
    if !active.is_changed() {
        return get_project_by_id(db, id)
            .await?
            .ok_or_else(|| Error::not_found("Project", id));
    }
    active.client_name = client_name_for(db, patch.client_id.as_ref()).await?;
    if let Some(name) = &patch.name {
        active.name = Set(name.trim().to_string());
    }
    active.id = Unchanged(id.to_string());

    let row = active
        .update(db)
        .await
        .map_err(update_failure("Project", id))?;
    info!("Updated project {}", id);
    Ok(mapping::project::from_storage(row))
}

/// Hard-deletes a project. Its milestones and purchase orders are left in place.
///
/// Returns `false` when no project had this id.
#[instrument(skip(db))]
pub async fn delete_project(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = Projects::delete_by_id(id)
        .exec(db)
        .await
        .map_err(storage_failure("delete project"))?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::{MilestonePatch, ProjectStatus};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_project_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_project(&db, ProjectPatch::named("  ")).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let patch = ProjectPatch {
            progress: Some(120),
            ..ProjectPatch::named("Overdriven")
        };
        let result = create_project(&db, patch).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let patch = ProjectPatch {
            budget: Some(-5.0),
            ..ProjectPatch::named("Negative")
        };
        let result = create_project(&db, patch).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        assert!(list_projects(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let project = create_project(&db, ProjectPatch::named("  Turbine Housing ")).await?;

        assert!(!project.id.is_empty());
        assert_eq!(project.name, "Turbine Housing");
        assert_eq!(project.status, ProjectStatus::Pending);
        assert_eq!(project.progress, 0);
        assert_eq!(project.budget, 0.0);
        assert_eq!(project.description, "");
        assert!(project.created_at.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_project_by_id() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_test_project(&db, "Axle Line", None).await?;

        let found = get_project_by_id(&db, &created.id).await?;
        assert_eq!(found, Some(created));

        assert!(get_project_by_id(&db, "missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_is_partial_merge() -> Result<()> {
        let db = setup_test_db().await?;
        let patch = ProjectPatch {
            location: Some("Lyon, France".to_string()),
            budget: Some(250_000.0),
            deadline: Some(Some(date(2025, 9, 30))),
            ..ProjectPatch::named("Brake Assemblies")
        };
        let project = create_project(&db, patch).await?;

        let updated = update_project(
            &db,
            &project.id,
            ProjectPatch {
                progress: Some(45),
                status: Some(ProjectStatus::InProgress),
                ..ProjectPatch::default()
            },
        )
        .await?;

        assert_eq!(updated.progress, 45);
        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.location, "Lyon, France");
        assert_eq!(updated.budget, 250_000.0);
        assert_eq!(updated.deadline, Some(date(2025, 9, 30)));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_can_clear_deadline() -> Result<()> {
        let db = setup_test_db().await?;
        let patch = ProjectPatch {
            deadline: Some(Some(date(2025, 9, 30))),
            ..ProjectPatch::named("Seat Frames")
        };
        let project = create_project(&db, patch).await?;

        let cleared = ProjectPatch {
            deadline: Some(None),
            ..ProjectPatch::default()
        };
        let updated = update_project(&db, &project.id, cleared).await?;
        assert_eq!(updated.deadline, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_project_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_project(
            &db,
            "missing",
            ProjectPatch {
                progress: Some(10),
                ..ProjectPatch::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        let result = update_project(&db, "missing", ProjectPatch::default()).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_by_supplier_and_client() -> Result<()> {
        let (db, supplier) = setup_with_supplier().await?;
        let client = create_test_client(&db, "Nordic Rail").await?;

        create_test_project(&db, "Bogie Frames", Some(&supplier.id)).await?;
        let patch = ProjectPatch {
            client_id: Some(Some(client.id.clone())),
            ..ProjectPatch::named("Door Actuators")
        };
        create_project(&db, patch).await?;

        let by_supplier = list_projects_by_supplier(&db, &supplier.id).await?;
        assert_eq!(by_supplier.len(), 1);
        assert_eq!(by_supplier[0].name, "Bogie Frames");

        let by_client = list_projects_by_client(&db, &client.id).await?;
        assert_eq!(by_client.len(), 1);
        assert_eq!(by_client[0].name, "Door Actuators");
        Ok(())
    }

    #[tokio::test]
    async fn test_client_name_follows_client_id() -> Result<()> {
        let db = setup_test_db().await?;
        let alpine = create_test_client(&db, "Alpine Lifts").await?;
        let baltic = create_test_client(&db, "Baltic Ferries").await?;

        let patch = ProjectPatch {
            client_id: Some(Some(alpine.id.clone())),
            ..ProjectPatch::named("Cable Drums")
        };
        let project = create_project(&db, patch).await?;
        assert_eq!(project.client_name, "Alpine Lifts");

        let moved = ProjectPatch {
            client_id: Some(Some(baltic.id.clone())),
            ..ProjectPatch::default()
        };
        let updated = update_project(&db, &project.id, moved).await?;
        assert_eq!(updated.client_name, "Baltic Ferries");

        let progressed = ProjectPatch {
            progress: Some(20),
            ..ProjectPatch::default()
        };
        let updated = update_project(&db, &project.id, progressed).await?;
        assert_eq!(updated.client_name, "Baltic Ferries");

        let cleared = ProjectPatch {
            client_id: Some(None),
            ..ProjectPatch::default()
        };
        let updated = update_project(&db, &project.id, cleared).await?;
        assert_eq!(updated.client_id, None);
        assert_eq!(updated.client_name, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_client_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let patch = ProjectPatch {
            client_id: Some(Some("missing".to_string())),
            ..ProjectPatch::named("Orphaned")
        };

        let result = create_project(&db, patch).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));
        assert!(list_projects(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_project() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Short Lived", None).await?;

        assert!(delete_project(&db, &project.id).await?);
        assert!(!delete_project(&db, &project.id).await?);
        assert!(get_project_by_id(&db, &project.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_project_keeps_milestones() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Parent", None).await?;
        let milestone = crate::core::milestone::create_milestone(
            &db,
            MilestonePatch {
                project_id: Some(Some(project.id.clone())),
                title: Some("First article".to_string()),
                ..MilestonePatch::default()
            },
        )
        .await?;

        delete_project(&db, &project.id).await?;

        let orphan = crate::core::milestone::get_milestone_by_id(&db, &milestone.id).await?;
        assert!(orphan.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_project_with_milestones() -> Result<()> {
        let db = setup_test_db().await?;
        let project = create_test_project(&db, "Composed", None).await?;
        for (title, due) in [("Ship", date(2025, 8, 1)), ("Design review", date(2025, 2, 1))] {
            crate::core::milestone::create_milestone(
                &db,
                MilestonePatch {
                    project_id: Some(Some(project.id.clone())),
                    title: Some(title.to_string()),
                    due_date: Some(Some(due)),
                    ..MilestonePatch::default()
                },
            )
            .await?;
        }

        let composed = get_project_with_milestones(&db, &project.id).await?.unwrap();
        let titles: Vec<_> = composed.milestones.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Design review", "Ship"]);

        assert!(get_project_with_milestones(&db, "missing").await?.is_none());
        Ok(())
    }
}
