//! Team member repository, plus seeding from configuration.

use super::{new_id, non_blank, required_text, storage_failure, update_failure};
use crate::{
    config::settings::TeamMemberSeed,
    entities::{TeamMember as TeamMembers, team_member},
    errors::{Error, Result},
    mapping,
    models::{TeamMember, TeamMemberPatch},
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ActiveValue::Unchanged, PaginatorTrait, QueryOrder, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves every team member, ordered by name.
#[instrument(skip(db))]
pub async fn list_team_members(db: &DatabaseConnection) -> Result<Vec<TeamMember>> {
    let rows = TeamMembers::find()
        .order_by_asc(team_member::Column::Name)
        .all(db)
        .await
        .map_err(storage_failure("list team members"))?;
    Ok(rows.into_iter().map(mapping::team_member::from_storage).collect())
}

/// Retrieves a team member by id, `None` if it does not exist.
#[instrument(skip(db))]
pub async fn get_team_member_by_id(
    db: &DatabaseConnection,
    id: &str,
) -> Result<Option<TeamMember>> {
    let row = TeamMembers::find_by_id(id)
        .one(db)
        .await
        .map_err(storage_failure("get team member"))?;
    Ok(row.map(mapping::team_member::from_storage))
}

/// Team members whose role mentions "manager", used to fill manager pickers.
pub async fn list_managers(db: &DatabaseConnection) -> Result<Vec<TeamMember>> {
    let members = list_team_members(db).await?;
    Ok(members.into_iter().filter(TeamMember::is_manager).collect())
}

/// Creates a team member with a fresh id.
#[instrument(skip(db, patch), fields(name = ?patch.name))]
pub async fn create_team_member(
    db: &DatabaseConnection,
    patch: TeamMemberPatch,
) -> Result<TeamMember> {
    let name = required_text("Team member name", patch.name.as_deref())?;

    let mut active = mapping::team_member::to_storage(&patch);
    active.id = Set(new_id());
    active.name = Set(name);
    active.created_at = Set(Some(Utc::now()));

    let row = active
        .insert(db)
        .await
        .map_err(storage_failure("create team member"))?;
    info!("Created team member '{}' ({})", row.name, row.id);
    Ok(mapping::team_member::from_storage(row))
}

/// Applies a partial update to a team member.
///
/// Renaming does not rewrite the manager names stored on projects or orders.
#[instrument(skip(db, patch))]
pub async fn update_team_member(
    db: &DatabaseConnection,
    id: &str,
    patch: TeamMemberPatch,
) -> Result<TeamMember> {
    non_blank("Team member name", patch.name.as_deref())?;

    let mut active = mapping::team_member::to_storage(&patch);
    if !active.is_changed() {
        return get_team_member_by_id(db, id)
            .await?
            .ok_or_else(|| Error::not_found("TeamMember", id));
    }
    if let Some(name) = &patch.name {
        active.name = Set(name.trim().to_string());
    }
    active.id = Unchanged(id.to_string());

    let row = active
        .update(db)
        .await
        .map_err(update_failure("TeamMember", id))?;
    Ok(mapping::team_member::from_storage(row))
}

/// Hard-deletes a team member.
#[instrument(skip(db))]
pub async fn delete_team_member(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = TeamMembers::delete_by_id(id)
        .exec(db)
        .await
        .map_err(storage_failure("delete team member"))?;
    Ok(result.rows_affected > 0)
}

/// Inserts the configured team members when the table is empty.
///
/// Returns the number of members inserted; zero if the table already had rows.
#[instrument(skip(db, seeds))]
pub async fn seed_team_members(db: &DatabaseConnection, seeds: &[TeamMemberSeed]) -> Result<usize> {
    let existing = TeamMembers::find()
        .count(db)
        .await
        .map_err(storage_failure("count team members"))?;
    if existing > 0 {
        debug!("Team table already has {} members, skipping seed.", existing);
        return Ok(0);
    }

    for seed in seeds {
        let patch = TeamMemberPatch {
            name: Some(seed.name.clone()),
            role: Some(seed.role.clone()),
            email: Some(seed.email.clone()),
            department: Some(seed.department.clone()),
            ..TeamMemberPatch::default()
        };
        create_team_member(db, patch).await?;
    }
    info!("Seeded {} team members.", seeds.len());
    Ok(seeds.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn seed(name: &str, role: &str) -> TeamMemberSeed {
        TeamMemberSeed {
            name: name.to_string(),
            role: role.to_string(),
            email: String::new(),
            department: "Operations".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_managers_matches_role_substring() -> Result<()> {
        let db = setup_test_db().await?;
        for (name, role) in [
            ("Avery", "Project Manager"),
            ("Blake", "manufacturing manager"),
            ("Casey", "Quality Engineer"),
        ] {
            let patch = TeamMemberPatch {
                name: Some(name.to_string()),
                role: Some(role.to_string()),
                ..TeamMemberPatch::default()
            };
            create_team_member(&db, patch).await?;
        }

        let managers = list_managers(&db).await?;
        let names: Vec<_> = managers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Avery", "Blake"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_table() -> Result<()> {
        let db = setup_test_db().await?;
        let seeds = vec![seed("Dana", "Project Manager"), seed("Eli", "Buyer")];

        assert_eq!(seed_team_members(&db, &seeds).await?, 2);
        assert_eq!(seed_team_members(&db, &seeds).await?, 0);

        let members = list_team_members(&db).await?;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].department, "Operations");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_team_member() -> Result<()> {
        let db = setup_test_db().await?;
        let member = create_team_member(
            &db,
            TeamMemberPatch {
                name: Some("Frankie".to_string()),
                ..TeamMemberPatch::default()
            },
        )
        .await?;

        let updated = update_team_member(
            &db,
            &member.id,
            TeamMemberPatch {
                phone: Some("+1 555 0100".to_string()),
                ..TeamMemberPatch::default()
            },
        )
        .await?;
        assert_eq!(updated.phone, "+1 555 0100");
        assert_eq!(updated.name, "Frankie");

        assert!(delete_team_member(&db, &member.id).await?);
        assert!(get_team_member_by_id(&db, &member.id).await?.is_none());
        Ok(())
    }
}
