//! `milestones` row <-> [`Milestone`].

use super::{set_if, set_some};
use crate::entities::milestone;
use crate::models::{Milestone, MilestonePatch};
use sea_orm::ActiveValue::NotSet;

/// Builds a [`Milestone`] from a stored row.
#[must_use]
pub fn from_storage(row: milestone::Model) -> Milestone {
    Milestone {
        id: row.id,
        project_id: row.project_id,
        title: row.title,
        due_date: row.due_date,
        completed: row.completed.unwrap_or(false),
        created_at: row.created_at,
    }
}

/// Builds the partial row for a [`MilestonePatch`].
#[must_use]
pub fn to_storage(patch: &MilestonePatch) -> milestone::ActiveModel {
    milestone::ActiveModel {
        id: NotSet,
        project_id: set_if(patch.project_id.clone()),
        title: set_if(patch.title.clone()),
        due_date: set_if(patch.due_date),
        completed: set_some(patch.completed),
        created_at: NotSet,
    }
}

/// Builds the full row for a [`Milestone`].
#[must_use]
pub fn to_row(entity: &Milestone) -> milestone::Model {
    milestone::Model {
        id: entity.id.clone(),
        project_id: entity.project_id.clone(),
        title: entity.title.clone(),
        due_date: entity.due_date,
        completed: Some(entity.completed),
        created_at: entity.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, sample_milestone};
    use sea_orm::ActiveValue::Set;

    #[test]
    fn test_round_trip_restores_every_field() {
        let milestone = sample_milestone();
        assert_eq!(from_storage(to_row(&milestone)), milestone);
    }

    #[test]
    fn test_null_completed_reads_as_false() {
        let mut row = to_row(&sample_milestone());
        row.completed = None;
        assert!(!from_storage(row).completed);
    }

    #[test]
    fn test_patch_sets_only_given_fields() {
        let patch = MilestonePatch {
            due_date: Some(Some(date(2025, 6, 1))),
            ..MilestonePatch::default()
        };
        let active = to_storage(&patch);
        assert_eq!(active.due_date, Set(Some(date(2025, 6, 1))));
        assert_eq!(active.title, NotSet);
        assert_eq!(active.completed, NotSet);
    }
}
