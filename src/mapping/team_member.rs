//! `team_members` row <-> [`TeamMember`].

use super::{set_if, set_some};
use crate::entities::team_member;
use crate::models::{TeamMember, TeamMemberPatch};
use sea_orm::ActiveValue::NotSet;

/// Builds a [`TeamMember`] from a stored row.
#[must_use]
pub fn from_storage(row: team_member::Model) -> TeamMember {
    TeamMember {
        id: row.id,
        name: row.name,
        role: row.role.unwrap_or_default(),
        email: row.email.unwrap_or_default(),
        phone: row.phone.unwrap_or_default(),
        department: row.department.unwrap_or_default(),
        photo_url: row.photo_url.unwrap_or_default(),
        created_at: row.created_at,
    }
}

/// Builds the partial row for a [`TeamMemberPatch`].
#[must_use]
pub fn to_storage(patch: &TeamMemberPatch) -> team_member::ActiveModel {
    team_member::ActiveModel {
        id: NotSet,
        name: set_if(patch.name.clone()),
        role: set_some(patch.role.clone()),
        email: set_some(patch.email.clone()),
        phone: set_some(patch.phone.clone()),
        department: set_some(patch.department.clone()),
        photo_url: set_some(patch.photo_url.clone()),
        created_at: NotSet,
    }
}

/// Builds the full row for a [`TeamMember`].
#[must_use]
pub fn to_row(entity: &TeamMember) -> team_member::Model {
    team_member::Model {
        id: entity.id.clone(),
        name: entity.name.clone(),
        role: Some(entity.role.clone()),
        email: Some(entity.email.clone()),
        phone: Some(entity.phone.clone()),
        department: Some(entity.department.clone()),
        photo_url: Some(entity.photo_url.clone()),
        created_at: entity.created_at,
    }
}
