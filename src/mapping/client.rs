//! `clients` row <-> [`Client`].

use super::{set_if, set_some};
use crate::entities::client;
use crate::models::{Client, ClientPatch};
use sea_orm::ActiveValue::NotSet;

/// Builds a [`Client`] from a stored row.
#[must_use]
pub fn from_storage(row: client::Model) -> Client {
    Client {
        id: row.id,
        name: row.name,
        contact_person: row.contact_person.unwrap_or_default(),
        email: row.email.unwrap_or_default(),
        phone: row.phone.unwrap_or_default(),
        address: row.address.unwrap_or_default(),
        country: row.country.unwrap_or_default(),
        notes: row.notes.unwrap_or_default(),
        created_at: row.created_at,
    }
}

/// Builds the partial row for a [`ClientPatch`].
#[must_use]
pub fn to_storage(patch: &ClientPatch) -> client::ActiveModel {
    client::ActiveModel {
        id: NotSet,
        name: set_if(patch.name.clone()),
        contact_person: set_some(patch.contact_person.clone()),
        email: set_some(patch.email.clone()),
        phone: set_some(patch.phone.clone()),
        address: set_some(patch.address.clone()),
        country: set_some(patch.country.clone()),
        notes: set_some(patch.notes.clone()),
        created_at: NotSet,
    }
}

/// Builds the full row for a [`Client`].
#[must_use]
pub fn to_row(entity: &Client) -> client::Model {
    client::Model {
        id: entity.id.clone(),
        name: entity.name.clone(),
        contact_person: Some(entity.contact_person.clone()),
        email: Some(entity.email.clone()),
        phone: Some(entity.phone.clone()),
        address: Some(entity.address.clone()),
        country: Some(entity.country.clone()),
        notes: Some(entity.notes.clone()),
        created_at: entity.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_client;

    #[test]
    fn test_round_trip_restores_every_field() {
        let client = sample_client();
        assert_eq!(from_storage(to_row(&client)), client);
    }

    #[test]
    fn test_empty_patch_touches_nothing() {
        let active = to_storage(&ClientPatch::default());
        assert_eq!(active.name, NotSet);
        assert_eq!(active.contact_person, NotSet);
        assert_eq!(active.notes, NotSet);
    }
}
