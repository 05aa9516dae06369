//! `suppliers` row <-> [`Supplier`].

use super::{set_if, set_some};
use crate::entities::supplier;
use crate::models::{Supplier, SupplierPatch};
use sea_orm::ActiveValue::NotSet;

/// Builds a [`Supplier`] from a stored row. Comments start empty.
#[must_use]
pub fn from_storage(row: supplier::Model) -> Supplier {
    Supplier {
        id: row.id,
        name: row.name,
        country: row.country.unwrap_or_default(),
        contact_person: row.contact_person.unwrap_or_default(),
        email: row.email.unwrap_or_default(),
        phone: row.phone.unwrap_or_default(),
        rating: row.rating.unwrap_or(0.0),
        on_time_delivery_rate: row.on_time_delivery_rate.unwrap_or(0.0),
        location: row.location.unwrap_or_default(),
        comments: Vec::new(),
        created_at: row.created_at,
    }
}

/// Builds the partial row for a [`SupplierPatch`].
#[must_use]
pub fn to_storage(patch: &SupplierPatch) -> supplier::ActiveModel {
    supplier::ActiveModel {
        id: NotSet,
        name: set_if(patch.name.clone()),
        country: set_some(patch.country.clone()),
        contact_person: set_some(patch.contact_person.clone()),
        email: set_some(patch.email.clone()),
        phone: set_some(patch.phone.clone()),
        rating: set_some(patch.rating),
        on_time_delivery_rate: set_some(patch.on_time_delivery_rate),
        location: set_some(patch.location.clone()),
        created_at: NotSet,
    }
}

/// Builds the full row for a [`Supplier`].
#[must_use]
pub fn to_row(entity: &Supplier) -> supplier::Model {
    supplier::Model {
        id: entity.id.clone(),
        name: entity.name.clone(),
        country: Some(entity.country.clone()),
        contact_person: Some(entity.contact_person.clone()),
        email: Some(entity.email.clone()),
        phone: Some(entity.phone.clone()),
        rating: Some(entity.rating),
        on_time_delivery_rate: Some(entity.on_time_delivery_rate),
        location: Some(entity.location.clone()),
        created_at: entity.created_at,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::sample_supplier;
    use sea_orm::ActiveValue::Set;

    #[test]
    fn test_round_trip_restores_every_field() {
        let supplier = sample_supplier();
        assert_eq!(from_storage(to_row(&supplier)), supplier);
    }

    #[test]
    fn test_null_rating_reads_as_zero() {
        let mut row = to_row(&sample_supplier());
        row.rating = None;
        row.on_time_delivery_rate = None;
        let supplier = from_storage(row);
        assert_eq!(supplier.rating, 0.0);
        assert_eq!(supplier.on_time_delivery_rate, 0.0);
    }

    #[test]
    fn test_patch_translates_contact_person() {
        let patch = SupplierPatch {
            contact_person: Some("Mira Lenz".to_string()),
            ..SupplierPatch::default()
        };
        let active = to_storage(&patch);
        assert_eq!(active.contact_person, Set(Some("Mira Lenz".to_string())));
        assert_eq!(active.rating, NotSet);
    }
}
