//! Schema mapping layer - converts between storage rows and domain types.
//!
//! Each submodule exposes the same three total functions for its entity:
//!
//! - `from_storage(row)` builds the domain value, defaulting every absent column
//! - `to_storage(&patch)` builds an `ActiveModel` where untouched fields are
//!   `NotSet` and explicitly cleared fields are `Set(None)`
//! - `to_row(&entity)` builds the full row, the inverse of `from_storage`
//!
//! Column names are spelled out per entity rather than derived by case
//! conversion, since denormalized and collection fields do not follow the
//! mechanical rule.

pub mod client;
pub mod external_link;
pub mod milestone;
pub mod project;
pub mod purchase_order;
pub mod supplier;
pub mod supplier_comment;
pub mod team_member;

use sea_orm::ActiveValue::{self, NotSet, Set};
use sea_orm::Value;

/// A patch field that maps onto a column of the same type.
pub(crate) fn set_if<V>(value: Option<V>) -> ActiveValue<V>
where
    V: Into<Value>,
{
    value.map_or(NotSet, Set)
}

/// A non-nullable domain field stored in a nullable column.
pub(crate) fn set_some<V>(value: Option<V>) -> ActiveValue<Option<V>>
where
    Option<V>: Into<Value>,
{
    value.map_or(NotSet, |v| Set(Some(v)))
}

/// Percentage column to the 0..=100 domain range.
pub(crate) fn percent_from_storage(value: Option<i32>) -> u8 {
    u8::try_from(value.unwrap_or(0).clamp(0, 100)).unwrap_or(0)
}
