//! Core business logic - repositories, derived metrics, reports and exports.
//!
//! Repository functions follow one shape per entity: `list_*`, `get_*_by_id`,
//! `list_*_by_<parent>`, `create_*`, `update_*`, `delete_*`. Each returns a
//! typed [`Result`]; a storage failure is logged here and surfaced as
//! [`Error::Database`], an absent row as `Ok(None)` from getters,
//! [`Error::NotFound`] from updates and `Ok(false)` from deletes.

pub mod client;
pub mod export;
pub mod external_link;
pub mod legacy;
pub mod metrics;
pub mod milestone;
pub mod project;
pub mod purchase_order;
pub mod report;
pub mod supplier;
pub mod supplier_comment;
pub mod team_member;

use crate::errors::{Error, Result};
use sea_orm::{
    ActiveValue::{self, NotSet, Set},
    DatabaseConnection, DbErr,
};
use tracing::{debug, error};

/// Fresh opaque identifier for a row about to be inserted.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Logs a failed storage round trip and converts it into [`Error::Database`].
pub(crate) fn storage_failure(operation: &'static str) -> impl Fn(DbErr) -> Error {
    move |e| {
        error!("Storage round trip failed ({}): {}", operation, e);
        Error::Database(e)
    }
}

/// Maps a failed update to [`Error::NotFound`] when no row matched the id.
pub(crate) fn update_failure<'a>(
    entity: &'static str,
    id: &'a str,
) -> impl FnOnce(DbErr) -> Error + 'a {
    move |e| match e {
        DbErr::RecordNotUpdated => Error::not_found(entity, id),
        other => {
            error!("Storage round trip failed (update {}): {}", entity, other);
            Error::Database(other)
        }
    }
}

/// Resolves the `client_name` column write for a patch's client selection.
///
/// Setting a client writes its current name; clearing it clears the name.
pub(crate) async fn client_name_for(
    db: &DatabaseConnection,
    client_id: Option<&Option<String>>,
) -> Result<ActiveValue<Option<String>>> {
    match client_id {
        None => Ok(NotSet),
        Some(None) => Ok(Set(None)),
        Some(Some(id)) => {
            let client = client::get_client_by_id(db, id)
                .await?
                .ok_or_else(|| Error::not_found("Client", id.as_str()))?;
            debug!("Resolved client {} to '{}'", id, client.name);
            Ok(Set(Some(client.name)))
        }
    }
}

/// Trims a required text field, rejecting it when empty.
pub(crate) fn required_text(field: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(Error::validation(format!("{field} cannot be empty"))),
    }
}

/// Rejects a present-but-blank text field in a partial update.
pub(crate) fn non_blank(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(text) if text.trim().is_empty() => {
            Err(Error::validation(format!("{field} cannot be empty")))
        }
        _ => Ok(()),
    }
}

/// Rejects a percentage above 100.
pub(crate) fn check_percent(field: &str, value: Option<u8>) -> Result<()> {
    match value {
        Some(percent) if percent > 100 => Err(Error::validation(format!(
            "{field} must be between 0 and 100, got {percent}"
        ))),
        _ => Ok(()),
    }
}

/// Rejects a non-finite amount or one outside `0..=max`.
pub(crate) fn check_amount(field: &str, value: Option<f64>, max: f64) -> Result<()> {
    match value {
        Some(amount) if !amount.is_finite() || amount < 0.0 || amount > max => Err(
            Error::validation(format!("{field} must be between 0 and {max}, got {amount}")),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("Name", Some("  Gearbox  ")).ok(), Some("Gearbox".to_string()));
        assert!(matches!(required_text("Name", Some("   ")), Err(Error::Validation { .. })));
        assert!(matches!(required_text("Name", None), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_check_amount_bounds() {
        assert!(check_amount("Rating", Some(4.5), 5.0).is_ok());
        assert!(check_amount("Rating", Some(5.5), 5.0).is_err());
        assert!(check_amount("Budget", Some(f64::NAN), f64::MAX).is_err());
        assert!(check_amount("Budget", None, f64::MAX).is_ok());
    }

    #[test]
    fn test_update_failure_distinguishes_missing_rows() {
        let err = update_failure("Project", "p9")(DbErr::RecordNotUpdated);
        assert!(matches!(err, Error::NotFound { entity: "Project", .. }));
        let err = update_failure("Project", "p9")(DbErr::Custom("locked".to_string()));
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
