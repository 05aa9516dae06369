//! Client repository.

use super::{new_id, non_blank, required_text, storage_failure, update_failure};
use crate::{
    entities::{Client as Clients, client},
    errors::{Error, Result},
    mapping,
    models::{Client, ClientPatch},
};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, ActiveValue::Unchanged, QueryOrder, prelude::*};
use tracing::{info, instrument};

/// Retrieves every client, ordered by name.
#[instrument(skip(db))]
pub async fn list_clients(db: &DatabaseConnection) -> Result<Vec<Client>> {
    let rows = Clients::find()
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(storage_failure("list clients"))?;
    Ok(rows.into_iter().map(mapping::client::from_storage).collect())
}

/// Retrieves a client by id, `None` if it does not exist.
#[instrument(skip(db))]
pub async fn get_client_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Client>> {
    let row = Clients::find_by_id(id)
        .one(db)
        .await
        .map_err(storage_failure("get client"))?;
    Ok(row.map(mapping::client::from_storage))
}

/// Creates a client with a fresh id.
#[instrument(skip(db, patch), fields(name = ?patch.name))]
pub async fn create_client(db: &DatabaseConnection, patch: ClientPatch) -> Result<Client> {
    let name = required_text("Client name", patch.name.as_deref())?;

    let mut active = mapping::client::to_storage(&patch);
    active.id = Set(new_id());
    active.name = Set(name);
    active.created_at = Set(Some(Utc::now()));

    let row = active
        .insert(db)
        .await
        .map_err(storage_failure("create client"))?;
    info!("Created client '{}' ({})", row.name, row.id);
    Ok(mapping::client::from_storage(row))
}

/// Applies a partial update to a client.
///
/// Purchase orders keep their cached client name until they are next written.
#[instrument(skip(db, patch))]
pub async fn update_client(db: &DatabaseConnection, id: &str, patch: ClientPatch) -> Result<Client> {
    non_blank("Client name", patch.name.as_deref())?;

    let mut active = mapping::client::to_storage(&patch);
    if !active.is_changed() {
        return get_client_by_id(db, id)
            .await?
            .ok_or_else(|| Error::not_found("Client", id));
    }
    if let Some(name) = &patch.name {
        active.name = Set(name.trim().to_string());
    }
    active.id = Unchanged(id.to_string());

    let row = active
        .update(db)
        .await
        .map_err(update_failure("Client", id))?;
    Ok(mapping::client::from_storage(row))
}

/// Hard-deletes a client. Projects and orders referencing it are left in place.
#[instrument(skip(db))]
pub async fn delete_client(db: &DatabaseConnection, id: &str) -> Result<bool> {
    let result = Clients::delete_by_id(id)
        .exec(db)
        .await
        .map_err(storage_failure("delete client"))?;
    Ok(result.rows_affected > 0)
}
