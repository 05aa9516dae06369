//! Database configuration module for the tracker.
//!
//! This module handles the database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the storage schema always matches the
//! row structs. No foreign keys are declared: cross-table references are soft
//! and deletes never cascade.

use crate::entities::{
    Client, ExternalLink, Milestone, Project, PurchaseOrder, Supplier, SupplierComment, TeamMember,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/mfg_tracker.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates every tracker table that does not exist yet.
///
/// Safe to call on every startup.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Project).await?;
    create_table(db, &schema, Supplier).await?;
    create_table(db, &schema, PurchaseOrder).await?;
    create_table(db, &schema, Milestone).await?;
    create_table(db, &schema, Client).await?;
    create_table(db, &schema, TeamMember).await?;
    create_table(db, &schema, ExternalLink).await?;
    create_table(db, &schema, SupplierComment).await?;

    info!("Tracker tables ensured.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ProjectModel, PurchaseOrderModel, SupplierModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ProjectModel> = Project::find().limit(1).all(&db).await?;
        let _: Vec<SupplierModel> = Supplier::find().limit(1).all(&db).await?;
        let _: Vec<PurchaseOrderModel> = PurchaseOrder::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
