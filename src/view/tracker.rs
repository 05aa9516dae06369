//! The handle views hold: a database connection plus the query cache.

use super::cache::{QueryCache, QueryKey, Table};
use crate::{
    core::{
        external_link, milestone, project, purchase_order, report, supplier, supplier_comment,
        team_member,
    },
    errors::Result,
    models::{
        ExternalLink, Milestone, MilestonePatch, Project, ProjectPatch, PurchaseOrder,
        PurchaseOrderPatch, Supplier, SupplierComment, SupplierPatch, TeamMember,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::future::Future;
use tracing::{instrument, trace};

/// Cached reads and cache-invalidating writes over the repositories.
///
/// Reads are served from the cache when possible; a failed fetch is never
/// cached, nor is one that overlapped a write to its table. Writes invalidate only after storage reports success. Creates drop
/// the list, the row and the new row's parent-keyed entries; updates and
/// deletes drop the whole table, since the row may have moved between parents.
pub struct Tracker {
    db: DatabaseConnection,
    cache: QueryCache,
}

impl Tracker {
    /// Wraps a connection with an empty cache.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            cache: QueryCache::new(),
        }
    }

    /// Underlying connection
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The query cache
    #[must_use]
    pub const fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn cached<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.cache.get::<T>(&key).await {
            return Ok(hit);
        }
        trace!(?key, "Query cache miss");
        let generation = self.cache.generation(key.table).await;
        let value = fetch().await?;
        self.cache
            .insert_if_current(key, value.clone(), generation)
            .await;
        Ok(value)
    }

    // Reads

    /// All projects.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.cached(QueryKey::all(Table::Projects), || {
            project::list_projects(&self.db)
        })
        .await
    }

    /// One project by id.
    pub async fn project(&self, id: &str) -> Result<Option<Project>> {
        self.cached(QueryKey::by_id(Table::Projects, id), || {
            project::get_project_by_id(&self.db, id)
        })
        .await
    }

    /// All suppliers.
    pub async fn suppliers(&self) -> Result<Vec<Supplier>> {
        self.cached(QueryKey::all(Table::Suppliers), || {
            supplier::list_suppliers(&self.db)
        })
        .await
    }

    /// All purchase orders.
    pub async fn purchase_orders(&self) -> Result<Vec<PurchaseOrder>> {
        self.cached(QueryKey::all(Table::PurchaseOrders), || {
            purchase_order::list_purchase_orders(&self.db)
        })
        .await
    }

    /// Purchase orders of one project.
    pub async fn purchase_orders_for_project(&self, project_id: &str) -> Result<Vec<PurchaseOrder>> {
        let key = QueryKey::by_parent(Table::PurchaseOrders, Table::Projects, project_id);
        self.cached(key, || {
            purchase_order::list_purchase_orders_by_project(&self.db, project_id)
        })
        .await
    }

    /// All milestones.
    pub async fn milestones(&self) -> Result<Vec<Milestone>> {
        self.cached(QueryKey::all(Table::Milestones), || {
            milestone::list_milestones(&self.db)
        })
        .await
    }

    /// Milestones of one project.
    pub async fn milestones_for_project(&self, project_id: &str) -> Result<Vec<Milestone>> {
        let key = QueryKey::by_parent(Table::Milestones, Table::Projects, project_id);
        self.cached(key, || {
            milestone::list_milestones_by_project(&self.db, project_id)
        })
        .await
    }

    /// External links of one project.
    pub async fn links_for_project(&self, project_id: &str) -> Result<Vec<ExternalLink>> {
        let key = QueryKey::by_parent(Table::ExternalLinks, Table::Projects, project_id);
        self.cached(key, || {
            external_link::list_links_by_project(&self.db, project_id)
        })
        .await
    }

    /// Comments on one supplier.
    pub async fn comments_for_supplier(&self, supplier_id: &str) -> Result<Vec<SupplierComment>> {
        let key = QueryKey::by_parent(Table::SupplierComments, Table::Suppliers, supplier_id);
        self.cached(key, || {
            supplier_comment::list_comments_by_supplier(&self.db, supplier_id)
        })
        .await
    }

    /// Team members eligible for the manager pickers.
    pub async fn managers(&self) -> Result<Vec<TeamMember>> {
        self.cached(QueryKey::filter(Table::TeamMembers, "managers"), || {
            team_member::list_managers(&self.db)
        })
        .await
    }

    /// Builds the dashboard report, fetching the main collections concurrently.
    #[instrument(skip(self))]
    pub async fn dashboard(
        &self,
        now: DateTime<Utc>,
        window_days: i64,
    ) -> Result<report::DashboardReport> {
        let (projects, suppliers, orders, milestones) = tokio::join!(
            self.projects(),
            self.suppliers(),
            self.purchase_orders(),
            self.milestones(),
        );
        Ok(report::build_dashboard_report(
            &projects?,
            &suppliers?,
            &orders?,
            &milestones?,
            now,
            window_days,
        ))
    }

    // Writes

    /// Creates a project and refreshes the views that list it.
    pub async fn create_project(&self, patch: ProjectPatch) -> Result<Project> {
        let created = project::create_project(&self.db, patch).await?;
        let parents = parent_keys(&[
            (Table::Suppliers, created.supplier_id.as_deref()),
            (Table::Clients, created.client_id.as_deref()),
        ]);
        self.cache
            .invalidate_after_write(Table::Projects, &created.id, &parents)
            .await;
        Ok(created)
    }

    /// Updates a project and drops every cached project query.
    pub async fn update_project(&self, id: &str, patch: ProjectPatch) -> Result<Project> {
        let updated = project::update_project(&self.db, id, patch).await?;
        self.cache.invalidate_table(Table::Projects).await;
        Ok(updated)
    }

    /// Deletes a project and drops every cached project query.
    pub async fn delete_project(&self, id: &str) -> Result<bool> {
        let deleted = project::delete_project(&self.db, id).await?;
        self.cache.invalidate_table(Table::Projects).await;
        Ok(deleted)
    }

    /// Creates a supplier and drops the supplier list.
    pub async fn create_supplier(&self, patch: SupplierPatch) -> Result<Supplier> {
        let created = supplier::create_supplier(&self.db, patch).await?;
        self.cache
            .invalidate_after_write(Table::Suppliers, &created.id, &[])
            .await;
        Ok(created)
    }

    /// Updates a supplier and drops every cached supplier query.
    pub async fn update_supplier(&self, id: &str, patch: SupplierPatch) -> Result<Supplier> {
        let updated = supplier::update_supplier(&self.db, id, patch).await?;
        self.cache.invalidate_table(Table::Suppliers).await;
        Ok(updated)
    }

    /// Deletes a supplier and drops every cached supplier query.
    pub async fn delete_supplier(&self, id: &str) -> Result<bool> {
        let deleted = supplier::delete_supplier(&self.db, id).await?;
        self.cache.invalidate_table(Table::Suppliers).await;
        Ok(deleted)
    }

    /// Creates an order and refreshes the views keyed by its project, supplier and client.
    pub async fn create_purchase_order(&self, patch: PurchaseOrderPatch) -> Result<PurchaseOrder> {
        let created = purchase_order::create_purchase_order(&self.db, patch).await?;
        let parents = parent_keys(&[
            (Table::Projects, created.project_id.as_deref()),
            (Table::Suppliers, created.supplier_id.as_deref()),
            (Table::Clients, created.client_id.as_deref()),
        ]);
        self.cache
            .invalidate_after_write(Table::PurchaseOrders, &created.id, &parents)
            .await;
        Ok(created)
    }

    /// Updates an order and drops every cached order query.
    pub async fn update_purchase_order(
        &self,
        id: &str,
        patch: PurchaseOrderPatch,
    ) -> Result<PurchaseOrder> {
        let updated = purchase_order::update_purchase_order(&self.db, id, patch).await?;
        self.cache.invalidate_table(Table::PurchaseOrders).await;
        Ok(updated)
    }

    /// Deletes an order and drops every cached order query.
    pub async fn delete_purchase_order(&self, id: &str) -> Result<bool> {
        let deleted = purchase_order::delete_purchase_order(&self.db, id).await?;
        self.cache.invalidate_table(Table::PurchaseOrders).await;
        Ok(deleted)
    }

    /// Creates a milestone and refreshes its project's milestone list.
    pub async fn create_milestone(&self, patch: MilestonePatch) -> Result<Milestone> {
        let created = milestone::create_milestone(&self.db, patch).await?;
        let parents = parent_keys(&[(Table::Projects, created.project_id.as_deref())]);
        self.cache
            .invalidate_after_write(Table::Milestones, &created.id, &parents)
            .await;
        Ok(created)
    }

    /// Flips a milestone and refreshes its project's milestone list.
    pub async fn toggle_milestone(&self, id: &str) -> Result<Milestone> {
        let toggled = milestone::toggle_milestone(&self.db, id).await?;
        let parents = parent_keys(&[(Table::Projects, toggled.project_id.as_deref())]);
        self.cache
            .invalidate_after_write(Table::Milestones, &toggled.id, &parents)
            .await;
        Ok(toggled)
    }

    /// Deletes a milestone and drops every cached milestone query.
    pub async fn delete_milestone(&self, id: &str) -> Result<bool> {
        let deleted = milestone::delete_milestone(&self.db, id).await?;
        self.cache.invalidate_table(Table::Milestones).await;
        Ok(deleted)
    }
}

/// Keeps the parents that are actually set.
fn parent_keys<'a>(candidates: &[(Table, Option<&'a str>)]) -> Vec<(Table, &'a str)> {
    candidates
        .iter()
        .filter_map(|(table, id)| id.map(|id| (*table, id)))
        .collect()
}
