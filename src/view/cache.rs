//! Query cache shared by the views, invalidated after every successful write.

use std::{any::Any, collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// Storage tables a cached query can read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// `projects`
    Projects,
    /// `suppliers`
    Suppliers,
    /// `purchase_orders`
    PurchaseOrders,
    /// `milestones`
    Milestones,
    /// `clients`
    Clients,
    /// `team_members`
    TeamMembers,
    /// `external_links`
    ExternalLinks,
    /// `supplier_comments`
    SupplierComments,
}

/// Which rows of a table a cached query covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The whole list
    All,
    /// One row
    ById(String),
    /// Rows whose foreign key to `parent` equals `id`
    ByParent { parent: Table, id: String },
    /// A named filtered list, stale after any write to the table
    Filter(&'static str),
}

/// Cache key: a table plus a scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Table the query reads
    pub table: Table,
    /// Rows the query covers
    pub scope: Scope,
}

impl QueryKey {
    /// Key for the whole table.
    #[must_use]
    pub const fn all(table: Table) -> Self {
        Self {
            table,
            scope: Scope::All,
        }
    }

    /// Key for one row.
    pub fn by_id(table: Table, id: impl Into<String>) -> Self {
        Self {
            table,
            scope: Scope::ById(id.into()),
        }
    }

    /// Key for the rows of `table` that reference parent row `id`.
    pub fn by_parent(table: Table, parent: Table, id: impl Into<String>) -> Self {
        Self {
            table,
            scope: Scope::ByParent {
                parent,
                id: id.into(),
            },
        }
    }

    /// Key for a named filtered list of `table`.
    #[must_use]
    pub const fn filter(table: Table, name: &'static str) -> Self {
        Self {
            table,
            scope: Scope::Filter(name),
        }
    }

    /// Whether a write to row `id` of `table`, referencing `parents`, makes this entry stale.
    fn stale_after(&self, table: Table, id: &str, parents: &[(Table, &str)]) -> bool {
        if self.table != table {
            return false;
        }
        match &self.scope {
            Scope::All | Scope::Filter(_) => true,
            Scope::ById(cached) => cached == id,
            Scope::ByParent { parent, id: parent_id } => parents
                .iter()
                .any(|(p, pid)| p == parent && pid == parent_id),
        }
    }
}

type CachedValue = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Entries {
    values: HashMap<QueryKey, CachedValue>,
    /// Bumped by every invalidation of the table
    generations: HashMap<Table, u64>,
}

impl Entries {
    fn generation(&self, table: Table) -> u64 {
        self.generations.get(&table).copied().unwrap_or(0)
    }

    fn bump(&mut self, table: Table) {
        *self.generations.entry(table).or_insert(0) += 1;
    }
}

/// Type-erased map from [`QueryKey`] to the last fetched value.
///
/// Each table carries a generation that every invalidation advances, so a
/// fetch that started before a write can be told apart from one that started
/// after it.
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<Entries>,
}

impl QueryCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the cached value, if present and of type `T`.
    pub async fn get<T>(&self, key: &QueryKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entries = self.entries.read().await;
        let hit = entries
            .values
            .get(key)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned();
        trace!(?key, hit = hit.is_some(), "Query cache lookup");
        hit
    }

    /// Current generation of `table`; record it before fetching.
    pub async fn generation(&self, table: Table) -> u64 {
        self.entries.read().await.generation(table)
    }

    /// Stores `value` unconditionally.
    pub async fn insert<T>(&self, key: QueryKey, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.entries.write().await.values.insert(key, Arc::new(value));
    }

    /// Stores `value` only if the key's table has not been invalidated since
    /// `generation` was read. Returns whether the value was stored.
    pub async fn insert_if_current<T>(&self, key: QueryKey, value: T, generation: u64) -> bool
    where
        T: Send + Sync + 'static,
    {
        let mut entries = self.entries.write().await;
        if entries.generation(key.table) != generation {
            debug!(?key, "Discarding fetch that overlapped a write");
            return false;
        }
        entries.values.insert(key, Arc::new(value));
        true
    }

    /// Drops the table's list, the row's own entry, and every entry keyed by one
    /// of the row's parents. Returns how many entries were dropped.
    pub async fn invalidate_after_write(
        &self,
        table: Table,
        id: &str,
        parents: &[(Table, &str)],
    ) -> usize {
        let mut entries = self.entries.write().await;
        entries.bump(table);
        let before = entries.values.len();
        entries
            .values
            .retain(|key, _| !key.stale_after(table, id, parents));
        let dropped = before - entries.values.len();
        debug!(?table, id, dropped, "Invalidated cached queries after write");
        dropped
    }

    /// Drops every entry for `table`.
    pub async fn invalidate_table(&self, table: Table) -> usize {
        let mut entries = self.entries.write().await;
        entries.bump(table);
        let before = entries.values.len();
        entries.values.retain(|key, _| key.table != table);
        let dropped = before - entries.values.len();
        debug!(?table, dropped, "Invalidated cached table");
        dropped
    }

    /// Number of cached entries across all tables.
    pub async fn len(&self) -> usize {
        self.entries.read().await.values.len()
    }

    /// Whether nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.values.is_empty()
    }
}
