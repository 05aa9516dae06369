//! Optimistic list state.
//!
//! A tentative entry is shown immediately under a [`LocalKey`] and later either
//! confirmed with the stored row or rolled back. Local keys are a separate
//! type from storage ids, so one can never be written where the other belongs.

use crate::errors::Result;
use tracing::debug;

/// Handle to a pending entry, valid only within the list that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalKey(u64);

/// One row of an [`OptimisticList`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<T> {
    /// Shown before the write has resolved
    Pending { key: LocalKey, value: T },
    /// Returned by storage
    Confirmed(T),
}

impl<T> Entry<T> {
    /// The row, provisional or confirmed.
    pub const fn value(&self) -> &T {
        match self {
            Self::Pending { value, .. } | Self::Confirmed(value) => value,
        }
    }

    /// Whether the entry still waits for storage.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// A list shown before storage confirms it: pending entries carry local keys
/// until [`OptimisticList::confirm`] swaps in the stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimisticList<T> {
    entries: Vec<Entry<T>>,
    next_key: u64,
}

impl<T> Default for OptimisticList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_key: 0,
        }
    }
}

impl<T> OptimisticList<T> {
    /// Starts from rows already fetched from storage.
    pub fn from_confirmed(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            entries: items.into_iter().map(Entry::Confirmed).collect(),
            next_key: 0,
        }
    }

    /// Appends a tentative entry and returns its key.
    pub fn push_pending(&mut self, value: T) -> LocalKey {
        let key = LocalKey(self.next_key);
        self.next_key += 1;
        self.entries.push(Entry::Pending { key, value });
        key
    }

    fn position(&self, key: LocalKey) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| matches!(e, Entry::Pending { key: k, .. } if *k == key))
    }

    /// Replaces the pending entry with the stored row, keeping its position.
    /// Returns `false` if the key is unknown or already resolved.
    pub fn confirm(&mut self, key: LocalKey, stored: T) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        self.entries[index] = Entry::Confirmed(stored);
        true
    }

    /// Removes the pending entry, returning its tentative value.
    pub fn roll_back(&mut self, key: LocalKey) -> Option<T> {
        let index = self.position(key)?;
        match self.entries.remove(index) {
            Entry::Pending { value, .. } | Entry::Confirmed(value) => Some(value),
        }
    }

    /// Confirms on success, rolls back on failure and hands the error back.
    pub fn resolve(&mut self, key: LocalKey, outcome: Result<T>) -> Result<()> {
        match outcome {
            Ok(stored) => {
                self.confirm(key, stored);
                Ok(())
            }
            Err(e) => {
                debug!(?key, "Rolling back optimistic entry: {}", e);
                self.roll_back(key);
                Err(e)
            }
        }
    }

    /// Entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    /// Rows confirmed by storage, in display order.
    pub fn confirmed(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Confirmed(value) => Some(value),
            Entry::Pending { .. } => None,
        })
    }

    /// Entries still waiting for storage.
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    /// Number of entries, pending included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_confirm_replaces_in_place() {
        let mut list = OptimisticList::from_confirmed(vec!["a".to_string()]);
        let key = list.push_pending("draft".to_string());
        assert_eq!(list.pending_count(), 1);

        assert!(list.confirm(key, "stored".to_string()));
        assert_eq!(list.pending_count(), 0);
        let values: Vec<_> = list.confirmed().cloned().collect();
        assert_eq!(values, vec!["a", "stored"]);

        assert!(!list.confirm(key, "again".to_string()));
    }

    #[test]
    fn test_roll_back_removes_only_that_entry() {
        let mut list = OptimisticList::default();
        let first = list.push_pending(1);
        let second = list.push_pending(2);

        assert_eq!(list.roll_back(first), Some(1));
        assert_eq!(list.len(), 1);
        assert!(list.iter().next().unwrap().is_pending());
        assert_eq!(*list.iter().next().unwrap().value(), 2);
        assert_eq!(list.roll_back(first), None);
        assert!(list.confirm(second, 20));
    }

    #[test]
    fn test_resolve_failure_rolls_back() {
        let mut list = OptimisticList::default();
        let key = list.push_pending(7);
        let result = list.resolve(key, Err(Error::validation("rejected")));
        assert!(result.is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn test_resolve_success_confirms() {
        let mut list = OptimisticList::default();
        let key = list.push_pending(7);
        list.resolve(key, Ok(8)).unwrap();
        assert_eq!(list.confirmed().copied().collect::<Vec<_>>(), vec![8]);
    }
}
