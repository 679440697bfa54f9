//! Lock storage: keyed map from `(owner, chain)` to a [`Lock`] record.
//!
//! The store has no implicit expiry. Records are retained until an explicit
//! unlock removes them, even past their deadline — expiry is a precondition
//! check in the engine, not a garbage-collection trigger here.

use std::collections::BTreeMap;

use chronolock_types::{ChainTag, Lock, OwnerId, Result};

/// Persistent keyed map of locks, owned by the escrow engine.
///
/// `list_by_chain` must return a stable, deterministic order for a given
/// store snapshot so query results are reproducible.
pub trait LockStore {
    /// Fetch the lock for `(owner, chain)`, if any.
    fn get(&self, owner: OwnerId, chain: &ChainTag) -> Result<Option<Lock>>;

    /// Upsert a lock under its `(owner, chain)` key.
    fn put(&mut self, lock: Lock) -> Result<()>;

    /// Remove and return the lock for `(owner, chain)`, if any.
    fn delete(&mut self, owner: OwnerId, chain: &ChainTag) -> Result<Option<Lock>>;

    /// All locks currently stored for `chain`, in deterministic order.
    fn list_by_chain(&self, chain: &ChainTag) -> Result<Vec<Lock>>;
}

/// In-memory [`LockStore`] over a `BTreeMap`.
///
/// The ordered map gives `list_by_chain` its deterministic order for free:
/// locks come back sorted by owner id.
#[derive(Debug, Default)]
pub struct MemoryLockStore {
    locks: BTreeMap<(OwnerId, ChainTag), Lock>,
}

impl MemoryLockStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: BTreeMap::new(),
        }
    }

    /// Number of locks stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether the store holds no locks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Serialize the full store to JSON. Round-trips every lock field
    /// exactly (decimal amounts and timestamps included). Each lock carries
    /// its own key fields, so the snapshot is simply the lock sequence in
    /// key order.
    pub fn snapshot(&self) -> Result<String> {
        let locks: Vec<&Lock> = self.locks.values().collect();
        Ok(serde_json::to_string(&locks)?)
    }

    /// Restore a store from a [`snapshot`](Self::snapshot).
    pub fn restore(json: &str) -> Result<Self> {
        let locks: Vec<Lock> = serde_json::from_str(json)?;
        let mut store = Self::new();
        for lock in locks {
            store.put(lock)?;
        }
        Ok(store)
    }
}

impl LockStore for MemoryLockStore {
    fn get(&self, owner: OwnerId, chain: &ChainTag) -> Result<Option<Lock>> {
        Ok(self.locks.get(&(owner, chain.clone())).cloned())
    }

    fn put(&mut self, lock: Lock) -> Result<()> {
        self.locks
            .insert((lock.owner, lock.chain.clone()), lock);
        Ok(())
    }

    fn delete(&mut self, owner: OwnerId, chain: &ChainTag) -> Result<Option<Lock>> {
        Ok(self.locks.remove(&(owner, chain.clone())))
    }

    fn list_by_chain(&self, chain: &ChainTag) -> Result<Vec<Lock>> {
        Ok(self
            .locks
            .values()
            .filter(|lock| &lock.chain == chain)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use rust_decimal::Decimal;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn put_then_get() {
        let mut store = MemoryLockStore::new();
        let lock = Lock::dummy("osmosis", Decimal::new(100, 0), t0(), 24);
        store.put(lock.clone()).unwrap();

        let chain = ChainTag::new("osmosis");
        let found = store.get(lock.owner, &chain).unwrap().unwrap();
        assert_eq!(found, lock);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_missing_is_none() {
        let store = MemoryLockStore::new();
        let found = store.get(OwnerId::new(), &ChainTag::new("osmosis")).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn put_is_upsert() {
        let mut store = MemoryLockStore::new();
        let mut lock = Lock::dummy("osmosis", Decimal::new(100, 0), t0(), 24);
        store.put(lock.clone()).unwrap();

        lock.apply_extension(t0() + Duration::hours(5), 12);
        store.put(lock.clone()).unwrap();

        assert_eq!(store.len(), 1);
        let found = store
            .get(lock.owner, &ChainTag::new("osmosis"))
            .unwrap()
            .unwrap();
        assert_eq!(found.lock_hours, 36);
    }

    #[test]
    fn delete_returns_removed_lock() {
        let mut store = MemoryLockStore::new();
        let lock = Lock::dummy("osmosis", Decimal::new(100, 0), t0(), 24);
        store.put(lock.clone()).unwrap();

        let chain = ChainTag::new("osmosis");
        let removed = store.delete(lock.owner, &chain).unwrap();
        assert_eq!(removed, Some(lock.clone()));
        assert!(store.is_empty());

        // Second delete finds nothing
        assert!(store.delete(lock.owner, &chain).unwrap().is_none());
    }

    #[test]
    fn same_owner_different_chains_are_distinct_keys() {
        let mut store = MemoryLockStore::new();
        let owner = OwnerId::new();
        let mut a = Lock::dummy("osmosis", Decimal::new(100, 0), t0(), 24);
        a.owner = owner;
        let mut b = Lock::dummy("juno-1", Decimal::new(50, 0), t0(), 12);
        b.owner = owner;
        store.put(a).unwrap();
        store.put(b).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list_by_chain(&ChainTag::new("osmosis")).unwrap().len(), 1);
        assert_eq!(store.list_by_chain(&ChainTag::new("juno-1")).unwrap().len(), 1);
    }

    #[test]
    fn list_by_chain_is_sorted_by_owner() {
        let mut store = MemoryLockStore::new();
        for _ in 0..5 {
            store
                .put(Lock::dummy("osmosis", Decimal::ONE, t0(), 24))
                .unwrap();
        }
        store
            .put(Lock::dummy("juno-1", Decimal::ONE, t0(), 24))
            .unwrap();

        let listed = store.list_by_chain(&ChainTag::new("osmosis")).unwrap();
        assert_eq!(listed.len(), 5);
        let owners: Vec<_> = listed.iter().map(|lock| lock.owner).collect();
        let mut sorted = owners.clone();
        sorted.sort_unstable();
        assert_eq!(owners, sorted);
    }

    #[test]
    fn list_unknown_chain_is_empty() {
        let store = MemoryLockStore::new();
        assert!(store.list_by_chain(&ChainTag::new("nowhere")).unwrap().is_empty());
    }

    #[test]
    fn expired_locks_are_retained_until_deleted() {
        let mut store = MemoryLockStore::new();
        let lock = Lock::dummy("osmosis", Decimal::new(100, 0), t0(), 1);
        store.put(lock.clone()).unwrap();

        // Far past the deadline, the record is still there.
        assert!(lock.is_unlockable(t0() + Duration::days(365)));
        assert!(store.get(lock.owner, &ChainTag::new("osmosis")).unwrap().is_some());
    }

    #[test]
    fn snapshot_roundtrip_is_exact() {
        let mut store = MemoryLockStore::new();
        store
            .put(Lock::dummy("osmosis", Decimal::new(123_456_789, 6), t0(), 24))
            .unwrap();
        store
            .put(Lock::dummy("juno-1", Decimal::new(1, 9), t0() + Duration::minutes(17), 8760))
            .unwrap();

        let json = store.snapshot().unwrap();
        let restored = MemoryLockStore::restore(&json).unwrap();

        assert_eq!(restored.len(), store.len());
        for chain in ["osmosis", "juno-1"] {
            let chain = ChainTag::new(chain);
            assert_eq!(
                restored.list_by_chain(&chain).unwrap(),
                store.list_by_chain(&chain).unwrap()
            );
        }
    }
}
