//! Concurrent interning pool for schemas, keyed by name-sequence value.

use super::{NameList, PoolConfig, Schema};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use tracing::debug;

/// Interning pool mapping name sequences to shared [`Schema`]s.
///
/// Entries hold only [`Weak`] handles: a schema lives exactly as long as the
/// lists that adopted it. Dead entries are swept every
/// [`PoolConfig::sweep_interval`] creations, or on demand with [`purge`].
///
/// Check-then-insert runs under the owning shard's write lock, so racing
/// callers with equal sequences always receive the same `Arc<Schema>`. The pool
/// never calls back into measurement lists.
///
/// [`purge`]: SchemaPool::purge
pub struct SchemaPool {
    entries: DashMap<NameList, Weak<Schema>, FxBuildHasher>,
    empty: Arc<Schema>,
    created: AtomicUsize,
    config: PoolConfig,
}

impl SchemaPool {
    /// Create a pool with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create a pool with the given configuration.
    #[must_use]
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            entries: DashMap::with_capacity_and_hasher(config.initial_capacity(), FxBuildHasher),
            empty: Arc::new(Schema::new(Arc::from(Vec::new()))),
            created: AtomicUsize::new(0),
            config,
        }
    }

    /// Pool configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// The schema shared by every empty list.
    #[must_use]
    pub fn empty_schema(&self) -> Arc<Schema> {
        Arc::clone(&self.empty)
    }

    /// Return the canonical schema for `names`, creating it if needed.
    ///
    /// Equality is order-sensitive: `[A, B]` and `[B, A]` are distinct schemas.
    pub fn intern(&self, names: Vec<Arc<str>>) -> Arc<Schema> {
        let (schema, sweep_due) = self.intern_deferred(names);
        if sweep_due {
            self.purge();
        }
        schema
    }

    /// Like [`intern`](Self::intern), but leaves a due sweep to the caller.
    ///
    /// Returns the schema and whether [`purge`](Self::purge) should run. Lists
    /// call this while holding their own lock and purge once it is released.
    pub(crate) fn intern_deferred(&self, names: Vec<Arc<str>>) -> (Arc<Schema>, bool) {
        if names.is_empty() {
            return (self.empty_schema(), false);
        }

        // Fast path: shared read lock only
        let existing = self
            .entries
            .get(names.as_slice())
            .and_then(|entry| entry.value().upgrade());
        if let Some(schema) = existing {
            return (schema, false);
        }

        let (schema, created) = match self.entries.entry(NameList::from(names)) {
            Entry::Occupied(mut occupied) => {
                if let Some(schema) = occupied.get().upgrade() {
                    (schema, false)
                } else {
                    // Previous schema died; reuse the stored key
                    let schema = Arc::new(Schema::new(Arc::clone(occupied.key())));
                    occupied.insert(Arc::downgrade(&schema));
                    (schema, true)
                }
            }
            Entry::Vacant(vacant) => {
                let schema = Arc::new(Schema::new(Arc::clone(vacant.key())));
                vacant.insert(Arc::downgrade(&schema));
                (schema, true)
            }
        };

        let mut sweep_due = false;
        if created {
            debug!(names = schema.len(), "Interned new measurement schema");
            let count = self.created.fetch_add(1, Ordering::Relaxed) + 1;
            sweep_due = count % self.config.sweep_interval() == 0;
        }
        (schema, sweep_due)
    }

    /// Convenience wrapper around [`intern`](Self::intern) for string slices.
    pub fn intern_strs(&self, names: &[&str]) -> Arc<Schema> {
        self.intern(names.iter().map(|name| Arc::from(*name)).collect())
    }

    /// Drop entries whose schema is no longer referenced by any list.
    ///
    /// Returns the number of entries removed.
    pub fn purge(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, schema| schema.strong_count() > 0);
        let removed = before.saturating_sub(self.entries.len());
        debug!(removed, remaining = self.entries.len(), "Swept schema pool");
        removed
    }

    /// Number of entries, including dead ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pool holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose schema is still referenced.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().strong_count() > 0)
            .count()
    }
}

impl Default for SchemaPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemaPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaPool")
            .field("entries", &self.entries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
