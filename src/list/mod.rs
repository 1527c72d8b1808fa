//! Measurement lists
//!
//! A measurement list is the per-object record of named numeric values.
//! Producers `put` values while the list is open, then `close` it; closing
//! compacts the backing store and swaps the private name vector for an
//! interned [`Schema`](crate::schema::Schema) shared with every other closed
//! list carrying the same names.
//!
//! ```text
//!            put / clear / remove
//!   ┌────────┐ <───────────────── ┌──────────┐
//!   │  Open  │                    │  Closed  │
//!   │ Vec +  │ ─────────────────> │ Schema + │
//!   │ linear │       close        │  hashed  │
//!   └────────┘                    └──────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use measurement_lists::list::{ListType, MeasurementList, MeasurementListFactory};
//!
//! let factory = MeasurementListFactory::default();
//! let list = factory.create(0, ListType::Double);
//!
//! list.put("Area", 42.0);
//! list.put("Perimeter", 25.1);
//! list.close();
//!
//! assert_eq!(list.get("Area"), 42.0);
//! assert!(list.get("Missing").is_nan());
//! ```

mod map;
mod numeric;

pub use map::{Iter, MeasurementsMap};
pub use numeric::{DoubleList, FloatList, NumericMeasurementList};

pub use crate::store::ListType;

use crate::schema::{NameList, SchemaPool};
use std::fmt;
use std::sync::Arc;

/// Named numeric measurements belonging to one object.
///
/// Every method takes `&self`; implementations serialize access internally so
/// a list can be read while another thread closes it. Missing names read as
/// `NaN` rather than failing.
pub trait MeasurementList: fmt::Debug + fmt::Display + Send + Sync {
    /// Backing precision.
    fn list_type(&self) -> ListType;

    /// Set `name` to `value`, overwriting in place or appending.
    ///
    /// Reopens a closed list.
    fn put(&self, name: &str, value: f64) {
        self.replace(name, value);
    }

    /// Like [`put`](Self::put), returning the previous value if `name` existed.
    fn replace(&self, name: &str, value: f64) -> Option<f64>;

    /// Put several measurements under one lock acquisition.
    fn put_all(&self, measurements: &[(&str, f64)]);

    /// Value for `name`, or `NaN` if absent.
    fn get(&self, name: &str) -> f64 {
        self.try_get(name).unwrap_or(f64::NAN)
    }

    /// Value for `name`, distinguishing absence from a stored `NaN`.
    fn try_get(&self, name: &str) -> Option<f64>;

    /// Whether `name` is present. Linear on an open list.
    fn contains_key(&self, name: &str) -> bool;

    /// Current names in order.
    ///
    /// Closed lists return their schema's shared sequence, so two closed lists
    /// with equal names return pointer-equal results. Open lists return a
    /// private snapshot.
    fn measurement_names(&self) -> NameList;

    /// Name at `index`, if in range.
    fn name_at(&self, index: usize) -> Option<Arc<str>>;

    /// Value at `index`, or `NaN` if out of range.
    fn value_at(&self, index: usize) -> f64;

    /// Number of measurements.
    fn len(&self) -> usize;

    /// Whether there are no measurements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `name`, returning its value if it was present. Reopens the list.
    fn remove(&self, name: &str) -> Option<f64>;

    /// Remove each of `names`; unknown names are ignored. Reopens the list.
    fn remove_measurements(&self, names: &[&str]);

    /// Remove every measurement whose name starts with `prefix`.
    ///
    /// Returns the number removed. The list is only reopened if something
    /// matched.
    fn remove_measurements_with_prefix(&self, prefix: &str) -> usize;

    /// Remove everything. The list stays open until the next `close`.
    fn clear(&self);

    /// Compact storage and adopt the interned schema. No-op when closed.
    fn close(&self);

    /// Whether the list is currently closed.
    fn is_closed(&self) -> bool;

    /// Visit every (name, value) pair in order while holding the list lock.
    ///
    /// The lock is not reentrant: `f` must not call back into this list, or
    /// the calling thread deadlocks. Collect what is needed and act on the
    /// list after this returns.
    fn for_each_measurement(&self, f: &mut dyn FnMut(&str, f64));

    /// Map-style view over this list. Never copies the stored values.
    fn as_map(&self) -> MeasurementsMap<'_>;
}

/// Creates measurement lists that intern into one shared [`SchemaPool`].
#[derive(Debug, Clone)]
pub struct MeasurementListFactory {
    pool: Arc<SchemaPool>,
}

impl MeasurementListFactory {
    /// Create a factory over an existing pool.
    #[must_use]
    pub const fn new(pool: Arc<SchemaPool>) -> Self {
        Self { pool }
    }

    /// The pool lists from this factory intern into.
    #[must_use]
    pub const fn pool(&self) -> &Arc<SchemaPool> {
        &self.pool
    }

    /// Create an empty list of the given precision with `capacity` value slots.
    #[must_use]
    pub fn create(&self, capacity: usize, list_type: ListType) -> Box<dyn MeasurementList> {
        match list_type {
            ListType::Double => Box::new(self.create_double(capacity)),
            ListType::Float => Box::new(self.create_float(capacity)),
        }
    }

    /// Create an empty 64-bit list.
    #[must_use]
    pub fn create_double(&self, capacity: usize) -> DoubleList {
        DoubleList::with_capacity(capacity, Arc::clone(&self.pool))
    }

    /// Create an empty 32-bit list.
    #[must_use]
    pub fn create_float(&self, capacity: usize) -> FloatList {
        FloatList::with_capacity(capacity, Arc::clone(&self.pool))
    }
}

impl Default for MeasurementListFactory {
    fn default() -> Self {
        Self::new(Arc::new(SchemaPool::new()))
    }
}
