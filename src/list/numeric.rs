//! Measurement list backed by a numeric [`ValueStore`].

use super::{ListType, MeasurementList, MeasurementsMap};
use crate::schema::{NameList, Schema, SchemaPool};
use crate::store::{DoubleStore, FloatStore, ValueStore};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Measurement list storing 64-bit values.
pub type DoubleList = NumericMeasurementList<DoubleStore>;

/// Measurement list storing 32-bit values.
///
/// Values are narrowed to `f32` on write; reads return the widened `f32`.
pub type FloatList = NumericMeasurementList<FloatStore>;

/// Name storage for each list state.
#[derive(Debug)]
enum Names {
    /// Private, mutable, linear lookup
    Open(Vec<Arc<str>>),
    /// Shared, immutable, hashed lookup
    Closed(Arc<Schema>),
}

impl Names {
    fn len(&self) -> usize {
        match self {
            Self::Open(names) => names.len(),
            Self::Closed(schema) => schema.len(),
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        match self {
            Self::Open(names) => names.iter().position(|n| &**n == name),
            Self::Closed(schema) => schema.index_of(name),
        }
    }

    fn as_slice(&self) -> &[Arc<str>] {
        match self {
            Self::Open(names) => names,
            Self::Closed(schema) => schema.names(),
        }
    }
}

/// Everything guarded by the list lock.
///
/// Invariant: `values` holds exactly `names.len()` logical entries, and value
/// `i` belongs to name `i`.
#[derive(Debug)]
struct State<S> {
    names: Names,
    values: S,
}

impl<S: ValueStore> State<S> {
    /// Open -> Closed: compact values and adopt the interned schema.
    ///
    /// Called with the list lock held; takes pool shard locks after it.
    /// Returns whether the pool is due a sweep, which the caller must run
    /// after releasing the list lock.
    fn close(&mut self, pool: &SchemaPool) -> bool {
        if let Names::Open(_) = self.names {
            let open = std::mem::replace(&mut self.names, Names::Closed(pool.empty_schema()));
            if let Names::Open(names) = open {
                self.values.compact(names.len());
                trace!(len = names.len(), "Closing measurement list");
                let (schema, sweep_due) = pool.intern_deferred(names);
                self.names = Names::Closed(schema);
                return sweep_due;
            }
        }
        false
    }

    /// Closed -> Open (if needed), then apply `f` to the private names and
    /// the values.
    fn mutate<R>(&mut self, f: impl FnOnce(&mut Vec<Arc<str>>, &mut S) -> R) -> R {
        let placeholder = Names::Open(Vec::new());
        let mut names = match std::mem::replace(&mut self.names, placeholder) {
            Names::Open(names) => names,
            Names::Closed(schema) => {
                trace!(len = schema.len(), "Reopening closed measurement list");
                schema.names().to_vec()
            }
        };
        let result = f(&mut names, &mut self.values);
        self.names = Names::Open(names);
        result
    }

    fn value(&self, index: usize) -> f64 {
        self.values.get_value(index, self.names.len())
    }
}

/// Put `name` into open storage, returning the value it replaced.
fn upsert<S: ValueStore>(names: &mut Vec<Arc<str>>, values: &mut S, name: &str, value: f64) -> Option<f64> {
    if let Some(index) = names.iter().position(|n| &**n == name) {
        let previous = values.get_value(index, names.len());
        values.set_value(index, value);
        Some(previous)
    } else {
        names.push(Arc::from(name));
        values.set_value(names.len() - 1, value);
        None
    }
}

/// Drop name and value at `index`, keeping the two aligned.
fn remove_at<S: ValueStore>(names: &mut Vec<Arc<str>>, values: &mut S, index: usize) -> f64 {
    let value = values.get_value(index, names.len());
    values.remove(index, names.len());
    names.remove(index);
    value
}

/// Measurement list over a [`ValueStore`] of either precision.
///
/// A new list starts closed against the pool's empty schema, so an unused list
/// costs only its buffer. The first mutation reopens it. A list built with
/// [`with_capacity`](Self::with_capacity) is closed and empty but keeps its
/// spare capacity until the first `close` after it is populated; only that
/// `close` compacts.
///
/// One mutex guards names and values together; the pool is only touched from
/// `close`, after that mutex is taken, and never calls back into a list. Pool
/// sweeps triggered by a `close` run after the list lock is released.
pub struct NumericMeasurementList<S: ValueStore> {
    state: Mutex<State<S>>,
    pool: Arc<SchemaPool>,
}

impl<S: ValueStore> NumericMeasurementList<S> {
    /// Create an empty list interning into `pool`.
    #[must_use]
    pub fn new(pool: Arc<SchemaPool>) -> Self {
        Self::with_capacity(0, pool)
    }

    /// Create an empty list with `capacity` pre-allocated value slots.
    ///
    /// The list reports closed, yet holds `capacity` slots until populated
    /// and closed again.
    #[must_use]
    pub fn with_capacity(capacity: usize, pool: Arc<SchemaPool>) -> Self {
        let state = State {
            names: Names::Closed(pool.empty_schema()),
            values: S::with_capacity(capacity),
        };
        Self {
            state: Mutex::new(state),
            pool,
        }
    }

    /// The pool this list interns into.
    #[must_use]
    pub const fn pool(&self) -> &Arc<SchemaPool> {
        &self.pool
    }

    /// Physical capacity of the backing store.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().values.capacity()
    }

    fn lock(&self) -> MutexGuard<'_, State<S>> {
        // Mutations finish before any panic could escape, so a poisoned
        // state is still aligned
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: ValueStore> MeasurementList for NumericMeasurementList<S> {
    fn list_type(&self) -> ListType {
        S::LIST_TYPE
    }

    fn replace(&self, name: &str, value: f64) -> Option<f64> {
        self.lock()
            .mutate(|names, values| upsert(names, values, name, value))
    }

    fn put_all(&self, measurements: &[(&str, f64)]) {
        self.lock().mutate(|names, values| {
            for &(name, value) in measurements {
                upsert(names, values, name, value);
            }
        });
    }

    fn try_get(&self, name: &str) -> Option<f64> {
        let state = self.lock();
        state.names.index_of(name).map(|index| state.value(index))
    }

    fn contains_key(&self, name: &str) -> bool {
        let state = self.lock();
        if let Names::Open(_) = state.names {
            trace!("contains_key on open measurement list; close it first for hashed lookups");
        }
        state.names.index_of(name).is_some()
    }

    fn measurement_names(&self) -> NameList {
        match &self.lock().names {
            Names::Open(names) => NameList::from(names.as_slice()),
            Names::Closed(schema) => Arc::clone(schema.names()),
        }
    }

    fn name_at(&self, index: usize) -> Option<Arc<str>> {
        self.lock().names.as_slice().get(index).cloned()
    }

    fn value_at(&self, index: usize) -> f64 {
        self.lock().value(index)
    }

    fn len(&self) -> usize {
        self.lock().names.len()
    }

    fn remove(&self, name: &str) -> Option<f64> {
        self.lock().mutate(|names, values| {
            let index = names.iter().position(|n| &**n == name)?;
            Some(remove_at(names, values, index))
        })
    }

    fn remove_measurements(&self, to_remove: &[&str]) {
        self.lock().mutate(|names, values| {
            for &name in to_remove {
                if let Some(index) = names.iter().position(|n| &**n == name) {
                    remove_at(names, values, index);
                }
            }
        });
    }

    fn remove_measurements_with_prefix(&self, prefix: &str) -> usize {
        let mut state = self.lock();
        if !state.names.as_slice().iter().any(|n| n.starts_with(prefix)) {
            return 0;
        }
        state.mutate(|names, values| {
            let mut removed = 0;
            for index in (0..names.len()).rev() {
                if names[index].starts_with(prefix) {
                    remove_at(names, values, index);
                    removed += 1;
                }
            }
            removed
        })
    }

    fn clear(&self) {
        self.lock().mutate(|names, values| {
            names.clear();
            names.shrink_to_fit();
            values.compact(0);
        });
    }

    fn close(&self) {
        let sweep_due = self.lock().close(&self.pool);
        if sweep_due {
            self.pool.purge();
        }
    }

    fn is_closed(&self) -> bool {
        matches!(self.lock().names, Names::Closed(_))
    }

    fn for_each_measurement(&self, f: &mut dyn FnMut(&str, f64)) {
        let state = self.lock();
        for (index, name) in state.names.as_slice().iter().enumerate() {
            f(name, state.value(index));
        }
    }

    fn as_map(&self) -> MeasurementsMap<'_> {
        MeasurementsMap::new(self)
    }
}

impl<S: ValueStore> fmt::Display for NumericMeasurementList<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.write_str("[")?;
        for (index, name) in state.names.as_slice().iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {}", state.value(index))?;
        }
        f.write_str("]")
    }
}

impl<S: ValueStore> fmt::Debug for NumericMeasurementList<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("NumericMeasurementList")
            .field("type", &S::LIST_TYPE)
            .field("len", &state.names.len())
            .field("closed", &matches!(state.names, Names::Closed(_)))
            .field("values", &state.values)
            .finish()
    }
}
