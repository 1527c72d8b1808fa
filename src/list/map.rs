//! Read-through map view over a measurement list.

use super::MeasurementList;
use crate::schema::NameList;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;

/// Map-style view over a [`MeasurementList`].
///
/// The view is a borrowed handle: every call goes straight to the list, so
/// writes through the view reopen a closed list exactly as the list's own
/// methods do. Iteration follows the list's name order.
///
/// Unlike [`MeasurementList::get`], [`get`](Self::get) uses map semantics and
/// returns `None` for absent names.
///
/// # Example
///
/// ```rust
/// use measurement_lists::list::{ListType, MeasurementList, MeasurementListFactory};
///
/// let list = MeasurementListFactory::default().create(0, ListType::Double);
/// let map = list.as_map();
///
/// assert_eq!(map.insert("Area", 10.0), None);
/// assert_eq!(map.insert("Area", 12.0), Some(10.0));
/// assert_eq!(list.get("Area"), 12.0);
/// assert_eq!(map.get("Perimeter"), None);
/// ```
#[derive(Clone, Copy)]
pub struct MeasurementsMap<'a> {
    list: &'a dyn MeasurementList,
}

impl<'a> MeasurementsMap<'a> {
    pub(crate) fn new(list: &'a dyn MeasurementList) -> Self {
        Self { list }
    }

    /// Value for `name`, or `None` if absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.list.try_get(name)
    }

    /// Set `name`, returning the previous value.
    pub fn insert(&self, name: &str, value: f64) -> Option<f64> {
        self.list.replace(name, value)
    }

    /// Remove `name`, returning its value.
    pub fn remove(&self, name: &str) -> Option<f64> {
        self.list.remove(name)
    }

    /// Whether `name` is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.list.contains_key(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.list.clear();
    }

    /// Current keys; shared with the schema when the list is closed.
    #[must_use]
    pub fn keys(&self) -> NameList {
        self.list.measurement_names()
    }

    /// Values in key order.
    pub fn values(&self) -> impl Iterator<Item = f64> + 'a {
        self.iter().map(|(_, value)| value)
    }

    /// Iterate (name, value) pairs in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'a> {
        Iter {
            list: self.list,
            names: self.list.measurement_names(),
            position: 0,
        }
    }

    /// The list this view reads from.
    #[must_use]
    pub fn list(&self) -> &'a dyn MeasurementList {
        self.list
    }

    /// Whether this view reads from `list`.
    #[must_use]
    pub fn is_view_of(&self, list: &dyn MeasurementList) -> bool {
        let this: *const (dyn MeasurementList + '_) = self.list;
        let other: *const (dyn MeasurementList + '_) = list;
        std::ptr::eq(this.cast::<()>(), other.cast::<()>())
    }
}

impl fmt::Debug for MeasurementsMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for MeasurementsMap<'a> {
    type Item = (Arc<str>, f64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &MeasurementsMap<'a> {
    type Item = (Arc<str>, f64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serializes as a name -> value object in key order.
impl Serialize for MeasurementsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names = self.keys();
        let mut map = serializer.serialize_map(Some(names.len()))?;
        for name in names.iter() {
            map.serialize_entry(&**name, &self.list.get(name))?;
        }
        map.end()
    }
}

/// Iterator over a [`MeasurementsMap`].
///
/// Walks the key snapshot taken when iteration started; values are read from
/// the list as each key is reached.
pub struct Iter<'a> {
    list: &'a dyn MeasurementList,
    names: NameList,
    position: usize,
}

impl Iterator for Iter<'_> {
    type Item = (Arc<str>, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names.get(self.position)?;
        self.position += 1;
        Some((Arc::clone(name), self.list.get(name)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.names.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
