//! Generic numeric buffer shared by both precisions.

use super::{ListType, ValueStore, EXPAND};
use std::fmt;

/// Scalar type a [`NumericStore`] can hold.
pub trait Element: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Precision this element maps to.
    const LIST_TYPE: ListType;

    /// Filler for slots that have not been written.
    const UNSET: Self;

    /// Narrow (or pass through) an incoming value.
    fn from_f64(value: f64) -> Self;

    /// Widen for readers.
    fn to_f64(self) -> f64;
}

impl Element for f64 {
    const LIST_TYPE: ListType = ListType::Double;
    const UNSET: Self = Self::NAN;

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

impl Element for f32 {
    const LIST_TYPE: ListType = ListType::Float;
    const UNSET: Self = Self::NAN;

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from_f64(value: f64) -> Self {
        value as Self
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

/// Backing store over a contiguous buffer of `T`.
///
/// The buffer length is the physical capacity; unwritten slots hold `NaN`.
#[derive(Clone, Default)]
pub struct NumericStore<T> {
    values: Vec<T>,
}

/// 64-bit backing store.
pub type DoubleStore = NumericStore<f64>;

/// 32-bit backing store.
pub type FloatStore = NumericStore<f32>;

impl<T: Element> fmt::Debug for NumericStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericStore")
            .field("type", &T::LIST_TYPE)
            .field("capacity", &self.values.len())
            .finish()
    }
}

impl<T: Element> ValueStore for NumericStore<T> {
    const LIST_TYPE: ListType = T::LIST_TYPE;

    fn with_capacity(capacity: usize) -> Self {
        Self {
            values: vec![T::UNSET; capacity],
        }
    }

    fn set_value(&mut self, index: usize, value: f64) {
        if index >= self.values.len() {
            let new_len = (self.values.len() + EXPAND).max(index + 1);
            self.values.resize(new_len, T::UNSET);
        }
        self.values[index] = T::from_f64(value);
    }

    fn get_value(&self, index: usize, len: usize) -> f64 {
        if index >= len {
            return f64::NAN;
        }
        self.values.get(index).map_or(f64::NAN, |v| v.to_f64())
    }

    fn remove(&mut self, index: usize, len: usize) {
        let end = len.min(self.values.len());
        if index < end {
            self.values.copy_within(index + 1..end, index);
        }
    }

    fn compact(&mut self, len: usize) {
        if len < self.values.len() {
            self.values.truncate(len);
            self.values.shrink_to_fit();
        }
    }

    fn capacity(&self) -> usize {
        self.values.len()
    }
}
