//! Backing stores for measurement values
//!
//! A backing store is a growable numeric buffer that a measurement list keeps
//! in step with its name sequence. Two precisions share one contract:
//! - [`DoubleStore`]: 64-bit values, exact round trip
//! - [`FloatStore`]: 32-bit values, half the memory, values narrowed on write
//!
//! The list owns the logical size (its name count) and passes it in; the store
//! only tracks physical capacity. Slots past the logical size are never read.
//!
//! # Example
//!
//! ```rust
//! use measurement_lists::store::{DoubleStore, ValueStore};
//!
//! let mut store = DoubleStore::default();
//! store.set_value(0, 1.5);
//! assert_eq!(store.get_value(0, 1), 1.5);
//! assert!(store.get_value(1, 1).is_nan());
//!
//! store.compact(1);
//! assert_eq!(store.capacity(), 1);
//! ```

mod numeric;

pub use numeric::{DoubleStore, Element, FloatStore, NumericStore};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of slots added when a store must grow.
///
/// Small enough not to bloat short lists, large enough to amortize appends.
pub const EXPAND: usize = 8;

/// Precision selector for a measurement list's backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    /// 64-bit floating point values
    Double,
    /// 32-bit floating point values (lossy)
    Float,
}

impl ListType {
    /// Lowercase name used by [`FromStr`] and [`Display`](fmt::Display).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Float => "float",
        }
    }

    /// Bytes used per stored value.
    #[must_use]
    pub const fn value_size(self) -> usize {
        match self {
            Self::Double => std::mem::size_of::<f64>(),
            Self::Float => std::mem::size_of::<f32>(),
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "double" => Ok(Self::Double),
            "float" => Ok(Self::Float),
            _ => Err(Error::InvalidListType(s.to_string())),
        }
    }
}

impl TryFrom<u8> for ListType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Double),
            1 => Ok(Self::Float),
            other => Err(Error::InvalidListType(format!("selector {other}"))),
        }
    }
}

/// Growable numeric buffer behind a measurement list.
///
/// `len` arguments are the owning list's logical size. Implementations must
/// keep `capacity() >= len` after every `set_value` the list performs.
pub trait ValueStore: fmt::Debug + Default + Send + Sync {
    /// Precision of this store.
    const LIST_TYPE: ListType;

    /// Create a store with `capacity` pre-allocated slots.
    fn with_capacity(capacity: usize) -> Self;

    /// Write `value` at `index`, growing to `max(capacity + EXPAND, index + 1)`
    /// when `index` is past the physical capacity.
    fn set_value(&mut self, index: usize, value: f64);

    /// Read the value at `index`, or `NaN` when `index >= len`.
    fn get_value(&self, index: usize, len: usize) -> f64;

    /// Remove the value at `index`, shifting `index + 1..len` one slot left.
    fn remove(&mut self, index: usize, len: usize);

    /// Shrink physical capacity to exactly `len`.
    fn compact(&mut self, len: usize);

    /// Physical capacity in slots.
    fn capacity(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_type_from_str() {
        assert_eq!("double".parse::<ListType>().unwrap(), ListType::Double);
        assert_eq!("Float".parse::<ListType>().unwrap(), ListType::Float);
        assert_eq!(" DOUBLE ".parse::<ListType>().unwrap(), ListType::Double);
    }

    #[test]
    fn test_list_type_from_str_invalid() {
        let err = "general".parse::<ListType>().unwrap_err();
        assert!(matches!(err, Error::InvalidListType(ref s) if s == "general"));
    }

    #[test]
    fn test_list_type_try_from_u8() {
        assert_eq!(ListType::try_from(0).unwrap(), ListType::Double);
        assert_eq!(ListType::try_from(1).unwrap(), ListType::Float);
        assert!(ListType::try_from(2).is_err());
    }

    #[test]
    fn test_list_type_display_round_trip() {
        for ty in [ListType::Double, ListType::Float] {
            assert_eq!(ty.to_string().parse::<ListType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_list_type_value_size() {
        assert_eq!(ListType::Double.value_size(), 8);
        assert_eq!(ListType::Float.value_size(), 4);
    }

    #[test]
    fn test_store_list_type_constants() {
        assert_eq!(DoubleStore::LIST_TYPE, ListType::Double);
        assert_eq!(FloatStore::LIST_TYPE, ListType::Float);
    }
}
