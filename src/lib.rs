//! # Measurement Lists: Compact Per-Object Measurements
//!
//! Whole-slide image analysis produces millions of detected objects (cells,
//! nuclei, tiles, TMA cores), each carrying dozens of named numeric
//! measurements. Storing a name list and lookup map per object dominates
//! memory, so this crate keeps values in flat numeric buffers and shares one
//! interned name schema between every closed list with the same names.
//!
//! ## Design
//!
//! - **Open / closed lists**: appends go to a private name vector; `close`
//!   compacts storage and adopts a shared, hashed [`schema::Schema`]
//! - **Interning**: [`schema::SchemaPool`] maps name sequences to weakly held
//!   schemas, so unused schemas are reclaimed
//! - **Two precisions**: 64-bit and 32-bit [`store`] backends behind one trait
//! - **In-band absence**: missing measurements read as `NaN`, never an error
//!
//! ## Example Usage
//!
//! ```rust
//! use measurement_lists::list::{ListType, MeasurementList, MeasurementListFactory};
//! use std::sync::Arc;
//!
//! let factory = MeasurementListFactory::default();
//! let a = factory.create(0, ListType::Float);
//! let b = factory.create(0, ListType::Float);
//!
//! for list in [&a, &b] {
//!     list.put("Area", 12.5);
//!     list.put("Mean intensity", 0.25);
//!     list.close();
//! }
//!
//! // Both lists now share one name sequence
//! assert!(Arc::ptr_eq(&a.measurement_names(), &b.measurement_names()));
//! assert_eq!(a.get("Area"), 12.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod error;
pub mod list;
pub mod object;
#[cfg(feature = "rayon")]
pub mod parallel;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use list::{
    DoubleList, FloatList, ListType, MeasurementList, MeasurementListFactory, MeasurementsMap,
};
pub use object::{ObjectKind, PathObject};
pub use schema::{NameList, PoolConfig, Schema, SchemaPool};
