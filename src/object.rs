//! Detected objects that own a measurement list
//!
//! Every object exclusively owns one list for its whole lifetime; dropping
//! the object drops the list, releasing its hold on any shared schema.

use crate::list::{ListType, MeasurementList, MeasurementListFactory};
use serde::{Deserialize, Serialize};

/// Kind of image object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// User-drawn region
    Annotation,
    /// Generic detection
    Detection,
    /// Cell detection with nucleus
    Cell,
    /// Tile from a tiling pass
    Tile,
    /// Tissue microarray core
    TmaCore,
}

impl ObjectKind {
    /// Precision used for this kind's measurements by default.
    ///
    /// Detections are numerous, so they use the compact 32-bit store.
    #[must_use]
    pub const fn default_list_type(self) -> ListType {
        match self {
            Self::Detection | Self::Cell | Self::Tile => ListType::Float,
            Self::Annotation | Self::TmaCore => ListType::Double,
        }
    }

    /// Whether objects of this kind are detections.
    #[must_use]
    pub const fn is_detection(self) -> bool {
        matches!(self, Self::Detection | Self::Cell | Self::Tile)
    }
}

/// An object on the slide together with its measurements.
#[derive(Debug)]
pub struct PathObject {
    kind: ObjectKind,
    measurements: Box<dyn MeasurementList>,
}

impl PathObject {
    /// Create an object with an empty list of the kind's default precision.
    #[must_use]
    pub fn new(kind: ObjectKind, factory: &MeasurementListFactory) -> Self {
        Self::with_list(kind, factory.create(0, kind.default_list_type()))
    }

    /// Create an object owning `measurements`.
    #[must_use]
    pub fn with_list(kind: ObjectKind, measurements: Box<dyn MeasurementList>) -> Self {
        Self { kind, measurements }
    }

    /// Object kind.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Whether this object is a detection.
    #[must_use]
    pub const fn is_detection(&self) -> bool {
        self.kind.is_detection()
    }

    /// The object's measurements.
    #[must_use]
    pub fn measurement_list(&self) -> &dyn MeasurementList {
        self.measurements.as_ref()
    }
}
