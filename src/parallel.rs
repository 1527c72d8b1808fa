//! Parallel populate-then-close driver
//!
//! Runs a measurement producer over many objects on the rayon pool. Each object
//! is visited by exactly one worker, so its list has a single writer; the list
//! is closed as soon as the producer returns, which interns its names while the
//! pool is still warm with identical sequences from sibling objects.

use crate::object::PathObject;
use rayon::prelude::*;
use tracing::debug;

/// Apply `producer` to every object in parallel, closing each list afterwards.
///
/// # Example
///
/// ```rust
/// use measurement_lists::list::MeasurementListFactory;
/// use measurement_lists::object::{ObjectKind, PathObject};
/// use measurement_lists::parallel::measure_objects;
///
/// let factory = MeasurementListFactory::default();
/// let cells: Vec<PathObject> = (0..100)
///     .map(|_| PathObject::new(ObjectKind::Cell, &factory))
///     .collect();
///
/// measure_objects(&cells, |cell| {
///     cell.measurement_list().put("Area", 10.0);
///     cell.measurement_list().put("Perimeter", 12.0);
/// });
///
/// assert!(cells.iter().all(|c| c.measurement_list().is_closed()));
/// assert_eq!(factory.pool().live_count(), 1);
/// ```
pub fn measure_objects<F>(objects: &[PathObject], producer: F)
where
    F: Fn(&PathObject) + Sync + Send,
{
    objects.par_iter().for_each(|object| {
        producer(object);
        object.measurement_list().close();
    });
    debug!(objects = objects.len(), "Measured objects");
}

/// Close every object's list in parallel.
pub fn close_all(objects: &[PathObject]) {
    objects
        .par_iter()
        .for_each(|object| object.measurement_list().close());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::MeasurementListFactory;
    use crate::object::ObjectKind;
    use std::sync::Arc;

    #[test]
    fn test_measure_objects_shares_schema() {
        let factory = MeasurementListFactory::default();
        let objects: Vec<PathObject> = (0..1_000)
            .map(|_| PathObject::new(ObjectKind::Detection, &factory))
            .collect();

        measure_objects(&objects, |object| {
            let list = object.measurement_list();
            list.put("Area", 1.0);
            list.put("Mean intensity", 2.0);
            list.put("Max intensity", 3.0);
        });

        let first = objects[0].measurement_list().measurement_names();
        for object in &objects {
            let list = object.measurement_list();
            assert!(list.is_closed());
            assert!(Arc::ptr_eq(&first, &list.measurement_names()));
        }
        assert_eq!(factory.pool().live_count(), 1);
    }

    #[test]
    fn test_close_all() {
        let factory = MeasurementListFactory::default();
        let objects: Vec<PathObject> = (0..10)
            .map(|_| PathObject::new(ObjectKind::Tile, &factory))
            .collect();
        for object in &objects {
            object.measurement_list().put("Tile: Mean", 0.5);
        }

        close_all(&objects);
        assert!(objects.iter().all(|o| o.measurement_list().is_closed()));
    }
}
