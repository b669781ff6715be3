// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding volumes

use modelcheck_model::{BoundsRecord, CheckError, Location, Result};
use nalgebra::{Point3, Vector3};

const AXES: [char; 3] = ['x', 'y', 'z'];

/// Axis-aligned bounding box in model coordinates (millimeters)
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - All coordinates are finite.
///
/// Both are checked once in [`BoundingVolume::new`]; the value is immutable
/// afterwards. Zero-extent (degenerate) boxes are allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingVolume {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl BoundingVolume {
    /// Create a bounding volume from its corners
    ///
    /// # Returns
    /// `CheckError::InvalidBounds` if `min > max` on any axis or a coordinate
    /// is NaN/infinite
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        for (axis, name) in AXES.iter().enumerate() {
            let (lo, hi) = (min[axis], max[axis]);
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(CheckError::InvalidBounds {
                    axis: *name,
                    min: lo,
                    max: hi,
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Create from the six scalar extents
    pub fn from_extents(
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) -> Result<Self> {
        Self::new(
            Point3::new(min_x, min_y, min_z),
            Point3::new(max_x, max_y, max_z),
        )
    }

    /// Create from a raw `{min: {x,y,z}, max: {x,y,z}}` record
    pub fn from_record(record: &BoundsRecord) -> Result<Self> {
        Self::from_extents(
            record.min.x,
            record.min.y,
            record.min.z,
            record.max.x,
            record.max.y,
            record.max.z,
        )
    }

    /// Minimum corner
    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    /// Maximum corner
    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    /// Extent along each axis
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// `true` iff the boxes overlap on all three axes
    ///
    /// Boundary-exclusive: boxes that only share a face, edge or corner do
    /// not intersect.
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        (0..3).all(|axis| self.max[axis] > other.min[axis] && other.max[axis] > self.min[axis])
    }

    /// Volume of the overlap region, 0 when the boxes do not intersect
    pub fn intersection_volume(&self, other: &BoundingVolume) -> f64 {
        if !self.intersects(other) {
            return 0.0;
        }
        (0..3)
            .map(|axis| self.max[axis].min(other.max[axis]) - self.min[axis].max(other.min[axis]))
            .product()
    }

    /// Arithmetic midpoint of the box
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Midpoint as a report location
    pub fn center_location(&self) -> Location {
        let c = self.center();
        Location::new(c.x, c.y, c.z)
    }

    /// Product of the three extents (0 for degenerate boxes)
    pub fn volume(&self) -> f64 {
        let e = self.extents();
        e.x * e.y * e.z
    }

    /// Box grown by `margin` on every side
    ///
    /// A negative margin larger than half an extent collapses that axis to
    /// its midpoint rather than inverting the box.
    pub fn inflate(&self, margin: f64) -> BoundingVolume {
        let delta = Vector3::repeat(margin);
        let mut min = self.min - delta;
        let mut max = self.max + delta;
        for axis in 0..3 {
            if min[axis] > max[axis] {
                let mid = (self.min[axis] + self.max[axis]) / 2.0;
                min[axis] = mid;
                max[axis] = mid;
            }
        }
        BoundingVolume { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube(min: f64, max: f64) -> BoundingVolume {
        BoundingVolume::from_extents(min, min, min, max, max, max).unwrap()
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = cube(0.0, 2000.0);
        let b = cube(1000.0, 3000.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert_relative_eq!(a.intersection_volume(&b), 1_000_000_000.0);
    }

    #[test]
    fn test_touching_faces_do_not_intersect() {
        let a = cube(0.0, 1000.0);
        let b = BoundingVolume::from_extents(1000.0, 0.0, 0.0, 2000.0, 1000.0, 1000.0).unwrap();
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection_volume(&b), 0.0);

        // Corner contact only
        let c = cube(1000.0, 2000.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = cube(0.0, 1000.0);
        let b = BoundingVolume::from_extents(500.0, 500.0, 1500.0, 1500.0, 1500.0, 2500.0).unwrap();
        assert!(!a.intersects(&b));
        assert_eq!(a.intersection_volume(&b), 0.0);
    }

    #[test]
    fn test_contained_box() {
        let outer = cube(0.0, 1000.0);
        let inner = cube(250.0, 750.0);
        assert!(outer.intersects(&inner));
        assert_relative_eq!(outer.intersection_volume(&inner), inner.volume());
    }

    #[test]
    fn test_center_and_volume() {
        let b = BoundingVolume::from_extents(0.0, 0.0, 0.0, 2.0, 4.0, 6.0).unwrap();
        assert_eq!(b.center(), Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(b.volume(), 48.0);
    }

    #[test]
    fn test_degenerate_box() {
        let flat = BoundingVolume::from_extents(0.0, 0.0, 0.0, 10.0, 10.0, 0.0).unwrap();
        assert_eq!(flat.volume(), 0.0);
        // A flat box lying inside a solid one still has no overlap thickness on z
        let solid = BoundingVolume::from_extents(0.0, 0.0, 0.0, 10.0, 10.0, 10.0).unwrap();
        assert!(!flat.intersects(&solid));
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = BoundingVolume::from_extents(0.0, 10.0, 0.0, 1.0, 5.0, 1.0).unwrap_err();
        match err {
            CheckError::InvalidBounds { axis, .. } => assert_eq!(axis, 'y'),
            other => panic!("expected InvalidBounds, got {:?}", other),
        }
        assert!(BoundingVolume::from_extents(f64::NAN, 0.0, 0.0, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_inflate() {
        let b = cube(0.0, 10.0).inflate(5.0);
        assert_eq!(b.min(), Point3::new(-5.0, -5.0, -5.0));
        assert_eq!(b.max(), Point3::new(15.0, 15.0, 15.0));

        let collapsed = cube(0.0, 10.0).inflate(-20.0);
        assert_eq!(collapsed.volume(), 0.0);
        assert_eq!(collapsed.center(), Point3::new(5.0, 5.0, 5.0));
    }
}
