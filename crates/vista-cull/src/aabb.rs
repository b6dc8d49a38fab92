// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Axis-aligned bounding boxes.

use vista_math::{Transform, Vec3};

/// Axis-aligned box spanning `min..=max` per component.
///
/// Degenerate boxes (zero extent on any axis) are legal; inverted ones are
/// not and are rejected at construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Builds a box from its extreme corners.
    ///
    /// # Panics
    ///
    /// Panics when any `min` component exceeds its `max` counterpart.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        assert!(
            min.x() <= max.x() && min.y() <= max.y() && min.z() <= max.z(),
            "invalid Aabb: min must not exceed max"
        );
        Self { min, max }
    }

    /// Builds a box from a center and per-axis half extents.
    ///
    /// # Panics
    ///
    /// Panics when any half extent is negative.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Minimum corner.
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner.
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Box center.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Per-axis half extents.
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The eight corners, minimum corner first and maximum corner last.
    pub fn corners(&self) -> [Vec3; 8] {
        let [x0, y0, z0] = self.min.to_array();
        let [x1, y1, z1] = self.max.to_array();
        [
            Vec3::new(x0, y0, z0),
            Vec3::new(x0, y0, z1),
            Vec3::new(x0, y1, z0),
            Vec3::new(x0, y1, z1),
            Vec3::new(x1, y0, z0),
            Vec3::new(x1, y0, z1),
            Vec3::new(x1, y1, z0),
            Vec3::new(x1, y1, z1),
        ]
    }

    /// Smallest box containing both inputs.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Vec3::new(
                self.min.x().min(other.min.x()),
                self.min.y().min(other.min.y()),
                self.min.z().min(other.min.z()),
            ),
            max: Vec3::new(
                self.max.x().max(other.max.x()),
                self.max.y().max(other.max.y()),
                self.max.z().max(other.max.z()),
            ),
        }
    }

    /// Axis-aligned bounds of this box under `transform`.
    ///
    /// Maps all eight corners and re-wraps them, so rotations grow the
    /// result to the rotated box's axis-aligned hull rather than rotating
    /// the box itself.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let corners = self.corners();
        let first = transform.transform_point(&corners[0]);
        let mut lo = first;
        let mut hi = first;
        for corner in &corners[1..] {
            let p = transform.transform_point(corner);
            lo = Vec3::new(lo.x().min(p.x()), lo.y().min(p.y()), lo.z().min(p.z()));
            hi = Vec3::new(hi.x().max(p.x()), hi.y().max(p.y()), hi.z().max(p.z()));
        }
        Self { min: lo, max: hi }
    }
}
