// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! View-frustum extraction and visibility predicates.

use vista_math::{Mat4, Transform, Vec3};

use crate::aabb::Aabb;
use crate::plane::Plane;

/// Frustum sides, in extraction order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    /// Right clip plane.
    Right,
    /// Left clip plane.
    Left,
    /// Bottom clip plane.
    Bottom,
    /// Top clip plane.
    Top,
    /// Far clip plane.
    Far,
    /// Near clip plane.
    Near,
}

impl Side {
    const fn index(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Left => 1,
            Self::Bottom => 2,
            Self::Top => 3,
            Self::Far => 4,
            Self::Near => 5,
        }
    }
}

/// Camera view volume as six inward-facing planes.
///
/// Predicates are conservative toward visibility: anything touching or
/// straddling the boundary is kept. The box and quad tests check corners
/// against whole planes only, so a volume outside the frustum but not
/// wholly behind any single plane is still reported visible — the standard
/// corner-test approximation, which never drops a visible volume.
///
/// An unpopulated frustum (the [`Frustum::empty`] state, before any camera
/// has been supplied) reports every query as not visible rather than
/// guessing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
    populated: bool,
}

impl Frustum {
    /// Unpopulated frustum: every visibility query reports not visible.
    pub fn empty() -> Self {
        Self {
            planes: [Plane::from_coefficients(0.0, 0.0, 0.0, 0.0); 6],
            populated: false,
        }
    }

    /// Extracts the six planes from the product `projection · view`.
    ///
    /// `view` is the world-to-eye transform (the inverse of the camera's
    /// placement); `projection` carries the perspective fourth row a
    /// [`Transform`] cannot express. Each plane is a sum or difference of
    /// two rows of the combined clip matrix, then normalized so distances
    /// are metric.
    pub fn from_projection_view(projection: &Mat4, view: &Transform) -> Self {
        let clip = projection.multiply(&view.to_mat4());
        let r0 = clip.row(0);
        let r1 = clip.row(1);
        let r2 = clip.row(2);
        let r3 = clip.row(3);
        Self {
            planes: [
                plane_diff(r3, r0), // right
                plane_sum(r3, r0),  // left
                plane_sum(r3, r1),  // bottom
                plane_diff(r3, r1), // top
                plane_diff(r3, r2), // far
                plane_sum(r3, r2),  // near
            ],
            populated: true,
        }
    }

    /// One of the six extracted planes.
    pub const fn plane(&self, side: Side) -> &Plane {
        &self.planes[side.index()]
    }

    /// True once planes have been extracted; [`Frustum::empty`] reports
    /// false.
    pub const fn populated(&self) -> bool {
        self.populated
    }

    /// True when `point` lies strictly inside all six planes.
    ///
    /// A point exactly on a boundary plane is not inside; the volume tests
    /// are the conservative ones.
    pub fn contains_point(&self, point: &Vec3) -> bool {
        if !self.populated {
            return false;
        }
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) > 0.0)
    }

    /// True unless the sphere is entirely behind some plane.
    ///
    /// At radius zero this agrees exactly with [`Frustum::contains_point`].
    pub fn contains_sphere(&self, center: &Vec3, radius: f32) -> bool {
        if !self.populated {
            return false;
        }
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(center) > -radius)
    }

    /// True unless all eight corners of the box sit behind one plane.
    ///
    /// Accepts negative half extents (corners enumerate the same point
    /// set), so malformed bounds degrade to a conservative answer instead
    /// of a fault.
    pub fn contains_box(&self, center: &Vec3, half_extents: &Vec3) -> bool {
        if !self.populated {
            return false;
        }
        let [cx, cy, cz] = center.to_array();
        let [hx, hy, hz] = half_extents.to_array();
        let corners = [
            Vec3::new(cx - hx, cy - hy, cz - hz),
            Vec3::new(cx - hx, cy - hy, cz + hz),
            Vec3::new(cx - hx, cy + hy, cz - hz),
            Vec3::new(cx - hx, cy + hy, cz + hz),
            Vec3::new(cx + hx, cy - hy, cz - hz),
            Vec3::new(cx + hx, cy - hy, cz + hz),
            Vec3::new(cx + hx, cy + hy, cz - hz),
            Vec3::new(cx + hx, cy + hy, cz + hz),
        ];
        !self.rejects_all(&corners)
    }

    /// [`Frustum::contains_box`] for an [`Aabb`].
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        self.contains_box(&aabb.center(), &aabb.half_extents())
    }

    /// True when the quad is certainly invisible: all four points behind a
    /// single plane. An unpopulated frustum excludes everything.
    pub fn excludes_quad(&self, quad: &[Vec3; 4]) -> bool {
        if !self.populated {
            return true;
        }
        self.rejects_all(quad)
    }

    /// True when some single plane has every point at or behind it.
    fn rejects_all(&self, points: &[Vec3]) -> bool {
        self.planes.iter().any(|plane| {
            points
                .iter()
                .all(|point| plane.signed_distance(point) <= 0.0)
        })
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::empty()
    }
}

fn plane_sum(a: [f32; 4], b: [f32; 4]) -> Plane {
    Plane::from_coefficients(a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3])
}

fn plane_diff(a: [f32; 4], b: [f32; 4]) -> Plane {
    Plane::from_coefficients(a[0] - b[0], a[1] - b[1], a[2] - b[2], a[3] - b[3])
}
