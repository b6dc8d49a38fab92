// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Planes in Hessian normal form.

use vista_math::{Vec3, EPSILON};

/// Oriented plane `n · p + d = 0`, stored with a unit normal.
///
/// Normalizing at construction keeps signed distances metric and directly
/// comparable across planes, which the frustum tests rely on. Positive
/// distance is the side the normal points into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f32,
}

impl Plane {
    /// Builds a plane from raw coefficients `(a, b, c, d)` of
    /// `a·x + b·y + c·z + d = 0`, rescaling so the stored normal is unit
    /// length.
    ///
    /// The divisor is clamped to [`EPSILON`](vista_math::EPSILON) so
    /// degenerate coefficients never divide by zero.
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Self {
        let normal = Vec3::new(a, b, c);
        let inv_len = 1.0 / normal.length().max(EPSILON);
        Self {
            normal: normal * inv_len,
            offset: d * inv_len,
        }
    }

    /// Builds a plane from a normal and offset; the normal is normalized.
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self::from_coefficients(normal.x(), normal.y(), normal.z(), offset)
    }

    /// Unit normal.
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed offset along the normal.
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Signed distance from the plane to `point`: positive in front of the
    /// plane (the normal side), negative behind.
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.offset
    }
}
