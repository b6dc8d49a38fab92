// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! 3-component `f32` vector.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use thiserror::Error;

use crate::{EPSILON, TOLERANCE};

/// Error reported when an operation needs a usable direction but the vector
/// is degenerate (length at or below [`EPSILON`](crate::EPSILON)).
///
/// This is a report, not a fault: the operation has already applied its
/// documented fallback value by the time the error is returned. The caller
/// decides whether degeneracy is fatal.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("vector magnitude is below the degeneracy floor")]
pub struct DegenerateVector;

/// 3-component `f32` vector used throughout the kernel.
///
/// A plain value type: `Copy`, no hidden state. Components may describe
/// points or directions depending on context. The x/y plane doubles as the
/// 2D working plane (z is depth), which is what the `*_xy` operations read.
/// Zero-length vectors are legal; operations that need a direction check
/// for degeneracy instead of assuming one.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All-ones vector.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit vector along positive X.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector along positive Y.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector along positive Z.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// X component.
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// Returns the components as `[x, y, z]`.
    pub const fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Dot product of the 2D projections (x/y plane; z ignored).
    pub fn dot_xy(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y()
    }

    /// Cross product.
    ///
    /// Builds a fresh vector from component reads taken up front, so
    /// aliasing patterns like `v.cross(&v)` are safe by construction.
    pub fn cross(&self, other: &Self) -> Self {
        let (ax, ay, az) = (self.x(), self.y(), self.z());
        let (bx, by, bz) = (other.x(), other.y(), other.z());
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Vector length (magnitude).
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared length; cheaper when only comparisons are needed.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Length of the 2D projection (x/y plane).
    pub fn length_xy(&self) -> f32 {
        self.dot_xy(self).sqrt()
    }

    /// Returns the unit-length version of this vector, or [`Self::ZERO`]
    /// when the length is at or below [`EPSILON`](crate::EPSILON).
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::ZERO;
        }
        *self / len
    }

    /// Rescales the vector in place so its length equals `target`.
    ///
    /// A degenerate vector has no direction to preserve; it is set to
    /// `(target, 0, 0)` and [`DegenerateVector`] is reported instead of
    /// dividing by a near-zero magnitude.
    ///
    /// # Errors
    ///
    /// [`DegenerateVector`] when the vector had no usable direction. The
    /// fallback value has already been applied.
    pub fn set_length(&mut self, target: f32) -> Result<(), DegenerateVector> {
        let len = self.length();
        if len <= EPSILON {
            *self = Self::new(target, 0.0, 0.0);
            return Err(DegenerateVector);
        }
        *self *= target / len;
        Ok(())
    }

    /// Component-wise approximate equality within
    /// [`TOLERANCE`](crate::TOLERANCE).
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.x() - other.x()).abs() <= TOLERANCE
            && (self.y() - other.y()).abs() <= TOLERANCE
            && (self.z() - other.z()).abs() <= TOLERANCE
    }

    /// Approximate equality of the 2D projections (x/y only; z ignored).
    pub fn approx_eq_xy(&self, other: &Self) -> bool {
        (self.x() - other.x()).abs() <= TOLERANCE && (self.y() - other.y()).abs() <= TOLERANCE
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z())
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z())
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x() * rhs, self.y() * rhs, self.z() * rhs)
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x() / rhs, self.y() / rhs, self.z() / rhs)
    }
}

impl DivAssign<f32> for Vec3 {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z())
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(data: [f32; 3]) -> Self {
        Self { data }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}
