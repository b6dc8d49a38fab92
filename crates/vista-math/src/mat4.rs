// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Column-major 4×4 matrix for clip-space composition.

/// Column-major 4×4 `f32` matrix.
///
/// [`Transform`](crate::Transform) carries an implicit `[0, 0, 0, 1]`
/// bottom row and therefore cannot express a perspective projection. This
/// type exists for the places that need a real fourth row: building a
/// projection and forming the projection·view product that frustum
/// extraction reads. It deliberately exposes no point or normal
/// application so the flag-tracked transform stays the single transform
/// path.
///
/// Storage is column-major: entry `(row, col)` lives at `data[col * 4 + row]`,
/// matching the column-vector convention `result = M · v`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    data: [f32; 16],
}

impl Mat4 {
    /// Identity matrix.
    pub const fn identity() -> Self {
        let mut data = [0.0; 16];
        data[0] = 1.0;
        data[5] = 1.0;
        data[10] = 1.0;
        data[15] = 1.0;
        Self { data }
    }

    /// Builds a matrix from raw column-major entries.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Returns the column-major entries.
    pub const fn to_array(self) -> [f32; 16] {
        self.data
    }

    const fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Returns one row as `[x, y, z, w]` coefficients.
    ///
    /// # Panics
    ///
    /// Panics when `row >= 4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista_math::Mat4;
    ///
    /// assert_eq!(Mat4::identity().row(1), [0.0, 1.0, 0.0, 0.0]);
    /// ```
    pub fn row(&self, row: usize) -> [f32; 4] {
        assert!(row < 4, "row index out of range");
        [
            self.at(row, 0),
            self.at(row, 1),
            self.at(row, 2),
            self.at(row, 3),
        ]
    }

    /// Full 4×4 product `self · rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut data = [0.0_f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                data[col * 4 + row] = sum;
            }
        }
        Self { data }
    }

    /// Symmetric perspective projection, GL clip conventions.
    ///
    /// Right-handed eye space looking down negative z; clip-space depth
    /// spans `[-w, w]`. `fov_y` is the full vertical field of view in
    /// radians, `aspect` is width over height, and `near`/`far` are
    /// positive distances along the view direction.
    ///
    /// # Panics
    ///
    /// Panics when the field of view or aspect is non-positive, or when the
    /// clip range is empty or behind the eye.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        assert!(fov_y > 0.0 && aspect > 0.0, "degenerate projection shape");
        assert!(near > 0.0 && far > near, "invalid clip range");
        let f = 1.0 / (fov_y * 0.5).tan();
        let inv_depth = 1.0 / (near - far);
        let mut data = [0.0_f32; 16];
        data[0] = f / aspect;
        data[5] = f;
        data[10] = (far + near) * inv_depth;
        data[11] = -1.0;
        data[14] = 2.0 * far * near * inv_depth;
        Self { data }
    }
}

impl core::ops::Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}
