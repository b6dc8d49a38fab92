// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Flag-tracked affine transforms.
//!
//! Every operation here preserves one invariant: the component mask is a
//! conservative upper bound on the matrix content. A clear bit proves the
//! corresponding sub-block is exactly identity and licenses a fast path; a
//! set bit merely routes through fuller arithmetic. Fast paths skip
//! multiplies, never change results.

use core::f32::consts::PI;

use crate::mat4::Mat4;
use crate::parts::{LinearKind, TransformParts};
use crate::vec3::Vec3;
use crate::{deg_to_rad, EPSILON, TOLERANCE};

/// Flag-tracked affine transform: a 4×3 matrix under the column-vector
/// convention with an implicit `[0, 0, 0, 1]` bottom row.
///
/// Storage is column-major, three linear columns then the translation
/// column; entry `(row, col)` lives at `data[col * 3 + row]`. The mask in
/// `parts` records which components the matrix carries — see
/// [`TransformParts`] for the soundness direction it maintains.
///
/// Equality is representational: two transforms compare equal only when
/// both the entries and the masks match.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    data: [f32; 12],
    parts: TransformParts,
}

impl Transform {
    /// Identity transform with an empty component mask.
    pub const fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, // linear column x
                0.0, 1.0, 0.0, // linear column y
                0.0, 0.0, 1.0, // linear column z
                0.0, 0.0, 0.0, // translation column
            ],
            parts: TransformParts::NONE,
        }
    }

    /// Pure translation by `offset`.
    pub const fn translation(offset: Vec3) -> Self {
        let mut out = Self::identity();
        out.data[9] = offset.x();
        out.data[10] = offset.y();
        out.data[11] = offset.z();
        out.parts = TransformParts::TRANSLATION;
        out
    }

    /// Pure diagonal scale by per-axis `factors`.
    pub const fn scaling(factors: Vec3) -> Self {
        let mut out = Self::identity();
        out.data[0] = factors.x();
        out.data[4] = factors.y();
        out.data[8] = factors.z();
        out.parts = TransformParts::SCALE;
        out
    }

    /// Rotation by `angle` radians about `axis` (right-handed, counter-
    /// clockwise looking down the axis toward the origin).
    ///
    /// The axis is normalized internally. A degenerate axis produces an
    /// identity block with the rotation flag still set; the mask stays a
    /// sound upper bound either way.
    pub fn rotation(axis: Vec3, angle: f32) -> Self {
        let mut out = Self::identity();
        out.parts = TransformParts::ROTATION;
        let len = axis.length();
        if len <= EPSILON {
            return out;
        }
        let x = axis.x() / len;
        let y = axis.y() / len;
        let z = axis.z() / len;
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        out.data = [
            t * x * x + c,
            t * x * y + s * z,
            t * x * z - s * y,
            t * x * y - s * z,
            t * y * y + c,
            t * y * z + s * x,
            t * x * z + s * y,
            t * y * z - s * x,
            t * z * z + c,
            0.0,
            0.0,
            0.0,
        ];
        out
    }

    /// 2D rotation in the x/y working plane: `angle_degrees` counter-
    /// clockwise about the z axis through `pivot`.
    ///
    /// The pivot maps to itself (up to float rounding); its z component
    /// cancels exactly during composition.
    pub fn rotation_2d(angle_degrees: f32, pivot: Vec3) -> Self {
        let mut out = Self::translation(-pivot);
        out.rotate(Vec3::UNIT_Z, deg_to_rad(angle_degrees));
        out.translate(pivot);
        out
    }

    /// Mirror about `pivot`: scales by `axis_signs` (typically ±1 per
    /// axis) in pivot-relative coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista_math::{Transform, Vec3};
    ///
    /// let flip_x = Transform::mirror(Vec3::new(-1.0, 1.0, 1.0), Vec3::new(2.0, 0.0, 0.0));
    /// let p = flip_x.transform_point(&Vec3::new(3.0, 0.0, 0.0));
    /// assert_eq!(p.to_array(), [1.0, 0.0, 0.0]);
    /// ```
    pub fn mirror(axis_signs: Vec3, pivot: Vec3) -> Self {
        let mut out = Self::translation(-pivot);
        out.scale(axis_signs);
        out.translate(pivot);
        out
    }

    /// Flattens z and pins it at `depth`: points keep their x/y and land on
    /// the `z = depth` plane.
    ///
    /// The z column is zero, so the result is singular; inverting it is a
    /// contract violation.
    pub fn force_depth(depth: f32) -> Self {
        let mut out = Self::scaling(Vec3::new(1.0, 1.0, 0.0));
        out.translate(Vec3::new(0.0, 0.0, depth));
        out
    }

    /// Rotation (plus optional translation) carrying the canonical up axis
    /// (+y) onto `direction`, with `heading` resolving the spin about it.
    ///
    /// The heading is projected perpendicular to the direction and becomes
    /// the image of +z. When it is absent or (near) parallel to the
    /// direction, an arbitrary perpendicular is substituted rather than
    /// dividing by a near-zero magnitude. A degenerate direction falls back
    /// to the canonical up axis itself.
    pub fn from_axes(direction: Vec3, heading: Option<Vec3>, position: Option<Vec3>) -> Self {
        let dir = if direction.length() <= EPSILON {
            Vec3::UNIT_Y
        } else {
            direction.normalize()
        };
        let projected = heading.map(|h| h - dir * dir.dot(&h));
        let forward = match projected {
            Some(p) if p.length() > EPSILON => p.normalize(),
            _ => perpendicular_to(&dir),
        };
        let side = dir.cross(&forward);

        let mut out = Self::identity();
        out.set_linear_columns(&side, &dir, &forward);
        out.parts = TransformParts::ROTATION;
        if let Some(p) = position {
            out.translate(p);
        }
        out
    }

    /// Transform carrying `from` onto `to`: translate off `from`'s origin,
    /// swing `from`'s direction onto `to`'s about their common
    /// perpendicular, spin about the target direction until the headings
    /// agree, then translate onto `to`'s origin.
    ///
    /// Unconstrained frame members (`None`) skip their leg: missing
    /// positions contribute no translation, and the spin only happens when
    /// both frames constrain a heading. Anti-parallel directions take a
    /// half turn about an arbitrary perpendicular.
    pub fn difference(from: &Frame, to: &Frame) -> Self {
        let mut out = match from.position {
            Some(p) => Self::translation(-p),
            None => Self::identity(),
        };

        let d0 = if from.direction.length() <= EPSILON {
            Vec3::UNIT_Y
        } else {
            from.direction.normalize()
        };
        let d1 = if to.direction.length() <= EPSILON {
            Vec3::UNIT_Y
        } else {
            to.direction.normalize()
        };

        let swing_axis = d0.cross(&d1);
        if swing_axis.length() > EPSILON {
            let angle = d0.dot(&d1).clamp(-1.0, 1.0).acos();
            out.rotate(swing_axis, angle);
        } else if d0.dot(&d1) < 0.0 {
            out.rotate(perpendicular_to(&d0), PI);
        }

        if let (Some(h0), Some(h1)) = (from.heading, to.heading) {
            let swung = out.transform_normal(&h0);
            let a = swung - d1 * d1.dot(&swung);
            let b = h1 - d1 * d1.dot(&h1);
            if a.length() > EPSILON && b.length() > EPSILON {
                let a = a.normalize();
                let b = b.normalize();
                let cos = a.dot(&b).clamp(-1.0, 1.0);
                let sin = d1.dot(&a.cross(&b));
                out.rotate(d1, sin.atan2(cos));
            }
        }

        if let Some(p) = to.position {
            out.translate(p);
        }
        out
    }

    /// Builds a transform from raw column-major entries (three linear
    /// columns, then the translation column) with every component flagged.
    ///
    /// The full mask is the honest upper bound for unknown entries; call
    /// [`Transform::classify`] afterwards to tighten it. Classification —
    /// and the fast paths it licenses — assume the entries describe a
    /// composition of this kernel's own operations; arbitrary shear content
    /// is outside that contract.
    pub const fn from_array(data: [f32; 12]) -> Self {
        Self {
            data,
            parts: TransformParts::ALL,
        }
    }

    /// Returns the column-major entries, translation column last.
    pub const fn to_array(self) -> [f32; 12] {
        self.data
    }

    /// Current component mask.
    pub const fn parts(&self) -> TransformParts {
        self.parts
    }

    /// Translation column as a vector.
    pub const fn translation_part(&self) -> Vec3 {
        Vec3::new(self.data[9], self.data[10], self.data[11])
    }

    /// Determinant of the 3×3 linear block.
    ///
    /// [`Transform::invert`] is undefined on singular matrices by
    /// contract; callers that cannot rule one out check here first.
    pub fn determinant(&self) -> f32 {
        let m00 = self.at(0, 0);
        let m01 = self.at(0, 1);
        let m02 = self.at(0, 2);
        let m10 = self.at(1, 0);
        let m11 = self.at(1, 1);
        let m12 = self.at(1, 2);
        let m20 = self.at(2, 0);
        let m21 = self.at(2, 1);
        let m22 = self.at(2, 2);
        m00 * (m11 * m22 - m12 * m21) - m01 * (m10 * m22 - m12 * m20)
            + m02 * (m10 * m21 - m11 * m20)
    }

    /// Widens to a full 4×4 with an explicit `[0, 0, 0, 1]` bottom row,
    /// for clip-space composition with a [`Mat4`] projection.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::new([
            self.data[0],
            self.data[1],
            self.data[2],
            0.0,
            self.data[3],
            self.data[4],
            self.data[5],
            0.0,
            self.data[6],
            self.data[7],
            self.data[8],
            0.0,
            self.data[9],
            self.data[10],
            self.data[11],
            1.0,
        ])
    }

    /// Left-composes a translation: `self` becomes `T(offset) · self`.
    ///
    /// Exact: adds onto the translation column, touching nothing else.
    pub fn translate(&mut self, offset: Vec3) {
        self.data[9] += offset.x();
        self.data[10] += offset.y();
        self.data[11] += offset.z();
        self.parts |= TransformParts::TRANSLATION;
    }

    /// Left-composes a diagonal scale: `self` becomes `S(factors) · self`.
    ///
    /// Scales row i of every column — translation included — by factor i.
    pub fn scale(&mut self, factors: Vec3) {
        let [fx, fy, fz] = factors.to_array();
        for col in 0..4 {
            self.data[col * 3] *= fx;
            self.data[col * 3 + 1] *= fy;
            self.data[col * 3 + 2] *= fz;
        }
        self.parts |= TransformParts::SCALE;
    }

    /// Left-composes a rotation: `self` becomes `R(axis, angle) · self`.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let rot = Self::rotation(axis, angle);
        for col in 0..4 {
            let x = self.at(0, col);
            let y = self.at(1, col);
            let z = self.at(2, col);
            self.set(0, col, rot.at(0, 0) * x + rot.at(0, 1) * y + rot.at(0, 2) * z);
            self.set(1, col, rot.at(1, 0) * x + rot.at(1, 1) * y + rot.at(1, 2) * z);
            self.set(2, col, rot.at(2, 0) * x + rot.at(2, 1) * y + rot.at(2, 2) * z);
        }
        self.parts |= TransformParts::ROTATION;
    }

    /// Appends `other` on the right: `self` becomes `self · other`, the
    /// transform that applies `other` first and the old `self` second.
    ///
    /// The linear blocks combine through a dispatch over both masks; each
    /// arm computes exactly what the full 3×3 product would, minus the
    /// multiplies a clear flag proves are against identity. The translation
    /// column becomes `L_self · t_other + t_self` (skipped entirely when
    /// `other` carries no translation), and the masks union.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista_math::{Transform, Vec3};
    ///
    /// let mut m = Transform::translation(Vec3::new(1.0, 2.0, 3.0));
    /// m.concatenate(&Transform::scaling(Vec3::new(2.0, 2.0, 2.0)));
    /// // scales first, then translates
    /// let p = m.transform_point(&Vec3::UNIT_X);
    /// assert_eq!(p.to_array(), [3.0, 2.0, 3.0]);
    /// ```
    pub fn concatenate(&mut self, other: &Self) {
        // Translation first: the combined column is L_self · t_other +
        // t_self and must read the linear block before it is replaced below.
        if other.parts.contains(TransformParts::TRANSLATION) {
            let moved = self.apply_linear(&other.translation_part());
            self.data[9] += moved.x();
            self.data[10] += moved.y();
            self.data[11] += moved.z();
        }

        match (self.parts.linear_kind(), other.parts.linear_kind()) {
            // rhs block is identity: nothing to fold in
            (_, LinearKind::Identity) => {}
            // lhs block is identity: take the rhs block as-is
            (LinearKind::Identity, _) => {
                for col in 0..3 {
                    for row in 0..3 {
                        self.set(row, col, other.at(row, col));
                    }
                }
            }
            (LinearKind::Scale, LinearKind::Scale) => {
                self.data[0] *= other.data[0];
                self.data[4] *= other.data[4];
                self.data[8] *= other.data[8];
            }
            (LinearKind::Scale, LinearKind::Rotation) => {
                // diagonal · general: row i of the rhs block scaled by s_i
                let (sx, sy, sz) = (self.data[0], self.data[4], self.data[8]);
                for col in 0..3 {
                    self.set(0, col, sx * other.at(0, col));
                    self.set(1, col, sy * other.at(1, col));
                    self.set(2, col, sz * other.at(2, col));
                }
            }
            (LinearKind::Rotation, LinearKind::Scale) => {
                // general · diagonal: column j of the lhs block scaled by s_j
                let (sx, sy, sz) = (other.data[0], other.data[4], other.data[8]);
                for row in 0..3 {
                    self.set(row, 0, self.at(row, 0) * sx);
                    self.set(row, 1, self.at(row, 1) * sy);
                    self.set(row, 2, self.at(row, 2) * sz);
                }
            }
            (LinearKind::Rotation, LinearKind::Rotation) => {
                let mut block = [0.0_f32; 9];
                for col in 0..3 {
                    for row in 0..3 {
                        let mut sum = 0.0;
                        for k in 0..3 {
                            sum += self.at(row, k) * other.at(k, col);
                        }
                        block[col * 3 + row] = sum;
                    }
                }
                self.data[..9].copy_from_slice(&block);
            }
        }

        self.parts |= other.parts;
    }

    /// Inverts in place, dispatching on the flags.
    ///
    /// Pure rotation blocks invert as their transpose (orthonormal by
    /// construction), pure scales invert entry-wise, mixed blocks go
    /// through the adjugate over the determinant, and the translation
    /// column becomes `-L⁻¹ · t`. The mask is unchanged: the inverse
    /// carries exactly the same component set.
    ///
    /// Singular matrices — a zero scale factor, any
    /// [`Transform::force_depth`] result, degenerate
    /// [`Transform::from_array`] content — produce non-finite entries.
    /// Inverting one is a contract violation, not a detected error; see
    /// [`Transform::determinant`].
    pub fn invert(&mut self) {
        let spins = self.parts.contains(TransformParts::ROTATION);
        let scales = self.parts.contains(TransformParts::SCALE);
        match (spins, scales) {
            (false, false) => {}
            (false, true) => {
                self.data[0] = 1.0 / self.data[0];
                self.data[4] = 1.0 / self.data[4];
                self.data[8] = 1.0 / self.data[8];
            }
            (true, false) => {
                self.data.swap(1, 3);
                self.data.swap(2, 6);
                self.data.swap(5, 7);
            }
            (true, true) => {
                let inv_det = 1.0 / self.determinant();
                let m00 = self.at(0, 0);
                let m01 = self.at(0, 1);
                let m02 = self.at(0, 2);
                let m10 = self.at(1, 0);
                let m11 = self.at(1, 1);
                let m12 = self.at(1, 2);
                let m20 = self.at(2, 0);
                let m21 = self.at(2, 1);
                let m22 = self.at(2, 2);
                self.data[0] = (m11 * m22 - m12 * m21) * inv_det;
                self.data[1] = (m12 * m20 - m10 * m22) * inv_det;
                self.data[2] = (m10 * m21 - m11 * m20) * inv_det;
                self.data[3] = (m02 * m21 - m01 * m22) * inv_det;
                self.data[4] = (m00 * m22 - m02 * m20) * inv_det;
                self.data[5] = (m01 * m20 - m00 * m21) * inv_det;
                self.data[6] = (m01 * m12 - m02 * m11) * inv_det;
                self.data[7] = (m02 * m10 - m00 * m12) * inv_det;
                self.data[8] = (m00 * m11 - m01 * m10) * inv_det;
            }
        }

        // -L⁻¹ · t, with the inverted block already in place above.
        if self.parts.contains(TransformParts::TRANSLATION) {
            let moved = self.apply_linear(&self.translation_part());
            self.data[9] = -moved.x();
            self.data[10] = -moved.y();
            self.data[11] = -moved.z();
        }
    }

    /// Pulls a drifted rotation block back toward orthonormality.
    ///
    /// One pass of the truncated inverse-square-root series: with
    /// `E = MᵀM - I`, the block is multiplied by `I - E/2 + 3E²/8`,
    /// leaving the residual third order in the drift. Exactly one pass;
    /// callers that accumulate extreme drift re-run it on their own
    /// schedule. The translation column is left bit-for-bit untouched.
    pub fn orthonormalize(&mut self) {
        // E = MᵀM − I: the symmetric drift of the block's column gram.
        let mut e = [[0.0_f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                let mut g = 0.0;
                for r in 0..3 {
                    g += self.at(r, i) * self.at(r, j);
                }
                e[i][j] = if i == j { g - 1.0 } else { g };
            }
        }

        // X = I − E/2 + 3E²/8, the three-term series.
        let mut x = [[0.0_f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                let mut e_sq = 0.0;
                for k in 0..3 {
                    e_sq += e[i][k] * e[k][j];
                }
                let base = if i == j { 1.0 } else { 0.0 };
                x[i][j] = base - 0.5 * e[i][j] + 0.375 * e_sq;
            }
        }

        // M := M · X.
        let mut block = [0.0_f32; 9];
        for col in 0..3 {
            for row in 0..3 {
                let mut sum = 0.0;
                for k in 0..3 {
                    sum += self.at(row, k) * x[k][col];
                }
                block[col * 3 + row] = sum;
            }
        }
        self.data[..9].copy_from_slice(&block);
    }

    /// Rebuilds the component mask from the matrix entries alone.
    ///
    /// Downgrades stale flags after compositions cancel out (an upper
    /// bound is sound but slow) and tightens the blanket mask of
    /// [`Transform::from_array`]. Thresholds are scaled multiples of
    /// [`TOLERANCE`](crate::TOLERANCE): translation entries count above
    /// half of it, the determinant counts away from one beyond three times
    /// it, and the block counts as rotation content when any diagonal
    /// entry sits below `1 - TOLERANCE` or any off-diagonal magnitude
    /// exceeds it.
    ///
    /// The diagonal rule deliberately routes shrinking scales onto the
    /// general path: a diagonal of 0.5 re-classifies as scale *and*
    /// rotation, which costs fast paths but never correctness.
    pub fn classify(&mut self) {
        let mut parts = TransformParts::NONE;

        let t_limit = TOLERANCE * 0.5;
        if self.data[9].abs() > t_limit
            || self.data[10].abs() > t_limit
            || self.data[11].abs() > t_limit
        {
            parts |= TransformParts::TRANSLATION;
        }

        if (self.determinant() - 1.0).abs() > TOLERANCE * 3.0 {
            parts |= TransformParts::SCALE;
        }

        let diag_drifted = self.at(0, 0) < 1.0 - TOLERANCE
            || self.at(1, 1) < 1.0 - TOLERANCE
            || self.at(2, 2) < 1.0 - TOLERANCE;
        let mut off_diag = false;
        for col in 0..3 {
            for row in 0..3 {
                if row != col && self.at(row, col).abs() > TOLERANCE {
                    off_diag = true;
                }
            }
        }
        if diag_drifted || off_diag {
            parts |= TransformParts::ROTATION;
        }

        self.parts = parts;
    }

    /// Applies the transform to a point: linear block, then translation,
    /// each skipped when its flag is clear.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista_math::{Transform, Vec3};
    ///
    /// let t = Transform::translation(Vec3::new(5.0, -3.0, 2.0));
    /// let p = t.transform_point(&Vec3::new(2.0, 4.0, -1.0));
    /// assert_eq!(p.to_array(), [7.0, 1.0, 1.0]);
    /// ```
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let moved = self.apply_linear(point);
        if self.parts.contains(TransformParts::TRANSLATION) {
            moved + self.translation_part()
        } else {
            moved
        }
    }

    /// Applies only the linear block: directions ignore the translation
    /// column entirely.
    ///
    /// No inverse-transpose correction is applied, so non-uniform scales
    /// shear normals off their surface; callers re-normalize when they
    /// need unit length.
    pub fn transform_normal(&self, normal: &Vec3) -> Vec3 {
        self.apply_linear(normal)
    }

    /// Linear-block application dispatched on the mask.
    fn apply_linear(&self, v: &Vec3) -> Vec3 {
        match self.parts.linear_kind() {
            LinearKind::Identity => *v,
            LinearKind::Scale => Vec3::new(
                self.data[0] * v.x(),
                self.data[4] * v.y(),
                self.data[8] * v.z(),
            ),
            LinearKind::Rotation => Vec3::new(
                self.at(0, 0) * v.x() + self.at(0, 1) * v.y() + self.at(0, 2) * v.z(),
                self.at(1, 0) * v.x() + self.at(1, 1) * v.y() + self.at(1, 2) * v.z(),
                self.at(2, 0) * v.x() + self.at(2, 1) * v.y() + self.at(2, 2) * v.z(),
            ),
        }
    }

    const fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 3 + row]
    }

    fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * 3 + row] = value;
    }

    fn set_linear_columns(&mut self, x: &Vec3, y: &Vec3, z: &Vec3) {
        self.data[0] = x.x();
        self.data[1] = x.y();
        self.data[2] = x.z();
        self.data[3] = y.x();
        self.data[4] = y.y();
        self.data[5] = y.z();
        self.data[6] = z.x();
        self.data[7] = z.y();
        self.data[8] = z.z();
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<&Transform> for Mat4 {
    fn from(transform: &Transform) -> Self {
        transform.to_mat4()
    }
}

/// Coordinate frame parameter for [`Transform::from_axes`] and
/// [`Transform::difference`].
///
/// `None` members leave that degree of freedom unconstrained.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// Frame direction, the image of the canonical up axis (+y). Need not
    /// be normalized.
    pub direction: Vec3,
    /// Optional heading resolving the spin about `direction`.
    pub heading: Option<Vec3>,
    /// Optional frame origin.
    pub position: Option<Vec3>,
}

impl Frame {
    /// Frame constrained only by a direction.
    pub const fn new(direction: Vec3) -> Self {
        Self {
            direction,
            heading: None,
            position: None,
        }
    }

    /// Returns the frame with its heading constrained.
    pub fn with_heading(mut self, heading: Vec3) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Returns the frame with its origin constrained.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }
}

/// Any unit vector perpendicular to `axis` (assumed unit length), for
/// resolving spin when no usable heading exists.
fn perpendicular_to(axis: &Vec3) -> Vec3 {
    let seed = if axis.z().abs() > 0.9 {
        Vec3::UNIT_X
    } else {
        Vec3::UNIT_Z
    };
    (seed - *axis * axis.dot(&seed)).normalize()
}
