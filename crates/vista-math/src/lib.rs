// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Vista math core: flag-tracked affine transform algebra over `f32`.
//!
//! The centerpiece is [`Transform`], a 4×3 affine matrix (3×3 linear block
//! plus a translation column) that carries a [`TransformParts`] bitmask
//! recording which components — translation, scale, rotation — the matrix
//! actually holds. Composition, inversion, and point/normal application
//! dispatch on that mask to skip arithmetic against sub-blocks known to be
//! exactly identity. The skipped work is the only difference; the numeric
//! result is the one the full product would produce.
//!
//! Design notes:
//! - Column-vector convention throughout: `result = M · v`, column-major
//!   storage.
//! - Float32 everywhere. The x/y plane doubles as the 2D working plane;
//!   z is the depth axis.
//! - Degenerate inputs get documented fallback values instead of panics.
//!   The one reported failure, [`DegenerateVector`], still applies its
//!   fallback before returning.
//! - [`Mat4`] exists only for clip-space work (projections and the
//!   projection·view product); it deliberately has no point or normal
//!   application so `Transform` stays the single transform path.

use core::f32::consts::TAU;

mod mat4;
mod parts;
mod transform;
mod vec3;

pub use mat4::Mat4;
pub use parts::{LinearKind, TransformParts};
pub use transform::{Frame, Transform};
pub use vec3::{DegenerateVector, Vec3};

/// Degeneracy floor: magnitudes at or below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Entry tolerance for matrix classification and approximate comparison.
///
/// Classification reads scaled multiples of this value (half of it for
/// translation entries, three times it for the determinant check), so this
/// constant is the single knob.
pub const TOLERANCE: f32 = 1e-4;

/// Converts degrees to radians at `f32` precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees at `f32` precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}
