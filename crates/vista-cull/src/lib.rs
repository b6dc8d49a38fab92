// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Vista visibility: view-frustum extraction and conservative culling.
//!
//! This crate provides:
//! - Normalized planes in Hessian form ([`Plane`]).
//! - Camera frustums extracted from a projection·view product, with
//!   point, sphere, box, and quad visibility predicates ([`Frustum`],
//!   [`Side`]).
//! - Axis-aligned bounding boxes ([`Aabb`]).
//!
//! Design notes:
//! - Consumes the flag-tracked transforms of `vista-math`; data flows one
//!   way, from transforms into extracted planes into queries.
//! - Every predicate is conservative toward visibility: a borderline
//!   volume is kept, never dropped. The one exception is the unpopulated
//!   frustum, which reports nothing visible rather than guessing.
//! - Float32 throughout, matching the rest of the kernel.

mod aabb;
mod frustum;
mod plane;

pub use aabb::Aabb;
pub use frustum::{Frustum, Side};
pub use plane::Plane;
