// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Component bitmask driving the transform fast paths.

use core::ops::{BitOr, BitOrAssign};

/// Bitmask of the affine components a [`Transform`](crate::Transform)
/// currently carries.
///
/// The mask is a conservative upper bound. It must never claim a component
/// is absent when the matrix holds one; it may claim a component whose
/// entries happen to be identity. Every fast path in the transform algebra
/// leans on that direction: a clear bit is a proof, a set bit is a hint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TransformParts(u8);

impl TransformParts {
    /// Empty mask: the transform is the identity in every component.
    pub const NONE: Self = Self(0);

    /// The translation column may be non-zero.
    pub const TRANSLATION: Self = Self(1);

    /// The linear block may be a non-unit diagonal scale.
    pub const SCALE: Self = Self(1 << 1);

    /// The linear block may hold arbitrary rotation content.
    pub const ROTATION: Self = Self(1 << 2);

    /// Every component flagged; the matrix gets no fast paths.
    pub const ALL: Self = Self(0b111);

    /// True when no component is flagged.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two masks.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Classifies the linear block for dispatch.
    ///
    /// Rotation dominates: a flagged rotation means the block may hold
    /// arbitrary entries. Otherwise a flagged scale means the block is
    /// exactly diagonal. Otherwise the block is exactly the identity.
    pub const fn linear_kind(self) -> LinearKind {
        if self.contains(Self::ROTATION) {
            LinearKind::Rotation
        } else if self.contains(Self::SCALE) {
            LinearKind::Scale
        } else {
            LinearKind::Identity
        }
    }
}

impl BitOr for TransformParts {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for TransformParts {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Three-way classification of a transform's linear block, derived from
/// [`TransformParts::linear_kind`].
///
/// `Identity` and `Scale` are proofs about the block's shape (exactly
/// identity, exactly diagonal); `Rotation` is the general case and promises
/// nothing beyond the block being a composition of the kernel's own
/// operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LinearKind {
    /// Linear block is exactly the identity.
    Identity,
    /// Linear block is exactly diagonal.
    Scale,
    /// Linear block may hold arbitrary rotation/scale content.
    Rotation,
}
