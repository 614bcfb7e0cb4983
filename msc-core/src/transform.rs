//! Barycentric to planar projection of descriptor pairs
//!
//! A descriptor pair `(a, b)` holds two of the three barycentric coordinates
//! of a point inside the dimensionality triangle; the third is implied,
//! `c = 1 - a - b`. Projecting onto an equilateral triangle with corners at
//! `(0, 0)`, `(1, 0)` and `(1/2, sqrt(3)/2)` gives plane coordinates
//! `x = b + c / 2` and `y = c * sqrt(3) / 2`.
//!
//! The projection is permissive: pairs with `a + b > 1` yield a negative `c`
//! and land outside the triangle instead of being rejected.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::format::constants::SQRT_3_OVER_2;
use crate::format::record::DescriptorPair;

/// How descriptor pairs are presented on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Transform {
    /// Values exactly as stored
    #[default]
    Raw,
    /// Projected to 2D triangle-plane coordinates
    Planar,
}

impl Transform {
    /// Apply this transform to one stored pair
    #[inline]
    pub fn apply(self, d1: f32, d2: f32) -> DescriptorPair {
        match self {
            Transform::Raw => (d1, d2),
            Transform::Planar => barycentric_to_planar(d1, d2),
        }
    }

    pub const fn is_planar(self) -> bool {
        matches!(self, Transform::Planar)
    }
}

impl From<bool> for Transform {
    fn from(planar: bool) -> Self {
        if planar {
            Transform::Planar
        } else {
            Transform::Raw
        }
    }
}

/// Project a barycentric pair onto the triangle plane
#[inline]
pub fn barycentric_to_planar(a: f32, b: f32) -> DescriptorPair {
    let c = 1.0 - a - b;
    (b + c / 2.0, c * SQRT_3_OVER_2)
}
