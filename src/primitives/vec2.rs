//! 2D vector type for directions and offsets.

use num_traits::Float;
use std::ops::Mul;

/// A 2D vector representing a direction or offset.
///
/// Used for relative path coordinates and handle offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Computes the dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product (perpendicular dot product).
    ///
    /// Positive means `other` is counter-clockwise from `self`.
    #[inline]
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    /// Returns the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(self) -> F {
        self.dot(self).sqrt()
    }

    /// Returns the signed angle in radians from `self` to `other`, in `[-π, π]`.
    ///
    /// Returns zero if either vector has zero length.
    pub fn angle_to(self, other: Self) -> F {
        let denom = self.magnitude() * other.magnitude();
        if denom <= F::zero() {
            return F::zero();
        }
        // Clamp guards against acos domain errors from rounding.
        let cos = (self.dot(other) / denom).max(-F::one()).min(F::one());
        let angle = cos.acos();
        if self.cross(other) < F::zero() {
            -angle
        } else {
            angle
        }
    }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: F) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl<F: Float> Default for Vec2<F> {
    fn default() -> Self {
        Self::zero()
    }
}
