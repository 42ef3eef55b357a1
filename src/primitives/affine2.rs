//! 2D affine transformation type.

use super::Point2;
use num_traits::Float;

/// A 2D affine transformation matrix.
///
/// Represented as a 2x3 matrix in row-major order:
/// ```text
/// | a  b  tx |
/// | c  d  ty |
/// ```
///
/// A point maps to `(a*x + b*y + tx, c*x + d*y + ty)`.
///
/// Note that SVG writes `matrix(a b c d e f)` column-major; use
/// [`Affine2::from_svg_matrix`] for those six values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2<F> {
    /// Matrix element [0,0]
    pub a: F,
    /// Matrix element [0,1]
    pub b: F,
    /// Matrix element [1,0]
    pub c: F,
    /// Matrix element [1,1]
    pub d: F,
    /// Translation x component
    pub tx: F,
    /// Translation y component
    pub ty: F,
}

impl<F: Float> Affine2<F> {
    /// Creates a new affine transform from matrix components.
    #[inline]
    pub fn new(a: F, b: F, c: F, d: F, tx: F, ty: F) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Creates a transform from the six values of an SVG `matrix(a b c d e f)`.
    ///
    /// SVG maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
    #[inline]
    pub fn from_svg_matrix(a: F, b: F, c: F, d: F, e: F, f: F) -> Self {
        Self::new(a, c, b, d, e, f)
    }

    /// Creates the identity transform (no change).
    #[inline]
    pub fn identity() -> Self {
        Self::new(F::one(), F::zero(), F::zero(), F::one(), F::zero(), F::zero())
    }

    /// Creates a translation transform from x and y components.
    #[inline]
    pub fn translate(tx: F, ty: F) -> Self {
        Self::new(F::one(), F::zero(), F::zero(), F::one(), tx, ty)
    }

    /// Creates a rotation transform around the origin.
    ///
    /// Angle is in radians, positive turns the x-axis towards the y-axis.
    #[inline]
    pub fn rotation(angle: F) -> Self {
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        Self::new(cos_a, -sin_a, sin_a, cos_a, F::zero(), F::zero())
    }

    /// Creates a rotation transform around a specific point.
    pub fn rotation_around(angle: F, center: Point2<F>) -> Self {
        Self::translate(-center.x, -center.y)
            .then(Self::rotation(angle))
            .then(Self::translate(center.x, center.y))
    }

    /// Creates a non-uniform scaling transform around the origin.
    #[inline]
    pub fn scale_xy(sx: F, sy: F) -> Self {
        Self::new(sx, F::zero(), F::zero(), sy, F::zero(), F::zero())
    }

    /// Creates a horizontal skew by `angle` radians (SVG `skewX`).
    #[inline]
    pub fn skew_x(angle: F) -> Self {
        Self::new(F::one(), angle.tan(), F::zero(), F::one(), F::zero(), F::zero())
    }

    /// Creates a vertical skew by `angle` radians (SVG `skewY`).
    #[inline]
    pub fn skew_y(angle: F) -> Self {
        Self::new(F::one(), F::zero(), angle.tan(), F::one(), F::zero(), F::zero())
    }

    /// Applies this transform to a point.
    #[inline]
    pub fn apply_point(&self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    /// Composes this transform with another (self * other).
    ///
    /// The resulting transform applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    /// Returns a transform that applies `self` first, then `other`.
    #[inline]
    pub fn then(&self, other: Self) -> Self {
        other.compose(self)
    }

    /// Returns true if this is the identity within `epsilon`.
    pub fn is_identity(&self, epsilon: F) -> bool {
        (self.a - F::one()).abs() <= epsilon
            && self.b.abs() <= epsilon
            && self.c.abs() <= epsilon
            && (self.d - F::one()).abs() <= epsilon
            && self.tx.abs() <= epsilon
            && self.ty.abs() <= epsilon
    }
}

impl<F: Float> Default for Affine2<F> {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_identity() {
        let t: Affine2<f64> = Affine2::default();
        assert!(t.is_identity(0.0));
        assert_eq!(t.apply_point(Point2::new(3.0, 4.0)), Point2::new(3.0, 4.0));
    }

    #[test]
    fn test_svg_matrix_layout() {
        // matrix(1 2 3 4 5 6): x' = 1x + 3y + 5, y' = 2x + 4y + 6
        let t: Affine2<f64> = Affine2::from_svg_matrix(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let p = t.apply_point(Point2::new(1.0, 1.0));
        assert_eq!(p, Point2::new(9.0, 12.0));
    }

    #[test]
    fn test_rotation_around() {
        let t: Affine2<f64> = Affine2::rotation_around(FRAC_PI_2, Point2::new(1.0, 1.0));
        let result = t.apply_point(Point2::new(2.0, 1.0));

        // Rotating (2,1) 90° around (1,1) should give (1,2)
        assert_relative_eq!(result.x, 1.0, epsilon = 1e-10);
        assert_relative_eq!(result.y, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_skew() {
        let t: Affine2<f64> = Affine2::skew_x(FRAC_PI_4);
        let p = t.apply_point(Point2::new(0.0, 2.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-10);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-10);

        let t: Affine2<f64> = Affine2::skew_y(FRAC_PI_4);
        let p = t.apply_point(Point2::new(2.0, 0.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-10);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_then_order() {
        let t: Affine2<f64> = Affine2::scale_xy(2.0, 2.0).then(Affine2::translate(10.0, 0.0));
        assert_eq!(t.apply_point(Point2::new(1.0, 0.0)), Point2::new(12.0, 0.0));

        let m = Affine2::translate(10.0, 0.0).compose(&Affine2::scale_xy(2.0, 2.0));
        assert_eq!(m.apply_point(Point2::new(1.0, 0.0)), Point2::new(12.0, 0.0));
    }
}
