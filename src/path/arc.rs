//! Elliptical arc to cubic Bézier conversion.
//!
//! An SVG arc is given in endpoint form. It is converted to center form
//! (center, radii, rotation, start angle, extent) and then approximated by
//! cubic segments spanning at most a quarter turn each.

use crate::primitives::{Point2, Vec2};
use crate::spline::SplinePoint;
use num_traits::Float;

/// Slack added to a quarter turn so that an exact quarter or half circle is
/// not split into an extra sliver segment by rounding.
const QUARTER_TURN_SLACK: f64 = 1e-3;

/// An SVG elliptical arc in endpoint parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc<F> {
    pub from: Point2<F>,
    pub to: Point2<F>,
    pub rx: F,
    pub ry: F,
    /// Rotation of the ellipse x-axis, in degrees.
    pub x_axis_rotation: F,
    pub large_arc: bool,
    pub sweep: bool,
}

/// An elliptical arc in center parameterization. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc<F> {
    pub center: Point2<F>,
    /// Radii after scaling up to fit the chord.
    pub rx: F,
    pub ry: F,
    /// Rotation of the ellipse x-axis, in radians.
    pub phi: F,
    pub start_angle: F,
    /// Signed angular extent in `(-2π, 2π)`; positive follows the sweep flag.
    pub sweep_angle: F,
}

/// Spline points approximating one arc.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcApproximation<F> {
    /// Outgoing handle for the point the arc starts from.
    ///
    /// `None` when the arc degenerated to a straight line or a point.
    pub start_handle: Option<Point2<F>>,
    /// New anchors in order; the last one is exactly the arc's endpoint.
    pub points: Vec<SplinePoint<F>>,
}

impl<F: Float> EllipticalArc<F> {
    /// Converts to center form.
    ///
    /// Returns `None` when either radius is zero or the endpoints coincide;
    /// such arcs have no ellipse to speak of.
    pub fn to_center(&self) -> Option<CenterArc<F>> {
        let zero = F::zero();
        let one = F::one();
        let two = one + one;

        if self.rx == zero || self.ry == zero || self.from.distance(self.to) < F::epsilon() {
            return None;
        }

        let phi = self.x_axis_rotation.to_radians();
        let cos_phi = phi.cos();
        let sin_phi = phi.sin();

        // Half chord in the ellipse's rotated frame.
        let dx = (self.from.x - self.to.x) / two;
        let dy = (self.from.y - self.to.y) / two;
        let x1 = cos_phi * dx + sin_phi * dy;
        let y1 = -sin_phi * dx + cos_phi * dy;

        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();

        // Radii too small for the chord are scaled up uniformly until they fit.
        let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
        if lambda > one {
            let scale = lambda.sqrt();
            rx = rx * scale;
            ry = ry * scale;
        }

        let rx_sq = rx * rx;
        let ry_sq = ry * ry;
        let x1_sq = x1 * x1;
        let y1_sq = y1 * y1;

        let denom = rx_sq * y1_sq + ry_sq * x1_sq;
        let numer = rx_sq * ry_sq - rx_sq * y1_sq - ry_sq * x1_sq;
        let sq = if denom > zero { (numer / denom).max(zero) } else { zero };

        let coef = if self.large_arc == self.sweep {
            -sq.sqrt()
        } else {
            sq.sqrt()
        };

        let cx1 = coef * rx * y1 / ry;
        let cy1 = -coef * ry * x1 / rx;

        let mid = self.from.midpoint(self.to);
        let center = Point2::new(
            cos_phi * cx1 - sin_phi * cy1 + mid.x,
            sin_phi * cx1 + cos_phi * cy1 + mid.y,
        );

        let u = Vec2::new((x1 - cx1) / rx, (y1 - cy1) / ry);
        let v = Vec2::new((-x1 - cx1) / rx, (-y1 - cy1) / ry);

        let start_angle = u.y.atan2(u.x);
        let mut sweep_angle = u.angle_to(v);

        let tau = F::from(std::f64::consts::TAU).unwrap();
        if self.sweep && sweep_angle < zero {
            sweep_angle = sweep_angle + tau;
        } else if !self.sweep && sweep_angle > zero {
            sweep_angle = sweep_angle - tau;
        }

        Some(CenterArc {
            center,
            rx,
            ry,
            phi,
            start_angle,
            sweep_angle,
        })
    }

    /// Approximates the arc with cubic Bézier spline points.
    pub fn to_spline_points(&self) -> ArcApproximation<F> {
        match self.to_center() {
            Some(arc) => arc.to_spline_points(self.to),
            None => ArcApproximation {
                start_handle: None,
                points: vec![SplinePoint::corner(self.to)],
            },
        }
    }
}

impl<F: Float> CenterArc<F> {
    /// Returns the number of cubic segments needed, each at most about a
    /// quarter turn.
    pub fn segment_count(&self) -> usize {
        let limit = F::from(std::f64::consts::FRAC_PI_2 + QUARTER_TURN_SLACK).unwrap();
        (self.sweep_angle.abs() / limit)
            .ceil()
            .to_usize()
            .unwrap_or(0)
    }

    /// Maps a point on the unit circle onto the ellipse.
    #[inline]
    fn map_unit(&self, x: F, y: F) -> Point2<F> {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let ex = self.rx * x;
        let ey = self.ry * y;
        Point2::new(
            cos_phi * ex - sin_phi * ey + self.center.x,
            sin_phi * ex + cos_phi * ey + self.center.y,
        )
    }

    /// Returns the point at angle `theta` on the ellipse.
    pub fn point_at(&self, theta: F) -> Point2<F> {
        let (sin_t, cos_t) = theta.sin_cos();
        self.map_unit(cos_t, sin_t)
    }

    /// Approximates the arc with cubic segments ending exactly at `end`.
    ///
    /// Each segment uses the handle length `4/3 · tan(Δ/4)` on the unit
    /// circle before mapping onto the ellipse.
    pub fn to_spline_points(&self, end: Point2<F>) -> ArcApproximation<F> {
        let count = self.segment_count();
        if count == 0 {
            return ArcApproximation {
                start_handle: None,
                points: vec![SplinePoint::corner(end)],
            };
        }

        let four = F::from(4.0).unwrap();
        let three = F::from(3.0).unwrap();

        let step = self.sweep_angle / F::from(count).unwrap();
        let kappa = four / three * (step / four).tan();

        let mut start_handle = None;
        let mut points: Vec<SplinePoint<F>> = Vec::with_capacity(count);

        for i in 0..count {
            let a1 = self.start_angle + step * F::from(i).unwrap();
            let a2 = a1 + step;
            let (sin1, cos1) = a1.sin_cos();
            let (sin2, cos2) = a2.sin_cos();

            let control1 = self.map_unit(cos1 - kappa * sin1, sin1 + kappa * cos1);
            let control2 = self.map_unit(cos2 + kappa * sin2, sin2 - kappa * cos2);
            let anchor = if i + 1 == count {
                end
            } else {
                self.point_at(a2)
            };

            match points.last_mut() {
                Some(previous) => previous.set_right_free(control1),
                None => start_handle = Some(control1),
            }
            points.push(SplinePoint::corner(anchor).with_left(control2));
        }

        if let Some(last) = points.last_mut() {
            let anchor = last.anchor;
            last.set_right_free(anchor);
        }

        ArcApproximation {
            start_handle,
            points,
        }
    }
}

/// Converts one SVG arc segment from `from` to `to` into spline points.
///
/// `x_axis_rotation` is in degrees. A zero radius yields a single straight
/// corner at `to`; radii too small for the chord are scaled up to fit.
///
/// # Example
///
/// ```
/// use svgspline::path::convert_arc;
/// use svgspline::Point2;
///
/// let (from, to) = (Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
/// let arc = convert_arc(5.0, 5.0, 0.0, false, true, from, to);
/// assert_eq!(arc.points.len(), 2);
/// assert_eq!(arc.points.last().unwrap().anchor, Point2::new(10.0, 0.0));
/// ```
pub fn convert_arc<F: Float>(
    rx: F,
    ry: F,
    x_axis_rotation: F,
    large_arc: bool,
    sweep: bool,
    from: Point2<F>,
    to: Point2<F>,
) -> ArcApproximation<F> {
    EllipticalArc {
        from,
        to,
        rx,
        ry,
        x_axis_rotation,
        large_arc,
        sweep,
    }
    .to_spline_points()
}
