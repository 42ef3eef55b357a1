//! Basic SVG shapes and their spline outlines.
//!
//! Each element that draws geometry maps to one [`Geometry`] variant. Curved
//! outlines use the usual quarter-circle handle length
//! [`KAPPA`] `* radius`.

use crate::error::PathError;
use crate::options::PathOptions;
use crate::path::{parse_path, read_float};
use crate::primitives::Point2;
use crate::spline::{Spline, SplineAssembler, SplinePoint};
use crate::units::parse_coord;
use num_traits::Float;
use std::str::FromStr;

/// Handle length of a cubic quarter circle, relative to the radius.
pub const KAPPA: f64 = 0.5522847498;

/// Geometry of one drawable element, in the element's own coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<F> {
    /// `<path d="...">`
    Path { data: String },
    /// `<rect>`; a missing corner radius takes the value of the other one.
    Rect {
        x: F,
        y: F,
        width: F,
        height: F,
        rx: Option<F>,
        ry: Option<F>,
    },
    /// `<circle>`
    Circle { cx: F, cy: F, r: F },
    /// `<ellipse>`
    Ellipse { cx: F, cy: F, rx: F, ry: F },
    /// `<line>`
    Line { x1: F, y1: F, x2: F, y2: F },
    /// `<polyline>`
    Polyline { points: Vec<Point2<F>> },
    /// `<polygon>`
    Polygon { points: Vec<Point2<F>> },
}

impl<F: Float + FromStr> Geometry<F> {
    /// Builds the geometry for element `tag` from its attributes.
    ///
    /// `attr` looks up a raw attribute value by name. Lengths are resolved
    /// with [`parse_coord`] against `viewport`: horizontal ones against the
    /// width, vertical ones against the height, and `r` against
    /// `sqrt((w² + h²) / 2)`.
    ///
    /// Returns `Ok(None)` for tags that draw nothing.
    ///
    /// # Errors
    ///
    /// [`PathError::MalformedNumber`] for an unreadable `points` list.
    pub fn from_attributes<'a, A>(
        tag: &str,
        attr: A,
        viewport: (F, F),
    ) -> Result<Option<Self>, PathError>
    where
        A: Fn(&str) -> Option<&'a str>,
    {
        let (width, height) = viewport;
        let diagonal = ((width * width + height * height) / F::from(2.0).unwrap()).sqrt();
        let length = |name: &str, reference: F| {
            attr(name).map_or(F::zero(), |value| parse_coord(value, reference))
        };
        let optional =
            |name: &str, reference: F| attr(name).map(|value| parse_coord(value, reference));

        let geometry = match tag {
            "path" => Geometry::Path {
                data: attr("d").unwrap_or("").to_string(),
            },
            "rect" => Geometry::Rect {
                x: length("x", width),
                y: length("y", height),
                width: length("width", width),
                height: length("height", height),
                rx: optional("rx", width),
                ry: optional("ry", height),
            },
            "circle" => Geometry::Circle {
                cx: length("cx", width),
                cy: length("cy", height),
                r: length("r", diagonal),
            },
            "ellipse" => Geometry::Ellipse {
                cx: length("cx", width),
                cy: length("cy", height),
                rx: length("rx", width),
                ry: length("ry", height),
            },
            "line" => Geometry::Line {
                x1: length("x1", width),
                y1: length("y1", height),
                x2: length("x2", width),
                y2: length("y2", height),
            },
            "polyline" => Geometry::Polyline {
                points: parse_points(attr("points").unwrap_or(""))?,
            },
            "polygon" => Geometry::Polygon {
                points: parse_points(attr("points").unwrap_or(""))?,
            },
            _ => return Ok(None),
        };
        Ok(Some(geometry))
    }

    /// Converts the geometry to splines.
    ///
    /// Degenerate shapes (zero size or radius, no points) produce no
    /// splines. With `options.use_fill` every open spline is closed.
    ///
    /// # Errors
    ///
    /// Only `Path` geometry can fail, with the error of [`parse_path`].
    pub fn to_splines(&self, options: &PathOptions<F>) -> Result<Vec<Spline<F>>, PathError> {
        let splines = match self {
            Geometry::Path { data } => return parse_path(data, options),
            Geometry::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => rect(*x, *y, *width, *height, *rx, *ry),
            Geometry::Circle { cx, cy, r } => ellipse(Point2::new(*cx, *cy), *r, *r),
            Geometry::Ellipse { cx, cy, rx, ry } => ellipse(Point2::new(*cx, *cy), *rx, *ry),
            Geometry::Line { x1, y1, x2, y2 } => {
                let points = vec![
                    SplinePoint::corner(Point2::new(*x1, *y1)),
                    SplinePoint::corner(Point2::new(*x2, *y2)),
                ];
                Spline::from_points(points, false)
            }
            Geometry::Polyline { points } => polyline(points, false),
            Geometry::Polygon { points } => polyline(points, true),
        };

        let assembler = SplineAssembler::from_splines(
            splines.into_iter().collect(),
            options.coincidence_tolerance,
        );
        Ok(assembler.finish(options.use_fill))
    }
}

/// Parses a `points` list into coordinate pairs. A dangling odd coordinate
/// is dropped.
fn parse_points<F: Float + FromStr>(text: &str) -> Result<Vec<Point2<F>>, PathError> {
    let mut values: Vec<F> = Vec::new();
    let mut pos = 0;
    while text[pos..].bytes().any(|c| c != b',' && !c.is_ascii_whitespace()) {
        let (token, end) = read_float(text, pos)?;
        let at = end - token.len();
        values.push(token.parse().map_err(|_| PathError::MalformedNumber { at })?);
        pos = end;
    }
    if values.len() % 2 == 1 {
        log::debug!("odd coordinate count in points list, ignoring the last value");
    }
    Ok(values
        .chunks_exact(2)
        .map(|pair| Point2::new(pair[0], pair[1]))
        .collect())
}

fn polyline<F: Float>(points: &[Point2<F>], closed: bool) -> Option<Spline<F>> {
    let points = points.iter().map(|&p| SplinePoint::corner(p)).collect();
    Spline::from_points(points, closed)
}

fn ellipse<F: Float>(center: Point2<F>, rx: F, ry: F) -> Option<Spline<F>> {
    if rx <= F::zero() || ry <= F::zero() {
        return None;
    }
    let kappa = F::from(KAPPA).unwrap();
    let (kx, ky) = (rx * kappa, ry * kappa);
    let (cx, cy) = (center.x, center.y);

    let points = vec![
        SplinePoint::smooth(
            Point2::new(cx + rx, cy),
            Point2::new(cx + rx, cy - ky),
            Point2::new(cx + rx, cy + ky),
        ),
        SplinePoint::smooth(
            Point2::new(cx, cy + ry),
            Point2::new(cx + kx, cy + ry),
            Point2::new(cx - kx, cy + ry),
        ),
        SplinePoint::smooth(
            Point2::new(cx - rx, cy),
            Point2::new(cx - rx, cy + ky),
            Point2::new(cx - rx, cy - ky),
        ),
        SplinePoint::smooth(
            Point2::new(cx, cy - ry),
            Point2::new(cx - kx, cy - ry),
            Point2::new(cx + kx, cy - ry),
        ),
    ];
    Spline::from_points(points, true)
}

fn rect<F: Float>(
    x: F,
    y: F,
    width: F,
    height: F,
    rx: Option<F>,
    ry: Option<F>,
) -> Option<Spline<F>> {
    let zero = F::zero();
    if width <= zero || height <= zero {
        return None;
    }

    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (zero, zero),
    };
    let half = F::from(0.5).unwrap();
    let rx = rx.max(zero).min(width * half);
    let ry = ry.max(zero).min(height * half);
    let (right, bottom) = (x + width, y + height);

    if rx == zero || ry == zero {
        let points = [
            Point2::new(x, y),
            Point2::new(right, y),
            Point2::new(right, bottom),
            Point2::new(x, bottom),
        ]
        .into_iter()
        .map(SplinePoint::corner)
        .collect();
        return Spline::from_points(points, true);
    }

    let kappa = F::from(KAPPA).unwrap();
    let (kx, ky) = (rx * kappa, ry * kappa);
    let corner = SplinePoint::corner;

    // Clockwise in y-down coordinates, starting at the top edge. Each
    // rounded corner is bounded by a pair of anchors whose facing handles
    // are free and whose straight-side handles stay vectors.
    let points = vec![
        corner(Point2::new(x + rx, y)).with_left(Point2::new(x + rx - kx, y)),
        corner(Point2::new(right - rx, y)).with_right(Point2::new(right - rx + kx, y)),
        corner(Point2::new(right, y + ry)).with_left(Point2::new(right, y + ry - ky)),
        corner(Point2::new(right, bottom - ry)).with_right(Point2::new(right, bottom - ry + ky)),
        corner(Point2::new(right - rx, bottom)).with_left(Point2::new(right - rx + kx, bottom)),
        corner(Point2::new(x + rx, bottom)).with_right(Point2::new(x + rx - kx, bottom)),
        corner(Point2::new(x, bottom - ry)).with_left(Point2::new(x, bottom - ry + ky)),
        corner(Point2::new(x, y + ry)).with_right(Point2::new(x, y + ry - ky)),
    ];
    Spline::from_points(points, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::HandleKind;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn geometry(tag: &str, attrs: &[(&str, &str)]) -> Option<Geometry<f64>> {
        let map: HashMap<&str, &str> = attrs.iter().copied().collect();
        Geometry::from_attributes(tag, |name| map.get(name).copied(), (200.0, 100.0)).unwrap()
    }

    fn splines(tag: &str, attrs: &[(&str, &str)]) -> Vec<Spline<f64>> {
        geometry(tag, attrs)
            .unwrap()
            .to_splines(&PathOptions::new())
            .unwrap()
    }

    #[test]
    fn test_unsupported_tag() {
        assert!(geometry("text", &[("x", "1")]).is_none());
        assert!(geometry("g", &[]).is_none());
    }

    #[test]
    fn test_plain_rect() {
        let out = splines("rect", &[("x", "1"), ("y", "2"), ("width", "10"), ("height", "5")]);
        assert_eq!(out.len(), 1);
        assert!(out[0].closed);
        assert_eq!(
            out[0].anchors(),
            vec![
                Point2::new(1.0, 2.0),
                Point2::new(11.0, 2.0),
                Point2::new(11.0, 7.0),
                Point2::new(1.0, 7.0),
            ]
        );
        assert!(out[0]
            .points
            .iter()
            .all(|p| p.left_handle_kind == HandleKind::Vector));
    }

    #[test]
    fn test_rect_percent_units() {
        let g = geometry("rect", &[("width", "50%"), ("height", "50%")]).unwrap();
        match g {
            Geometry::Rect { width, height, .. } => {
                assert_eq!(width, 100.0);
                assert_eq!(height, 50.0);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_rounded_rect() {
        let out = splines("rect", &[("width", "20"), ("height", "10"), ("rx", "2")]);
        let spline = &out[0];
        assert_eq!(spline.len(), 8);
        assert!(spline.closed);
        // ry defaults to rx
        assert_eq!(spline.points[2].anchor, Point2::new(20.0, 2.0));
        let handle = spline.points[1].right_handle.unwrap();
        assert_relative_eq!(handle.x, 18.0 + 2.0 * KAPPA, epsilon = 1e-12);
        assert_eq!(spline.points[1].left_handle_kind, HandleKind::Vector);
    }

    #[test]
    fn test_rounded_rect_radius_is_clamped() {
        let out = splines("rect", &[("width", "20"), ("height", "10"), ("rx", "50"), ("ry", "50")]);
        let anchors = out[0].anchors();
        assert_eq!(anchors[0], Point2::new(10.0, 0.0));
        assert_eq!(anchors[2], Point2::new(20.0, 5.0));
    }

    #[test]
    fn test_degenerate_rect() {
        assert!(splines("rect", &[("width", "0"), ("height", "10")]).is_empty());
        assert!(splines("rect", &[("width", "-5"), ("height", "10")]).is_empty());
    }

    #[test]
    fn test_circle() {
        let out = splines("circle", &[("cx", "5"), ("cy", "5"), ("r", "2")]);
        let spline = &out[0];
        assert_eq!(spline.len(), 4);
        assert!(spline.closed);
        assert_eq!(spline.points[0].anchor, Point2::new(7.0, 5.0));
        assert_eq!(spline.points[1].anchor, Point2::new(5.0, 7.0));
        for point in &spline.points {
            assert_eq!(point.left_handle_kind, HandleKind::Free);
            assert_eq!(point.right_handle_kind, HandleKind::Free);
        }
        // Curve midpoint of the first quarter lies on the circle.
        let [p0, c1, c2, p1] = spline.segments()[0];
        let mid_x = (p0.x + 3.0 * c1.x + 3.0 * c2.x + p1.x) / 8.0;
        let mid_y = (p0.y + 3.0 * c1.y + 3.0 * c2.y + p1.y) / 8.0;
        let radius = Point2::new(mid_x, mid_y).distance(Point2::new(5.0, 5.0));
        assert_relative_eq!(radius, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_circle_percent_radius() {
        let g = geometry("circle", &[("r", "10%")]).unwrap();
        let expected = ((200.0f64 * 200.0 + 100.0 * 100.0) / 2.0).sqrt() / 10.0;
        match g {
            Geometry::Circle { r, .. } => assert_relative_eq!(r, expected, epsilon = 1e-12),
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_zero_radius() {
        assert!(splines("circle", &[("r", "0")]).is_empty());
        assert!(splines("ellipse", &[("rx", "3")]).is_empty());
    }

    #[test]
    fn test_ellipse() {
        let out = splines("ellipse", &[("rx", "4"), ("ry", "2")]);
        assert_eq!(
            out[0].anchors(),
            vec![
                Point2::new(4.0, 0.0),
                Point2::new(0.0, 2.0),
                Point2::new(-4.0, 0.0),
                Point2::new(0.0, -2.0),
            ]
        );
    }

    #[test]
    fn test_line() {
        let out = splines("line", &[("x1", "0"), ("y1", "0"), ("x2", "3"), ("y2", "4")]);
        assert_eq!(out[0].len(), 2);
        assert!(!out[0].closed);

        let g = geometry("line", &[("x2", "3")]).unwrap();
        let filled = g.to_splines(&PathOptions::new().with_fill(true)).unwrap();
        assert!(filled[0].closed);
    }

    #[test]
    fn test_polyline_and_polygon() {
        let open = splines("polyline", &[("points", "0,0 10,0 10,10 7")]);
        assert_eq!(open[0].len(), 3);
        assert!(!open[0].closed);

        let closed = splines("polygon", &[("points", "0,0 10,0 10,10")]);
        assert_eq!(closed[0].len(), 3);
        assert!(closed[0].closed);

        assert!(splines("polygon", &[]).is_empty());
    }

    #[test]
    fn test_bad_points() {
        let map: HashMap<&str, &str> = [("points", "0,0 1,x")].into_iter().collect();
        let result = Geometry::<f64>::from_attributes("polygon", |n| map.get(n).copied(), (1.0, 1.0));
        assert_eq!(result, Err(PathError::MalformedNumber { at: 6 }));
    }

    #[test]
    fn test_path_geometry() {
        let out = splines("path", &[("d", "M 0 0 L 5 5")]);
        assert_eq!(out[0].len(), 2);
        assert!(splines("path", &[]).is_empty());

        let g = geometry("path", &[("d", "M 0 0 K")]).unwrap();
        assert!(g.to_splines(&PathOptions::new()).is_err());
    }
}
