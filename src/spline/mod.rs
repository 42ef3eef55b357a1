//! Bézier spline description produced by the parsers.
//!
//! A [`Spline`] is an ordered list of [`SplinePoint`]s. Each point is an
//! anchor the curve passes through plus an incoming (left) and outgoing
//! (right) handle. The curve between two consecutive anchors `p` and `q` is
//! the cubic with control points `p`, `p.right`, `q.left`, `q`.

mod assembler;

pub use assembler::SplineAssembler;

use crate::primitives::{Affine2, Point2};
use num_traits::Float;

/// How a handle relates to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HandleKind {
    /// The handle coincides with the anchor (sharp corner, straight segment).
    #[default]
    Vector,
    /// The handle is an independently stored coordinate.
    Free,
}

/// One anchor of a spline with its two tangent handles.
///
/// A `Vector` handle is stored as `None` and materializes to the anchor;
/// a `Free` handle always carries a coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplinePoint<F> {
    pub anchor: Point2<F>,
    pub left_handle: Option<Point2<F>>,
    pub left_handle_kind: HandleKind,
    pub right_handle: Option<Point2<F>>,
    pub right_handle_kind: HandleKind,
}

impl<F: Float> SplinePoint<F> {
    /// Creates a corner point with `Vector` handles on both sides.
    #[inline]
    pub fn corner(anchor: Point2<F>) -> Self {
        Self {
            anchor,
            left_handle: None,
            left_handle_kind: HandleKind::Vector,
            right_handle: None,
            right_handle_kind: HandleKind::Vector,
        }
    }

    /// Creates a point with explicit `Free` handles on both sides.
    #[inline]
    pub fn smooth(anchor: Point2<F>, left: Point2<F>, right: Point2<F>) -> Self {
        Self::corner(anchor).with_left(left).with_right(right)
    }

    /// Returns this point with a `Free` left handle at `handle`.
    #[inline]
    pub fn with_left(mut self, handle: Point2<F>) -> Self {
        self.set_left_free(handle);
        self
    }

    /// Returns this point with a `Free` right handle at `handle`.
    #[inline]
    pub fn with_right(mut self, handle: Point2<F>) -> Self {
        self.set_right_free(handle);
        self
    }

    /// Sets the left handle to `Free` at `handle`.
    #[inline]
    pub fn set_left_free(&mut self, handle: Point2<F>) {
        self.left_handle = Some(handle);
        self.left_handle_kind = HandleKind::Free;
    }

    /// Sets the right handle to `Free` at `handle`.
    #[inline]
    pub fn set_right_free(&mut self, handle: Point2<F>) {
        self.right_handle = Some(handle);
        self.right_handle_kind = HandleKind::Free;
    }

    /// Returns the materialized left handle position.
    #[inline]
    pub fn left_position(&self) -> Point2<F> {
        match self.left_handle_kind {
            HandleKind::Free => self.left_handle.unwrap_or(self.anchor),
            HandleKind::Vector => self.anchor,
        }
    }

    /// Returns the materialized right handle position.
    #[inline]
    pub fn right_position(&self) -> Point2<F> {
        match self.right_handle_kind {
            HandleKind::Free => self.right_handle.unwrap_or(self.anchor),
            HandleKind::Vector => self.anchor,
        }
    }

    /// Applies `transform` to the anchor and any stored handles.
    pub fn transform(&mut self, transform: &Affine2<F>) {
        self.anchor = transform.apply_point(self.anchor);
        self.left_handle = self.left_handle.map(|h| transform.apply_point(h));
        self.right_handle = self.right_handle.map(|h| transform.apply_point(h));
    }
}

/// An ordered sequence of spline points, open or closed.
///
/// A spline always holds at least one point.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline<F> {
    pub points: Vec<SplinePoint<F>>,
    pub closed: bool,
}

impl<F: Float> Spline<F> {
    /// Creates an open spline starting at `first`.
    pub fn new(first: SplinePoint<F>) -> Self {
        Self {
            points: vec![first],
            closed: false,
        }
    }

    /// Creates a spline from points. Returns `None` if `points` is empty.
    pub fn from_points(points: Vec<SplinePoint<F>>, closed: bool) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut spline = Self {
            points,
            closed: false,
        };
        if closed {
            spline.close();
        }
        Some(spline)
    }

    /// Returns the number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the spline has no points, which never holds for
    /// splines built by this crate.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first point.
    #[inline]
    pub fn first(&self) -> &SplinePoint<F> {
        &self.points[0]
    }

    /// Returns the last point.
    #[inline]
    pub fn last(&self) -> &SplinePoint<F> {
        &self.points[self.points.len() - 1]
    }

    /// Returns the anchor positions in order.
    pub fn anchors(&self) -> Vec<Point2<F>> {
        self.points.iter().map(|p| p.anchor).collect()
    }

    /// Marks the spline closed and reconciles the handle kinds at the seam.
    ///
    /// If the first point's incoming handle is `Free` while the last point's
    /// outgoing handle is `Vector`, the latter becomes `Free` at its own
    /// anchor, and vice versa, so the seam keeps one consistent character.
    /// Closing an already closed spline changes nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        let n = self.points.len();
        let first_left = self.points[0].left_handle_kind;
        let last_right = self.points[n - 1].right_handle_kind;

        match (first_left, last_right) {
            (HandleKind::Free, HandleKind::Vector) => {
                let last = &mut self.points[n - 1];
                let anchor = last.anchor;
                last.set_right_free(anchor);
            }
            (HandleKind::Vector, HandleKind::Free) => {
                let first = &mut self.points[0];
                let anchor = first.anchor;
                first.set_left_free(anchor);
            }
            _ => {}
        }
    }

    /// Applies `transform` to every point.
    pub fn transform(&mut self, transform: &Affine2<F>) {
        for point in &mut self.points {
            point.transform(transform);
        }
    }

    /// Returns the cubic segments `(start, control1, control2, end)`,
    /// including the closing segment for closed splines.
    pub fn segments(&self) -> Vec<[Point2<F>; 4]> {
        let n = self.points.len();
        let count = if self.closed { n } else { n.saturating_sub(1) };
        (0..count)
            .map(|i| {
                let a = &self.points[i];
                let b = &self.points[(i + 1) % n];
                [a.anchor, a.right_position(), b.left_position(), b.anchor]
            })
            .collect()
    }
}
