//! Incremental spline construction with closure policy.

use super::{HandleKind, Spline, SplinePoint};
use crate::primitives::Point2;
use num_traits::Float;

/// Collects splines while a path is interpreted.
///
/// At most one spline is active (being appended to). Starting a new spline or
/// closing the active one moves it into the finished list, so a spline is
/// never stored empty.
#[derive(Debug, Clone)]
pub struct SplineAssembler<F> {
    splines: Vec<Spline<F>>,
    active: Option<Spline<F>>,
    tolerance: F,
}

impl<F: Float> SplineAssembler<F> {
    /// Creates an empty assembler. `tolerance` is the per-axis distance under
    /// which an anchor coincides with the active spline's first anchor.
    pub fn new(tolerance: F) -> Self {
        Self {
            splines: Vec::new(),
            active: None,
            tolerance,
        }
    }

    /// Creates an assembler holding already finished splines.
    pub fn from_splines(splines: Vec<Spline<F>>, tolerance: F) -> Self {
        Self {
            splines,
            active: None,
            tolerance,
        }
    }

    /// Finalizes the active spline (left as is) and starts a new one.
    pub fn start_new(&mut self, first: SplinePoint<F>) {
        self.finalize_active();
        self.active = Some(Spline::new(first));
    }

    /// Appends a point to the active spline, starting one if none is active.
    pub fn append(&mut self, point: SplinePoint<F>) {
        match &mut self.active {
            Some(spline) => spline.points.push(point),
            None => self.active = Some(Spline::new(point)),
        }
    }

    /// Appends an anchor, folding it into the first point when it returns to
    /// the active spline's start.
    ///
    /// When `point` coincides with the first anchor no point is added: a
    /// `Free` incoming handle is moved onto the first point's left handle
    /// instead, and the spline is closed if `close_on_fold` is set. Returns
    /// `true` if the point was folded.
    pub fn append_or_fold(&mut self, point: SplinePoint<F>, close_on_fold: bool) -> bool {
        let tolerance = self.tolerance;
        let Some(spline) = self
            .active
            .as_mut()
            .filter(|s| point.anchor.coincides(s.points[0].anchor, tolerance))
        else {
            self.append(point);
            return false;
        };

        if point.left_handle_kind == HandleKind::Free {
            let first = &mut spline.points[0];
            first.left_handle = point.left_handle;
            first.left_handle_kind = HandleKind::Free;
        }
        if close_on_fold {
            self.close();
        }
        true
    }

    /// Returns true if a spline is being built.
    #[inline]
    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the first anchor of the active spline.
    pub fn active_start(&self) -> Option<Point2<F>> {
        self.active.as_ref().map(|s| s.points[0].anchor)
    }

    /// Returns the last point of the active spline for handle updates.
    pub fn last_point_mut(&mut self) -> Option<&mut SplinePoint<F>> {
        self.active.as_mut().and_then(|s| s.points.last_mut())
    }

    /// Closes the active spline and finalizes it.
    ///
    /// Returns the closed spline's first anchor, or `None` if nothing was
    /// active.
    pub fn close(&mut self) -> Option<Point2<F>> {
        let mut spline = self.active.take()?;
        spline.close();
        let start = spline.points[0].anchor;
        self.splines.push(spline);
        Some(start)
    }

    /// Finalizes everything and applies the fill policy.
    ///
    /// With `use_fill`, every spline that is not closed yet is closed; closing
    /// is idempotent so splines closed by `Z` are untouched.
    pub fn finish(mut self, use_fill: bool) -> Vec<Spline<F>> {
        self.finalize_active();
        if use_fill {
            for spline in &mut self.splines {
                spline.close();
            }
        }
        self.splines
    }

    fn finalize_active(&mut self) {
        if let Some(spline) = self.active.take() {
            self.splines.push(spline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner(x: f64, y: f64) -> SplinePoint<f64> {
        SplinePoint::corner(Point2::new(x, y))
    }

    #[test]
    fn test_start_new_finalizes_previous_open() {
        let mut asm = SplineAssembler::new(1e-6);
        asm.start_new(corner(0.0, 0.0));
        asm.append(corner(1.0, 0.0));
        asm.start_new(corner(5.0, 5.0));
        let splines = asm.finish(false);

        assert_eq!(splines.len(), 2);
        assert!(!splines[0].closed);
        assert_eq!(splines[0].len(), 2);
        assert_eq!(splines[1].len(), 1);
    }

    #[test]
    fn test_append_without_active_starts_spline() {
        let mut asm = SplineAssembler::new(1e-6);
        assert!(!asm.has_active());
        asm.append(corner(3.0, 4.0));
        assert_eq!(asm.active_start(), Some(Point2::new(3.0, 4.0)));
    }

    #[test]
    fn test_fold_into_first_point() {
        let mut asm = SplineAssembler::new(1e-6);
        asm.start_new(corner(0.0, 0.0));
        asm.append(corner(10.0, 0.0));
        let incoming = corner(0.0, 1e-9).with_left(Point2::new(2.0, -3.0));
        assert!(asm.append_or_fold(incoming, true));

        let splines = asm.finish(false);
        assert_eq!(splines.len(), 1);
        assert_eq!(splines[0].len(), 2);
        assert!(splines[0].closed);
        assert_eq!(splines[0].points[0].left_handle_kind, HandleKind::Free);
        assert_eq!(splines[0].points[0].left_handle, Some(Point2::new(2.0, -3.0)));
        // Seam reconciliation promotes the last outgoing handle.
        assert_eq!(splines[0].points[1].right_handle_kind, HandleKind::Free);
    }

    #[test]
    fn test_fold_mid_subpath_keeps_spline_active() {
        let mut asm = SplineAssembler::new(1e-6);
        asm.start_new(corner(0.0, 0.0));
        asm.append(corner(10.0, 0.0));
        assert!(asm.append_or_fold(corner(0.0, 0.0), false));
        asm.append(corner(0.0, 10.0));
        let splines = asm.finish(false);
        assert_eq!(splines[0].len(), 3);
        assert!(!splines[0].closed);
    }

    #[test]
    fn test_distinct_point_is_appended() {
        let mut asm = SplineAssembler::new(1e-6);
        asm.start_new(corner(0.0, 0.0));
        assert!(!asm.append_or_fold(corner(0.0, 1e-3), true));
        assert!(asm.has_active());
        assert_eq!(asm.finish(false)[0].len(), 2);
    }

    #[test]
    fn test_single_point_loop_closes() {
        let mut asm = SplineAssembler::new(1e-6);
        let mut start = corner(0.0, 0.0);
        start.set_right_free(Point2::new(10.0, 10.0));
        asm.start_new(start);
        let incoming = corner(0.0, 0.0).with_left(Point2::new(-10.0, 10.0));
        assert!(asm.append_or_fold(incoming, true));

        let splines = asm.finish(false);
        assert_eq!(splines[0].len(), 1);
        assert!(splines[0].closed);
        assert_eq!(splines[0].segments().len(), 1);
    }

    #[test]
    fn test_fold_without_close() {
        let mut asm = SplineAssembler::new(1e-6);
        asm.start_new(corner(0.0, 0.0));
        asm.append(corner(10.0, 0.0));
        assert!(asm.append_or_fold(corner(0.0, 0.0), false));
        assert!(asm.has_active());
        let splines = asm.finish(false);
        assert!(!splines[0].closed);
        assert_eq!(splines[0].len(), 2);
    }

    #[test]
    fn test_finish_fill_closes_all_open_splines() {
        let mut asm = SplineAssembler::new(1e-6);
        asm.start_new(corner(0.0, 0.0));
        asm.append(corner(1.0, 0.0));
        asm.start_new(corner(5.0, 5.0));
        asm.append(corner(6.0, 5.0));
        let splines = asm.finish(true);
        assert!(splines.iter().all(|s| s.closed));
    }

    #[test]
    fn test_finish_fill_is_idempotent() {
        let mut asm = SplineAssembler::new(1e-6);
        asm.start_new(corner(0.0, 0.0));
        asm.append(corner(1.0, 0.0));
        asm.append(corner(1.0, 1.0));
        let once = asm.finish(true);
        let twice = SplineAssembler::from_splines(once.clone(), 1e-6).finish(true);
        assert_eq!(once, twice);
        assert!(twice[0].closed);
    }

    #[test]
    fn test_close_returns_start() {
        let mut asm = SplineAssembler::new(1e-6);
        assert_eq!(asm.close(), None);
        asm.start_new(corner(2.0, 3.0));
        asm.append(corner(4.0, 3.0));
        assert_eq!(asm.close(), Some(Point2::new(2.0, 3.0)));
        assert!(!asm.has_active());
    }
}
