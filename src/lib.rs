//! svgspline - SVG path data and shapes as cubic Bézier splines
//!
//! Reads the `d` attribute of SVG paths (and the basic shapes that stand in
//! for them) into splines of anchors with left and right handles, the form
//! editors and modelling tools store curves in.
//!
//! # Example
//!
//! ```
//! use svgspline::{parse_path, HandleKind, PathOptions};
//!
//! let splines = parse_path::<f64>("M 0,0 C 0,10 10,10 10,0", &PathOptions::new()).unwrap();
//! let spline = &splines[0];
//! assert_eq!(spline.len(), 2);
//! assert_eq!(spline.points[0].right_handle_kind, HandleKind::Free);
//! ```
//!
//! Whole documents go through [`document::import_svg`], which applies
//! transforms, `<use>` references and fill inheritance.

pub mod document;
pub mod error;
pub mod options;
pub mod path;
pub mod primitives;
pub mod shapes;
pub mod spline;
pub mod transform;
pub mod units;

pub use document::{import, import_svg, Document, ImportReport, ImportedShape, ShapeFailure};
pub use error::{ImportError, PathError};
pub use options::{ImportOptions, PathOptions, QuadraticMode};
pub use path::parse_path;
pub use primitives::{Affine2, Point2, Vec2};
pub use shapes::Geometry;
pub use spline::{HandleKind, Spline, SplineAssembler, SplinePoint};
pub use transform::parse_transform;
pub use units::{parse_coord, try_parse_coord};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_send_sync() {
        assert_send_sync::<Spline<f64>>();
        assert_send_sync::<Document<f32>>();
        assert_send_sync::<ImportReport<f64>>();
        assert_send_sync::<PathError>();
        assert_send_sync::<ImportError>();
    }
}
