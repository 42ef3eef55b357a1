//! Parser and import configuration.
//!
//! All tolerances are explicit; nothing in the parser uses a hidden epsilon.

use num_traits::Float;

/// How quadratic Bézier segments (`Q`, `T`) become cubic handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuadraticMode {
    /// Store the quadratic control point directly as both facing handles.
    ///
    /// The resulting cubic is close to, but not exactly, the quadratic curve.
    #[default]
    Verbatim,
    /// Exact degree elevation: `cp1 = p0 + 2/3 (q - p0)`,
    /// `cp2 = p1 + 2/3 (q - p1)`.
    DegreeElevated,
}

/// Options for converting one path or primitive shape into splines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOptions<F> {
    /// The shape is filled; every open spline is closed when parsing ends.
    pub use_fill: bool,
    /// Quadratic segment handling.
    pub quadratic: QuadraticMode,
    /// Per-axis distance under which two anchors are the same point.
    pub coincidence_tolerance: F,
}

impl<F: Float> PathOptions<F> {
    /// Default options: no fill, verbatim quadratics, tolerance `1e-6`.
    pub fn new() -> Self {
        Self {
            use_fill: false,
            quadratic: QuadraticMode::Verbatim,
            coincidence_tolerance: F::from(1e-6).unwrap(),
        }
    }

    /// Sets the fill flag.
    pub fn with_fill(mut self, use_fill: bool) -> Self {
        self.use_fill = use_fill;
        self
    }

    /// Sets the quadratic handling mode.
    pub fn with_quadratic(mut self, quadratic: QuadraticMode) -> Self {
        self.quadratic = quadratic;
        self
    }

    /// Sets the coincidence tolerance.
    pub fn with_tolerance(mut self, tolerance: F) -> Self {
        self.coincidence_tolerance = tolerance;
        self
    }
}

impl<F: Float> Default for PathOptions<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for importing a whole SVG document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions<F> {
    /// Template for every shape; `use_fill` is overridden per shape from its
    /// inherited `fill` property.
    pub path: PathOptions<F>,
    /// Reference size for percentages when the root `<svg>` has none.
    pub viewport: (F, F),
    /// Maximum nesting of `<use>` expansions.
    pub max_use_depth: usize,
}

impl<F: Float> ImportOptions<F> {
    /// Default options with a 100x100 fallback viewport.
    pub fn new() -> Self {
        let hundred = F::from(100.0).unwrap();
        Self {
            path: PathOptions::new(),
            viewport: (hundred, hundred),
            max_use_depth: 32,
        }
    }

    /// Sets the per-shape path options template.
    pub fn with_path_options(mut self, path: PathOptions<F>) -> Self {
        self.path = path;
        self
    }

    /// Sets the fallback viewport.
    pub fn with_viewport(mut self, width: F, height: F) -> Self {
        self.viewport = (width, height);
        self
    }
}

impl<F: Float> Default for ImportOptions<F> {
    fn default() -> Self {
        Self::new()
    }
}
