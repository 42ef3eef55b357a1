//! Walks a [`Document`] and converts every reachable shape into splines.

use super::{Document, NodeId, NodeKind};
use crate::error::{ImportError, PathError};
use crate::options::ImportOptions;
use crate::primitives::Affine2;
use crate::spline::Spline;
use num_traits::Float;
use std::str::FromStr;

/// A shape converted to splines in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedShape<F> {
    /// The shape's node. A shape drawn through several `<use>` elements
    /// appears once per instance.
    pub node: NodeId,
    pub id: Option<String>,
    /// Whether the shape was filled, which closed its open splines.
    pub use_fill: bool,
    pub splines: Vec<Spline<F>>,
}

/// A shape that could not be converted.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFailure {
    pub node: NodeId,
    pub id: Option<String>,
    pub error: PathError,
}

/// Result of importing a document: every shape either converted or failed,
/// independently of its siblings.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport<F> {
    pub shapes: Vec<ImportedShape<F>>,
    pub failures: Vec<ShapeFailure>,
}

impl<F> Default for ImportReport<F> {
    fn default() -> Self {
        Self {
            shapes: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Imports every drawable shape of `document`.
///
/// Transforms compose from the root down, fill is inherited (default on,
/// `none` turns it off), `<defs>` and `<symbol>` subtrees only draw when
/// referenced by `<use>`. A `<use>` that is dangling, cyclic or nested
/// deeper than `options.max_use_depth` is skipped with a warning.
pub fn import<F: Float + FromStr>(
    document: &Document<F>,
    options: &ImportOptions<F>,
) -> ImportReport<F> {
    let mut walker = Walker {
        document,
        options,
        expanding: Vec::new(),
        report: ImportReport::default(),
    };
    walker.visit(document.root(), Affine2::identity(), true, false);

    let report = walker.report;
    log::debug!(
        "imported {} shapes, {} failed",
        report.shapes.len(),
        report.failures.len()
    );
    report
}

/// Parses `text` and imports it in one step.
///
/// # Errors
///
/// See [`Document::parse`].
pub fn import_svg<F: Float + FromStr>(
    text: &str,
    options: &ImportOptions<F>,
) -> Result<ImportReport<F>, ImportError> {
    let document = Document::parse(text, options)?;
    Ok(import(&document, options))
}

struct Walker<'d, F> {
    document: &'d Document<F>,
    options: &'d ImportOptions<F>,
    /// `<use>` targets currently being expanded, outermost first.
    expanding: Vec<NodeId>,
    report: ImportReport<F>,
}

impl<F: Float + FromStr> Walker<'_, F> {
    fn visit(&mut self, id: NodeId, parent_ctm: Affine2<F>, parent_fill: bool, instanced: bool) {
        let document = self.document;
        let node = document.node(id);
        let ctm = parent_ctm.compose(&node.transform);
        let fill = node.fill.unwrap_or(parent_fill);

        match &node.kind {
            NodeKind::Defs | NodeKind::Symbol if !instanced => {}
            NodeKind::Svg | NodeKind::Group | NodeKind::Defs | NodeKind::Symbol => {
                for &child in &node.children {
                    self.visit(child, ctm, fill, false);
                }
            }
            NodeKind::Use { href, x, y } => {
                let ctm = ctm.compose(&Affine2::translate(*x, *y));
                self.expand_use(id, href, ctm, fill);
            }
            NodeKind::Shape(Ok(geometry)) => {
                let options = self.options.path.with_fill(fill);
                match geometry.to_splines(&options) {
                    Ok(mut splines) => {
                        for spline in &mut splines {
                            spline.transform(&ctm);
                        }
                        self.report.shapes.push(ImportedShape {
                            node: id,
                            id: node.id.clone(),
                            use_fill: fill,
                            splines,
                        });
                    }
                    Err(error) => self.fail(id, error),
                }
            }
            NodeKind::Shape(Err(error)) => self.fail(id, error.clone()),
        }
    }

    fn expand_use(&mut self, id: NodeId, href: &str, ctm: Affine2<F>, fill: bool) {
        let Some(target) = self.document.find(href) else {
            log::warn!("<use> {:?} references missing element #{}", id, href);
            return;
        };
        if self.expanding.contains(&target) {
            log::warn!("<use> {:?} references #{} recursively, skipping", id, href);
            return;
        }
        if self.expanding.len() >= self.options.max_use_depth {
            log::warn!(
                "<use> {:?} exceeds nesting depth {}, skipping",
                id,
                self.options.max_use_depth
            );
            return;
        }

        self.expanding.push(target);
        self.visit(target, ctm, fill, true);
        self.expanding.pop();
    }

    fn fail(&mut self, id: NodeId, error: PathError) {
        let node = self.document.node(id);
        log::warn!(
            "skipping shape {}: {}",
            node.id.as_deref().unwrap_or("<unnamed>"),
            error
        );
        self.report.failures.push(ShapeFailure {
            node: id,
            id: node.id.clone(),
            error,
        });
    }
}
