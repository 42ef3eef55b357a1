//! SVG document model.
//!
//! [`Document::parse`] reads the XML with `roxmltree` and keeps only what the
//! importer needs: an arena of [`Node`]s for structural elements and
//! drawable shapes, each with its local transform and fill attribute.
//! Elements that are neither are dropped together with their subtrees.
//!
//! # Example
//!
//! ```
//! use svgspline::document::{import, Document};
//! use svgspline::ImportOptions;
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
//!     <rect x="10" y="10" width="20" height="20"/>
//! </svg>"#;
//! let options = ImportOptions::<f64>::new();
//! let document = Document::parse(svg, &options).unwrap();
//! let report = import(&document, &options);
//! assert_eq!(report.shapes.len(), 1);
//! assert!(report.failures.is_empty());
//! ```

mod import;

pub use import::{import, import_svg, ImportReport, ImportedShape, ShapeFailure};

use crate::error::{ImportError, PathError};
use crate::options::ImportOptions;
use crate::path::read_float_list;
use crate::primitives::Affine2;
use crate::shapes::Geometry;
use crate::transform::parse_transform;
use crate::units::parse_coord;
use num_traits::Float;
use std::collections::HashMap;
use std::str::FromStr;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Index of a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<F> {
    /// An `<svg>` element (the root or a nested one).
    Svg,
    /// A `<g>` element.
    Group,
    /// A `<defs>` element; its subtree only draws through `<use>`.
    Defs,
    /// A `<symbol>` element; only drawn through `<use>`.
    Symbol,
    /// A `<use>` reference to the element with id `href`, offset by `(x, y)`.
    Use { href: String, x: F, y: F },
    /// A drawable element. Holds the error if its attributes were unreadable.
    Shape(Result<Geometry<F>, PathError>),
}

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<F> {
    pub kind: NodeKind<F>,
    pub id: Option<String>,
    /// Local `transform` attribute.
    pub transform: Affine2<F>,
    /// `Some(false)` for `fill="none"`, `Some(true)` for any other fill,
    /// `None` when inherited.
    pub fill: Option<bool>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A parsed SVG document.
#[derive(Debug, Clone)]
pub struct Document<F> {
    nodes: Vec<Node<F>>,
    ids: HashMap<String, NodeId>,
    viewport: (F, F),
}

impl<F: Float + FromStr> Document<F> {
    /// Parses an SVG document.
    ///
    /// The root's `width`/`height` set the viewport, falling back to its
    /// `viewBox` size and then to `options.viewport`. When a `viewBox` is
    /// present, the root node's transform maps it onto the viewport (uniform
    /// scale, centered).
    ///
    /// # Errors
    ///
    /// - [`ImportError::Xml`] if the text is not well-formed XML.
    /// - [`ImportError::NotSvg`] if the root element is not `<svg>`.
    pub fn parse(text: &str, options: &ImportOptions<F>) -> Result<Self, ImportError> {
        let xml = roxmltree::Document::parse(text)?;
        let root = xml.root_element();
        let tag = root.tag_name().name();
        if tag != "svg" {
            return Err(ImportError::NotSvg(tag.to_string()));
        }

        let view_box = root.attribute("viewBox").and_then(parse_view_box::<F>);
        let (fallback_w, fallback_h) = match view_box {
            Some((_, _, w, h)) => (w, h),
            None => options.viewport,
        };
        let width = root
            .attribute("width")
            .map_or(fallback_w, |v| parse_coord(v, options.viewport.0));
        let height = root
            .attribute("height")
            .map_or(fallback_h, |v| parse_coord(v, options.viewport.1));
        let viewport = (width, height);

        // Lengths inside the root resolve in user space, i.e. the viewBox.
        let reference = view_box.map_or(viewport, |(_, _, w, h)| (w, h));

        let mut document = Document {
            nodes: Vec::new(),
            ids: HashMap::new(),
            viewport,
        };
        document.build(root, None, reference);

        if let Some(view_box) = view_box {
            let root_node = &mut document.nodes[0];
            root_node.transform =
                view_box_transform(view_box, viewport).compose(&root_node.transform);
        }

        log::debug!("parsed SVG document with {} nodes", document.nodes.len());
        Ok(document)
    }

    /// Returns the root `<svg>` node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node with the given index.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<F> {
        &self.nodes[id.0]
    }

    /// Returns all nodes in document order.
    pub fn nodes(&self) -> &[Node<F>] {
        &self.nodes
    }

    /// Looks up a node by its `id` attribute. The first element with a given
    /// id wins.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Returns the resolved viewport size.
    pub fn viewport(&self) -> (F, F) {
        self.viewport
    }

    fn build(
        &mut self,
        element: roxmltree::Node<'_, '_>,
        parent: Option<NodeId>,
        reference: (F, F),
    ) -> Option<NodeId> {
        let kind = node_kind(element, reference)?;
        let id = element.attribute("id").map(str::to_string);

        let transform = match element.attribute("transform") {
            Some(text) => parse_transform(text).unwrap_or_else(|err| {
                log::warn!(
                    "ignoring transform {:?} on <{}>: {}",
                    text,
                    element.tag_name().name(),
                    err
                );
                Affine2::identity()
            }),
            None => Affine2::identity(),
        };

        let node_id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            id: id.clone(),
            transform,
            fill: fill_attribute(element),
            parent,
            children: Vec::new(),
        });
        if let Some(id) = id {
            self.ids.entry(id).or_insert(node_id);
        }

        for child in element.children().filter(|n| n.is_element()) {
            if let Some(child_id) = self.build(child, Some(node_id), reference) {
                self.nodes[node_id.0].children.push(child_id);
            }
        }
        Some(node_id)
    }
}

fn node_kind<F: Float + FromStr>(
    element: roxmltree::Node<'_, '_>,
    reference: (F, F),
) -> Option<NodeKind<F>> {
    let tag = element.tag_name().name();
    let kind = match tag {
        "svg" => NodeKind::Svg,
        "g" => NodeKind::Group,
        "defs" => NodeKind::Defs,
        "symbol" => NodeKind::Symbol,
        "use" => {
            let href = element
                .attribute("href")
                .or_else(|| element.attribute((XLINK_NS, "href")))
                .unwrap_or("");
            let length = |name: &str, size: F| {
                element
                    .attribute(name)
                    .map_or(F::zero(), |v| parse_coord(v, size))
            };
            NodeKind::Use {
                href: href.trim().trim_start_matches('#').to_string(),
                x: length("x", reference.0),
                y: length("y", reference.1),
            }
        }
        _ => {
            match Geometry::from_attributes(tag, |name| element.attribute(name), reference) {
                Ok(Some(geometry)) => NodeKind::Shape(Ok(geometry)),
                Ok(None) => return None,
                Err(err) => NodeKind::Shape(Err(err)),
            }
        }
    };
    Some(kind)
}

/// Reads `fill` from the `style` attribute, which takes precedence, or the
/// `fill` presentation attribute.
fn fill_attribute(element: roxmltree::Node<'_, '_>) -> Option<bool> {
    let from_style = element.attribute("style").and_then(|style| {
        style.split(';').find_map(|declaration| {
            let (key, value) = declaration.split_once(':')?;
            (key.trim() == "fill").then(|| value.trim())
        })
    });
    from_style
        .or_else(|| element.attribute("fill").map(str::trim))
        .map(|value| value != "none")
}

fn parse_view_box<F: Float>(text: &str) -> Option<(F, F, F, F)> {
    let values = match read_float_list(text) {
        Ok(values) => values,
        Err(err) => {
            log::debug!("ignoring viewBox {:?}: {}", text, err);
            return None;
        }
    };
    if values.len() != 4 || values[2] <= 0.0 || values[3] <= 0.0 {
        log::debug!("ignoring viewBox {:?}", text);
        return None;
    }
    Some((
        F::from(values[0])?,
        F::from(values[1])?,
        F::from(values[2])?,
        F::from(values[3])?,
    ))
}

/// Maps the viewBox onto the viewport with a uniform scale, centering the
/// leftover space.
fn view_box_transform<F: Float>(view_box: (F, F, F, F), viewport: (F, F)) -> Affine2<F> {
    let (min_x, min_y, vb_w, vb_h) = view_box;
    let (width, height) = viewport;
    let scale = (width / vb_w).min(height / vb_h);
    let half = F::from(0.5).unwrap();
    let tx = (width - vb_w * scale) * half - min_x * scale;
    let ty = (height - vb_h * scale) * half - min_y * scale;
    Affine2::translate(tx, ty).compose(&Affine2::scale_xy(scale, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Point2;

    fn parse(svg: &str) -> Document<f64> {
        Document::parse(svg, &ImportOptions::new()).unwrap()
    }

    #[test]
    fn test_not_svg() {
        let result = Document::<f64>::parse("<html/>", &ImportOptions::new());
        assert!(matches!(result, Err(ImportError::NotSvg(tag)) if tag == "html"));
    }

    #[test]
    fn test_bad_xml() {
        let result = Document::<f64>::parse("<svg><g></svg>", &ImportOptions::new());
        assert!(matches!(result, Err(ImportError::Xml(_))));
    }

    #[test]
    fn test_arena_structure() {
        let doc = parse(
            r#"<svg><g id="layer"><path d="M0 0 L1 1"/><text>hi</text><circle r="2"/></g></svg>"#,
        );
        assert_eq!(doc.node(doc.root()).kind, NodeKind::Svg);
        let layer = doc.find("layer").unwrap();
        assert_eq!(doc.node(layer).kind, NodeKind::Group);
        assert_eq!(doc.node(layer).parent, Some(doc.root()));
        // <text> is dropped.
        assert_eq!(doc.node(layer).children.len(), 2);
        assert_eq!(doc.nodes().len(), 4);
    }

    #[test]
    fn test_viewport_from_size_and_view_box() {
        assert_eq!(parse(r#"<svg width="300" height="150"/>"#).viewport(), (300.0, 150.0));
        assert_eq!(parse(r#"<svg viewBox="0 0 40 30"/>"#).viewport(), (40.0, 30.0));
        assert_eq!(parse("<svg/>").viewport(), (100.0, 100.0));
        assert_eq!(parse(r#"<svg width="50%" height="1in"/>"#).viewport(), (50.0, 90.0));
    }

    #[test]
    fn test_view_box_transform() {
        let doc = parse(r#"<svg width="200" height="200" viewBox="10 10 100 100"/>"#);
        let t = doc.node(doc.root()).transform;
        assert_eq!(t.apply_point(Point2::new(10.0, 10.0)), Point2::new(0.0, 0.0));
        assert_eq!(t.apply_point(Point2::new(60.0, 60.0)), Point2::new(100.0, 100.0));
    }

    #[test]
    fn test_fill_attribute() {
        let doc = parse(
            r#"<svg>
                <path id="a" d="" fill="none"/>
                <path id="b" d="" fill="red"/>
                <path id="c" d="" style="stroke:black; fill: none"/>
                <path id="d" d="" fill="none" style="fill:#fff"/>
                <path id="e" d=""/>
            </svg>"#,
        );
        let fill = |id: &str| doc.node(doc.find(id).unwrap()).fill;
        assert_eq!(fill("a"), Some(false));
        assert_eq!(fill("b"), Some(true));
        assert_eq!(fill("c"), Some(false));
        assert_eq!(fill("d"), Some(true));
        assert_eq!(fill("e"), None);
    }

    #[test]
    fn test_use_href_forms() {
        let doc = parse(
            r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink">
                <use id="u1" href="#target" x="5"/>
                <use id="u2" xlink:href="#target" y="7"/>
            </svg>"##,
        );
        let kind = |id: &str| doc.node(doc.find(id).unwrap()).kind.clone();
        assert_eq!(
            kind("u1"),
            NodeKind::Use {
                href: "target".to_string(),
                x: 5.0,
                y: 0.0
            }
        );
        assert_eq!(
            kind("u2"),
            NodeKind::Use {
                href: "target".to_string(),
                x: 0.0,
                y: 7.0
            }
        );
    }

    #[test]
    fn test_bad_transform_is_identity() {
        let doc = parse(r#"<svg><g id="g" transform="spin(4)"/></svg>"#);
        assert!(doc.node(doc.find("g").unwrap()).transform.is_identity(0.0));
    }

    #[test]
    fn test_unreadable_points_are_kept_as_error() {
        let doc = parse(r#"<svg><polygon id="p" points="0,0 1,?"/></svg>"#);
        let node = doc.node(doc.find("p").unwrap());
        assert!(matches!(node.kind, NodeKind::Shape(Err(PathError::MalformedNumber { .. }))));
    }
}
