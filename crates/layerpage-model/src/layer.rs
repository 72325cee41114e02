//! Typed layer tree.
//!
//! A `Document` holds the canvas metadata and the top-level layers in
//! paint order. Every `LayerNode` carries the full attribute bag (blend,
//! effects, typography, fill); which parts matter depends on its `LayerKind`.

/// A loaded design document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub metadata: Metadata,
    pub layers: Vec<LayerNode>,
}

/// Canvas information recorded by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metadata {
    pub design_width: Option<u32>,
    pub design_height: Option<u32>,
}

/// One rectangular layer of the design tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerNode {
    pub name: String,
    pub kind: LayerKind,
    /// Absolute pixel rectangle. `None` when the producer did not record one.
    pub bounds: Option<BoundingBox>,
    pub blend: Blend,
    pub effects: Effects,
    pub typography: Typography,
    pub fill: Fill,
}

/// What a layer renders as.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// A group; children are in paint order.
    Container(Vec<LayerNode>),
    /// A text run, raw (not escaped).
    Text(String),
    /// A bitmap, referenced by a path relative to the output page.
    Image(String),
    /// A vector shape rendered as a filled box.
    Shape,
    /// Anything that produces no markup.
    Unsupported(Unsupported),
}

/// Why a layer is not renderable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unsupported {
    /// Curve/vector annotation layers; the whole subtree is ignored.
    Curves,
    /// A `content_type` outside the four known kinds.
    UnknownContentType(String),
    MissingContentType,
    /// The layer's JSON did not have the expected shape.
    Malformed(String),
}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unsupported::Curves => write!(f, "curves layer"),
            Unsupported::UnknownContentType(ty) => write!(f, "unknown content type `{ty}`"),
            Unsupported::MissingContentType => write!(f, "missing content type"),
            Unsupported::Malformed(message) => write!(f, "malformed layer: {message}"),
        }
    }
}

/// Absolute pixel rectangle relative to the document origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

impl BoundingBox {
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True when the box has a zero width or height. Negative sizes are
    /// passed through to the stylesheet untouched.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Layer opacity and blend mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Blend {
    pub opacity: Option<f64>,
    /// Raw mode name as recorded by the producer, e.g. `BlendMode.MULTIPLY`.
    pub blend_mode: Option<String>,
}

/// Layer style effects. Each is gated by its own `enabled` flag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Effects {
    pub shadow: Option<Shadow>,
    pub glow: Option<Glow>,
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shadow {
    pub enabled: bool,
    pub distance: Option<f64>,
    pub size: Option<f64>,
    pub opacity: Option<f64>,
    /// Light angle in degrees.
    pub angle: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Glow {
    pub enabled: bool,
    pub size: Option<f64>,
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stroke {
    pub enabled: bool,
    pub size: Option<f64>,
    pub opacity: Option<f64>,
}

/// Text styling of the first style run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Typography {
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    /// Leading, in pixels.
    pub line_height: Option<f64>,
    /// Tracking, in em.
    pub letter_spacing: Option<f64>,
    pub font_family: Option<String>,
}

/// Solid fill of image and shape layers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fill {
    pub background_color: Option<String>,
}

impl LayerNode {
    /// Create a layer with no styling attributes.
    pub fn new(name: impl Into<String>, kind: LayerKind, bounds: Option<BoundingBox>) -> Self {
        Self {
            name: name.into(),
            kind,
            bounds,
            blend: Blend::default(),
            effects: Effects::default(),
            typography: Typography::default(),
            fill: Fill::default(),
        }
    }

    pub fn container(
        name: impl Into<String>,
        bounds: BoundingBox,
        children: Vec<LayerNode>,
    ) -> Self {
        Self::new(name, LayerKind::Container(children), Some(bounds))
    }

    pub fn text(name: impl Into<String>, bounds: BoundingBox, text: impl Into<String>) -> Self {
        Self::new(name, LayerKind::Text(text.into()), Some(bounds))
    }

    pub fn image(name: impl Into<String>, bounds: BoundingBox, src: impl Into<String>) -> Self {
        Self::new(name, LayerKind::Image(src.into()), Some(bounds))
    }

    pub fn shape(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self::new(name, LayerKind::Shape, Some(bounds))
    }

    /// Child layers, empty for anything but a container.
    pub fn children(&self) -> &[LayerNode] {
        match &self.kind {
            LayerKind::Container(children) => children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_width_is_empty() {
        assert!(BoundingBox::new(10, 10, 0, 20).is_empty());
    }

    #[test]
    fn test_zero_height_is_empty() {
        assert!(BoundingBox::new(10, 10, 20, 0).is_empty());
    }

    #[test]
    fn test_negative_size_is_not_empty() {
        assert!(!BoundingBox::new(0, 0, -10, 50).is_empty());
    }

    #[test]
    fn test_negative_origin_is_not_empty() {
        assert!(!BoundingBox::new(-40, -5, 20, 20).is_empty());
    }

    #[test]
    fn test_children_of_leaf_is_empty() {
        let shape = LayerNode::shape("Rect", BoundingBox::new(0, 0, 1, 1));
        assert!(shape.children().is_empty());
    }

    #[test]
    fn test_children_of_container() {
        let group = LayerNode::container(
            "Group",
            BoundingBox::new(0, 0, 10, 10),
            vec![LayerNode::shape("Rect", BoundingBox::new(0, 0, 1, 1))],
        );
        assert_eq!(group.children().len(), 1);
        assert_eq!(group.children()[0].name, "Rect");
    }

    #[test]
    fn test_unsupported_display() {
        assert_eq!(
            Unsupported::UnknownContentType("mask".into()).to_string(),
            "unknown content type `mask`"
        );
        assert_eq!(Unsupported::Curves.to_string(), "curves layer");
    }
}
