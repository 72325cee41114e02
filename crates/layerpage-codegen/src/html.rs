//! Markup emitter.
//!
//! Walks the layer tree depth-first and produces, for every renderable
//! layer, one absolutely positioned `<div>` and one CSS rule. HTML is
//! emitted pre-order (a container's open tag before its children) and CSS
//! follows the same order (a layer's rule before its descendants' rules).
//!
//! Nothing here fails: unsupported kinds, empty boxes and containers whose
//! children all vanished are dropped and logged at debug level.

use crate::css::{CssRule, Declaration};
use crate::naming::sanitize_class_name;
use crate::style::compose;
use crate::{format_number, CompilationContext};
use layerpage_model::{BoundingBox, Document, LayerKind, LayerNode};

const DEFAULT_FONT_SIZE: f64 = 16.0;
const DEFAULT_TEXT_COLOR: &str = "#000000";

/// The output of one layer and its surviving descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub html: String,
    pub rules: Vec<CssRule>,
}

/// Emit every top-level layer of a document, in input order.
pub fn generate(doc: &Document, ctx: &mut CompilationContext) -> Vec<Fragment> {
    doc.layers
        .iter()
        .filter_map(|layer| emit(layer, 0, "", ctx))
        .collect()
}

/// Emit one layer at `depth` below the document root.
///
/// `parent` is the class of the enclosing container (empty at the top
/// level). Returns `None` when the layer renders nothing.
pub fn emit(
    node: &LayerNode,
    depth: usize,
    parent: &str,
    ctx: &mut CompilationContext,
) -> Option<Fragment> {
    let bounds = match node.bounds {
        Some(bounds) if !bounds.is_empty() => bounds,
        Some(_) => {
            tracing::debug!(parent, name = %node.name, "Skipping empty layer");
            return None;
        }
        None => {
            tracing::debug!(parent, name = %node.name, "Skipping layer without bounds");
            return None;
        }
    };

    let indent = "  ".repeat(depth);

    match &node.kind {
        LayerKind::Container(children) => {
            // Classes of different depths never collide, so claiming after
            // the children still hands out names in document order per depth.
            let class_path = sanitize_class_name(&node.name, depth);
            let emitted: Vec<Fragment> = children
                .iter()
                .filter_map(|child| emit(child, depth + 1, &class_path, ctx))
                .collect();
            if emitted.is_empty() {
                tracing::debug!(parent, name = %node.name, "Dropping empty container");
                return None;
            }

            let class = ctx.classes.claim(&node.name, depth);
            let mut html = format!("{indent}<div class=\"{class}\">\n");
            let mut rules = vec![box_rule(&class, &bounds, node, ctx)];
            for child in emitted {
                html.push_str(&child.html);
                rules.extend(child.rules);
            }
            html.push_str(&format!("{indent}</div>\n"));
            Some(Fragment { html, rules })
        }
        LayerKind::Text(text) => {
            let class = ctx.classes.claim(&node.name, depth);
            let mut declarations = position(&bounds);
            let font_size = node.typography.font_size.unwrap_or(DEFAULT_FONT_SIZE);
            declarations.push(Declaration::new(
                "font-size",
                format!("{}px", format_number(font_size)),
            ));
            declarations.push(Declaration::new(
                "color",
                node.typography
                    .color
                    .as_deref()
                    .unwrap_or(DEFAULT_TEXT_COLOR),
            ));
            declarations.extend(compose(node, ctx.options.style));

            Some(Fragment {
                html: format!(
                    "{indent}<div class=\"{class}\">{}</div>\n",
                    escape_text(text)
                ),
                rules: vec![CssRule::class(&class, declarations)],
            })
        }
        LayerKind::Image(src) => {
            let class = ctx.classes.claim(&node.name, depth);
            let mut declarations = position(&bounds);
            declarations.push(Declaration::new("background-image", format!("url('{src}')")));
            declarations.push(Declaration::new("background-size", "100% 100%"));
            declarations.push(Declaration::new("background-repeat", "no-repeat"));
            declarations.extend(compose(node, ctx.options.style));

            Some(Fragment {
                html: format!("{indent}<div class=\"{class}\"></div>\n"),
                rules: vec![CssRule::class(&class, declarations)],
            })
        }
        LayerKind::Shape => {
            let class = ctx.classes.claim(&node.name, depth);
            Some(Fragment {
                html: format!("{indent}<div class=\"{class}\"></div>\n"),
                rules: vec![box_rule(&class, &bounds, node, ctx)],
            })
        }
        LayerKind::Unsupported(reason) => {
            tracing::debug!(parent, name = %node.name, %reason, "Skipping unsupported layer");
            None
        }
    }
}

/// The rule shared by containers and shapes: placement plus composed styles.
fn box_rule(
    class: &str,
    bounds: &BoundingBox,
    node: &LayerNode,
    ctx: &CompilationContext,
) -> CssRule {
    let mut declarations = position(bounds);
    declarations.extend(compose(node, ctx.options.style));
    CssRule::class(class, declarations)
}

fn position(bounds: &BoundingBox) -> Vec<Declaration> {
    vec![
        Declaration::new("position", "absolute"),
        Declaration::new("left", format!("{}px", bounds.left)),
        Declaration::new("top", format!("{}px", bounds.top)),
        Declaration::new("width", format!("{}px", bounds.width)),
        Declaration::new("height", format!("{}px", bounds.height)),
    ]
}

/// Escape `&`, `<` and `>`. Quotes are left alone: text only ever lands in
/// element content, never in an attribute.
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}
