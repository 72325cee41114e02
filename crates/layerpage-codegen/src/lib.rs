//! layerpage code generator
//!
//! Compiles a layer tree into a static, absolutely positioned HTML page.
//! The markup emitter walks the tree and pairs every renderable layer with
//! one CSS rule; the style composer fills each rule with the layer's blend,
//! effect, typography and fill declarations.
//!
//! ```text
//! Document → compile() → CompilerOutput { html, css } → render_page()
//! ```

pub mod css;
pub mod html;
pub mod naming;
pub mod page;
pub mod style;

pub use css::{CssRule, Declaration};
pub use naming::{sanitize_class_name, ClassNames, MAX_CLASS_LEN};
pub use page::render_page;
pub use style::{compose, ShadowMode, StyleOptions};

use layerpage_model::{Document, Metadata};
use serde::Serialize;

/// Canvas used when the document carries no size.
pub const DEFAULT_CANVAS: Canvas = Canvas {
    width: 1920,
    height: 5080,
};

/// Page size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// The document's design size, falling back per axis to `DEFAULT_CANVAS`.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            width: metadata.design_width.unwrap_or(DEFAULT_CANVAS.width),
            height: metadata.design_height.unwrap_or(DEFAULT_CANVAS.height),
        }
    }
}

/// Knobs for one compilation.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Overrides the canvas recorded in the document.
    pub canvas: Option<Canvas>,
    pub style: StyleOptions,
    /// Break class-name collisions with numeric suffixes.
    pub unique_class_names: bool,
}

/// The compiled output of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilerOutput {
    /// Body content, one top-level fragment after another.
    pub html: String,
    /// Reset and body rules followed by every layer rule.
    pub css: String,
    /// Number of rendered layers (one element and one rule each).
    pub elements: usize,
}

impl CompilerOutput {
    /// Wrap the output in a standalone HTML document.
    pub fn page(&self, title: &str) -> String {
        render_page(self, title)
    }
}

/// State threaded through one compilation.
pub struct CompilationContext<'a> {
    pub options: &'a CompileOptions,
    pub classes: ClassNames,
}

impl<'a> CompilationContext<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            classes: ClassNames::new(options.unique_class_names),
        }
    }
}

/// Compile a document into HTML body content and a stylesheet.
pub fn compile(doc: &Document, options: &CompileOptions) -> CompilerOutput {
    let mut ctx = CompilationContext::new(options);
    let fragments = html::generate(doc, &mut ctx);

    let canvas = options
        .canvas
        .unwrap_or_else(|| Canvas::from_metadata(&doc.metadata));
    let mut rules = css::base_rules(canvas);
    let base = rules.len();

    let mut html = String::new();
    for fragment in fragments {
        html.push_str(&fragment.html);
        rules.extend(fragment.rules);
    }

    let elements = rules.len() - base;
    tracing::debug!(elements, "Compiled document");

    CompilerOutput {
        html,
        css: css::stylesheet(&rules),
        elements,
    }
}

/// Integral values below this print through `i64`; larger ones keep `f64` formatting.
const EXACT_INTEGER_LIMIT: f64 = 1e15;

/// Format a number, removing `.0` for integers.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < EXACT_INTEGER_LIMIT {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
