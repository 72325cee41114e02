//! CSS output types.
//!
//! Declarations and rules are kept structured until the final stylesheet
//! is rendered, so the emitter and its tests can inspect them directly.

use crate::Canvas;
use std::fmt;

/// System font stack applied to the page body.
const FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif";

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

impl Declaration {
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)
    }
}

/// A selector with its declarations, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            selector: selector.into(),
            declarations,
        }
    }

    /// A rule targeting a single class.
    pub fn class(class_name: &str, declarations: Vec<Declaration>) -> Self {
        Self::new(format!(".{class_name}"), declarations)
    }

    /// Value of the last declaration for `property`, the one the cascade applies.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for declaration in &self.declarations {
            writeln!(f, "  {declaration};")?;
        }
        writeln!(f, "}}")
    }
}

/// The reset and body rules every page starts with.
pub fn base_rules(canvas: Canvas) -> Vec<CssRule> {
    vec![
        CssRule::new(
            "*",
            vec![
                Declaration::new("margin", "0"),
                Declaration::new("padding", "0"),
                Declaration::new("box-sizing", "border-box"),
            ],
        ),
        CssRule::new(
            "body",
            vec![
                Declaration::new("position", "relative"),
                Declaration::new("width", format!("{}px", canvas.width)),
                Declaration::new("height", format!("{}px", canvas.height)),
                Declaration::new("background-color", "#ffffff"),
                Declaration::new("font-family", FONT_STACK),
                Declaration::new("overflow", "hidden"),
            ],
        ),
    ]
}

/// Render rules into a stylesheet, one blank line between rules.
pub fn stylesheet(rules: &[CssRule]) -> String {
    rules
        .iter()
        .map(CssRule::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
