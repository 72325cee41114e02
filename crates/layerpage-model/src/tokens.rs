//! Design-token collection.
//!
//! Aggregates the colors, fonts, font sizes and spacings used across a
//! document. The collector is an explicit accumulator: create one, feed it
//! layers or whole documents, then call `finish()`.

use crate::layer::{Document, LayerNode};
use serde::Serialize;
use std::collections::BTreeSet;

const MAX_COLORS: usize = 20;
const MAX_SPACINGS: usize = 15;
/// Spacings at or above this are treated as absolute placement, not rhythm.
const SPACING_LIMIT: i64 = 200;

/// Deduplicated design tokens, sorted ascending.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DesignTokens {
    pub colors: Vec<String>,
    pub fonts: Vec<String>,
    pub font_sizes: Vec<f64>,
    pub spacings: Vec<i64>,
}

impl DesignTokens {
    /// Collect tokens from every layer of a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut collector = TokenCollector::new();
        collector.collect_document(doc);
        collector.finish()
    }
}

/// Accumulates design tokens while walking layer trees.
#[derive(Debug, Default)]
pub struct TokenCollector {
    colors: BTreeSet<String>,
    fonts: BTreeSet<String>,
    /// Font sizes in tenths of a pixel, so they order and dedupe exactly.
    font_sizes: BTreeSet<i64>,
    spacings: BTreeSet<i64>,
}

impl TokenCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect_document(&mut self, doc: &Document) {
        for layer in &doc.layers {
            self.collect(layer);
        }
    }

    /// Record one layer and its whole subtree.
    pub fn collect(&mut self, layer: &LayerNode) {
        if let Some(bounds) = layer.bounds {
            self.spacings.insert(bounds.left);
            self.spacings.insert(bounds.top);
        }

        let typography = &layer.typography;
        if let Some(size) = typography.font_size {
            if size.is_finite() {
                self.font_sizes.insert((size * 10.0).round() as i64);
            }
        }
        if let Some(color) = &typography.color {
            self.colors.insert(color.clone());
        }
        if let Some(family) = &typography.font_family {
            self.fonts.insert(family.clone());
        }
        if let Some(color) = &layer.fill.background_color {
            self.colors.insert(color.clone());
        }

        for child in layer.children() {
            self.collect(child);
        }
    }

    pub fn finish(self) -> DesignTokens {
        DesignTokens {
            colors: self.colors.into_iter().take(MAX_COLORS).collect(),
            fonts: self.fonts.into_iter().collect(),
            font_sizes: self
                .font_sizes
                .into_iter()
                .map(|tenths| tenths as f64 / 10.0)
                .collect(),
            spacings: self
                .spacings
                .into_iter()
                .filter(|s| *s > 0 && *s < SPACING_LIMIT)
                .take(MAX_SPACINGS)
                .collect(),
        }
    }
}
