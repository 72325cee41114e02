//! layerpage model
//!
//! The typed layer tree consumed by the code generator, the JSON loader
//! that builds it from a producer's `layout_data.json`, and the design-token
//! collector.
//!
//! # Example
//!
//! ```
//! use layerpage_model::Loader;
//!
//! let doc = Loader::load(r#"{"layers": []}"#).unwrap();
//! assert!(doc.layers.is_empty());
//! ```

pub mod layer;
pub mod loader;
pub mod tokens;

pub use layer::{
    Blend, BoundingBox, Document, Effects, Fill, Glow, LayerKind, LayerNode, Metadata, Shadow,
    Stroke, Typography, Unsupported,
};
pub use loader::{Loader, Validation};
pub use tokens::{DesignTokens, TokenCollector};

/// Document loading error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// The source is not a JSON object of the expected shape.
    #[error("Invalid JSON: {0}")]
    Json(String),

    /// A layer is structurally broken (strict validation only).
    #[error("Invalid layer at {path}: {message}")]
    Invalid { path: String, message: String },
}
