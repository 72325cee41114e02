//! JSON document loader.
//!
//! Reads the `layout_data.json` shape written by the design-file producer
//! and converts it into the typed `Document` tree. Each layer is decoded
//! independently from a `serde_json::Value`, so one malformed layer never
//! poisons its siblings: the lenient loader keeps it as an unsupported
//! node (which renders as nothing), the strict loader reports it.

use crate::layer::{
    Blend, BoundingBox, Document, Effects, Fill, Glow, LayerKind, LayerNode, Metadata, Shadow,
    Stroke, Typography, Unsupported,
};
use crate::ModelError;
use serde::Deserialize;
use serde_json::Value;

/// Name given to layers the producer left unnamed.
const DEFAULT_NAME: &str = "layer";

/// How the loader treats structurally broken layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Broken layers are kept as unsupported nodes and skipped at render time.
    #[default]
    Lenient,
    /// Broken layers abort loading with `ModelError::Invalid`.
    Strict,
}

/// Layout document loader.
pub struct Loader {
    validation: Validation,
}

impl Loader {
    /// Create a loader with the given validation mode.
    pub fn new(validation: Validation) -> Self {
        Self { validation }
    }

    /// Load a document leniently.
    pub fn load(source: &str) -> Result<Document, ModelError> {
        Loader::new(Validation::Lenient).load_document(source)
    }

    /// Load a document, failing on the first broken layer.
    pub fn load_strict(source: &str) -> Result<Document, ModelError> {
        Loader::new(Validation::Strict).load_document(source)
    }

    /// Parse source JSON into a document.
    pub fn load_document(&self, source: &str) -> Result<Document, ModelError> {
        let raw: RawDocument =
            serde_json::from_str(source).map_err(|e| ModelError::Json(e.to_string()))?;

        let metadata = Metadata {
            design_width: canvas_dimension(&raw.metadata, "design_width"),
            design_height: canvas_dimension(&raw.metadata, "design_height"),
        };

        let mut layers = Vec::with_capacity(raw.layers.len());
        for (index, value) in raw.layers.into_iter().enumerate() {
            layers.push(self.load_layer(value, &format!("/layers/{index}"))?);
        }

        tracing::debug!(top_level = layers.len(), "Document loaded");
        Ok(Document { metadata, layers })
    }

    fn load_layer(&self, value: Value, path: &str) -> Result<LayerNode, ModelError> {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_NAME)
            .to_string();

        let raw: RawLayer = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => return self.malformed(name, path, e.to_string()),
        };

        let kind = if raw.kind.as_deref() == Some("curves") {
            LayerKind::Unsupported(Unsupported::Curves)
        } else {
            match raw.content_type.as_deref() {
                Some("container") => {
                    let children = raw.children.unwrap_or_default();
                    let mut nodes = Vec::with_capacity(children.len());
                    for (index, child) in children.into_iter().enumerate() {
                        nodes.push(self.load_layer(child, &format!("{path}/children/{index}"))?);
                    }
                    LayerKind::Container(nodes)
                }
                Some("text") => LayerKind::Text(self.required(raw.text, "text", path)?),
                Some("image") => LayerKind::Image(self.required(raw.src, "src", path)?),
                Some("shape") => LayerKind::Shape,
                Some(other) => {
                    LayerKind::Unsupported(Unsupported::UnknownContentType(other.into()))
                }
                None => LayerKind::Unsupported(Unsupported::MissingContentType),
            }
        };

        // Unsupported layers never render, so their geometry is not checked.
        let bounds = match raw.bbox {
            Some(bbox) if matches!(kind, LayerKind::Unsupported(_)) => Some(bbox.lenient()),
            Some(bbox) => Some(self.bounding_box(bbox, path)?),
            None if matches!(kind, LayerKind::Unsupported(_)) => None,
            None => {
                self.check(path, "missing `bbox`")?;
                None
            }
        };

        let blend = raw
            .blend
            .map(|b| Blend {
                opacity: b.opacity,
                blend_mode: b.blend_mode,
            })
            .unwrap_or_default();

        let effects = raw
            .effects
            .map(|e| Effects {
                shadow: e.shadow.map(|s| Shadow {
                    enabled: s.enabled.unwrap_or(false),
                    distance: s.distance,
                    size: s.size,
                    opacity: s.opacity,
                    angle: s.angle,
                }),
                glow: e.glow.map(|g| Glow {
                    enabled: g.enabled.unwrap_or(false),
                    size: g.size,
                    opacity: g.opacity,
                }),
                stroke: e.stroke.map(|s| Stroke {
                    enabled: s.enabled.unwrap_or(false),
                    size: s.size,
                    opacity: s.opacity,
                }),
            })
            .unwrap_or_default();

        let typography = Typography {
            font_size: raw.font_size,
            color: raw.color,
            font_weight: raw.font_weight.map(String::from),
            font_style: raw.font_style.map(String::from),
            line_height: raw.line_height,
            letter_spacing: raw.letter_spacing,
            font_family: raw.font_family,
        };

        let fill = Fill {
            background_color: raw.styles.and_then(|s| s.background_color),
        };

        Ok(LayerNode {
            name: raw.name.unwrap_or(name),
            kind,
            bounds,
            blend,
            effects,
            typography,
            fill,
        })
    }

    fn bounding_box(&self, raw: RawBox, path: &str) -> Result<BoundingBox, ModelError> {
        for (field, value) in [
            ("left", raw.left),
            ("top", raw.top),
            ("width", raw.width),
            ("height", raw.height),
        ] {
            if value.is_none() {
                self.check(path, &format!("missing `bbox.{field}`"))?;
            }
        }
        Ok(raw.lenient())
    }

    /// Take a required string field, defaulting to empty when lenient.
    fn required(
        &self,
        value: Option<String>,
        field: &str,
        path: &str,
    ) -> Result<String, ModelError> {
        match value {
            Some(value) => Ok(value),
            None => {
                self.check(path, &format!("missing `{field}`"))?;
                Ok(String::new())
            }
        }
    }

    /// Report a structural problem: an error in strict mode, a log line otherwise.
    fn check(&self, path: &str, message: &str) -> Result<(), ModelError> {
        match self.validation {
            Validation::Strict => Err(ModelError::Invalid {
                path: path.to_string(),
                message: message.to_string(),
            }),
            Validation::Lenient => {
                tracing::debug!(path, message, "Incomplete layer");
                Ok(())
            }
        }
    }

    fn malformed(
        &self,
        name: String,
        path: &str,
        message: String,
    ) -> Result<LayerNode, ModelError> {
        match self.validation {
            Validation::Strict => Err(ModelError::Invalid {
                path: path.to_string(),
                message,
            }),
            Validation::Lenient => {
                tracing::warn!(path, error = %message, "Dropping malformed layer");
                Ok(LayerNode::new(
                    name,
                    LayerKind::Unsupported(Unsupported::Malformed(message)),
                    None,
                ))
            }
        }
    }
}

/// Read a canvas dimension from the metadata object. Anything that is not a
/// pixel count fitting `u32` is ignored so the default canvas applies.
fn canvas_dimension(metadata: &Value, field: &str) -> Option<u32> {
    let value = metadata.get(field).filter(|v| !v.is_null())?;
    let pixels = value.as_u64().and_then(|n| u32::try_from(n).ok());
    if pixels.is_none() {
        tracing::warn!(field, value = %value, "Ignoring malformed canvas size");
    }
    pixels
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    metadata: Value,
    layers: Vec<Value>,
}


#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLayer {
    name: Option<String>,
    kind: Option<String>,
    content_type: Option<String>,
    bbox: Option<RawBox>,
    children: Option<Vec<Value>>,
    text: Option<String>,
    src: Option<String>,
    blend: Option<RawBlend>,
    effects: Option<RawEffects>,
    font_size: Option<f64>,
    color: Option<String>,
    font_weight: Option<Keyword>,
    font_style: Option<Keyword>,
    line_height: Option<f64>,
    letter_spacing: Option<f64>,
    font_family: Option<String>,
    styles: Option<RawFill>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBox {
    left: Option<i64>,
    top: Option<i64>,
    width: Option<i64>,
    height: Option<i64>,
}

impl RawBox {
    fn lenient(&self) -> BoundingBox {
        BoundingBox::new(
            self.left.unwrap_or(0),
            self.top.unwrap_or(0),
            self.width.unwrap_or(0),
            self.height.unwrap_or(0),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBlend {
    opacity: Option<f64>,
    blend_mode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEffects {
    shadow: Option<RawShadow>,
    glow: Option<RawGlow>,
    stroke: Option<RawStroke>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawShadow {
    enabled: Option<bool>,
    distance: Option<f64>,
    size: Option<f64>,
    opacity: Option<f64>,
    angle: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGlow {
    enabled: Option<bool>,
    size: Option<f64>,
    opacity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStroke {
    enabled: Option<bool>,
    size: Option<f64>,
    opacity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFill {
    background_color: Option<String>,
}

/// A CSS keyword that producers write either as a string (`"bold"`) or a number (`700`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Keyword {
    Text(String),
    Number(serde_json::Number),
}

impl From<Keyword> for String {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Text(text) => text,
            Keyword::Number(number) => number.to_string(),
        }
    }
}
