use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A design node as exported by the host, before any defaulting.
///
/// Numeric fields are kept as raw JSON values so that sentinel values such as
/// `"mixed"` or `null` never fail deserialization; they are resolved once during
/// conversion into a [`DesignNode`](super::DesignNode).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type", alias = "nodeType")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,

    #[serde(default)]
    pub x: Option<Value>,
    #[serde(default)]
    pub y: Option<Value>,
    #[serde(default)]
    pub width: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
    #[serde(default, alias = "absoluteBoundingBox")]
    pub bounds: Option<RawBounds>,

    #[serde(default)]
    pub fills: Option<Value>,
    #[serde(default)]
    pub strokes: Option<Value>,
    #[serde(default)]
    pub effects: Option<Value>,
    #[serde(default, alias = "cornerRadius")]
    pub corner_radius: Option<Value>,

    #[serde(default, alias = "layoutMode")]
    pub layout_mode: Option<String>,
    #[serde(default, alias = "paddingTop")]
    pub padding_top: Option<Value>,
    #[serde(default, alias = "paddingRight")]
    pub padding_right: Option<Value>,
    #[serde(default, alias = "paddingBottom")]
    pub padding_bottom: Option<Value>,
    #[serde(default, alias = "paddingLeft")]
    pub padding_left: Option<Value>,
    #[serde(default, alias = "itemSpacing")]
    pub item_spacing: Option<Value>,

    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default, alias = "fontSize")]
    pub font_size: Option<Value>,
    #[serde(default, alias = "fontWeight")]
    pub font_weight: Option<Value>,
    /// REST-style text style block, consulted when the flat font fields are absent.
    #[serde(default)]
    pub style: Option<RawTypeStyle>,

    #[serde(default)]
    pub children: Option<Vec<RawNode>>,
}

/// Bounding box in the REST export format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBounds {
    #[serde(default)]
    pub x: Option<Value>,
    #[serde(default)]
    pub y: Option<Value>,
    #[serde(default)]
    pub width: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTypeStyle {
    #[serde(default, alias = "fontSize")]
    pub font_size: Option<Value>,
    #[serde(default, alias = "fontWeight")]
    pub font_weight: Option<Value>,
}

/// A single paint entry in a fill or stroke list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPaint {
    #[serde(default, rename = "type")]
    pub paint_type: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub color: Option<RawColor>,
}

/// RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawColor {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub g: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default)]
    pub a: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEffect {
    #[serde(default, rename = "type")]
    pub effect_type: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
}

/// A complete host export.
///
/// Accepts either a REST-style file (`{ "name": ..., "document": { ... } }`), a
/// plugin-style selection dump (`{ "nodes": [ ... ] }`), or a bare array of nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub document: Option<RawNode>,
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

impl RawDocument {
    /// Parses any of the supported export shapes.
    pub fn from_json(json: &str) -> Result<Self, IngestError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| IngestError::JsonParseError(e.to_string()))?;
        if value.is_array() {
            let nodes: Vec<RawNode> = serde_json::from_value(value)
                .map_err(|e| IngestError::JsonParseError(e.to_string()))?;
            return Ok(Self {
                name: None,
                document: None,
                nodes,
            });
        }
        serde_json::from_value(value).map_err(|e| IngestError::JsonParseError(e.to_string()))
    }
}
