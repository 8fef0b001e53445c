use super::definition::*;
use super::raw::{RawColor, RawDocument, RawEffect, RawNode, RawPaint};
use crate::error::ConversionError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A trait for host export models that can be converted into a `DesignForest`.
///
/// This is the ingestion boundary: every defaulting rule is applied here, once,
/// so the rest of the engine never re-validates node properties.
///
/// # Example
///
/// ```rust
/// use flowscope::error::ConversionError;
/// use flowscope::node::{DesignForest, DesignNode, Geometry, IntoDesignForest, NodeKind};
///
/// struct MyLayer { title: String, w: f64, h: f64 }
/// struct MyExport { layers: Vec<MyLayer> }
///
/// impl IntoDesignForest for MyExport {
///     fn into_forest(self) -> Result<DesignForest, ConversionError> {
///         let roots = self
///             .layers
///             .into_iter()
///             .enumerate()
///             .map(|(i, layer)| DesignNode {
///                 id: i.to_string(),
///                 name: layer.title,
///                 kind: NodeKind::Frame,
///                 visible: true,
///                 geometry: Geometry::new(0.0, 0.0, layer.w, layer.h),
///                 ..Default::default()
///             })
///             .collect();
///         Ok(DesignForest::new(roots))
///     }
/// }
/// ```
pub trait IntoDesignForest {
    /// Consumes the export and converts it into the canonical node model.
    fn into_forest(self) -> Result<DesignForest, ConversionError>;
}

impl IntoDesignForest for RawDocument {
    fn into_forest(self) -> Result<DesignForest, ConversionError> {
        if self.document.is_none() && self.nodes.is_empty() {
            return Err(ConversionError::ValidationError(
                "export contains neither a document nor any nodes".to_string(),
            ));
        }
        let roots: Vec<RawNode> = self.document.into_iter().chain(self.nodes).collect();
        roots.into_forest()
    }
}

impl IntoDesignForest for Vec<RawNode> {
    fn into_forest(self) -> Result<DesignForest, ConversionError> {
        let roots = self
            .into_iter()
            .enumerate()
            .map(|(index, raw)| convert_node(raw, &index.to_string()))
            .collect();
        Ok(DesignForest::new(roots))
    }
}

/// Reads a finite number, treating anything else (strings, null, NaN) as absent.
fn number(value: &Option<Value>) -> Option<f64> {
    value.as_ref().and_then(Value::as_f64).filter(|n| n.is_finite())
}

fn convert_node(raw: RawNode, path: &str) -> DesignNode {
    let bounds = raw.bounds.unwrap_or_default();
    let geometry = Geometry {
        x: number(&raw.x).or_else(|| number(&bounds.x)).unwrap_or(0.0),
        y: number(&raw.y).or_else(|| number(&bounds.y)).unwrap_or(0.0),
        width: number(&raw.width)
            .or_else(|| number(&bounds.width))
            .unwrap_or(0.0)
            .max(0.0),
        height: number(&raw.height)
            .or_else(|| number(&bounds.height))
            .unwrap_or(0.0)
            .max(0.0),
    };

    let (font_size, font_weight) = match &raw.style {
        Some(style) => (
            number(&raw.font_size).or_else(|| number(&style.font_size)),
            number(&raw.font_weight).or_else(|| number(&style.font_weight)),
        ),
        None => (number(&raw.font_size), number(&raw.font_weight)),
    };

    let style = NodeStyle {
        fills: paints(raw.fills),
        strokes: paints(raw.strokes),
        effects: effects(raw.effects),
        corner_radius: number(&raw.corner_radius).unwrap_or(0.0).max(0.0),
        layout_direction: raw.layout_mode.as_deref().and_then(layout_direction),
        padding: Padding {
            top: number(&raw.padding_top).unwrap_or(0.0),
            right: number(&raw.padding_right).unwrap_or(0.0),
            bottom: number(&raw.padding_bottom).unwrap_or(0.0),
            left: number(&raw.padding_left).unwrap_or(0.0),
        },
        item_spacing: number(&raw.item_spacing).unwrap_or(0.0),
        font_size,
        font_weight,
    };

    let children = raw
        .children
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, child)| convert_node(child, &format!("{}:{}", path, index)))
        .collect();

    DesignNode {
        id: raw.id.unwrap_or_else(|| path.to_string()),
        name: raw.name.unwrap_or_default(),
        kind: raw
            .node_type
            .as_deref()
            .map(NodeKind::from_tag)
            .unwrap_or_default(),
        visible: raw.visible.unwrap_or(true),
        geometry,
        style,
        text: raw.characters,
        children,
    }
}

/// Deserializes each array element on its own, skipping malformed ones.
/// Non-array values (e.g. a "mixed" sentinel) yield an empty list.
fn lenient_list<T: DeserializeOwned>(value: Option<Value>) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn paints(value: Option<Value>) -> Vec<Paint> {
    lenient_list::<RawPaint>(value)
        .into_iter()
        .filter(|p| p.visible.unwrap_or(true))
        .map(|p| {
            let kind = match p.paint_type.as_deref().map(str::to_ascii_uppercase).as_deref() {
                Some("SOLID") => PaintKind::Solid,
                Some("IMAGE") => PaintKind::Image,
                Some(t) if t.starts_with("GRADIENT") => PaintKind::Gradient,
                None if p.color.is_some() => PaintKind::Solid,
                _ => PaintKind::Other,
            };
            Paint {
                kind,
                color: p.color.as_ref().map(hex_color),
                opacity: p.opacity.filter(|o| o.is_finite()).unwrap_or(1.0),
            }
        })
        .collect()
}

fn effects(value: Option<Value>) -> Vec<EffectKind> {
    lenient_list::<RawEffect>(value)
        .into_iter()
        .filter(|e| e.visible.unwrap_or(true))
        .map(|e| match e.effect_type.as_deref().map(str::to_ascii_uppercase).as_deref() {
            Some("DROP_SHADOW") => EffectKind::DropShadow,
            Some("INNER_SHADOW") => EffectKind::InnerShadow,
            Some("LAYER_BLUR") | Some("BACKGROUND_BLUR") => EffectKind::Blur,
            _ => EffectKind::Other,
        })
        .collect()
}

fn layout_direction(mode: &str) -> Option<LayoutDirection> {
    match mode.to_ascii_uppercase().as_str() {
        "HORIZONTAL" => Some(LayoutDirection::Horizontal),
        "VERTICAL" => Some(LayoutDirection::Vertical),
        "GRID" => Some(LayoutDirection::Grid),
        _ => None,
    }
}

/// Converts `[0, 1]` channels to `#RRGGBB`.
pub fn hex_color(color: &RawColor) -> String {
    let channel = |c: f64| {
        let c = if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 };
        (c * 255.0).round() as u8
    };
    format!(
        "#{:02X}{:02X}{:02X}",
        channel(color.r),
        channel(color.g),
        channel(color.b)
    )
}
