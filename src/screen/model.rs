use crate::classify::SemanticType;
use crate::node::Geometry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate screen identity, assigned once at ingestion.
///
/// Layer names are not unique, so every join inside the engine goes through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(pub u32);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::Desktop => "desktop",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    Horizontal,
    Vertical,
    Grid,
    Mixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentStyle {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub corner_radius: Option<f64>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub text: Option<String>,
    /// Observed padding and item spacing values.
    pub spacing: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStructure {
    pub id: String,
    pub name: String,
    /// The host's raw type tag.
    pub node_type: String,
    pub semantic_type: Option<SemanticType>,
    pub geometry: Geometry,
    pub style: ComponentStyle,
    pub children: Vec<ComponentStructure>,
}

impl ComponentStructure {
    /// This component and all of its descendants, pre-order.
    pub fn descendants(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Semantic types of the children, sorted, for structural comparison.
    pub fn child_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = self
            .children
            .iter()
            .map(|c| c.semantic_type.map_or("none", |t| t.as_str()))
            .collect();
        types.sort_unstable();
        types
    }
}

/// Pre-order traversal over a component forest.
pub struct PreOrder<'a> {
    stack: Vec<&'a ComponentStructure>,
}

impl<'a> PreOrder<'a> {
    pub fn over(components: &'a [ComponentStructure]) -> Self {
        Self {
            stack: components.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a ComponentStructure;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// Distinct design-system values observed on a screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignStats {
    pub color_count: usize,
    pub font_size_count: usize,
    pub spacing_count: usize,
    pub component_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenStructure {
    pub id: ScreenId,
    pub name: String,
    /// Owning page or section name.
    pub page: String,
    pub geometry: Geometry,
    pub device_type: DeviceType,
    pub layout_type: LayoutType,
    pub background_color: Option<String>,
    pub components: Vec<ComponentStructure>,
    pub stats: DesignStats,
}

impl ScreenStructure {
    /// A minimal screen used when a subtree cannot be extracted.
    pub fn fallback(id: ScreenId, name: &str, page: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            page: page.to_string(),
            geometry: Geometry::default(),
            device_type: DeviceType::Mobile,
            layout_type: LayoutType::Mixed,
            background_color: None,
            components: Vec::new(),
            stats: DesignStats::default(),
        }
    }

    /// Every component on the screen, pre-order.
    pub fn all_components(&self) -> PreOrder<'_> {
        PreOrder::over(&self.components)
    }

    /// Multiset of semantic types, in pre-order.
    pub fn component_signature(&self) -> Vec<SemanticType> {
        self.all_components().filter_map(|c| c.semantic_type).collect()
    }
}
