use crate::config::{ClassifierConfig, find_keyword};
use crate::node::DesignNode;

/// The independent observations a classification rule can draw on, read once per node.
#[derive(Debug, Clone)]
pub struct NodeSignals {
    /// Lowercased layer name.
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub is_text: bool,
    /// True when the node has a text descendant (not counting itself).
    pub contains_text: bool,
    pub has_fill: bool,
    pub has_stroke: bool,
    pub has_effects: bool,
    pub corner_radius: f64,
    pub child_count: usize,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    /// Set when an ancestor's name matches a navigation keyword.
    pub in_navigation: bool,
}

impl NodeSignals {
    pub fn extract(node: &DesignNode, ancestor_names: &[&str], config: &ClassifierConfig) -> Self {
        let in_navigation = ancestor_names.iter().any(|name| {
            find_keyword(&name.to_lowercase(), &config.navigation_keywords).is_some()
        });
        Self {
            name: node.name.to_lowercase(),
            width: node.geometry.width,
            height: node.geometry.height,
            is_text: node.is_text(),
            contains_text: node.children.iter().any(DesignNode::contains_text),
            has_fill: node.style.has_fill(),
            has_stroke: node.style.has_stroke(),
            has_effects: node.style.has_effects(),
            corner_radius: node.style.corner_radius,
            child_count: node.children.len(),
            font_size: node.style.font_size,
            font_weight: node.style.font_weight,
            in_navigation,
        }
    }
}
