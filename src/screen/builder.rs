use super::layout::{device_type, layout_type};
use super::model::*;
use crate::classify::SemanticClassifier;
use crate::config::ScreenConfig;
use crate::error::ExtractionError;
use crate::node::{DesignForest, DesignNode, ScreenRoot};
use crate::style::StyleSummary;
use ahash::AHashMap;
use tracing::{debug, warn};

/// Turns top-level container nodes into typed `ScreenStructure`s.
pub struct ScreenBuilder {
    config: ScreenConfig,
    classifier: SemanticClassifier,
}

impl ScreenBuilder {
    pub fn new(config: ScreenConfig, classifier: SemanticClassifier) -> Self {
        Self { config, classifier }
    }

    pub fn classifier(&self) -> &SemanticClassifier {
        &self.classifier
    }

    /// Builds every screen in the forest, assigning sequential `ScreenId`s in document order.
    pub fn build_all(&self, forest: &DesignForest) -> Vec<ScreenStructure> {
        let roots = forest.screen_roots();
        warn_on_duplicate_names(&roots);

        let screens: Vec<ScreenStructure> = roots
            .into_iter()
            .enumerate()
            .map(|(index, root)| self.build(ScreenId(index as u32), root))
            .collect();
        debug!(count = screens.len(), "built screen structures");
        screens
    }

    /// Builds one screen. Never fails: an unusable subtree yields a fallback screen.
    pub fn build(&self, id: ScreenId, root: ScreenRoot<'_>) -> ScreenStructure {
        match self.try_build(id, root) {
            Ok(screen) => screen,
            Err(e) => {
                warn!(screen = %root.node.name, error = %e, "using fallback screen structure");
                ScreenStructure::fallback(id, &root.node.name, root.container)
            }
        }
    }

    fn try_build(&self, id: ScreenId, root: ScreenRoot<'_>) -> Result<ScreenStructure, ExtractionError> {
        let node = root.node;
        if node.geometry.is_degenerate() {
            return Err(ExtractionError::DegenerateGeometry {
                name: node.name.clone(),
                width: node.geometry.width,
                height: node.geometry.height,
            });
        }

        let mut ancestors = vec![node.name.as_str()];
        let components = self.extract_children(node, 1, &mut ancestors);

        let summary = StyleSummary::from_components(PreOrder::over(&components));
        let component_count = PreOrder::over(&components).count();
        let background_color = node.style.primary_color().map(str::to_string);
        let mut stats = summary.stats(component_count);
        if let Some(color) = &background_color {
            if !summary.colors.contains(color) {
                stats.color_count += 1;
            }
        }

        Ok(ScreenStructure {
            id,
            name: node.name.clone(),
            page: root.container.to_string(),
            geometry: node.geometry,
            device_type: device_type(&node.geometry, &self.config),
            layout_type: layout_type(node, &self.config),
            background_color,
            components,
            stats,
        })
    }

    /// Extracts the visible children of `parent`, dropping any that fail.
    fn extract_children<'n>(
        &self,
        parent: &'n DesignNode,
        depth: usize,
        ancestors: &mut Vec<&'n str>,
    ) -> Vec<ComponentStructure> {
        parent
            .children
            .iter()
            .filter(|child| child.visible)
            .filter_map(|child| match self.extract_component(child, depth, ancestors) {
                Ok(component) => Some(component),
                Err(e) => {
                    warn!(parent = %parent.name, error = %e, "dropping component");
                    None
                }
            })
            .collect()
    }

    fn extract_component<'n>(
        &self,
        node: &'n DesignNode,
        depth: usize,
        ancestors: &mut Vec<&'n str>,
    ) -> Result<ComponentStructure, ExtractionError> {
        if depth > self.config.max_depth {
            return Err(ExtractionError::DepthExceeded {
                node_id: node.id.clone(),
                depth,
                limit: self.config.max_depth,
            });
        }

        let semantic_type = self.classifier.semantic_type(node, ancestors);

        ancestors.push(&node.name);
        let children = self.extract_children(node, depth + 1, ancestors);
        ancestors.pop();

        let fill_color = node.style.primary_color().map(str::to_string);
        let (background_color, text_color) = if node.is_text() {
            (None, fill_color)
        } else {
            (fill_color, None)
        };

        Ok(ComponentStructure {
            id: node.id.clone(),
            name: node.name.clone(),
            node_type: node.kind.tag().to_string(),
            semantic_type,
            geometry: node.geometry,
            style: ComponentStyle {
                background_color,
                text_color,
                corner_radius: Some(node.style.corner_radius).filter(|r| *r > 0.0),
                font_size: node.style.font_size,
                font_weight: node.style.font_weight,
                text: node.text.clone(),
                spacing: node.style.spacing_values(),
            },
            children,
        })
    }
}

impl Default for ScreenBuilder {
    fn default() -> Self {
        Self::new(ScreenConfig::default(), SemanticClassifier::default())
    }
}

fn warn_on_duplicate_names(roots: &[ScreenRoot<'_>]) {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for root in roots {
        *counts.entry(root.node.name.as_str()).or_default() += 1;
    }
    let mut duplicates: Vec<&str> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect();
    if !duplicates.is_empty() {
        duplicates.sort_unstable();
        warn!(
            names = ?duplicates,
            "screen names are not unique; screens are tracked by surrogate id"
        );
    }
}
