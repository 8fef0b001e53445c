//! Heuristic semantic classification of single design nodes.

use crate::config::ClassifierConfig;
use crate::node::DesignNode;
use serde::{Deserialize, Serialize};
use std::fmt;

mod rules;
mod signals;

pub use rules::*;
pub use signals::NodeSignals;

/// The inferred functional role of a UI node.
///
/// The first six variants come from classification rules; the rest are
/// structural fallbacks used when no rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Button,
    Input,
    Heading,
    Label,
    Card,
    Navigation,
    Container,
    Text,
    Image,
    Icon,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Button => "button",
            SemanticType::Input => "input",
            SemanticType::Heading => "heading",
            SemanticType::Label => "label",
            SemanticType::Card => "card",
            SemanticType::Navigation => "navigation",
            SemanticType::Container => "container",
            SemanticType::Text => "text",
            SemanticType::Image => "image",
            SemanticType::Icon => "icon",
        }
    }

    /// Lower ranks win ties between equally supported detections.
    fn tie_break_rank(&self) -> u8 {
        match self {
            SemanticType::Button => 0,
            SemanticType::Input => 1,
            SemanticType::Navigation => 2,
            SemanticType::Card => 3,
            SemanticType::Heading => 4,
            SemanticType::Label => 5,
            SemanticType::Container => 6,
            SemanticType::Text => 7,
            SemanticType::Image => 8,
            SemanticType::Icon => 9,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Boolean verdict per classifiable type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFlags {
    pub is_button: bool,
    pub is_input: bool,
    pub is_heading: bool,
    pub is_label: bool,
    pub is_card: bool,
    pub is_navigation: bool,
}

impl TypeFlags {
    fn set(&mut self, semantic_type: SemanticType) {
        match semantic_type {
            SemanticType::Button => self.is_button = true,
            SemanticType::Input => self.is_input = true,
            SemanticType::Heading => self.is_heading = true,
            SemanticType::Label => self.is_label = true,
            SemanticType::Card => self.is_card = true,
            SemanticType::Navigation => self.is_navigation = true,
            _ => {}
        }
    }
}

/// The reasons behind one detected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEvidence {
    pub semantic_type: SemanticType,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub flags: TypeFlags,
    /// Detected types in rule evaluation order.
    pub evidence: Vec<TypeEvidence>,
    pub confidence: f64,
    /// The single best guess among the detected types.
    pub best: Option<SemanticType>,
}

impl ClassificationResult {
    pub fn detected(&self) -> impl Iterator<Item = SemanticType> + '_ {
        self.evidence.iter().map(|e| e.semantic_type)
    }

    pub fn is(&self, semantic_type: SemanticType) -> bool {
        self.detected().any(|t| t == semantic_type)
    }

    /// All reasons, prefixed with the type they support.
    pub fn reasons(&self) -> Vec<String> {
        self.evidence
            .iter()
            .flat_map(|e| e.reasons.iter().map(move |r| format!("{}: {}", e.semantic_type, r)))
            .collect()
    }
}

/// Classifies nodes against an ordered set of `TypeRule`s.
///
/// The classifier holds only immutable configuration, so one instance can be
/// shared across threads.
pub struct SemanticClassifier {
    config: ClassifierConfig,
    rules: Vec<Box<dyn TypeRule>>,
}

impl SemanticClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            rules: rules::default_rules(),
        }
    }

    /// Adds a rule, or replaces the built-in rule for the same type.
    pub fn with_rule(mut self, rule: Box<dyn TypeRule>) -> Self {
        let semantic_type = rule.semantic_type();
        match self.rules.iter().position(|r| r.semantic_type() == semantic_type) {
            Some(index) => self.rules[index] = rule,
            None => self.rules.push(rule),
        }
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, node: &DesignNode) -> ClassificationResult {
        self.classify_with_ancestors(node, &[])
    }

    /// Classifies a node, letting ancestor names contribute context reasons.
    pub fn classify_with_ancestors(&self, node: &DesignNode, ancestor_names: &[&str]) -> ClassificationResult {
        let signals = NodeSignals::extract(node, ancestor_names, &self.config);

        let mut flags = TypeFlags::default();
        let evidence: Vec<TypeEvidence> = self
            .rules
            .iter()
            .filter_map(|rule| {
                rule.evaluate(&signals, &self.config).map(|reasons| TypeEvidence {
                    semantic_type: rule.semantic_type(),
                    reasons,
                })
            })
            .collect();
        for e in &evidence {
            flags.set(e.semantic_type);
        }

        let confidence = match evidence.as_slice() {
            [] => 0.0,
            [single] => (self.config.single_type_base
                + self.config.per_reason_bonus * single.reasons.len() as f64)
                .min(1.0),
            many => (self.config.single_type_base - self.config.ambiguity_penalty * many.len() as f64)
                .max(self.config.ambiguity_floor),
        };

        let best = evidence
            .iter()
            .min_by(|a, b| {
                b.reasons
                    .len()
                    .cmp(&a.reasons.len())
                    .then(a.semantic_type.tie_break_rank().cmp(&b.semantic_type.tie_break_rank()))
            })
            .map(|e| e.semantic_type);

        ClassificationResult {
            flags,
            evidence,
            confidence: confidence.clamp(0.0, 1.0),
            best,
        }
    }

    /// The single semantic type recorded on a component: the classifier's best guess,
    /// falling back to a structural type when no rule fires.
    pub fn semantic_type(&self, node: &DesignNode, ancestor_names: &[&str]) -> Option<SemanticType> {
        self.classify_with_ancestors(node, ancestor_names)
            .best
            .or_else(|| self.structural_type(node))
    }

    fn structural_type(&self, node: &DesignNode) -> Option<SemanticType> {
        let small = node.geometry.width <= self.config.icon_max_size
            && node.geometry.height <= self.config.icon_max_size;
        if node.style.has_image_fill() {
            Some(SemanticType::Image)
        } else if small && (node.kind.is_vector_like() || node.name.to_lowercase().contains("icon")) {
            Some(SemanticType::Icon)
        } else if node.is_text() {
            Some(SemanticType::Text)
        } else if !node.children.is_empty() {
            Some(SemanticType::Container)
        } else {
            None
        }
    }
}

impl Default for SemanticClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}
