use super::consistency::ConsistencyReport;
use crate::classify::SemanticType;
use crate::config::PatternConfig;
use crate::flow::FlowStructure;
use crate::screen::{ComponentStructure, PreOrder, ScreenStructure};
use crate::style::StyleSummary;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

const MAX_CONFIDENCE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Navigation,
    Form,
    CardLayout,
    List,
    Modal,
    Tab,
    DataDisplay,
    Action,
    Media,
    Search,
}

impl PatternKind {
    pub const ALL: [PatternKind; 10] = [
        PatternKind::Navigation,
        PatternKind::Form,
        PatternKind::CardLayout,
        PatternKind::List,
        PatternKind::Modal,
        PatternKind::Tab,
        PatternKind::DataDisplay,
        PatternKind::Action,
        PatternKind::Media,
        PatternKind::Search,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Navigation => "navigation",
            PatternKind::Form => "form",
            PatternKind::CardLayout => "card_layout",
            PatternKind::List => "list",
            PatternKind::Modal => "modal",
            PatternKind::Tab => "tab",
            PatternKind::DataDisplay => "data_display",
            PatternKind::Action => "action",
            PatternKind::Media => "media",
            PatternKind::Search => "search",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub kind: PatternKind,
    /// In [0, 100].
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub patterns: Vec<DetectedPattern>,
    pub type_counts: BTreeMap<SemanticType, usize>,
    pub total_components: usize,
    pub complexity: Complexity,
    pub consistency: ConsistencyReport,
}

impl PatternAnalysis {
    pub fn has(&self, kind: PatternKind) -> bool {
        self.patterns.iter().any(|p| p.kind == kind)
    }

    pub fn confidence(&self, kind: PatternKind) -> Option<f64> {
        self.patterns.iter().find(|p| p.kind == kind).map(|p| p.confidence)
    }
}

/// Semantic type frequencies plus the longest run of structurally identical components.
struct PatternInputs {
    counts: BTreeMap<SemanticType, usize>,
    total: usize,
    max_repeats: usize,
}

impl PatternInputs {
    fn gather<'a>(components: impl Iterator<Item = &'a ComponentStructure>) -> Self {
        let mut counts = BTreeMap::new();
        let mut signatures: BTreeMap<String, usize> = BTreeMap::new();
        let mut total = 0;
        for component in components {
            total += 1;
            if let Some(semantic_type) = component.semantic_type {
                *counts.entry(semantic_type).or_insert(0) += 1;
            }
            if !component.children.is_empty() {
                let signature = format!(
                    "{}:{}",
                    component.semantic_type.map_or("none", |t| t.as_str()),
                    component.child_types().join(",")
                );
                *signatures.entry(signature).or_insert(0) += 1;
            }
        }
        Self {
            counts,
            total,
            max_repeats: signatures.values().copied().max().unwrap_or(0),
        }
    }

    fn count(&self, semantic_type: SemanticType) -> f64 {
        self.counts.get(&semantic_type).copied().unwrap_or(0) as f64
    }
}

/// Detects UI patterns and scores consistency over a set of components.
pub struct PatternAnalyzer {
    config: PatternConfig,
}

impl PatternAnalyzer {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    pub fn analyze_screen(&self, screen: &ScreenStructure) -> PatternAnalysis {
        debug!(screen = %screen.name, "analyzing screen patterns");
        self.analyze(screen.all_components(), StyleSummary::from_screen(screen))
    }

    pub fn analyze_components(&self, components: &[ComponentStructure]) -> PatternAnalysis {
        self.analyze(
            PreOrder::over(components),
            StyleSummary::from_components(PreOrder::over(components)),
        )
    }

    /// Analyzes every screen of a flow as one component set.
    pub fn analyze_flow(&self, flow: &FlowStructure) -> PatternAnalysis {
        debug!(flow = %flow.name, "analyzing flow patterns");
        self.analyze(
            flow.screens.iter().flat_map(|s| s.all_components()),
            StyleSummary::from_screens(&flow.screens),
        )
    }

    fn analyze<'a>(
        &self,
        components: impl Iterator<Item = &'a ComponentStructure>,
        style: StyleSummary,
    ) -> PatternAnalysis {
        let inputs = PatternInputs::gather(components);
        let patterns: Vec<DetectedPattern> = PatternKind::ALL
            .iter()
            .filter_map(|kind| {
                self.evaluate(*kind, &inputs).map(|confidence| DetectedPattern {
                    kind: *kind,
                    confidence: confidence.clamp(0.0, MAX_CONFIDENCE),
                })
            })
            .collect();

        let complexity = self.complexity(&inputs, patterns.len());
        PatternAnalysis {
            patterns,
            total_components: inputs.total,
            type_counts: inputs.counts,
            complexity,
            consistency: ConsistencyReport::from_style(&style, &self.config),
        }
    }

    /// Returns the pattern's confidence when its predicate holds.
    fn evaluate(&self, kind: PatternKind, inputs: &PatternInputs) -> Option<f64> {
        use SemanticType::*;
        let c = |t| inputs.count(t);

        let (holds, confidence) = match kind {
            PatternKind::Navigation => (
                c(Navigation) >= 1.0,
                50.0 * c(Navigation) + 5.0 * c(Button) + 5.0 * c(Icon),
            ),
            PatternKind::Form => (
                c(Input) >= 2.0 || (c(Input) >= 1.0 && c(Button) >= 1.0),
                25.0 * c(Input) + 15.0 * c(Button) + 10.0 * c(Label),
            ),
            PatternKind::CardLayout => (c(Card) >= 2.0, 30.0 * c(Card) + 5.0 * c(Image)),
            PatternKind::List => (
                inputs.max_repeats >= self.config.list_min_repeats,
                20.0 * inputs.max_repeats as f64,
            ),
            PatternKind::Modal => (
                c(Heading) >= 1.0
                    && (1.0..=2.0).contains(&c(Button))
                    && c(Navigation) == 0.0
                    && c(Input) == 0.0
                    && inputs.total <= 12,
                40.0 + 20.0 * c(Button) + 5.0 * c(Text),
            ),
            PatternKind::Tab => (
                c(Navigation) >= 1.0 && c(Button) + c(Icon) >= 3.0,
                20.0 * c(Navigation) + 10.0 * (c(Button) + c(Icon)),
            ),
            PatternKind::DataDisplay => (
                c(Label) + c(Text) >= 5.0,
                8.0 * (c(Label) + c(Text)) + 10.0 * c(Heading),
            ),
            PatternKind::Action => (c(Button) >= 2.0, 20.0 * c(Button)),
            PatternKind::Media => (c(Image) >= 1.0, 30.0 * c(Image) + 5.0 * c(Icon)),
            PatternKind::Search => (
                c(Input) == 1.0 && c(Icon) >= 1.0,
                50.0 + 15.0 * c(Icon) + 10.0 * c(Button),
            ),
        };
        holds.then(|| confidence.min(MAX_CONFIDENCE))
    }

    fn complexity(&self, inputs: &PatternInputs, pattern_count: usize) -> Complexity {
        let score = [
            inputs.total > self.config.complex_component_count,
            pattern_count > self.config.complex_pattern_count,
            inputs.counts.len() > self.config.complex_distinct_types,
        ]
        .into_iter()
        .filter(|hit| *hit)
        .count();
        match score {
            0 => Complexity::Low,
            1 => Complexity::Medium,
            _ => Complexity::High,
        }
    }

    /// Kinds detected on at least one of `analyses`, most frequent first.
    pub fn common_patterns(analyses: &[PatternAnalysis]) -> Vec<(PatternKind, usize)> {
        analyses
            .iter()
            .flat_map(|a| a.patterns.iter().map(|p| p.kind))
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
            .collect()
    }
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new(PatternConfig::default())
    }
}
