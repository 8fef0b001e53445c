//! One entry point running the whole engine over a design forest.

use crate::classify::{SemanticClassifier, TypeRule};
use crate::collaborators::{CodeGenerator, ErrorReporter, ProgressSink, ThemeGenerator, ThemeTokens};
use crate::config::EngineConfig;
use crate::error::{ConfigError, IngestError};
use crate::flow::strategy::DetectionStrategy;
use crate::flow::{FlowDetectionResult, FlowDetector, FlowDetectorBuilder};
use crate::node::{DesignForest, IntoDesignForest, NodeIndex, RawDocument};
use crate::patterns::{PatternAnalysis, PatternAnalyzer};
use crate::roles::{RoleDetector, UserRole};
use crate::screen::{ScreenBuilder, ScreenId, ScreenStructure};
use crate::style::StyleSummary;
use serde::Serialize;
use tracing::info;

/// Everything the engine learned from one design forest.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeReport {
    pub screens: Vec<ScreenStructure>,
    pub roles: Vec<UserRole>,
    pub flows: FlowDetectionResult,
    /// One analysis per entry of `screens`, same order.
    pub screen_patterns: Vec<PatternAnalysis>,
    pub style: StyleSummary,
}

impl KnowledgeReport {
    pub fn theme(&self, generator: &dyn ThemeGenerator) -> ThemeTokens {
        generator.generate(&self.style)
    }

    /// Generates code for every screen against a theme built from the report's style.
    pub fn generate_code(
        &self,
        theme: &dyn ThemeGenerator,
        code: &dyn CodeGenerator,
    ) -> Vec<(ScreenId, String)> {
        let tokens = self.theme(theme);
        self.screens
            .iter()
            .map(|screen| (screen.id, code.generate(screen, &tokens)))
            .collect()
    }
}

pub struct KnowledgePipeline {
    screens: ScreenBuilder,
    roles: RoleDetector,
    flows: FlowDetector,
    patterns: PatternAnalyzer,
}

pub struct KnowledgePipelineBuilder {
    config: EngineConfig,
    classifier_rules: Vec<Box<dyn TypeRule>>,
    flows: FlowDetectorBuilder,
}

impl KnowledgePipelineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        let flows = FlowDetector::builder(&config);
        Self {
            config,
            classifier_rules: Vec::new(),
            flows,
        }
    }

    /// Replaces the classifier's built-in rule for the same semantic type.
    pub fn with_classifier_rule(mut self, rule: Box<dyn TypeRule>) -> Self {
        self.classifier_rules.push(rule);
        self
    }

    pub fn with_strategy(mut self, strategy: Box<dyn DetectionStrategy>) -> Self {
        self.flows = self.flows.with_strategy(strategy);
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.flows = self.flows.with_progress(progress);
        self
    }

    pub fn with_error_reporter(mut self, reporter: Box<dyn ErrorReporter>) -> Self {
        self.flows = self.flows.with_error_reporter(reporter);
        self
    }

    pub fn build(self) -> Result<KnowledgePipeline, ConfigError> {
        let flows = self.flows.build()?;
        let classifier = self
            .classifier_rules
            .into_iter()
            .fold(SemanticClassifier::new(self.config.classifier), |classifier, rule| {
                classifier.with_rule(rule)
            });

        Ok(KnowledgePipeline {
            screens: ScreenBuilder::new(self.config.screen, classifier),
            roles: RoleDetector::new(self.config.roles),
            flows,
            patterns: PatternAnalyzer::new(self.config.patterns),
        })
    }
}

impl KnowledgePipeline {
    pub fn builder(config: EngineConfig) -> KnowledgePipelineBuilder {
        KnowledgePipelineBuilder::new(config)
    }

    pub fn screen_builder(&self) -> &ScreenBuilder {
        &self.screens
    }

    pub fn role_detector(&self) -> &RoleDetector {
        &self.roles
    }

    pub fn flow_detector(&self) -> &FlowDetector {
        &self.flows
    }

    pub fn pattern_analyzer(&self) -> &PatternAnalyzer {
        &self.patterns
    }

    /// Runs screens, roles, flows and patterns over `forest`, in that order.
    pub fn analyze(&self, forest: &DesignForest) -> KnowledgeReport {
        let screens = self.screens.build_all(forest);
        let roles = self.roles.detect(&NodeIndex::build(forest));
        let flows = self.flows.detect(&screens, &roles);
        let screen_patterns = screens
            .iter()
            .map(|screen| self.patterns.analyze_screen(screen))
            .collect();
        let style = StyleSummary::from_screens(&screens);

        info!(
            screens = screens.len(),
            roles = roles.len(),
            flows = flows.flows.len(),
            "knowledge extraction complete"
        );
        KnowledgeReport {
            screens,
            roles,
            flows,
            screen_patterns,
            style,
        }
    }

    /// Parses a host export and analyzes it.
    pub fn analyze_json(&self, json: &str) -> Result<KnowledgeReport, IngestError> {
        let forest = RawDocument::from_json(json)?.into_forest()?;
        Ok(self.analyze(&forest))
    }
}
