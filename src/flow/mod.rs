//! Flow detection: clusters screens into user journeys.
//!
//! A `FlowDetector` runs its registered strategies over the screen list, merges
//! overlapping candidates, drops weak ones, assigns owning roles and
//! materializes the survivors into ranked `FlowStructure`s.
//!
//! ```rust
//! use flowscope::config::EngineConfig;
//! use flowscope::flow::FlowDetector;
//!
//! let detector = FlowDetector::builder(&EngineConfig::default()).build().unwrap();
//! let result = detector.detect(&[], &[]);
//! assert!(result.flows.is_empty());
//! ```

use crate::collaborators::{
    DetectionStage, ErrorReporter, NoopProgress, ProgressEvent, ProgressSink, TracingErrorReporter,
};
use crate::config::{EngineConfig, FlowConfig, RoleKeywords};
use crate::error::{ConfigError, DetectionError};
use crate::roles::UserRole;
use crate::screen::{ScreenId, ScreenStructure};
use ahash::AHashSet;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

mod materialize;
mod merge;
mod model;
mod quality;
pub mod strategy;

pub use materialize::{SYNTHETIC_ROLE_CONFIDENCE, assign_role, infer_flow_type};
pub use merge::merge_groups;
pub use model::*;
pub use quality::{
    LONG_FLOWS_ADVICE, NO_NAMING_PATTERN_ADVICE, SHORT_FLOWS_ADVICE, TOO_MANY_ORPHANS_ADVICE,
};
use quality::CandidateCounts;
use strategy::*;

pub struct FlowDetector {
    config: FlowConfig,
    role_keywords: RoleKeywords,
    strategies: Vec<Box<dyn DetectionStrategy>>,
    progress: Box<dyn ProgressSink>,
    reporter: Box<dyn ErrorReporter>,
}

pub struct FlowDetectorBuilder {
    config: EngineConfig,
    default_strategies: bool,
    custom_strategies: Vec<Box<dyn DetectionStrategy>>,
    progress: Box<dyn ProgressSink>,
    reporter: Box<dyn ErrorReporter>,
}

impl FlowDetectorBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.clone(),
            default_strategies: true,
            custom_strategies: Vec::new(),
            progress: Box::new(NoopProgress),
            reporter: Box::new(TracingErrorReporter),
        }
    }

    /// Registers an extra strategy, run after the built-in ones.
    pub fn with_strategy(mut self, strategy: Box<dyn DetectionStrategy>) -> Self {
        self.custom_strategies.push(strategy);
        self
    }

    /// Runs only the strategies registered with `with_strategy`.
    pub fn without_default_strategies(mut self) -> Self {
        self.default_strategies = false;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_error_reporter(mut self, reporter: Box<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn build(self) -> Result<FlowDetector, ConfigError> {
        self.config.validate()?;
        let flow = self.config.flow;
        let role_keywords = self.config.roles.keywords;

        let mut strategies: Vec<Box<dyn DetectionStrategy>> = Vec::new();
        if self.default_strategies {
            strategies.push(Box::new(NamingStrategy::new(
                role_keywords.clone(),
                flow.flow_keywords.clone(),
            )?));
            strategies.push(Box::new(PageStrategy::new(
                flow.flow_keywords.clone(),
                flow.page_bonus_min_size,
                flow.page_bonus_max_size,
            )));
            strategies.push(Box::new(PrototypeStrategy));
            strategies.push(Box::new(SpatialStrategy::new(
                flow.proximity_radius,
                flow.alignment_tolerance,
            )));
            strategies.push(Box::new(ContentSimilarityStrategy::new(
                flow.similarity_threshold,
            )));
        }
        strategies.extend(self.custom_strategies);

        Ok(FlowDetector {
            config: flow,
            role_keywords,
            strategies,
            progress: self.progress,
            reporter: self.reporter,
        })
    }
}

impl FlowDetector {
    pub fn builder(config: &EngineConfig) -> FlowDetectorBuilder {
        FlowDetectorBuilder::new(config)
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Groups `screens` into flows owned by the detected `roles`.
    ///
    /// Never fails. A strategy error only removes that strategy's groups; any
    /// other error is sent to the error reporter and yields
    /// `FlowDetectionResult::failed`.
    pub fn detect(&self, screens: &[ScreenStructure], roles: &[UserRole]) -> FlowDetectionResult {
        match self.try_detect(screens, roles) {
            Ok(result) => result,
            Err(e) => {
                self.reporter.report("flow detection", &e);
                FlowDetectionResult::failed(screens)
            }
        }
    }

    fn stage(&self, stage: DetectionStage, message: String) {
        debug!(%stage, "{}", message);
        self.progress.report(ProgressEvent { stage, message });
    }

    /// Runs every strategy, in registration order.
    fn run_strategies(&self, screens: &[ScreenStructure]) -> Vec<FlowGroup> {
        let run = |strategy: &Box<dyn DetectionStrategy>| match strategy.detect(screens) {
            Ok(groups) => {
                debug!(strategy = strategy.name(), groups = groups.len(), "strategy finished");
                groups
            }
            Err(e) => {
                warn!(strategy = strategy.name(), error = %e, "strategy failed, ignoring its groups");
                Vec::new()
            }
        };

        let per_strategy: Vec<Vec<FlowGroup>> = if self.config.parallel_strategies {
            self.strategies.par_iter().map(run).collect()
        } else {
            self.strategies.iter().map(run).collect()
        };
        per_strategy.into_iter().flatten().collect()
    }

    fn try_detect(
        &self,
        screens: &[ScreenStructure],
        roles: &[UserRole],
    ) -> Result<FlowDetectionResult, DetectionError> {
        self.stage(
            DetectionStage::Strategies,
            format!("running {} strategies over {} screens", self.strategies.len(), screens.len()),
        );
        let candidates = self.run_strategies(screens);
        let counts = CandidateCounts {
            total: candidates.len(),
            naming: candidates
                .iter()
                .filter(|g| g.method == DetectionMethod::Naming)
                .count(),
        };

        self.stage(DetectionStage::Merge, format!("merging {} candidate groups", counts.total));
        let merged = merge_groups(candidates);

        let mut kept: Vec<FlowGroup> = merged
            .into_iter()
            .filter(|g| g.confidence >= self.config.min_group_confidence)
            .collect();
        self.stage(DetectionStage::Filter, format!("{} groups above the confidence floor", kept.len()));

        self.stage(DetectionStage::RoleAssignment, format!("assigning roles from {} detected", roles.len()));
        kept.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        self.stage(DetectionStage::Materialization, format!("materializing {} flows", kept.len()));
        let flows = materialize::materialize(&kept, screens, roles, &self.role_keywords, &self.config)?;

        let assigned: AHashSet<ScreenId> = flows
            .iter()
            .flat_map(|f| f.screens.iter().map(|s| s.id))
            .collect();
        let orphaned_screens: Vec<ScreenStructure> = screens
            .iter()
            .filter(|s| !assigned.contains(&s.id))
            .cloned()
            .collect();

        let mut role_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut flow_type_distribution: BTreeMap<FlowType, usize> = BTreeMap::new();
        for flow in &flows {
            *role_distribution.entry(flow.role.name.clone()).or_default() += 1;
            *flow_type_distribution.entry(flow.flow_type).or_default() += 1;
        }

        self.stage(DetectionStage::Quality, "scoring detection quality".to_string());
        let quality = quality::measure(&flows, screens.len(), counts, &self.config);
        let recommendations =
            quality::recommendations(&quality, flows.len(), orphaned_screens.len(), &self.config);

        info!(
            flows = flows.len(),
            orphans = orphaned_screens.len(),
            coverage = quality.coverage,
            "flow detection complete"
        );
        self.stage(DetectionStage::Complete, format!("{} flows detected", flows.len()));

        Ok(FlowDetectionResult {
            flows,
            orphaned_screens,
            role_distribution,
            flow_type_distribution,
            quality,
            recommendations,
        })
    }
}
