//! Interfaces for the systems around the engine.
//!
//! The engine reports progress and top-level failures through these traits and
//! hands its output to theme and code generators. None of them can block or fail
//! detection.

use crate::screen::ScreenStructure;
use crate::style::StyleSummary;
use std::collections::BTreeMap;
use std::fmt;
use tracing::error;

/// Pipeline stages announced to a `ProgressSink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStage {
    Strategies,
    Merge,
    Filter,
    RoleAssignment,
    Materialization,
    Quality,
    Complete,
}

impl fmt::Display for DetectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectionStage::Strategies => "strategies",
            DetectionStage::Merge => "merge",
            DetectionStage::Filter => "filter",
            DetectionStage::RoleAssignment => "role assignment",
            DetectionStage::Materialization => "materialization",
            DetectionStage::Quality => "quality",
            DetectionStage::Complete => "complete",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub stage: DetectionStage,
    pub message: String,
}

pub trait ProgressSink: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Receives failures that aborted a whole detection run.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, context: &str, error: &dyn std::error::Error);
}

/// Logs failures at `error` level.
#[derive(Debug, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: &str, err: &dyn std::error::Error) {
        error!(context, error = %err, "flow detection failed");
    }
}

/// Design tokens keyed by token name, e.g. `color.1` -> `#1A73E8`.
pub type ThemeTokens = BTreeMap<String, String>;

/// Turns observed style values into a theme.
pub trait ThemeGenerator {
    fn generate(&self, style: &StyleSummary) -> ThemeTokens;
}

/// Emits source code for one screen against a generated theme.
pub trait CodeGenerator {
    fn generate(&self, screen: &ScreenStructure, tokens: &ThemeTokens) -> String;
}
