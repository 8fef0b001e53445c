//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowscope crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowscope::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let export = std::fs::read_to_string("path/to/export.json")?;
//! let config = EngineConfig::from_json(&std::fs::read_to_string("path/to/config.json")?)?;
//!
//! let pipeline = KnowledgePipeline::builder(config).build()?;
//! let report = pipeline.analyze_json(&export)?;
//!
//! println!("{}", ReportFormatter::format_result(&report.flows));
//! # Ok(())
//! # }
//! ```

// Pipeline and configuration
pub use crate::config::EngineConfig;
pub use crate::pipeline::{KnowledgePipeline, KnowledgeReport};

// Ingestion
pub use crate::node::{DesignForest, DesignNode, IntoDesignForest, RawDocument, RawNode};

// Engine components
pub use crate::classify::{SemanticClassifier, SemanticType};
pub use crate::flow::{FlowDetectionResult, FlowDetector, FlowStructure, FlowType};
pub use crate::patterns::{PatternAnalysis, PatternAnalyzer};
pub use crate::roles::{RoleDetector, RoleType, UserRole};
pub use crate::screen::{ScreenBuilder, ScreenId, ScreenStructure};

// Error types
pub use crate::error::{ConfigError, ConversionError, DetectionError, IngestError};

// Report formatting
pub use crate::report::ReportFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
