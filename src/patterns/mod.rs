//! UI pattern detection and visual consistency scoring.

mod analyzer;
pub mod consistency;

pub use analyzer::{Complexity, DetectedPattern, PatternAnalysis, PatternAnalyzer, PatternKind};
pub use consistency::ConsistencyReport;
