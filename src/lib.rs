//! # flowscope - Design Layer Classification and Flow Detection Engine
//!
//! **flowscope** turns a forest of design-tool layers (frames, text, shapes, groups)
//! into structured product knowledge: semantic component types, the user roles a
//! design addresses, and the user journeys ("flows") its screens form.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on a canonical node model, and the
//! primary workflow is:
//!
//! 1.  **Load Your Export**: Parse the host's JSON into `RawDocument`, or your own structs.
//! 2.  **Convert to the Node Model**: `RawDocument` implements `IntoDesignForest`; implement it for your own format to plug it in.
//! 3.  **Build the Pipeline**: `KnowledgePipeline::builder` takes an `EngineConfig` and validates it on `build()`.
//! 4.  **Analyze**: `analyze` builds screens, detects roles and flows, and scores design patterns. It never fails on bad input; unusable parts are logged through `tracing` and skipped.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowscope::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = r#"{
//!         "name": "Shop",
//!         "document": { "type": "DOCUMENT", "children": [
//!             { "type": "CANVAS", "name": "Onboarding", "children": [
//!                 { "type": "FRAME", "name": "Customer_Onboarding_1", "x": 0, "y": 0, "width": 375, "height": 812 },
//!                 { "type": "FRAME", "name": "Customer_Onboarding_2", "x": 500, "y": 0, "width": 375, "height": 812 }
//!             ]}
//!         ]}
//!     }"#;
//!
//!     let forest = RawDocument::from_json(export)?.into_forest()?;
//!     let pipeline = KnowledgePipeline::builder(EngineConfig::default()).build()?;
//!     let report = pipeline.analyze(&forest);
//!
//!     assert_eq!(report.flows.flows.len(), 1);
//!     println!("{}", ReportFormatter::format_report(&report));
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod flow;
pub mod node;
pub mod patterns;
pub mod pipeline;
pub mod prelude;
pub mod report;
pub mod roles;
pub mod screen;
pub mod style;
