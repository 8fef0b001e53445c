//! Independent clustering strategies that propose flow groups.

use super::model::FlowGroup;
use crate::error::DetectionError;
use crate::screen::ScreenStructure;

mod content;
mod naming;
mod page;
mod prototype;
mod spatial;

pub use content::{ContentSimilarityStrategy, signature_similarity};
pub use naming::{NamingStrategy, sequence_number};
pub use page::PageStrategy;
pub use prototype::PrototypeStrategy;
pub use spatial::SpatialStrategy;

/// Defines the contract for one way of grouping screens into candidate flows.
///
/// Strategies see the full screen list and must not depend on each other's output.
pub trait DetectionStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn detect(&self, screens: &[ScreenStructure]) -> Result<Vec<FlowGroup>, DetectionError>;
}
