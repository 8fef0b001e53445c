use super::DetectionStrategy;
use crate::error::DetectionError;
use crate::flow::model::FlowGroup;
use crate::screen::ScreenStructure;

/// Reserved for prototype-link analysis. The ingested model carries no
/// interaction links yet, so this strategy proposes nothing.
#[derive(Debug, Default)]
pub struct PrototypeStrategy;

impl DetectionStrategy for PrototypeStrategy {
    fn name(&self) -> &str {
        "prototype"
    }

    fn detect(&self, _screens: &[ScreenStructure]) -> Result<Vec<FlowGroup>, DetectionError> {
        Ok(Vec::new())
    }
}
