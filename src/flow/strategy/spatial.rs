use super::DetectionStrategy;
use crate::error::DetectionError;
use crate::flow::model::{DetectionMethod, FlowGroup, FlowMetadata};
use crate::screen::ScreenStructure;
use itertools::{Itertools, MinMaxResult};

const BASE_CONFIDENCE: f64 = 0.3;
const ALIGNMENT_BONUS: f64 = 0.3;

/// Greedily clusters screens placed near each other on the canvas.
pub struct SpatialStrategy {
    radius: f64,
    alignment_tolerance: f64,
}

impl SpatialStrategy {
    pub fn new(radius: f64, alignment_tolerance: f64) -> Self {
        Self {
            radius,
            alignment_tolerance,
        }
    }

    fn spread(values: impl Iterator<Item = f64>) -> f64 {
        match values.minmax_by(f64::total_cmp) {
            MinMaxResult::MinMax(min, max) => max - min,
            _ => 0.0,
        }
    }
}

impl DetectionStrategy for SpatialStrategy {
    fn name(&self) -> &str {
        "spatial"
    }

    fn detect(&self, screens: &[ScreenStructure]) -> Result<Vec<FlowGroup>, DetectionError> {
        // Fallback screens have no real position.
        let placed: Vec<&ScreenStructure> = screens
            .iter()
            .filter(|s| !s.geometry.is_degenerate())
            .collect();
        let mut visited = vec![false; placed.len()];
        let mut groups = Vec::new();

        for seed in 0..placed.len() {
            if visited[seed] {
                continue;
            }
            visited[seed] = true;
            let mut cluster = vec![placed[seed]];
            for other in seed + 1..placed.len() {
                if !visited[other]
                    && placed[seed].geometry.distance_to(&placed[other].geometry) <= self.radius
                {
                    visited[other] = true;
                    cluster.push(placed[other]);
                }
            }
            if cluster.len() < 2 {
                continue;
            }

            let x_spread = Self::spread(cluster.iter().map(|s| s.geometry.x));
            let y_spread = Self::spread(cluster.iter().map(|s| s.geometry.y));
            let mut confidence = BASE_CONFIDENCE;
            let mut evidence = vec![format!(
                "{} screens within {} units of each other",
                cluster.len(),
                self.radius
            )];
            if x_spread <= self.alignment_tolerance || y_spread <= self.alignment_tolerance {
                confidence += ALIGNMENT_BONUS;
                evidence.push("screens are aligned on one axis".to_string());
            }

            groups.push(
                FlowGroup::new(
                    format!("spatial-{}", groups.len() + 1),
                    cluster.iter().map(|s| s.id),
                    confidence,
                    DetectionMethod::Spatial,
                )
                .with_metadata(FlowMetadata {
                    evidence,
                    ..FlowMetadata::default()
                }),
            );
        }
        Ok(groups)
    }
}
