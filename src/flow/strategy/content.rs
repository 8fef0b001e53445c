use super::DetectionStrategy;
use crate::classify::SemanticType;
use crate::error::DetectionError;
use crate::flow::model::{DetectionMethod, FlowGroup, FlowMetadata};
use crate::screen::ScreenStructure;
use itertools::Itertools;
use std::collections::BTreeMap;

type Signature = BTreeMap<SemanticType, usize>;

fn signature(screen: &ScreenStructure) -> Signature {
    screen.component_signature().into_iter().counts().into_iter().collect()
}

fn jaccard(a: &Signature, b: &Signature) -> f64 {
    let mut intersection = 0usize;
    let mut union = 0usize;
    for key in a.keys().merge(b.keys()).dedup() {
        let left = a.get(key).copied().unwrap_or(0);
        let right = b.get(key).copied().unwrap_or(0);
        intersection += left.min(right);
        union += left.max(right);
    }
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Multiset Jaccard similarity of two screens' semantic component types.
/// Two screens with no typed components score 0.
pub fn signature_similarity(a: &ScreenStructure, b: &ScreenStructure) -> f64 {
    jaccard(&signature(a), &signature(b))
}

/// Groups screens built from similar mixes of components.
pub struct ContentSimilarityStrategy {
    threshold: f64,
}

impl ContentSimilarityStrategy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl DetectionStrategy for ContentSimilarityStrategy {
    fn name(&self) -> &str {
        "content"
    }

    fn detect(&self, screens: &[ScreenStructure]) -> Result<Vec<FlowGroup>, DetectionError> {
        let signatures: Vec<Signature> = screens.iter().map(signature).collect();
        let mut visited = vec![false; screens.len()];
        let mut groups = Vec::new();

        for seed in 0..screens.len() {
            if visited[seed] || signatures[seed].is_empty() {
                continue;
            }
            visited[seed] = true;
            let mut cluster = vec![seed];
            for other in seed + 1..screens.len() {
                if !visited[other] && jaccard(&signatures[seed], &signatures[other]) > self.threshold {
                    visited[other] = true;
                    cluster.push(other);
                }
            }
            if cluster.len() < 2 {
                continue;
            }

            let pair_scores: Vec<f64> = cluster
                .iter()
                .tuple_combinations()
                .map(|(a, b)| jaccard(&signatures[*a], &signatures[*b]))
                .collect();
            let confidence = pair_scores.iter().sum::<f64>() / pair_scores.len() as f64;

            groups.push(
                FlowGroup::new(
                    format!("content-{}", groups.len() + 1),
                    cluster.iter().map(|i| screens[*i].id),
                    confidence,
                    DetectionMethod::Content,
                )
                .with_metadata(FlowMetadata {
                    evidence: vec![format!(
                        "{} screens share a component mix (mean similarity {:.2})",
                        cluster.len(),
                        confidence
                    )],
                    ..FlowMetadata::default()
                }),
            );
        }
        Ok(groups)
    }
}
