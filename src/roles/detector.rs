use super::model::{DetectionSource, RoleType, UserRole};
use crate::config::{RoleConfig, find_keyword};
use crate::node::{DesignForest, NodeIndex};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref SEQUENCE_NUMBER: Regex =
        Regex::new(r"(?:step[\s_\-]*\d+|(?:^|[\s_\-])\d{1,3}(?:$|[\s_\-]))")
            .expect("sequence pattern is a valid regex");
}

/// The role evidence found on a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSignal {
    pub role_type: RoleType,
    pub confidence: f64,
    pub source: DetectionSource,
    pub evidence: String,
}

/// Scans layer names and their ancestry for user-role signals.
pub struct RoleDetector {
    config: RoleConfig,
}

impl RoleDetector {
    pub fn new(config: RoleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoleConfig {
        &self.config
    }

    pub fn detect_forest(&self, forest: &DesignForest) -> Vec<UserRole> {
        self.detect(&NodeIndex::build(forest))
    }

    /// Detects at most one role per role type, ordered by first detection.
    pub fn detect(&self, index: &NodeIndex<'_>) -> Vec<UserRole> {
        let mut roles: Vec<UserRole> = Vec::new();

        for (position, _) in index.iter() {
            let Some(signal) = self.score_node(index, position) else {
                continue;
            };
            match roles.iter_mut().find(|r| r.role_type == signal.role_type) {
                Some(existing) if signal.confidence > existing.confidence => {
                    *existing = UserRole::new(
                        signal.role_type,
                        signal.confidence,
                        signal.source,
                        &signal.evidence,
                    );
                }
                Some(_) => {}
                None => roles.push(UserRole::new(
                    signal.role_type,
                    signal.confidence,
                    signal.source,
                    &signal.evidence,
                )),
            }
        }

        roles.retain(|r| r.confidence > self.config.min_role_confidence);
        debug!(count = roles.len(), "detected user roles");
        roles
    }

    /// Scores one node. Returns `None` when no role is implied or the score is too weak.
    pub fn score_node(&self, index: &NodeIndex<'_>, position: usize) -> Option<RoleSignal> {
        let entry = index.get(position)?;
        let name = entry.node.name.to_lowercase();
        let keywords = &self.config.keywords;
        let weights = &self.config.weights;

        let own_role = keywords.match_role(&name);
        let parent_role = index
            .ancestors(position)
            .find_map(|ancestor| keywords.match_role(&ancestor.name.to_lowercase()));
        let role_type = own_role.or(parent_role)?;

        let mut score = 0.0;
        if own_role.is_some() {
            score += weights.role_keyword;
        }
        if find_keyword(&name, &self.config.flow_stage_keywords).is_some() {
            score += weights.flow_stage;
        }
        if SEQUENCE_NUMBER.is_match(&name) {
            score += weights.sequence;
        }
        if find_keyword(&name, &self.config.device_keywords).is_some() {
            score += weights.device;
        }
        if parent_role.is_some() {
            score += weights.parent_role;
        }

        // Weights are decimal fractions; round away float noise before threshold checks.
        let score = ((score * 1000.0).round() / 1000.0).min(1.0);
        if score <= self.config.min_node_score {
            return None;
        }

        Some(RoleSignal {
            role_type,
            confidence: score,
            source: if own_role.is_some() {
                DetectionSource::LayerName
            } else {
                DetectionSource::Ancestry
            },
            evidence: entry.node.name.clone(),
        })
    }
}

impl Default for RoleDetector {
    fn default() -> Self {
        Self::new(RoleConfig::default())
    }
}
