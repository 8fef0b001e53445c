use super::model::{DetectionQuality, FlowStructure};
use crate::config::FlowConfig;

pub const NO_NAMING_PATTERN_ADVICE: &str = "No naming pattern detected. Give screens in the same journey a shared prefix and step numbers, e.g. 'Checkout 1', 'Checkout 2'.";
pub const TOO_MANY_ORPHANS_ADVICE: &str = "More screens are orphaned than grouped. Organize related screens onto dedicated pages or place them side by side.";
pub const SHORT_FLOWS_ADVICE: &str = "Detected flows are very short. Check whether related screens were split across differently named groups.";
pub const LONG_FLOWS_ADVICE: &str = "Detected flows are very long. Consider splitting large journeys into focused sub-flows.";

/// Candidate-group counts gathered before merging.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateCounts {
    pub total: usize,
    pub naming: usize,
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        0.0
    } else {
        values.sum::<f64>() / len as f64
    }
}

pub fn measure(
    flows: &[FlowStructure],
    screen_count: usize,
    candidates: CandidateCounts,
    config: &FlowConfig,
) -> DetectionQuality {
    let assigned: usize = flows.iter().map(|f| f.screens.len()).sum();
    let confident_roles = flows
        .iter()
        .filter(|f| f.role.confidence > config.medium_role_confidence)
        .count();

    DetectionQuality {
        average_flow_length: mean(flows.iter().map(|f| f.screens.len() as f64)),
        role_confidence_ratio: if flows.is_empty() {
            0.0
        } else {
            confident_roles as f64 / flows.len() as f64
        },
        average_confidence: mean(flows.iter().map(|f| f.confidence)),
        coverage: if screen_count == 0 {
            0.0
        } else {
            assigned as f64 / screen_count as f64
        },
        candidate_groups: candidates.total,
        naming_groups: candidates.naming,
    }
}

pub fn recommendations(
    quality: &DetectionQuality,
    flow_count: usize,
    orphan_count: usize,
    config: &FlowConfig,
) -> Vec<String> {
    let mut advice = Vec::new();
    if quality.naming_groups == 0 {
        advice.push(NO_NAMING_PATTERN_ADVICE.to_string());
    }
    if orphan_count > flow_count {
        advice.push(TOO_MANY_ORPHANS_ADVICE.to_string());
    }
    if flow_count > 0 {
        if quality.average_flow_length < config.short_flow_length {
            advice.push(SHORT_FLOWS_ADVICE.to_string());
        } else if quality.average_flow_length > config.long_flow_length {
            advice.push(LONG_FLOWS_ADVICE.to_string());
        }
    }
    advice
}
