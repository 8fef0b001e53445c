use super::model::{FlowGroup, FlowStructure, FlowType, NavigationPattern};
use crate::config::{FlowConfig, RoleKeywords};
use crate::error::DetectionError;
use crate::roles::{RoleType, UserRole};
use crate::screen::{ScreenId, ScreenStructure};
use ahash::AHashMap;
use itertools::Itertools;

/// Confidence given to roles the engine invents for flows with no detected owner.
pub const SYNTHETIC_ROLE_CONFIDENCE: f64 = 0.5;

/// Lowercased, space-joined member screen names.
fn joined_names(screens: &[&ScreenStructure]) -> String {
    screens.iter().map(|s| s.name.to_lowercase()).join(" ")
}

fn resolve_screens<'a>(
    group: &FlowGroup,
    by_id: &AHashMap<ScreenId, &'a ScreenStructure>,
) -> Result<Vec<&'a ScreenStructure>, DetectionError> {
    if group.screens.is_empty() {
        return Err(DetectionError::EmptyGroup(group.id.clone()));
    }
    group
        .screens
        .iter()
        .map(|id| {
            by_id
                .get(id)
                .copied()
                .ok_or_else(|| DetectionError::UnknownScreen {
                    group_id: group.id.clone(),
                    screen_id: id.0,
                })
        })
        .collect()
}

/// Picks the owning role for a group.
///
/// A role carried in the group's metadata wins. Otherwise the member names are
/// matched against each detected role's keyword bucket, in detection order.
/// With no match the flow gets a synthetic Customer role.
pub fn assign_role(
    group: &FlowGroup,
    screens: &[&ScreenStructure],
    roles: &[UserRole],
    keywords: &RoleKeywords,
) -> UserRole {
    if let Some(role_type) = group.metadata.role {
        return roles
            .iter()
            .find(|r| r.role_type == role_type)
            .cloned()
            .unwrap_or_else(|| UserRole::synthetic(role_type, SYNTHETIC_ROLE_CONFIDENCE));
    }

    let names = joined_names(screens);
    roles
        .iter()
        .find(|role| {
            crate::config::find_keyword(&names, keywords.for_role(role.role_type)).is_some()
        })
        .cloned()
        .unwrap_or_else(|| UserRole::synthetic(RoleType::Customer, SYNTHETIC_ROLE_CONFIDENCE))
}

/// Metadata flow type when it names a known, specific type; keyword inference otherwise.
pub fn infer_flow_type(group: &FlowGroup, screens: &[&ScreenStructure], config: &FlowConfig) -> FlowType {
    group
        .metadata
        .flow_type
        .as_deref()
        .and_then(FlowType::parse)
        .filter(|flow| *flow != FlowType::Unknown)
        .or_else(|| config.flow_keywords.match_flow(&joined_names(screens)))
        .unwrap_or(FlowType::Unknown)
}

/// Turns confidence-sorted groups into final flows, ranked 1..n.
pub fn materialize(
    groups: &[FlowGroup],
    screens: &[ScreenStructure],
    roles: &[UserRole],
    role_keywords: &RoleKeywords,
    config: &FlowConfig,
) -> Result<Vec<FlowStructure>, DetectionError> {
    let by_id: AHashMap<ScreenId, &ScreenStructure> = screens.iter().map(|s| (s.id, s)).collect();

    groups
        .iter()
        .enumerate()
        .map(|(rank, group)| {
            let members = resolve_screens(group, &by_id)?;
            let role = assign_role(group, &members, roles, role_keywords);
            let flow_type = infer_flow_type(group, &members, config);
            let navigation = group
                .metadata
                .navigation
                .unwrap_or_else(|| NavigationPattern::for_screen_count(members.len()));
            let sequence = rank + 1;
            let per_screen = config.durations.seconds_per_screen(flow_type);

            Ok(FlowStructure {
                id: format!("flow-{}", sequence),
                name: format!("{} {}", role.name, flow_type.display_name()),
                devices: members.iter().map(|s| s.device_type).collect(),
                estimated_duration_secs: per_screen.saturating_mul(members.len() as u32),
                is_critical_path: flow_type.is_critical()
                    && group.confidence >= config.critical_path_min_confidence,
                screens: members.into_iter().cloned().collect(),
                role,
                flow_type,
                navigation,
                sequence,
                confidence: group.confidence,
                method: group.method.clone(),
                evidence: group.metadata.evidence.clone(),
            })
        })
        .collect()
}
