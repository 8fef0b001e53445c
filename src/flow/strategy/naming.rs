use super::DetectionStrategy;
use crate::config::{FlowKeywords, RoleKeywords};
use crate::error::{ConfigError, DetectionError};
use crate::flow::model::{DetectionMethod, FlowGroup, FlowMetadata, NavigationPattern};
use crate::screen::ScreenStructure;
use ahash::AHashMap;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

const BASE_CONFIDENCE: f64 = 0.5;
const SEQUENCE_BONUS: f64 = 0.2;
const ROLE_KEY_BONUS: f64 = 0.2;
const FLOW_KEY_BONUS: f64 = 0.1;
const MISC_KEY: &str = "misc";

lazy_static! {
    /// Sequence-number patterns, most specific first.
    static ref SEQUENCE_PATTERNS: Vec<Regex> = [
        r"step[\s_\-]*(\d+)",
        r"(\d+)[\s_\-]*(?:of|/)[\s_\-]*\d+",
        r"[\s_\-](\d+)$",
        r"^(\d+)[\s_\-.]",
        r"\((\d+)\)",
        r"(\d+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("sequence patterns are valid regexes"))
    .collect();

    static ref FLOW_SEQUENCE_PREFIX: Regex =
        Regex::new(r"^\W*(?P<flow>[a-z]+)[\s_\-/:.]*(?:step[\s_\-]*)?\d+")
            .expect("flow sequence pattern is a valid regex");

    static ref GENERIC_PREFIX: Regex = Regex::new(r"^\W*(?P<prefix>[a-z0-9]+)[\s_\-/:.]+\S")
        .expect("generic prefix pattern is a valid regex");
}

/// Extracts a screen's position in its flow from its name, if it carries one.
pub fn sequence_number(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    SEQUENCE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(&lowered)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Groups screens whose names share a role/flow/prefix key.
pub struct NamingStrategy {
    role_keywords: RoleKeywords,
    flow_keywords: FlowKeywords,
    role_flow_prefix: Option<Regex>,
}

impl NamingStrategy {
    pub fn new(role_keywords: RoleKeywords, flow_keywords: FlowKeywords) -> Result<Self, ConfigError> {
        let role_flow_prefix = match (alternation(role_keywords.all()), alternation(flow_keywords.all())) {
            (Some(roles), Some(flows)) => Some(
                Regex::new(&format!(
                    r"^\W*(?P<role>{})[\s_\-/:.]+(?P<flow>{})",
                    roles, flows
                ))
                .map_err(|e| ConfigError::InvalidValue {
                    field: "roles.keywords / flow.flow_keywords".to_string(),
                    message: e.to_string(),
                })?,
            ),
            _ => None,
        };
        Ok(Self {
            role_keywords,
            flow_keywords,
            role_flow_prefix,
        })
    }

    /// Derives the grouping key for a screen name, trying each rule in priority order.
    ///
    /// Names matching no rule get the `"misc"` key, which never forms a group.
    pub fn group_key(&self, name: &str) -> String {
        let lowered = name.to_lowercase();

        if let Some(caps) = self.role_flow_prefix.as_ref().and_then(|re| re.captures(&lowered)) {
            let role = self.role_keywords.match_role(&caps["role"]);
            let flow = self.flow_keywords.match_flow(&caps["flow"]);
            if let (Some(role), Some(flow)) = (role, flow) {
                return format!("{}_{}", role.slug(), flow.as_str());
            }
        }
        if let Some(caps) = FLOW_SEQUENCE_PREFIX.captures(&lowered) {
            return caps["flow"].to_string();
        }
        if let Some(caps) = GENERIC_PREFIX.captures(&lowered) {
            return caps["prefix"].to_string();
        }
        if let Some(flow) = self.flow_keywords.match_flow(&lowered) {
            return format!("flow:{}", flow.as_str());
        }
        MISC_KEY.to_string()
    }
}

/// Builds `kw1|kw2|...`, longest keywords first so they win over their prefixes.
fn alternation<'a>(keywords: impl Iterator<Item = &'a String>) -> Option<String> {
    let joined = keywords
        .filter(|kw| !kw.is_empty())
        .sorted_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)))
        .map(|kw| regex::escape(kw))
        .join("|");
    (!joined.is_empty()).then_some(joined)
}

impl DetectionStrategy for NamingStrategy {
    fn name(&self) -> &str {
        "naming"
    }

    fn detect(&self, screens: &[ScreenStructure]) -> Result<Vec<FlowGroup>, DetectionError> {
        let mut order: Vec<String> = Vec::new();
        let mut buckets: AHashMap<String, Vec<&ScreenStructure>> = AHashMap::new();
        for screen in screens {
            let key = self.group_key(&screen.name);
            if !buckets.contains_key(&key) {
                order.push(key.clone());
            }
            buckets.entry(key).or_default().push(screen);
        }

        let mut groups = Vec::new();
        for key in order {
            let Some(members) = buckets.remove(&key) else {
                continue;
            };
            // Names with no usable key share nothing but the fallback bucket.
            if key == MISC_KEY || members.len() < 2 {
                continue;
            }

            let sequenced: Vec<(u32, &ScreenStructure, bool)> = members
                .into_iter()
                .map(|s| {
                    let seq = sequence_number(&s.name);
                    (seq.unwrap_or(0), s, seq.is_some())
                })
                .sorted_by_key(|(seq, _, _)| *seq)
                .collect();
            let has_sequence = sequenced.iter().any(|(_, _, found)| *found);

            let role = self.role_keywords.match_role(&key);
            let flow = self.flow_keywords.match_flow(&key);

            let mut confidence = BASE_CONFIDENCE;
            let mut evidence = vec![format!("screens share the name key '{}'", key)];
            if has_sequence {
                confidence += SEQUENCE_BONUS;
                evidence.push("names carry sequence numbers".to_string());
            }
            if let Some(role) = role {
                confidence += ROLE_KEY_BONUS;
                evidence.push(format!("name key implies the {} role", role));
            }
            if let Some(flow) = flow {
                confidence += FLOW_KEY_BONUS;
                evidence.push(format!("name key implies a {} flow", flow));
            }

            let group = FlowGroup::new(
                format!("naming-{}", groups.len() + 1),
                sequenced.iter().map(|(_, s, _)| s.id),
                confidence.min(1.0),
                DetectionMethod::Naming,
            )
            .with_metadata(FlowMetadata {
                role,
                flow_type: flow.map(|f| f.as_str().to_string()),
                navigation: has_sequence.then_some(NavigationPattern::Linear),
                evidence,
            });
            groups.push(group);
        }
        Ok(groups)
    }
}
