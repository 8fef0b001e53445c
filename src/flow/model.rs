use crate::roles::{RoleType, UserRole};
use crate::screen::{DeviceType, ScreenId, ScreenStructure};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowType {
    Onboarding,
    Authentication,
    Checkout,
    Settings,
    MainFeature,
    Unknown,
}

impl FlowType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowType::Onboarding => "onboarding",
            FlowType::Authentication => "authentication",
            FlowType::Checkout => "checkout",
            FlowType::Settings => "settings",
            FlowType::MainFeature => "main_feature",
            FlowType::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FlowType::Onboarding => "Onboarding",
            FlowType::Authentication => "Authentication",
            FlowType::Checkout => "Checkout",
            FlowType::Settings => "Settings",
            FlowType::MainFeature => "Main Feature",
            FlowType::Unknown => "Unknown",
        }
    }

    /// Parses the snake_case tag. Unrecognized tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "onboarding" => Some(FlowType::Onboarding),
            "authentication" => Some(FlowType::Authentication),
            "checkout" => Some(FlowType::Checkout),
            "settings" => Some(FlowType::Settings),
            "main_feature" => Some(FlowType::MainFeature),
            "unknown" => Some(FlowType::Unknown),
            _ => None,
        }
    }

    /// Journeys whose failure blocks users from reaching the product.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            FlowType::Onboarding | FlowType::Authentication | FlowType::Checkout
        )
    }
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationPattern {
    Linear,
    Tab,
    Modal,
    Stack,
    Drawer,
}

impl NavigationPattern {
    /// Default pattern for a flow of `screen_count` screens.
    pub fn for_screen_count(screen_count: usize) -> Self {
        match screen_count {
            0..=2 => NavigationPattern::Modal,
            3..=5 => NavigationPattern::Tab,
            _ => NavigationPattern::Stack,
        }
    }
}

impl fmt::Display for NavigationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NavigationPattern::Linear => "linear",
            NavigationPattern::Tab => "tab",
            NavigationPattern::Modal => "modal",
            NavigationPattern::Stack => "stack",
            NavigationPattern::Drawer => "drawer",
        };
        write!(f, "{}", name)
    }
}

/// Which strategy proposed a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Naming,
    Page,
    Prototype,
    Spatial,
    Content,
    Custom(String),
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMethod::Naming => write!(f, "naming"),
            DetectionMethod::Page => write!(f, "page"),
            DetectionMethod::Prototype => write!(f, "prototype"),
            DetectionMethod::Spatial => write!(f, "spatial"),
            DetectionMethod::Content => write!(f, "content"),
            DetectionMethod::Custom(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowMetadata {
    pub role: Option<RoleType>,
    /// Raw flow-type tag; only recognized tags are honored at materialization.
    pub flow_type: Option<String>,
    pub navigation: Option<NavigationPattern>,
    pub evidence: Vec<String>,
}

/// A candidate cluster of screens proposed by one detection strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowGroup {
    pub id: String,
    /// Member screens in flow order, without duplicates.
    pub screens: Vec<ScreenId>,
    pub confidence: f64,
    pub method: DetectionMethod,
    pub metadata: FlowMetadata,
}

impl FlowGroup {
    pub fn new(
        id: impl Into<String>,
        screens: impl IntoIterator<Item = ScreenId>,
        confidence: f64,
        method: DetectionMethod,
    ) -> Self {
        let mut members: Vec<ScreenId> = Vec::new();
        for screen in screens {
            if !members.contains(&screen) {
                members.push(screen);
            }
        }
        Self {
            id: id.into(),
            screens: members,
            confidence: confidence.clamp(0.0, 1.0),
            method,
            metadata: FlowMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: FlowMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn contains(&self, screen: ScreenId) -> bool {
        self.screens.contains(&screen)
    }

    pub fn shares_screen_with(&self, other: &FlowGroup) -> bool {
        self.screens.iter().any(|s| other.contains(*s))
    }

    /// Folds `other` into this group. Metadata stays this group's own.
    pub fn absorb(&mut self, other: FlowGroup) {
        for screen in other.screens {
            if !self.contains(screen) {
                self.screens.push(screen);
            }
        }
        self.confidence = self.confidence.max(other.confidence);
    }
}

/// A finalized user journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStructure {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub screens: Vec<ScreenStructure>,
    pub flow_type: FlowType,
    pub navigation: NavigationPattern,
    pub devices: BTreeSet<DeviceType>,
    /// 1-based rank by confidence.
    pub sequence: usize,
    pub estimated_duration_secs: u32,
    pub is_critical_path: bool,
    pub confidence: f64,
    pub method: DetectionMethod,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionQuality {
    pub average_flow_length: f64,
    /// Share of flows whose role confidence exceeds the medium threshold.
    pub role_confidence_ratio: f64,
    pub average_confidence: f64,
    /// Share of screens assigned to some flow.
    pub coverage: f64,
    pub candidate_groups: usize,
    pub naming_groups: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDetectionResult {
    pub flows: Vec<FlowStructure>,
    pub orphaned_screens: Vec<ScreenStructure>,
    pub role_distribution: BTreeMap<String, usize>,
    pub flow_type_distribution: BTreeMap<FlowType, usize>,
    pub quality: DetectionQuality,
    pub recommendations: Vec<String>,
}

pub const FAILED_DETECTION_ADVICE: &str = "Flow detection could not complete. Check that screens are top-level frames with descriptive names and try again.";

impl FlowDetectionResult {
    /// The canonical answer when detection fails: no flows, every screen orphaned.
    pub fn failed(screens: &[ScreenStructure]) -> Self {
        Self {
            flows: Vec::new(),
            orphaned_screens: screens.to_vec(),
            role_distribution: BTreeMap::new(),
            flow_type_distribution: BTreeMap::new(),
            quality: DetectionQuality::default(),
            recommendations: vec![FAILED_DETECTION_ADVICE.to_string()],
        }
    }

    pub fn flow_for_screen(&self, screen: ScreenId) -> Option<&FlowStructure> {
        self.flows
            .iter()
            .find(|flow| flow.screens.iter().any(|s| s.id == screen))
    }
}
