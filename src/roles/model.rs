use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Customer,
    Admin,
    Operator,
    Guest,
    Moderator,
}

impl RoleType {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoleType::Customer => "Customer",
            RoleType::Admin => "Admin",
            RoleType::Operator => "Operator",
            RoleType::Guest => "Guest",
            RoleType::Moderator => "Moderator",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            RoleType::Customer => "customer",
            RoleType::Admin => "admin",
            RoleType::Operator => "operator",
            RoleType::Guest => "guest",
            RoleType::Moderator => "moderator",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RoleType::Customer => "End user consuming the product's primary features",
            RoleType::Admin => "Manages configuration, users and content",
            RoleType::Operator => "Staff fulfilling or supporting customer requests",
            RoleType::Guest => "Unauthenticated visitor",
            RoleType::Moderator => "Reviews and curates user-generated content",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Where a role's evidence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// The node's own layer name carried the role keyword.
    LayerName,
    /// Only an ancestor's name carried the role keyword.
    Ancestry,
    /// Created by the flow engine when no detected role matched.
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: String,
    pub name: String,
    pub role_type: RoleType,
    pub confidence: f64,
    pub source: DetectionSource,
    /// The layer name that produced the detection.
    pub evidence: String,
    pub description: String,
}

impl UserRole {
    pub fn new(role_type: RoleType, confidence: f64, source: DetectionSource, evidence: &str) -> Self {
        Self {
            id: format!("role-{}", role_type.slug()),
            name: role_type.display_name().to_string(),
            role_type,
            confidence: confidence.clamp(0.0, 1.0),
            source,
            evidence: evidence.to_string(),
            description: role_type.description().to_string(),
        }
    }

    /// A placeholder role for flows with no detected owner.
    pub fn synthetic(role_type: RoleType, confidence: f64) -> Self {
        Self::new(role_type, confidence, DetectionSource::Synthetic, "")
    }
}
