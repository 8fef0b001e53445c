//! Immutable engine configuration.
//!
//! Every keyword table and threshold the engine uses lives here and is handed to
//! each component at construction. Each section is `serde(default)`, so a JSON
//! document only needs to name the values it overrides:
//!
//! ```rust
//! use flowscope::config::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "flow": { "min_group_confidence": 0.7 } }"#).unwrap();
//! assert_eq!(config.flow.min_group_confidence, 0.7);
//! assert_eq!(config.patterns.spacing_grid, 8.0);
//! ```

use crate::error::ConfigError;
use crate::flow::FlowType;
use crate::roles::RoleType;
use serde::{Deserialize, Serialize};

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn words_of(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Returns the first keyword from `keywords` found in `text` on word boundaries.
///
/// Words are runs of alphanumerics, so `"cta"` does not match inside `"rectangle"`.
/// Multi-word keywords such as `"tab bar"` match consecutive words, whatever separates them.
pub fn find_keyword<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    let words = words_of(text);
    keywords.iter().map(String::as_str).find(|kw| {
        let needle = words_of(kw);
        !needle.is_empty()
            && words.windows(needle.len()).any(|window| {
                window
                    .iter()
                    .zip(&needle)
                    .all(|(word, kw_word)| word.eq_ignore_ascii_case(kw_word))
            })
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub screen: ScreenConfig,
    pub classifier: ClassifierConfig,
    pub roles: RoleConfig,
    pub flow: FlowConfig,
    pub patterns: PatternConfig,
}

impl EngineConfig {
    /// Parses a (possibly partial) configuration document and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every threshold is finite and inside its declared range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.screen;
        positive("screen.mobile_max_side", s.mobile_max_side)?;
        positive("screen.tablet_max_side", s.tablet_max_side)?;
        positive("screen.desktop_min_width", s.desktop_min_width)?;
        positive("screen.layout_variance_threshold", s.layout_variance_threshold)?;
        if s.mobile_max_side >= s.tablet_max_side {
            return Err(invalid(
                "screen.mobile_max_side",
                "must be smaller than screen.tablet_max_side",
            ));
        }
        if s.max_depth == 0 {
            return Err(invalid("screen.max_depth", "must be at least 1"));
        }

        let c = &self.classifier;
        unit("classifier.single_type_base", c.single_type_base)?;
        unit("classifier.per_reason_bonus", c.per_reason_bonus)?;
        unit("classifier.ambiguity_penalty", c.ambiguity_penalty)?;
        unit("classifier.ambiguity_floor", c.ambiguity_floor)?;

        let r = &self.roles;
        unit("roles.min_node_score", r.min_node_score)?;
        unit("roles.min_role_confidence", r.min_role_confidence)?;
        let w = &r.weights;
        for (field, value) in [
            ("roles.weights.role_keyword", w.role_keyword),
            ("roles.weights.flow_stage", w.flow_stage),
            ("roles.weights.sequence", w.sequence),
            ("roles.weights.device", w.device),
            ("roles.weights.parent_role", w.parent_role),
        ] {
            unit(field, value)?;
        }

        let f = &self.flow;
        unit("flow.min_group_confidence", f.min_group_confidence)?;
        unit("flow.medium_role_confidence", f.medium_role_confidence)?;
        unit("flow.similarity_threshold", f.similarity_threshold)?;
        unit("flow.critical_path_min_confidence", f.critical_path_min_confidence)?;
        positive("flow.proximity_radius", f.proximity_radius)?;
        positive("flow.alignment_tolerance", f.alignment_tolerance)?;
        if f.page_bonus_min_size > f.page_bonus_max_size {
            return Err(invalid(
                "flow.page_bonus_min_size",
                "must not exceed flow.page_bonus_max_size",
            ));
        }

        let p = &self.patterns;
        positive("patterns.spacing_grid", p.spacing_grid)?;
        if p.max_palette_size == 0 {
            return Err(invalid("patterns.max_palette_size", "must be at least 1"));
        }
        if p.type_scale_min > p.type_scale_max {
            return Err(invalid(
                "patterns.type_scale_min",
                "must not exceed patterns.type_scale_max",
            ));
        }
        let weight_sum = p.spacing_weight + p.color_weight + p.typography_weight;
        if !weight_sum.is_finite() || (weight_sum - 1.0).abs() > 1e-6 {
            return Err(invalid(
                "patterns.*_weight",
                &format!("consistency weights must sum to 1.0, got {}", weight_sum),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("expected a positive number, got {}", value)))
    }
}

fn unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, &format!("expected a value in [0, 1], got {}", value)))
    }
}

/// Breakpoints and limits for the screen structure builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub mobile_max_side: f64,
    pub tablet_max_side: f64,
    /// Width/height ratio above which a small frame is treated as desktop rather than tablet.
    pub tablet_max_aspect: f64,
    pub desktop_min_width: f64,
    pub desktop_min_aspect: f64,
    pub layout_variance_threshold: f64,
    pub max_depth: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            mobile_max_side: 480.0,
            tablet_max_side: 768.0,
            tablet_max_aspect: 1.4,
            desktop_min_width: 1024.0,
            desktop_min_aspect: 1.2,
            layout_variance_threshold: 50.0,
            max_depth: 64,
        }
    }
}

/// Inclusive width/height bounds. A missing maximum is unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min_width: f64,
    pub max_width: Option<f64>,
    pub min_height: f64,
    pub max_height: Option<f64>,
}

impl SizeBounds {
    pub fn contains(&self, width: f64, height: f64) -> bool {
        width >= self.min_width
            && self.max_width.is_none_or(|max| width <= max)
            && height >= self.min_height
            && self.max_height.is_none_or(|max| height <= max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub button_keywords: Vec<String>,
    pub input_keywords: Vec<String>,
    pub heading_keywords: Vec<String>,
    pub label_keywords: Vec<String>,
    pub card_keywords: Vec<String>,
    pub navigation_keywords: Vec<String>,
    pub button_bounds: SizeBounds,
    pub input_bounds: SizeBounds,
    pub card_bounds: SizeBounds,
    pub nav_bar_min_width: f64,
    pub nav_bar_max_height: f64,
    pub nav_rail_min_height: f64,
    pub nav_rail_max_width: f64,
    pub heading_min_font_size: f64,
    pub label_max_font_size: f64,
    pub input_max_children: usize,
    pub card_min_children: usize,
    pub navigation_min_children: usize,
    pub icon_max_size: f64,
    pub single_type_base: f64,
    pub per_reason_bonus: f64,
    pub ambiguity_penalty: f64,
    pub ambiguity_floor: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            button_keywords: words(&["button", "btn", "cta", "submit", "action"]),
            input_keywords: words(&[
                "input",
                "field",
                "textbox",
                "text box",
                "textarea",
                "search bar",
                "dropdown",
                "select",
            ]),
            heading_keywords: words(&["heading", "title", "headline", "h1", "h2", "h3", "hero"]),
            label_keywords: words(&["label", "caption", "subtitle", "hint", "helper", "tag"]),
            card_keywords: words(&["card", "tile", "panel"]),
            navigation_keywords: words(&[
                "nav",
                "menu",
                "tab bar",
                "tabbar",
                "toolbar",
                "sidebar",
                "breadcrumb",
                "app bar",
            ]),
            button_bounds: SizeBounds {
                min_width: 40.0,
                max_width: Some(400.0),
                min_height: 24.0,
                max_height: Some(72.0),
            },
            input_bounds: SizeBounds {
                min_width: 80.0,
                max_width: Some(600.0),
                min_height: 28.0,
                max_height: Some(64.0),
            },
            card_bounds: SizeBounds {
                min_width: 150.0,
                max_width: Some(800.0),
                min_height: 100.0,
                max_height: None,
            },
            nav_bar_min_width: 300.0,
            nav_bar_max_height: 100.0,
            nav_rail_min_height: 300.0,
            nav_rail_max_width: 120.0,
            heading_min_font_size: 20.0,
            label_max_font_size: 14.0,
            input_max_children: 3,
            card_min_children: 2,
            navigation_min_children: 3,
            icon_max_size: 48.0,
            single_type_base: 0.8,
            per_reason_bonus: 0.05,
            ambiguity_penalty: 0.1,
            ambiguity_floor: 0.3,
        }
    }
}

/// Per-role keyword buckets, always evaluated in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleKeywords {
    pub customer: Vec<String>,
    pub admin: Vec<String>,
    pub operator: Vec<String>,
    pub guest: Vec<String>,
    pub moderator: Vec<String>,
}

impl RoleKeywords {
    /// The buckets in priority order: customer, admin, operator, guest, moderator.
    pub fn buckets(&self) -> [(RoleType, &[String]); 5] {
        [
            (RoleType::Customer, &self.customer),
            (RoleType::Admin, &self.admin),
            (RoleType::Operator, &self.operator),
            (RoleType::Guest, &self.guest),
            (RoleType::Moderator, &self.moderator),
        ]
    }

    pub fn for_role(&self, role: RoleType) -> &[String] {
        match role {
            RoleType::Customer => &self.customer,
            RoleType::Admin => &self.admin,
            RoleType::Operator => &self.operator,
            RoleType::Guest => &self.guest,
            RoleType::Moderator => &self.moderator,
        }
    }

    /// First role whose bucket matches the lowercased `text`.
    pub fn match_role(&self, text: &str) -> Option<RoleType> {
        self.buckets()
            .into_iter()
            .find(|(_, bucket)| find_keyword(text, bucket).is_some())
            .map(|(role, _)| role)
    }

    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.customer
            .iter()
            .chain(&self.admin)
            .chain(&self.operator)
            .chain(&self.guest)
            .chain(&self.moderator)
    }
}

impl Default for RoleKeywords {
    fn default() -> Self {
        Self {
            customer: words(&["customer", "client", "buyer", "shopper", "consumer", "member"]),
            admin: words(&["admin", "administrator", "backoffice", "back office", "superuser", "manager"]),
            operator: words(&["operator", "staff", "agent", "driver", "courier", "employee"]),
            guest: words(&["guest", "visitor", "anonymous", "public"]),
            moderator: words(&["moderator", "moderation", "reviewer", "curator"]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleWeights {
    pub role_keyword: f64,
    pub flow_stage: f64,
    pub sequence: f64,
    pub device: f64,
    pub parent_role: f64,
}

impl Default for RoleWeights {
    fn default() -> Self {
        Self {
            role_keyword: 0.4,
            flow_stage: 0.2,
            sequence: 0.2,
            device: 0.1,
            parent_role: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub keywords: RoleKeywords,
    pub flow_stage_keywords: Vec<String>,
    pub device_keywords: Vec<String>,
    pub weights: RoleWeights,
    /// Nodes scoring at or below this are discarded.
    pub min_node_score: f64,
    /// Aggregated roles must score strictly above this to be reported.
    pub min_role_confidence: f64,
}

impl Default for RoleConfig {
    fn default() -> Self {
        Self {
            keywords: RoleKeywords::default(),
            flow_stage_keywords: words(&[
                "onboarding",
                "welcome",
                "signup",
                "sign up",
                "login",
                "checkout",
                "cart",
                "payment",
                "settings",
                "profile",
                "dashboard",
                "step",
                "flow",
            ]),
            device_keywords: words(&["mobile", "tablet", "desktop", "ios", "android", "web", "phone"]),
            weights: RoleWeights::default(),
            min_node_score: 0.3,
            min_role_confidence: 0.6,
        }
    }
}

/// Flow-type keyword buckets, evaluated in priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowKeywords {
    pub onboarding: Vec<String>,
    pub authentication: Vec<String>,
    pub checkout: Vec<String>,
    pub settings: Vec<String>,
    pub main_feature: Vec<String>,
}

impl FlowKeywords {
    pub fn buckets(&self) -> [(FlowType, &[String]); 5] {
        [
            (FlowType::Onboarding, &self.onboarding),
            (FlowType::Authentication, &self.authentication),
            (FlowType::Checkout, &self.checkout),
            (FlowType::Settings, &self.settings),
            (FlowType::MainFeature, &self.main_feature),
        ]
    }

    /// First flow type whose bucket matches the lowercased `text`.
    pub fn match_flow(&self, text: &str) -> Option<FlowType> {
        self.buckets()
            .into_iter()
            .find(|(_, bucket)| find_keyword(text, bucket).is_some())
            .map(|(flow, _)| flow)
    }

    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.onboarding
            .iter()
            .chain(&self.authentication)
            .chain(&self.checkout)
            .chain(&self.settings)
            .chain(&self.main_feature)
    }
}

impl Default for FlowKeywords {
    fn default() -> Self {
        Self {
            onboarding: words(&[
                "onboarding",
                "welcome",
                "intro",
                "tutorial",
                "walkthrough",
                "getting started",
                "splash",
            ]),
            authentication: words(&[
                "login", "log in", "signin", "sign in", "signup", "sign up", "register", "auth",
                "password", "verify", "otp",
            ]),
            checkout: words(&["checkout", "cart", "payment", "shipping", "billing", "purchase", "order"]),
            settings: words(&["settings", "preferences", "account", "profile", "config"]),
            main_feature: words(&["home", "dashboard", "feed", "explore", "search", "detail", "main"]),
        }
    }
}

/// Average seconds a user spends per screen, by flow type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowDurations {
    pub onboarding: u32,
    pub authentication: u32,
    pub checkout: u32,
    pub settings: u32,
    pub main_feature: u32,
    pub unknown: u32,
}

impl FlowDurations {
    pub fn seconds_per_screen(&self, flow_type: FlowType) -> u32 {
        match flow_type {
            FlowType::Onboarding => self.onboarding,
            FlowType::Authentication => self.authentication,
            FlowType::Checkout => self.checkout,
            FlowType::Settings => self.settings,
            FlowType::MainFeature => self.main_feature,
            FlowType::Unknown => self.unknown,
        }
    }
}

impl Default for FlowDurations {
    fn default() -> Self {
        Self {
            onboarding: 20,
            authentication: 15,
            checkout: 30,
            settings: 20,
            main_feature: 25,
            unknown: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub flow_keywords: FlowKeywords,
    pub min_group_confidence: f64,
    /// Role confidence a flow must exceed to count as confidently assigned.
    pub medium_role_confidence: f64,
    pub proximity_radius: f64,
    pub alignment_tolerance: f64,
    pub similarity_threshold: f64,
    pub page_bonus_min_size: usize,
    pub page_bonus_max_size: usize,
    pub critical_path_min_confidence: f64,
    pub short_flow_length: f64,
    pub long_flow_length: f64,
    pub durations: FlowDurations,
    /// Run detection strategies on the rayon pool. Output order is unaffected.
    pub parallel_strategies: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            flow_keywords: FlowKeywords::default(),
            min_group_confidence: 0.5,
            medium_role_confidence: 0.6,
            proximity_radius: 200.0,
            alignment_tolerance: 50.0,
            similarity_threshold: 0.6,
            page_bonus_min_size: 3,
            page_bonus_max_size: 8,
            critical_path_min_confidence: 0.7,
            short_flow_length: 2.0,
            long_flow_length: 8.0,
            durations: FlowDurations::default(),
            parallel_strategies: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub spacing_grid: f64,
    pub max_palette_size: usize,
    pub type_scale_min: f64,
    pub type_scale_max: f64,
    pub spacing_weight: f64,
    pub color_weight: f64,
    pub typography_weight: f64,
    pub complex_component_count: usize,
    pub complex_pattern_count: usize,
    pub complex_distinct_types: usize,
    pub list_min_repeats: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            spacing_grid: 8.0,
            max_palette_size: 10,
            type_scale_min: 1.1,
            type_scale_max: 1.3,
            spacing_weight: 0.3,
            color_weight: 0.4,
            typography_weight: 0.3,
            complex_component_count: 50,
            complex_pattern_count: 4,
            complex_distinct_types: 6,
            list_min_repeats: 3,
        }
    }
}
