use super::SemanticType;
use super::signals::NodeSignals;
use crate::config::{ClassifierConfig, find_keyword};

/// Decides whether one semantic type applies to a node.
///
/// Each type keeps its own combination of signals; the rules are deliberately
/// not folded into one generic formula.
pub trait TypeRule: Send + Sync {
    fn semantic_type(&self) -> SemanticType;

    /// Returns the contributing reasons when the type is detected, `None` otherwise.
    fn evaluate(&self, signals: &NodeSignals, config: &ClassifierConfig) -> Option<Vec<String>>;
}

fn name_reason(keyword: Option<&str>, reasons: &mut Vec<String>) {
    if let Some(kw) = keyword {
        reasons.push(format!("name contains '{}'", kw));
    }
}

/// `name OR (size AND fill-or-stroke AND (radius OR effects))`
pub struct ButtonRule;

impl TypeRule for ButtonRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Button
    }

    fn evaluate(&self, s: &NodeSignals, config: &ClassifierConfig) -> Option<Vec<String>> {
        let keyword = find_keyword(&s.name, &config.button_keywords);
        let sized = config.button_bounds.contains(s.width, s.height);
        let styled = (s.has_fill || s.has_stroke) && (s.corner_radius > 0.0 || s.has_effects);
        if keyword.is_none() && !(sized && styled) {
            return None;
        }

        let mut reasons = Vec::new();
        name_reason(keyword, &mut reasons);
        if sized {
            reasons.push(format!("size {}x{} fits button bounds", s.width, s.height));
        }
        if styled {
            reasons.push("filled or outlined with rounded corners or effects".to_string());
        }
        if s.contains_text {
            reasons.push("contains a text label".to_string());
        }
        if s.in_navigation {
            reasons.push("nested in a navigation container".to_string());
        }
        Some(reasons)
    }
}

/// `name OR (size AND stroke AND few children)`
pub struct InputRule;

impl TypeRule for InputRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Input
    }

    fn evaluate(&self, s: &NodeSignals, config: &ClassifierConfig) -> Option<Vec<String>> {
        let keyword = find_keyword(&s.name, &config.input_keywords);
        let sized = config.input_bounds.contains(s.width, s.height);
        let styled = s.has_stroke && s.child_count <= config.input_max_children;
        if keyword.is_none() && !(sized && styled) {
            return None;
        }

        let mut reasons = Vec::new();
        name_reason(keyword, &mut reasons);
        if sized {
            reasons.push(format!("size {}x{} fits input bounds", s.width, s.height));
        }
        if styled {
            reasons.push("outlined with at most a few children".to_string());
        }
        if s.contains_text {
            reasons.push("contains placeholder text".to_string());
        }
        Some(reasons)
    }
}

/// `text AND (name OR large font)`
pub struct HeadingRule;

impl TypeRule for HeadingRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Heading
    }

    fn evaluate(&self, s: &NodeSignals, config: &ClassifierConfig) -> Option<Vec<String>> {
        if !s.is_text {
            return None;
        }
        let keyword = find_keyword(&s.name, &config.heading_keywords);
        let large = s
            .font_size
            .filter(|size| *size >= config.heading_min_font_size);
        if keyword.is_none() && large.is_none() {
            return None;
        }

        let mut reasons = vec!["is a text node".to_string()];
        name_reason(keyword, &mut reasons);
        if let Some(size) = large {
            reasons.push(format!("font size {} is heading-sized", size));
        }
        if s.font_weight.is_some_and(|w| w >= 600.0) {
            reasons.push("bold weight".to_string());
        }
        Some(reasons)
    }
}

/// `text AND (name OR small font)`
pub struct LabelRule;

impl TypeRule for LabelRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Label
    }

    fn evaluate(&self, s: &NodeSignals, config: &ClassifierConfig) -> Option<Vec<String>> {
        if !s.is_text {
            return None;
        }
        let keyword = find_keyword(&s.name, &config.label_keywords);
        let small = s
            .font_size
            .filter(|size| *size <= config.label_max_font_size);
        if keyword.is_none() && small.is_none() {
            return None;
        }

        let mut reasons = vec!["is a text node".to_string()];
        name_reason(keyword, &mut reasons);
        if let Some(size) = small {
            reasons.push(format!("font size {} is label-sized", size));
        }
        Some(reasons)
    }
}

/// `name OR (size AND fill AND (radius OR effects) AND several children)`
pub struct CardRule;

impl TypeRule for CardRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Card
    }

    fn evaluate(&self, s: &NodeSignals, config: &ClassifierConfig) -> Option<Vec<String>> {
        let keyword = find_keyword(&s.name, &config.card_keywords);
        let sized = config.card_bounds.contains(s.width, s.height);
        let styled = s.has_fill
            && (s.corner_radius > 0.0 || s.has_effects)
            && s.child_count >= config.card_min_children;
        if keyword.is_none() && !(sized && styled) {
            return None;
        }

        let mut reasons = Vec::new();
        name_reason(keyword, &mut reasons);
        if sized {
            reasons.push(format!("size {}x{} fits card bounds", s.width, s.height));
        }
        if styled {
            reasons.push(format!("filled surface grouping {} children", s.child_count));
        }
        if s.contains_text {
            reasons.push("contains text content".to_string());
        }
        Some(reasons)
    }
}

/// `name OR ((bar OR rail shape) AND many children)`
pub struct NavigationRule;

impl TypeRule for NavigationRule {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Navigation
    }

    fn evaluate(&self, s: &NodeSignals, config: &ClassifierConfig) -> Option<Vec<String>> {
        let keyword = find_keyword(&s.name, &config.navigation_keywords);
        let bar = s.width >= config.nav_bar_min_width && s.height <= config.nav_bar_max_height;
        let rail = s.height >= config.nav_rail_min_height && s.width <= config.nav_rail_max_width;
        let shaped = bar || rail;
        let populated = s.child_count >= config.navigation_min_children;
        if keyword.is_none() && !(shaped && populated) {
            return None;
        }

        let mut reasons = Vec::new();
        name_reason(keyword, &mut reasons);
        if bar {
            reasons.push("wide, short bar shape".to_string());
        } else if rail {
            reasons.push("tall, narrow rail shape".to_string());
        }
        if populated {
            reasons.push(format!("holds {} items", s.child_count));
        }
        Some(reasons)
    }
}

/// The built-in rules, in evaluation order.
pub(super) fn default_rules() -> Vec<Box<dyn TypeRule>> {
    vec![
        Box::new(ButtonRule),
        Box::new(InputRule),
        Box::new(HeadingRule),
        Box::new(LabelRule),
        Box::new(CardRule),
        Box::new(NavigationRule),
    ]
}
