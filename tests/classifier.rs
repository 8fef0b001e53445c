//! Tests for the semantic component classifier.
mod common;
use common::*;
use flowscope::classify::{NodeSignals, SemanticClassifier, SemanticType, TypeRule};
use flowscope::config::{ClassifierConfig, find_keyword};
use flowscope::node::NodeKind;

#[test]
fn test_submit_button_classified_confidently() {
    let classifier = SemanticClassifier::default();
    let result = classifier.classify(&submit_button());

    assert!(result.flags.is_button);
    assert_eq!(result.best, Some(SemanticType::Button));
    assert!(result.confidence >= 0.8, "confidence was {}", result.confidence);
    assert!(result.confidence <= 1.0);
    assert!(
        result
            .reasons()
            .iter()
            .any(|r| r.contains("name contains 'button'"))
    );
}

#[test]
fn test_bare_rounded_button_without_label() {
    let classifier = SemanticClassifier::default();
    let mut button = node(NodeKind::Frame, "Submit Button", 120.0, 44.0);
    button.style.fills = vec![solid("#1A73E8")];
    button.style.corner_radius = 8.0;

    let result = classifier.classify(&button);
    assert!(result.flags.is_button);
    assert_eq!(result.detected().collect::<Vec<_>>(), vec![SemanticType::Button]);
    // name + size + styling
    assert!(result.confidence >= 0.8, "confidence was {}", result.confidence);
}

#[test]
fn test_outlined_field_is_input() {
    let classifier = SemanticClassifier::default();
    let result = classifier.classify(&email_input());

    assert_eq!(result.detected().collect::<Vec<_>>(), vec![SemanticType::Input]);
    // 0.8 base + 4 reasons * 0.05
    assert!((result.confidence - 1.0).abs() < 1e-9);
}

#[test]
fn test_heading_and_label_require_text_nodes() {
    let classifier = SemanticClassifier::default();

    let heading = text("Body", "Welcome back", 28.0);
    let result = classifier.classify(&heading);
    assert!(result.is(SemanticType::Heading));
    assert!(!result.is(SemanticType::Label));

    let caption = text("Body", "Terms apply", 12.0);
    assert!(classifier.classify(&caption).is(SemanticType::Label));

    // A frame named like a heading is not a heading.
    let frame = node(NodeKind::Frame, "Title", 300.0, 200.0);
    assert!(!classifier.classify(&frame).is(SemanticType::Heading));
}

#[test]
fn test_unclassified_node_has_zero_confidence() {
    let classifier = SemanticClassifier::default();
    let blank = node(NodeKind::Rectangle, "Rectangle 4", 1000.0, 1000.0);

    let result = classifier.classify(&blank);
    assert!(result.evidence.is_empty());
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.best, None);
    assert_eq!(classifier.semantic_type(&blank, &[]), None);
}

#[test]
fn test_keywords_match_whole_words_only() {
    let classifier = SemanticClassifier::default();

    // "cta" inside "rectangle", "tag" inside "stage", "nav" inside "canvas".
    for name in ["Rectangle 4", "Stage Backdrop", "Canvas Area"] {
        let shape = node(NodeKind::Rectangle, name, 1000.0, 1000.0);
        assert!(classifier.classify(&shape).evidence.is_empty(), "{} was classified", name);
    }

    let cta = node(NodeKind::Frame, "Primary-CTA", 1000.0, 1000.0);
    assert_eq!(classifier.classify(&cta).best, Some(SemanticType::Button));

    let tab_bar = node(NodeKind::Frame, "Main_Tab Bar", 1000.0, 1000.0);
    assert!(classifier.classify(&tab_bar).is(SemanticType::Navigation));
}

#[test]
fn test_find_keyword_boundaries() {
    let keywords: Vec<String> = ["order", "sign up"].iter().map(|k| k.to_string()).collect();
    assert_eq!(find_keyword("border test", &keywords), None);
    assert_eq!(find_keyword("place order", &keywords), Some("order"));
    assert_eq!(find_keyword("sign-up step 2", &keywords), Some("sign up"));
    assert_eq!(find_keyword("signup", &keywords), None);
    assert_eq!(find_keyword("", &keywords), None);
}

#[test]
fn test_ambiguous_node_confidence_penalized() {
    let classifier = SemanticClassifier::default();
    // Matches both the button and the card keyword lists.
    let ambiguous = node(NodeKind::Frame, "Card Button", 10.0, 10.0);

    let result = classifier.classify(&ambiguous);
    assert_eq!(result.evidence.len(), 2);
    // max(0.3, 0.8 - 0.1 * 2)
    assert!((result.confidence - 0.6).abs() < 1e-9);
    // Equal support: button wins the tie-break over card.
    assert_eq!(result.best, Some(SemanticType::Button));
}

#[test]
fn test_navigation_shape_needs_children() {
    let classifier = SemanticClassifier::default();
    let mut bar = node(NodeKind::Frame, "Bottom", 375.0, 64.0);
    assert!(!classifier.classify(&bar).is(SemanticType::Navigation));

    bar.children = (0..4)
        .map(|i| node(NodeKind::Frame, &format!("Item {}", i), 40.0, 40.0))
        .collect();
    assert!(classifier.classify(&bar).is(SemanticType::Navigation));
}

#[test]
fn test_ancestor_context_adds_reason_without_flipping_verdict() {
    let classifier = SemanticClassifier::default();
    let button = submit_button();

    let plain = classifier.classify_with_ancestors(&button, &[]);
    let nested = classifier.classify_with_ancestors(&button, &["Main Nav"]);
    assert_eq!(plain.best, nested.best);
    assert!(nested.reasons().len() > plain.reasons().len());

    let blank = node(NodeKind::Rectangle, "Shape", 1000.0, 1000.0);
    assert!(classifier.classify_with_ancestors(&blank, &["Main Nav"]).evidence.is_empty());
}

#[test]
fn test_structural_fallbacks() {
    let classifier = SemanticClassifier::default();

    let icon = node(NodeKind::Vector, "Chevron", 24.0, 24.0);
    assert_eq!(classifier.semantic_type(&icon, &[]), Some(SemanticType::Icon));

    let mut photo = node(NodeKind::Rectangle, "Photo", 300.0, 200.0);
    photo.style.fills = vec![flowscope::node::Paint {
        kind: flowscope::node::PaintKind::Image,
        color: None,
        opacity: 1.0,
    }];
    assert_eq!(classifier.semantic_type(&photo, &[]), Some(SemanticType::Image));

    let body = text("Copy", "Lorem ipsum", 16.0);
    assert_eq!(classifier.semantic_type(&body, &[]), Some(SemanticType::Text));

    let mut group = node(NodeKind::Group, "Group 1", 1000.0, 1000.0);
    group.children = vec![node(NodeKind::Rectangle, "Shape", 1000.0, 1000.0)];
    assert_eq!(classifier.semantic_type(&group, &[]), Some(SemanticType::Container));
}

struct AlwaysButton;

impl TypeRule for AlwaysButton {
    fn semantic_type(&self) -> SemanticType {
        SemanticType::Button
    }

    fn evaluate(&self, _signals: &NodeSignals, _config: &ClassifierConfig) -> Option<Vec<String>> {
        Some(vec!["custom rule".to_string()])
    }
}

#[test]
fn test_custom_rule_replaces_builtin() {
    let classifier = SemanticClassifier::default().with_rule(Box::new(AlwaysButton));
    let blank = node(NodeKind::Rectangle, "Shape", 1000.0, 1000.0);

    let result = classifier.classify(&blank);
    assert_eq!(result.best, Some(SemanticType::Button));
    assert_eq!(result.reasons(), vec!["button: custom rule".to_string()]);
}
