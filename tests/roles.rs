//! Tests for user-role detection.
mod common;
use common::*;
use flowscope::node::NodeIndex;
use flowscope::roles::{DetectionSource, RoleDetector, RoleType, UserRole};

#[test]
fn test_role_from_layer_name() {
    let design = forest(vec![page(
        "Onboarding",
        vec![frame("Customer_Onboarding_1", 0.0, 0.0, 375.0, 812.0)],
    )]);

    let roles = RoleDetector::default().detect_forest(&design);
    assert_eq!(roles.len(), 1);
    let role = &roles[0];
    assert_eq!(role.role_type, RoleType::Customer);
    assert_eq!(role.id, "role-customer");
    assert_eq!(role.name, "Customer");
    assert_eq!(role.source, DetectionSource::LayerName);
    assert_eq!(role.evidence, "Customer_Onboarding_1");
    // keyword 0.4 + flow stage 0.2 + sequence 0.2
    assert!((role.confidence - 0.8).abs() < 1e-9);
}

#[test]
fn test_ancestry_alone_stays_below_threshold() {
    let design = forest(vec![page(
        "Admin Console",
        vec![frame("Settings Step 2 Mobile", 0.0, 0.0, 375.0, 812.0)],
    )]);
    let detector = RoleDetector::default();
    let index = NodeIndex::build(&design);

    // flow stage 0.2 + sequence 0.2 + device 0.1 + parent role 0.1
    let signal = detector.score_node(&index, 1).unwrap();
    assert_eq!(signal.role_type, RoleType::Admin);
    assert_eq!(signal.source, DetectionSource::Ancestry);
    assert!((signal.confidence - 0.6).abs() < 1e-9);

    // 0.6 does not clear the strict reporting threshold.
    assert!(detector.detect(&index).is_empty());
}

#[test]
fn test_best_instance_kept_in_first_detection_order() {
    let design = forest(vec![
        frame("Guest Checkout 1", 0.0, 0.0, 375.0, 812.0),
        frame("Customer Cart 2 Mobile", 500.0, 0.0, 375.0, 812.0),
        frame("Guest Welcome 3 Web", 1000.0, 0.0, 375.0, 812.0),
    ]);

    let roles = RoleDetector::default().detect_forest(&design);
    let types: Vec<RoleType> = roles.iter().map(|r| r.role_type).collect();
    assert_eq!(types, vec![RoleType::Guest, RoleType::Customer]);
    assert!((roles[0].confidence - 0.9).abs() < 1e-9);
    assert_eq!(roles[0].evidence, "Guest Welcome 3 Web");
}

#[test]
fn test_bucket_order_breaks_ties() {
    let design = forest(vec![frame("Customer Admin Panel 1 Step", 0.0, 0.0, 375.0, 812.0)]);
    let roles = RoleDetector::default().detect_forest(&design);
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role_type, RoleType::Customer);
}

#[test]
fn test_unrelated_names_score_nothing() {
    let design = forest(vec![frame("Random Layer", 0.0, 0.0, 375.0, 812.0)]);
    let index = NodeIndex::build(&design);
    assert!(RoleDetector::default().score_node(&index, 0).is_none());
    assert!(RoleDetector::default().detect(&index).is_empty());
}

#[test]
fn test_user_role_confidence_clamped() {
    let role = UserRole::new(RoleType::Operator, 1.7, DetectionSource::LayerName, "Ops");
    assert_eq!(role.confidence, 1.0);
    let synthetic = UserRole::synthetic(RoleType::Customer, -0.2);
    assert_eq!(synthetic.confidence, 0.0);
    assert_eq!(synthetic.source, DetectionSource::Synthetic);
}
