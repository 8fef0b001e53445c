//! Tests for the flow detection engine and its strategies.
mod common;
use common::*;
use flowscope::classify::SemanticType;
use flowscope::collaborators::{DetectionStage, ErrorReporter, ProgressEvent, ProgressSink};
use flowscope::config::{EngineConfig, FlowConfig, FlowKeywords, RoleKeywords};
use flowscope::error::DetectionError;
use flowscope::flow::strategy::{
    ContentSimilarityStrategy, DetectionStrategy, NamingStrategy, PageStrategy, SpatialStrategy,
    sequence_number,
};
use flowscope::flow::{
    DetectionMethod, FAILED_DETECTION_ADVICE, FlowDetector, FlowGroup, FlowMetadata, FlowType,
    NO_NAMING_PATTERN_ADVICE, NavigationPattern, SYNTHETIC_ROLE_CONFIDENCE, assign_role,
    infer_flow_type, merge_groups,
};
use flowscope::roles::{DetectionSource, RoleType, UserRole};
use flowscope::screen::{ScreenId, ScreenStructure};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

fn detector() -> FlowDetector {
    FlowDetector::builder(&EngineConfig::default()).build().unwrap()
}

fn customer_role() -> UserRole {
    UserRole::new(
        RoleType::Customer,
        0.8,
        DetectionSource::LayerName,
        "Customer_Onboarding_1",
    )
}

/// Two onboarding screens, deliberately listed out of sequence.
fn onboarding_screens() -> Vec<ScreenStructure> {
    vec![
        screen(0, "Customer_Onboarding_2", "Onboarding", 500.0, 0.0),
        screen(1, "Customer_Onboarding_1", "Onboarding", 0.0, 0.0),
    ]
}

fn assert_coverage(screens: &[ScreenStructure], result: &flowscope::flow::FlowDetectionResult) {
    let mut seen = HashSet::new();
    for flow in &result.flows {
        for s in &flow.screens {
            assert!(seen.insert(s.id), "{} assigned twice", s.id);
        }
    }
    for s in &result.orphaned_screens {
        assert!(seen.insert(s.id), "{} both assigned and orphaned", s.id);
    }
    let expected: HashSet<ScreenId> = screens.iter().map(|s| s.id).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_customer_onboarding_flow() {
    let screens = onboarding_screens();
    let result = detector().detect(&screens, &[customer_role()]);

    assert_eq!(result.flows.len(), 1);
    let flow = &result.flows[0];
    assert_eq!(flow.id, "flow-1");
    assert_eq!(flow.name, "Customer Onboarding");
    assert_eq!(flow.flow_type, FlowType::Onboarding);
    assert_eq!(flow.role.role_type, RoleType::Customer);
    assert_eq!(flow.role.source, DetectionSource::LayerName);
    assert_eq!(flow.method, DetectionMethod::Naming);
    assert_eq!(flow.navigation, NavigationPattern::Linear);
    assert_eq!(flow.sequence, 1);
    assert!((flow.confidence - 1.0).abs() < 1e-9);
    assert!(flow.is_critical_path);
    assert_eq!(flow.estimated_duration_secs, 40);
    assert_eq!(
        flow.screens.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["Customer_Onboarding_1", "Customer_Onboarding_2"]
    );

    assert!(result.orphaned_screens.is_empty());
    assert_eq!(result.role_distribution.get("Customer"), Some(&1));
    assert_eq!(result.flow_type_distribution.get(&FlowType::Onboarding), Some(&1));
    assert_eq!(result.quality.coverage, 1.0);
    assert_eq!(result.quality.naming_groups, 1);
    assert_eq!(result.quality.role_confidence_ratio, 1.0);
    assert!(result.recommendations.is_empty());
}

#[test]
fn test_unrelated_screens_all_orphaned() {
    let screens = unrelated_screens();
    let result = detector().detect(&screens, &[]);

    assert!(result.flows.is_empty());
    assert_eq!(result.orphaned_screens.len(), 10);
    assert_eq!(result.quality.candidate_groups, 0);
    assert_eq!(result.quality.coverage, 0.0);
    assert!(
        result
            .recommendations
            .iter()
            .any(|r| r == NO_NAMING_PATTERN_ADVICE)
    );
    assert_coverage(&screens, &result);
}

#[test]
fn test_one_word_names_stay_orphaned() {
    let screens = one_word_screens();
    let result = detector().detect(&screens, &[]);

    assert!(result.flows.is_empty());
    assert_eq!(result.orphaned_screens.len(), 10);
    assert_eq!(result.quality.naming_groups, 0);
    assert_eq!(result.quality.candidate_groups, 0);
    assert!(
        result
            .recommendations
            .iter()
            .any(|r| r == NO_NAMING_PATTERN_ADVICE)
    );
    assert_coverage(&screens, &result);
}

#[test]
fn test_misc_key_never_groups() {
    let naming = NamingStrategy::new(RoleKeywords::default(), FlowKeywords::default()).unwrap();
    let screens = vec![
        screen(0, "Alpha", "A", 0.0, 0.0),
        screen(1, "Bravo", "A", 0.0, 0.0),
    ];
    assert_eq!(naming.group_key("Alpha"), "misc");
    assert_eq!(naming.group_key("Bravo"), "misc");
    assert!(naming.detect(&screens).unwrap().is_empty());
}

#[test]
fn test_flow_keywords_match_whole_words() {
    let keywords = FlowKeywords::default();
    assert_eq!(keywords.match_flow("border test"), None);
    assert_eq!(keywords.match_flow("rectangle"), None);
    assert_eq!(keywords.match_flow("place order"), Some(FlowType::Checkout));
    assert_eq!(keywords.match_flow("user_settings"), Some(FlowType::Settings));
}

#[test]
fn test_every_screen_assigned_exactly_once() {
    let mut screens = onboarding_screens();
    screens.extend(
        unrelated_screens()
            .into_iter()
            .map(|mut s| {
                s.id = ScreenId(s.id.0 + 10);
                s
            }),
    );
    // Shares a page with an onboarding screen and a prefix with nothing.
    screens.push(screen(50, "Terms", "Onboarding", 5000.0, 5000.0));

    let result = detector().detect(&screens, &[customer_role()]);
    assert_coverage(&screens, &result);
    for flow in &result.flows {
        assert!((0.0..=1.0).contains(&flow.confidence));
    }
    assert!(
        result.flows[0]
            .screens
            .iter()
            .any(|s| s.name == "Terms")
    );
}

#[test]
fn test_detection_is_deterministic() {
    let mut screens = onboarding_screens();
    screens.extend([
        screen(2, "Checkout 1", "Shop", 0.0, 3000.0),
        screen(3, "Checkout 2", "Shop", 100.0, 3000.0),
        screen(4, "Checkout 3", "Shop", 200.0, 3000.0),
    ]);

    let detector = detector();
    let first = detector.detect(&screens, &[customer_role()]);
    let second = detector.detect(&screens, &[customer_role()]);
    assert_eq!(first, second);

    let parallel = FlowDetector::builder(&EngineConfig {
        flow: FlowConfig {
            parallel_strategies: true,
            ..FlowConfig::default()
        },
        ..EngineConfig::default()
    })
    .build()
    .unwrap();
    assert_eq!(parallel.detect(&screens, &[customer_role()]), first);
}

#[test]
fn test_flows_ranked_by_confidence() {
    let screens = vec![
        screen(0, "Alpha 1", "P1", 0.0, 0.0),
        screen(1, "Alpha 2", "P2", 3000.0, 0.0),
        screen(2, "Customer_Checkout_1", "P3", 0.0, 3000.0),
        screen(3, "Customer_Checkout_2", "P4", 3000.0, 3000.0),
    ];
    let result = detector().detect(&screens, &[]);

    assert_eq!(result.flows.len(), 2);
    assert_eq!(result.flows[0].flow_type, FlowType::Checkout);
    assert_eq!(result.flows[0].sequence, 1);
    assert_eq!(result.flows[1].sequence, 2);
    assert!(result.flows[0].confidence >= result.flows[1].confidence);
    // No detected roles: the checkout flow keeps its naming role, synthetically.
    assert_eq!(result.flows[0].role.source, DetectionSource::Synthetic);
    assert_eq!(result.flows[1].name, "Customer Unknown");
    assert_eq!(result.flows[1].navigation, NavigationPattern::Linear);
    assert!(!result.flows[1].is_critical_path);
}

#[test]
fn test_sequence_number_cascade() {
    assert_eq!(sequence_number("Step 3 - Payment"), Some(3));
    assert_eq!(sequence_number("Screen 2 of 5"), Some(2));
    assert_eq!(sequence_number("Checkout_4"), Some(4));
    assert_eq!(sequence_number("1. Welcome"), Some(1));
    assert_eq!(sequence_number("Home (2)"), Some(2));
    assert_eq!(sequence_number("v2Home"), Some(2));
    assert_eq!(sequence_number("Home"), None);
}

#[test]
fn test_naming_group_keys() {
    let naming = NamingStrategy::new(RoleKeywords::default(), FlowKeywords::default()).unwrap();
    assert_eq!(naming.group_key("Customer_Onboarding_1"), "customer_onboarding");
    assert_eq!(naming.group_key("Admin - Settings"), "admin_settings");
    assert_eq!(naming.group_key("Checkout 2"), "checkout");
    assert_eq!(naming.group_key("Profile - Edit"), "profile");
    assert_eq!(naming.group_key("Settings"), "flow:settings");
    assert_eq!(naming.group_key("Untitled"), "misc");
}

#[test]
fn test_naming_groups_need_two_members() {
    let naming = NamingStrategy::new(RoleKeywords::default(), FlowKeywords::default()).unwrap();
    let screens = vec![
        screen(0, "Profile - Edit", "A", 0.0, 0.0),
        screen(1, "Profile - View", "A", 0.0, 0.0),
        screen(2, "Lonely Screen", "A", 0.0, 0.0),
    ];
    let groups = naming.detect(&screens).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].screens, vec![ScreenId(0), ScreenId(1)]);
    // base 0.5 + settings keyword 0.1
    assert!((groups[0].confidence - 0.6).abs() < 1e-9);
    assert_eq!(groups[0].metadata.flow_type.as_deref(), Some("settings"));
    assert_eq!(groups[0].metadata.navigation, None);
}

#[test]
fn test_page_strategy_confidence() {
    let page = PageStrategy::new(FlowKeywords::default(), 3, 8);
    let screens = vec![
        screen(0, "A", "Checkout Flow", 0.0, 0.0),
        screen(1, "B", "Checkout Flow", 0.0, 0.0),
        screen(2, "C", "Checkout Flow", 0.0, 0.0),
        screen(3, "D", "Scratch", 0.0, 0.0),
        screen(4, "E", "Scratch", 0.0, 0.0),
        screen(5, "F", "Alone", 0.0, 0.0),
    ];
    let groups = page.detect(&screens).unwrap();
    assert_eq!(groups.len(), 2);
    assert!((groups[0].confidence - 0.9).abs() < 1e-9);
    assert_eq!(groups[0].metadata.flow_type.as_deref(), Some("checkout"));
    assert!((groups[1].confidence - 0.4).abs() < 1e-9);
}

#[test]
fn test_spatial_strategy_alignment_bonus() {
    let spatial = SpatialStrategy::new(200.0, 50.0);

    let aligned = vec![
        screen(0, "A", "P", 0.0, 0.0),
        screen(1, "B", "P", 100.0, 0.0),
        screen(2, "C", "P", 150.0, 40.0),
        screen(3, "Far", "P", 5000.0, 5000.0),
    ];
    let groups = spatial.detect(&aligned).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].screens, vec![ScreenId(0), ScreenId(1), ScreenId(2)]);
    assert!((groups[0].confidence - 0.6).abs() < 1e-9);

    let scattered = vec![screen(0, "A", "P", 0.0, 0.0), screen(1, "B", "P", 150.0, 120.0)];
    let groups = spatial.detect(&scattered).unwrap();
    assert_eq!(groups.len(), 1);
    assert!((groups[0].confidence - 0.3).abs() < 1e-9);
}

#[test]
fn test_content_similarity_strategy() {
    use SemanticType::*;
    let content = ContentSimilarityStrategy::new(0.6);
    let screens = vec![
        screen_with_components(0, "A", "P", 0.0, 0.0, vec![
            component(Button),
            component(Input),
            component(Input),
        ]),
        screen_with_components(1, "B", "P", 0.0, 0.0, vec![
            component(Button),
            component(Input),
            component_with_children(Input, vec![component(Label)]),
        ]),
        screen_with_components(2, "C", "P", 0.0, 0.0, vec![component(Card), component(Card)]),
        screen(3, "Empty", "P", 0.0, 0.0),
        screen(4, "Also Empty", "P", 0.0, 0.0),
    ];
    let groups = content.detect(&screens).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].screens, vec![ScreenId(0), ScreenId(1)]);
    assert!((groups[0].confidence - 0.75).abs() < 1e-9);
}

fn group(id: &str, screens: &[u32], confidence: f64) -> FlowGroup {
    FlowGroup::new(
        id,
        screens.iter().map(|s| ScreenId(*s)),
        confidence,
        DetectionMethod::Page,
    )
}

#[test]
fn test_merge_is_transitive_and_first_wins() {
    let first = group("a", &[1, 2], 0.5).with_metadata(FlowMetadata {
        flow_type: Some("checkout".to_string()),
        ..FlowMetadata::default()
    });
    let merged = merge_groups(vec![
        first,
        group("b", &[3, 4], 0.9),
        group("c", &[2, 3], 0.6),
        group("d", &[7], 0.4),
    ]);

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].id, "a");
    assert_eq!(merged[0].confidence, 0.9);
    assert_eq!(merged[0].metadata.flow_type.as_deref(), Some("checkout"));
    assert_eq!(
        merged[0].screens,
        vec![ScreenId(1), ScreenId(2), ScreenId(3), ScreenId(4)]
    );
    assert_eq!(merged[1].id, "d");
}

#[test]
fn test_merge_is_idempotent() {
    let groups = vec![
        group("a", &[1, 2], 0.5),
        group("b", &[5, 6], 0.7),
        group("c", &[2, 3], 0.6),
        group("d", &[6, 9], 0.2),
        group("e", &[11], 0.8),
    ];
    let once = merge_groups(groups);
    let twice = merge_groups(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_role_assignment_from_screen_names() {
    let roles = vec![
        UserRole::new(RoleType::Admin, 0.9, DetectionSource::LayerName, "Admin Home 1"),
        UserRole::new(RoleType::Customer, 0.7, DetectionSource::LayerName, "Shopper Cart 1"),
    ];
    let shop = [screen(0, "Shopper Cart", "P", 0.0, 0.0)];
    let members: Vec<&ScreenStructure> = shop.iter().collect();
    let plain = group("g", &[0], 0.8);

    let role = assign_role(&plain, &members, &roles, &RoleKeywords::default());
    assert_eq!(role.role_type, RoleType::Customer);
    assert_eq!(role.confidence, 0.7);

    let fallback = assign_role(&plain, &members, &[], &RoleKeywords::default());
    assert_eq!(fallback.role_type, RoleType::Customer);
    assert_eq!(fallback.source, DetectionSource::Synthetic);
    assert_eq!(fallback.confidence, SYNTHETIC_ROLE_CONFIDENCE);

    let tagged = plain.with_metadata(FlowMetadata {
        role: Some(RoleType::Admin),
        ..FlowMetadata::default()
    });
    assert_eq!(
        assign_role(&tagged, &members, &roles, &RoleKeywords::default()).confidence,
        0.9
    );
}

#[test]
fn test_flow_type_inference() {
    let config = FlowConfig::default();
    let shop = [screen(0, "Payment Details", "P", 0.0, 0.0)];
    let members: Vec<&ScreenStructure> = shop.iter().collect();
    let with_type = |tag: &str| {
        group("g", &[0], 0.8).with_metadata(FlowMetadata {
            flow_type: Some(tag.to_string()),
            ..FlowMetadata::default()
        })
    };

    assert_eq!(infer_flow_type(&with_type("settings"), &members, &config), FlowType::Settings);
    assert_eq!(infer_flow_type(&with_type("unknown"), &members, &config), FlowType::Checkout);
    assert_eq!(infer_flow_type(&with_type("bogus"), &members, &config), FlowType::Checkout);

    let blank = [screen(0, "Zzz", "P", 0.0, 0.0)];
    let members: Vec<&ScreenStructure> = blank.iter().collect();
    assert_eq!(infer_flow_type(&group("g", &[0], 0.8), &members, &config), FlowType::Unknown);
}

struct Broken;

impl DetectionStrategy for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn detect(&self, _screens: &[ScreenStructure]) -> Result<Vec<FlowGroup>, DetectionError> {
        Err(DetectionError::StrategyFailed {
            strategy: "broken".to_string(),
            message: "always fails".to_string(),
        })
    }
}

#[test]
fn test_failing_strategy_is_ignored() {
    let screens = onboarding_screens();
    let with_broken = FlowDetector::builder(&EngineConfig::default())
        .with_strategy(Box::new(Broken))
        .build()
        .unwrap();
    assert_eq!(
        with_broken.strategy_names(),
        vec!["naming", "page", "prototype", "spatial", "content", "broken"]
    );

    assert_eq!(
        with_broken.detect(&screens, &[customer_role()]),
        detector().detect(&screens, &[customer_role()])
    );
}

struct Phantom;

impl DetectionStrategy for Phantom {
    fn name(&self) -> &str {
        "phantom"
    }

    fn detect(&self, _screens: &[ScreenStructure]) -> Result<Vec<FlowGroup>, DetectionError> {
        Ok(vec![FlowGroup::new(
            "phantom-1",
            [ScreenId(99), ScreenId(98)],
            0.9,
            DetectionMethod::Custom("phantom".to_string()),
        )])
    }
}

#[derive(Clone, Default)]
struct Recorder {
    errors: Arc<Mutex<Vec<String>>>,
    stages: Arc<Mutex<Vec<DetectionStage>>>,
}

impl ErrorReporter for Recorder {
    fn report(&self, context: &str, error: &dyn std::error::Error) {
        self.errors
            .lock()
            .unwrap()
            .push(format!("{}: {}", context, error));
    }
}

impl ProgressSink for Recorder {
    fn report(&self, event: ProgressEvent) {
        self.stages.lock().unwrap().push(event.stage);
    }
}

#[test]
fn test_top_level_failure_yields_canonical_result() {
    let recorder = Recorder::default();
    let detector = FlowDetector::builder(&EngineConfig::default())
        .without_default_strategies()
        .with_strategy(Box::new(Phantom))
        .with_error_reporter(Box::new(recorder.clone()))
        .build()
        .unwrap();

    let screens = onboarding_screens();
    let result = detector.detect(&screens, &[]);
    assert!(result.flows.is_empty());
    assert_eq!(result.orphaned_screens, screens);
    assert_eq!(result.recommendations, vec![FAILED_DETECTION_ADVICE.to_string()]);

    let errors = recorder.errors.lock().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("unknown screen 99"));
}

#[test]
fn test_progress_reports_every_stage() {
    let recorder = Recorder::default();
    let detector = FlowDetector::builder(&EngineConfig::default())
        .with_progress(Box::new(recorder.clone()))
        .build()
        .unwrap();
    detector.detect(&onboarding_screens(), &[]);

    let stages = recorder.stages.lock().unwrap();
    assert_eq!(stages.first(), Some(&DetectionStage::Strategies));
    assert_eq!(stages.last(), Some(&DetectionStage::Complete));
    assert_eq!(stages.len(), 7);
}

#[test]
fn test_builder_rejects_invalid_config() {
    let config = EngineConfig {
        flow: FlowConfig {
            min_group_confidence: 1.5,
            ..FlowConfig::default()
        },
        ..EngineConfig::default()
    };
    assert!(FlowDetector::builder(&config).build().is_err());
}
