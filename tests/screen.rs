//! Tests for node ingestion and the screen structure builder.
mod common;
use common::*;
use flowscope::classify::{SemanticClassifier, SemanticType};
use flowscope::config::ScreenConfig;
use flowscope::node::{
    Geometry, IntoDesignForest, LayoutDirection, NodeIndex, NodeKind, NodeStyle, Padding,
    RawDocument,
};
use flowscope::screen::layout::{device_type, layout_type, population_std_dev};
use flowscope::screen::{DeviceType, LayoutType, ScreenBuilder, ScreenId};
use flowscope::style::StyleSummary;

#[test]
fn test_device_type_breakpoints() {
    let config = ScreenConfig::default();
    let device = |w, h| device_type(&Geometry::new(0.0, 0.0, w, h), &config);

    assert_eq!(device(400.0, 300.0), DeviceType::Mobile);
    assert_eq!(device(375.0, 812.0), DeviceType::Mobile);
    assert_eq!(device(768.0, 1024.0), DeviceType::Tablet);
    assert_eq!(device(600.0, 600.0), DeviceType::Tablet);
    assert_eq!(device(700.0, 400.0), DeviceType::Desktop);
    assert_eq!(device(1440.0, 900.0), DeviceType::Desktop);
}

#[test]
fn test_layout_type_from_child_spread() {
    let config = ScreenConfig::default();
    let mut root = frame("Row", 0.0, 0.0, 375.0, 812.0);

    root.children = vec![frame("A", 0.0, 0.0, 50.0, 50.0)];
    assert_eq!(layout_type(&root, &config), LayoutType::Mixed);

    root.children = (0..3)
        .map(|i| frame(&format!("H{}", i), i as f64 * 100.0, 10.0, 50.0, 50.0))
        .collect();
    assert_eq!(layout_type(&root, &config), LayoutType::Horizontal);

    root.children = (0..3)
        .map(|i| frame(&format!("V{}", i), 10.0, i as f64 * 100.0, 50.0, 50.0))
        .collect();
    assert_eq!(layout_type(&root, &config), LayoutType::Vertical);

    root.children = (0..3)
        .map(|i| frame(&format!("G{}", i), i as f64 * 10.0, i as f64 * 10.0, 50.0, 50.0))
        .collect();
    assert_eq!(layout_type(&root, &config), LayoutType::Grid);

    root.children = (0..3)
        .map(|i| frame(&format!("M{}", i), i as f64 * 100.0, i as f64 * 100.0, 50.0, 50.0))
        .collect();
    assert_eq!(layout_type(&root, &config), LayoutType::Mixed);

    root.style.layout_direction = Some(LayoutDirection::Vertical);
    assert_eq!(layout_type(&root, &config), LayoutType::Vertical);
}

#[test]
fn test_population_std_dev() {
    assert_eq!(population_std_dev(&[]), 0.0);
    assert!((population_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.0).abs() < 1e-9);
}

#[test]
fn test_build_all_assigns_ids_and_pages() {
    let mut login = frame("Login", 0.0, 0.0, 375.0, 812.0);
    login.children = vec![email_input(), submit_button()];
    let design = forest(vec![
        page("Auth", vec![login, frame("Login", 500.0, 0.0, 375.0, 812.0)]),
        frame("Loose", 0.0, 2000.0, 1440.0, 900.0),
    ]);

    let screens = ScreenBuilder::default().build_all(&design);
    assert_eq!(screens.len(), 3);
    assert_eq!(
        screens.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![ScreenId(0), ScreenId(1), ScreenId(2)]
    );
    // Duplicate names keep distinct identities.
    assert_eq!(screens[0].name, screens[1].name);
    assert_ne!(screens[0].id, screens[1].id);
    assert_eq!(screens[0].page, "Auth");
    assert_eq!(screens[2].page, "Untitled");
    assert_eq!(screens[2].device_type, DeviceType::Desktop);

    let types: Vec<SemanticType> = screens[0].component_signature();
    assert!(types.contains(&SemanticType::Input));
    assert!(types.contains(&SemanticType::Button));
    assert_eq!(screens[0].stats.component_count, 4);
}

#[test]
fn test_degenerate_root_yields_fallback() {
    let mut broken = frame("Broken", 10.0, 10.0, 0.0, 812.0);
    broken.children = vec![submit_button()];
    let design = forest(vec![page("Misc", vec![broken])]);

    let screens = ScreenBuilder::default().build_all(&design);
    assert_eq!(screens.len(), 1);
    let screen = &screens[0];
    assert_eq!(screen.name, "Broken");
    assert_eq!(screen.page, "Misc");
    assert!(screen.components.is_empty());
    assert_eq!(screen.device_type, DeviceType::Mobile);
    assert_eq!(screen.layout_type, LayoutType::Mixed);
    assert_eq!(screen.geometry, Geometry::default());
}

#[test]
fn test_too_deep_children_are_dropped() {
    let config = ScreenConfig {
        max_depth: 2,
        ..ScreenConfig::default()
    };
    let builder = ScreenBuilder::new(config, SemanticClassifier::default());

    let mut level3 = frame("Level 3", 0.0, 0.0, 10.0, 10.0);
    level3.children = vec![frame("Level 4", 0.0, 0.0, 5.0, 5.0)];
    let mut level2 = frame("Level 2", 0.0, 0.0, 20.0, 20.0);
    level2.children = vec![level3];
    let mut level1 = frame("Level 1", 0.0, 0.0, 40.0, 40.0);
    level1.children = vec![level2];
    let mut root = frame("Deep", 0.0, 0.0, 375.0, 812.0);
    root.children = vec![level1];

    let screens = builder.build_all(&forest(vec![root]));
    let screen = &screens[0];
    assert_eq!(screen.components.len(), 1);
    assert_eq!(screen.components[0].children.len(), 1);
    assert!(screen.components[0].children[0].children.is_empty());
    assert_eq!(screen.all_components().count(), 2);
}

#[test]
fn test_invisible_nodes_are_skipped() {
    let mut hidden_screen = frame("Hidden", 0.0, 0.0, 375.0, 812.0);
    hidden_screen.visible = false;
    let mut visible_screen = frame("Shown", 0.0, 0.0, 375.0, 812.0);
    let mut hidden_child = submit_button();
    hidden_child.visible = false;
    visible_screen.children = vec![hidden_child, email_input()];

    let screens = ScreenBuilder::default().build_all(&forest(vec![hidden_screen, visible_screen]));
    assert_eq!(screens.len(), 1);
    assert_eq!(screens[0].name, "Shown");
    assert_eq!(screens[0].components.len(), 1);
}

#[test]
fn test_raw_export_defaults_applied_once() {
    let json = r#"{
        "document": {
            "type": "DOCUMENT",
            "children": [{
                "type": "CANVAS",
                "name": "Checkout",
                "children": [{
                    "type": "FRAME",
                    "name": "Cart",
                    "absoluteBoundingBox": { "x": 0, "y": 0, "width": 375, "height": 812 },
                    "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1 } }],
                    "cornerRadius": "mixed",
                    "children": [
                        { "type": "TEXT", "characters": "Your cart", "style": { "fontSize": 24 }, "width": "NaN" },
                        { "name": "Mystery", "visible": true }
                    ]
                }]
            }]
        }
    }"#;

    let forest = RawDocument::from_json(json).unwrap().into_forest().unwrap();
    let roots = forest.screen_roots();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].container, "Checkout");

    let cart = roots[0].node;
    assert_eq!(cart.id, "0:0:0");
    assert_eq!(cart.geometry.width, 375.0);
    assert_eq!(cart.style.corner_radius, 0.0);
    assert_eq!(cart.style.primary_color(), Some("#FFFFFF"));

    let title = &cart.children[0];
    assert_eq!(title.name, "");
    assert_eq!(title.geometry.width, 0.0);
    assert_eq!(title.style.font_size, Some(24.0));
    assert_eq!(cart.children[1].kind, NodeKind::Unknown);

    let index = NodeIndex::build(&forest);
    assert_eq!(index.len(), 5);
    let ancestors: Vec<&str> = index.ancestors(3).map(|n| n.name.as_str()).collect();
    assert_eq!(ancestors, vec!["Cart", "Checkout", ""]);
}

#[test]
fn test_malformed_paints_and_effects_are_skipped_individually() {
    let json = r#"[{
        "type": "FRAME",
        "name": "Banner",
        "fills": [
            "garbage",
            { "type": "SOLID", "opacity": "bad" },
            { "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0 } }
        ],
        "effects": [
            { "type": 7 },
            { "type": "DROP_SHADOW" }
        ]
    }]"#;

    let forest = RawDocument::from_json(json).unwrap().into_forest().unwrap();
    let banner = &forest.roots[0];
    assert_eq!(banner.style.fills.len(), 1);
    assert_eq!(banner.style.primary_color(), Some("#FF0000"));
    assert_eq!(banner.style.effects.len(), 1);
    assert!(banner.style.has_shadow());

    let scalar = RawDocument::from_json(r#"[{ "type": "FRAME", "fills": "none" }]"#).unwrap();
    assert!(!scalar.into_forest().unwrap().roots[0].style.has_fill());
}

#[test]
fn test_spacing_values_skip_unset_and_overlapping() {
    let style = NodeStyle {
        padding: Padding {
            top: 16.0,
            right: 0.0,
            bottom: 16.0,
            left: 0.0,
        },
        item_spacing: -4.0,
        ..NodeStyle::default()
    };
    assert_eq!(style.spacing_values(), vec![16.0, 16.0]);
    assert!(NodeStyle::default().spacing_values().is_empty());
}

#[test]
fn test_raw_export_rejects_empty_document() {
    assert!(RawDocument::from_json("{}").unwrap().into_forest().is_err());
    assert!(RawDocument::from_json("not json").is_err());
    let bare = RawDocument::from_json(r#"[{ "type": "FRAME", "name": "A" }]"#).unwrap();
    assert_eq!(bare.into_forest().unwrap().roots.len(), 1);
}

#[test]
fn test_style_summary_collects_distinct_values() {
    let mut root = frame("Styled", 0.0, 0.0, 375.0, 812.0);
    root.style.fills = vec![solid("#FFFFFF")];
    let mut list = frame("List", 0.0, 0.0, 375.0, 400.0);
    list.style.item_spacing = 8.0;
    list.style.padding.top = 16.0;
    list.children = vec![text("Caption", "a", 12.0), text("Caption", "b", 12.0)];
    root.children = vec![list, submit_button()];

    let screens = ScreenBuilder::default().build_all(&forest(vec![root]));
    let summary = StyleSummary::from_screen(&screens[0]);
    assert!(summary.colors.contains("#FFFFFF"));
    assert!(summary.colors.contains("#1A73E8"));
    assert!(summary.colors.contains("#111111"));
    assert_eq!(summary.font_sizes, vec![12.0, 16.0]);
    assert_eq!(summary.spacing, vec![16.0, 8.0]);
    assert_eq!(screens[0].stats.color_count, 3);
    assert_eq!(screens[0].stats.font_size_count, 2);
    assert_eq!(screens[0].stats.spacing_count, 2);
}
