//! Common test utilities for building design trees and screens.
use flowscope::classify::SemanticType;
use flowscope::node::{
    DesignForest, DesignNode, Geometry, NodeKind, NodeStyle, Paint, PaintKind,
};
use flowscope::screen::{
    ComponentStructure, ComponentStyle, DesignStats, DeviceType, LayoutType, ScreenId,
    ScreenStructure,
};

#[allow(dead_code)]
pub fn solid(color: &str) -> Paint {
    Paint {
        kind: PaintKind::Solid,
        color: Some(color.to_string()),
        opacity: 1.0,
    }
}

/// A visible node of the given kind with no style.
#[allow(dead_code)]
pub fn node(kind: NodeKind, name: &str, width: f64, height: f64) -> DesignNode {
    DesignNode {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        kind,
        visible: true,
        geometry: Geometry::new(0.0, 0.0, width, height),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn frame(name: &str, x: f64, y: f64, width: f64, height: f64) -> DesignNode {
    let mut frame = node(NodeKind::Frame, name, width, height);
    frame.geometry = Geometry::new(x, y, width, height);
    frame
}

#[allow(dead_code)]
pub fn text(name: &str, content: &str, font_size: f64) -> DesignNode {
    let mut text = node(NodeKind::Text, name, 120.0, font_size * 1.2);
    text.text = Some(content.to_string());
    text.style.font_size = Some(font_size);
    text.style.fills = vec![solid("#111111")];
    text
}

/// A filled, rounded 200x48 button with a text label.
///
/// Classified as a button from its name, size, styling and label.
#[allow(dead_code)]
pub fn submit_button() -> DesignNode {
    let mut button = node(NodeKind::Frame, "Submit Button", 200.0, 48.0);
    button.style = NodeStyle {
        fills: vec![solid("#1A73E8")],
        corner_radius: 8.0,
        ..Default::default()
    };
    button.children = vec![text("Label Text", "Submit", 16.0)];
    button
}

/// An outlined 300x44 input box.
#[allow(dead_code)]
pub fn email_input() -> DesignNode {
    let mut input = node(NodeKind::Frame, "Email Field", 300.0, 44.0);
    input.style.strokes = vec![solid("#CCCCCC")];
    input.children = vec![text("Placeholder", "you@example.com", 14.0)];
    input
}

#[allow(dead_code)]
pub fn page(name: &str, children: Vec<DesignNode>) -> DesignNode {
    let mut page = node(NodeKind::Page, name, 0.0, 0.0);
    page.children = children;
    page
}

#[allow(dead_code)]
pub fn forest(roots: Vec<DesignNode>) -> DesignForest {
    DesignForest::new(roots)
}

/// A bare component of the given semantic type.
#[allow(dead_code)]
pub fn component(semantic_type: SemanticType) -> ComponentStructure {
    ComponentStructure {
        id: format!("c-{}", semantic_type),
        name: semantic_type.to_string(),
        node_type: "FRAME".to_string(),
        semantic_type: Some(semantic_type),
        geometry: Geometry::new(0.0, 0.0, 100.0, 40.0),
        style: ComponentStyle::default(),
        children: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn component_with_children(
    semantic_type: SemanticType,
    children: Vec<ComponentStructure>,
) -> ComponentStructure {
    ComponentStructure {
        children,
        ..component(semantic_type)
    }
}

/// A 375x812 mobile screen at the given canvas position.
#[allow(dead_code)]
pub fn screen(id: u32, name: &str, page: &str, x: f64, y: f64) -> ScreenStructure {
    ScreenStructure {
        id: ScreenId(id),
        name: name.to_string(),
        page: page.to_string(),
        geometry: Geometry::new(x, y, 375.0, 812.0),
        device_type: DeviceType::Mobile,
        layout_type: LayoutType::Vertical,
        background_color: None,
        components: Vec::new(),
        stats: DesignStats::default(),
    }
}

#[allow(dead_code)]
pub fn screen_with_components(
    id: u32,
    name: &str,
    page: &str,
    x: f64,
    y: f64,
    components: Vec<ComponentStructure>,
) -> ScreenStructure {
    ScreenStructure {
        components,
        ..screen(id, name, page, x, y)
    }
}

/// Screens with the given names, each on its own page and far from the others,
/// with no components.
#[allow(dead_code)]
pub fn scattered_screens(names: &[&str]) -> Vec<ScreenStructure> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            screen(
                i as u32,
                name,
                &format!("Area {}", i),
                i as f64 * 1000.0,
                (i % 2) as f64 * 2000.0,
            )
        })
        .collect()
}

/// Ten screens with nothing in common: distinct names, pages, far-apart
/// positions and no components.
#[allow(dead_code)]
pub fn unrelated_screens() -> Vec<ScreenStructure> {
    scattered_screens(&[
        "Alpha View", "Bravo View", "Charlie View", "Delta View", "Echo View",
        "Foxtrot View", "Golf View", "Hotel View", "India View", "Juliet View",
    ])
}

/// Like [`unrelated_screens`], but every name is a single plain word.
#[allow(dead_code)]
pub fn one_word_screens() -> Vec<ScreenStructure> {
    scattered_screens(&[
        "Alpha", "Bravo", "Charlie", "Delta", "Echo",
        "Foxtrot", "Golf", "Hotel", "India", "Juliet",
    ])
}
