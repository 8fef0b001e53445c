use serde::{Deserialize, Serialize};

/// The canonical, fully-defaulted node forest every engine component reads.
#[derive(Debug, Clone, Default)]
pub struct DesignForest {
    pub roots: Vec<DesignNode>,
}

/// A top-level container node that will become one screen, with the name of the
/// page or section that owns it.
#[derive(Debug, Clone, Copy)]
pub struct ScreenRoot<'a> {
    pub node: &'a DesignNode,
    pub container: &'a str,
}

const UNTITLED_CONTAINER: &str = "Untitled";

impl DesignForest {
    pub fn new(roots: Vec<DesignNode>) -> Self {
        Self { roots }
    }

    /// Finds every node that should be treated as a screen, in document order.
    ///
    /// Documents are transparent; the frame-like children of pages and sections
    /// are screens owned by that page or section. Frame-like roots with no page
    /// are owned by the `"Untitled"` container.
    pub fn screen_roots(&self) -> Vec<ScreenRoot<'_>> {
        let mut screens = Vec::new();
        for root in &self.roots {
            collect_screen_roots(root, UNTITLED_CONTAINER, &mut screens);
        }
        screens
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn collect_screen_roots<'a>(node: &'a DesignNode, container: &'a str, out: &mut Vec<ScreenRoot<'a>>) {
    match node.kind {
        NodeKind::Document => {
            for child in &node.children {
                collect_screen_roots(child, container, out);
            }
        }
        NodeKind::Page | NodeKind::Section => {
            for child in &node.children {
                collect_screen_roots(child, &node.name, out);
            }
        }
        _ if node.kind.is_frame_like() && node.visible => out.push(ScreenRoot { node, container }),
        _ => {}
    }
}

/// A design node with every defaulting rule already applied.
#[derive(Debug, Clone, Default)]
pub struct DesignNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub visible: bool,
    pub geometry: Geometry,
    pub style: NodeStyle,
    pub text: Option<String>,
    pub children: Vec<DesignNode>,
}

impl DesignNode {
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// True if this node or any descendant is a text node.
    pub fn contains_text(&self) -> bool {
        self.is_text() || self.children.iter().any(DesignNode::contains_text)
    }

    /// Total number of nodes in this subtree, including itself.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(DesignNode::subtree_size).sum::<usize>()
    }
}

/// The open set of host node types. Unknown tags are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    Document,
    Page,
    Section,
    Frame,
    Group,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    Line,
    BooleanOperation,
    #[default]
    Unknown,
    Other(String),
}

impl NodeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "DOCUMENT" => NodeKind::Document,
            "CANVAS" | "PAGE" => NodeKind::Page,
            "SECTION" => NodeKind::Section,
            "FRAME" => NodeKind::Frame,
            "GROUP" => NodeKind::Group,
            "COMPONENT" => NodeKind::Component,
            "COMPONENT_SET" => NodeKind::ComponentSet,
            "INSTANCE" => NodeKind::Instance,
            "TEXT" => NodeKind::Text,
            "RECTANGLE" => NodeKind::Rectangle,
            "ELLIPSE" => NodeKind::Ellipse,
            "VECTOR" | "STAR" | "POLYGON" => NodeKind::Vector,
            "LINE" => NodeKind::Line,
            "BOOLEAN_OPERATION" => NodeKind::BooleanOperation,
            "" => NodeKind::Unknown,
            _ => NodeKind::Other(tag.to_string()),
        }
    }

    /// The raw type tag, as the host would spell it.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Document => "DOCUMENT",
            NodeKind::Page => "CANVAS",
            NodeKind::Section => "SECTION",
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Text => "TEXT",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Vector => "VECTOR",
            NodeKind::Line => "LINE",
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Unknown => "UNKNOWN",
            NodeKind::Other(tag) => tag,
        }
    }

    pub fn is_frame_like(&self) -> bool {
        matches!(
            self,
            NodeKind::Frame
                | NodeKind::Group
                | NodeKind::Component
                | NodeKind::ComponentSet
                | NodeKind::Instance
        )
    }

    pub fn is_vector_like(&self) -> bool {
        matches!(
            self,
            NodeKind::Vector | NodeKind::BooleanOperation | NodeKind::Ellipse | NodeKind::Line
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Euclidean distance between the top-left corners of two boxes.
    pub fn distance_to(&self, other: &Geometry) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaintKind {
    Solid,
    Gradient,
    Image,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub kind: PaintKind,
    /// `#RRGGBB`, present for solid paints.
    pub color: Option<String>,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    Blur,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    Horizontal,
    Vertical,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub fn edges(&self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

#[derive(Debug, Clone, Default)]
pub struct NodeStyle {
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub effects: Vec<EffectKind>,
    pub corner_radius: f64,
    pub layout_direction: Option<LayoutDirection>,
    pub padding: Padding,
    pub item_spacing: f64,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
}

impl NodeStyle {
    pub fn has_fill(&self) -> bool {
        !self.fills.is_empty()
    }

    pub fn has_stroke(&self) -> bool {
        !self.strokes.is_empty()
    }

    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    pub fn has_shadow(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, EffectKind::DropShadow | EffectKind::InnerShadow))
    }

    pub fn has_image_fill(&self) -> bool {
        self.fills.iter().any(|p| p.kind == PaintKind::Image)
    }

    /// Color of the first solid fill.
    pub fn primary_color(&self) -> Option<&str> {
        self.fills
            .iter()
            .find(|p| p.kind == PaintKind::Solid)
            .and_then(|p| p.color.as_deref())
    }

    /// Positive padding edges and item spacing, as observed spacing values.
    ///
    /// Zero is skipped on purpose: ingestion defaults missing padding and spacing
    /// to 0, so a zero cannot be told apart from "not set" and would inflate
    /// grid consistency. Negative auto-layout spacing (overlapping items) is an
    /// overlap, not a gap, and is skipped too.
    pub fn spacing_values(&self) -> Vec<f64> {
        self.padding
            .edges()
            .into_iter()
            .chain(std::iter::once(self.item_spacing))
            .filter(|v| *v > 0.0)
            .collect()
    }
}
