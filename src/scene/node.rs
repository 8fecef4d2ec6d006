//! Scene-graph nodes
//!
//! Every drawable is a [`Node`] in the scene arena: a pixel-space translation
//! and rotation, a style, optional children, and a primitive that says what
//! it draws. Composites (`Group`, `Axis`, `Arrow`) are handles over group
//! nodes, not node kinds of their own.

use std::fmt;

use enum_dispatch::enum_dispatch;
use facet_svg::{Circle, Group, Line, Rect, SvgNode, Text};
use glam::{DAffine2, DVec2};

use crate::render::defaults;
use crate::render::svg::fmt_num;
use crate::types::Angle;

/// Index of a node in its scene's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Presentation attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke: String,
    pub fill: String,
    /// Stroke width in pixels
    pub line_width: f64,
    pub visible: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: defaults::STROKE.to_string(),
            fill: defaults::FILL.to_string(),
            line_width: defaults::STROKE_WIDTH,
            visible: true,
        }
    }
}

/// Common behavior for everything a node can draw
#[enum_dispatch]
pub trait Primitive {
    /// Short name used in errors and logs
    fn kind_name(&self) -> &'static str;

    /// Style a freshly created node of this kind starts with
    fn default_style(&self) -> Style {
        Style::default()
    }

    /// The element for this primitive drawn at pixel position `at` of the
    /// parent frame. Rotation and children are applied by the renderer.
    fn to_svg(&self, style: &Style, at: DVec2) -> SvgNode;
}

/// What a node draws
#[enum_dispatch(Primitive)]
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Line(LineShape),
    Rect(RectShape),
    Circle(CircleShape),
    Text(TextShape),
    Group(GroupShape),
}

impl NodeKind {
    pub fn is_group(&self) -> bool {
        matches!(self, NodeKind::Group(_))
    }

    pub fn as_line(&self) -> Option<&LineShape> {
        match self {
            NodeKind::Line(l) => Some(l),
            _ => None,
        }
    }
}

/// `(fill, stroke, stroke-width)` attribute values
fn paint(style: &Style) -> (Option<String>, Option<String>, Option<String>) {
    (
        Some(style.fill.clone()),
        Some(style.stroke.clone()),
        Some(fmt_num(style.line_width)),
    )
}

// ============================================================================
// Primitive Types
// ============================================================================

/// A straight segment. Endpoints are relative to the node translation.
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub tail: DVec2,
    pub head: DVec2,
}

impl LineShape {
    pub fn new(tail: DVec2, head: DVec2) -> Self {
        Self { tail, head }
    }

    pub fn length(&self) -> f64 {
        (self.head - self.tail).length()
    }
}

impl Primitive for LineShape {
    fn kind_name(&self) -> &'static str {
        "line"
    }

    fn to_svg(&self, style: &Style, at: DVec2) -> SvgNode {
        let (tail, head) = (at + self.tail, at + self.head);
        let (fill, stroke, stroke_width) = paint(style);
        SvgNode::Line(Line {
            x1: Some(tail.x),
            y1: Some(tail.y),
            x2: Some(head.x),
            y2: Some(head.y),
            fill,
            stroke,
            stroke_width,
            ..Default::default()
        })
    }
}

/// An axis-aligned rectangle centred on the node translation
#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub width: f64,
    pub height: f64,
}

impl Primitive for RectShape {
    fn kind_name(&self) -> &'static str {
        "rectangle"
    }

    fn to_svg(&self, style: &Style, at: DVec2) -> SvgNode {
        let (fill, stroke, stroke_width) = paint(style);
        SvgNode::Rect(Rect {
            x: Some(at.x - self.width / 2.0),
            y: Some(at.y - self.height / 2.0),
            width: Some(self.width),
            height: Some(self.height),
            fill,
            stroke,
            stroke_width,
            ..Default::default()
        })
    }
}

/// A circle centred on the node translation
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub radius: f64,
}

impl Primitive for CircleShape {
    fn kind_name(&self) -> &'static str {
        "circle"
    }

    fn to_svg(&self, style: &Style, at: DVec2) -> SvgNode {
        let (fill, stroke, stroke_width) = paint(style);
        SvgNode::Circle(Circle {
            cx: Some(at.x),
            cy: Some(at.y),
            r: Some(self.radius),
            fill,
            stroke,
            stroke_width,
            ..Default::default()
        })
    }
}

/// A text label centred on the node translation
#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    pub value: String,
    /// Font size in pixels
    pub font_size: f64,
}

impl TextShape {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            font_size: defaults::FONT_SIZE,
        }
    }
}

impl Primitive for TextShape {
    fn kind_name(&self) -> &'static str {
        "text"
    }

    fn default_style(&self) -> Style {
        Style {
            stroke: "none".to_string(),
            fill: defaults::TEXT_FILL.to_string(),
            ..Style::default()
        }
    }

    fn to_svg(&self, style: &Style, at: DVec2) -> SvgNode {
        SvgNode::Text(Text {
            x: Some(at.x),
            y: Some(at.y),
            fill: Some(style.fill.clone()),
            style: Some(format!("font-size:{}px", fmt_num(self.font_size))),
            text_anchor: Some("middle".to_string()),
            dominant_baseline: Some("central".to_string()),
            content: self.value.clone(),
            ..Default::default()
        })
    }
}

/// A container; draws nothing itself
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupShape;

impl Primitive for GroupShape {
    fn kind_name(&self) -> &'static str {
        "group"
    }

    fn to_svg(&self, _style: &Style, at: DVec2) -> SvgNode {
        let transform = (at != DVec2::ZERO)
            .then(|| format!("translate({},{})", fmt_num(at.x), fmt_num(at.y)));
        SvgNode::G(Group {
            transform,
            ..Default::default()
        })
    }
}

// ============================================================================
// Node
// ============================================================================

/// One entry in the scene arena
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Offset from the parent, in pixels
    pub translation: DVec2,
    /// Rotation about the translation point, pixel frame (clockwise on screen)
    pub rotation: Angle,
    pub style: Style,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind, translation: DVec2) -> Self {
        let style = kind.default_style();
        Self {
            kind,
            translation,
            rotation: Angle::ZERO,
            style,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent-relative transform of this node
    pub fn local_transform(&self) -> DAffine2 {
        DAffine2::from_angle_translation(self.rotation.radians(), self.translation)
    }
}
