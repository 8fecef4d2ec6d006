//! Rendered SVG output, read back through facet-svg

use facet_svg::{Svg, SvgNode, facet_xml};
use glam::dvec2;
use phy::{AxisSpec, Scene, SceneConfig};
use regex_lite::Regex;

fn small_scene() -> Scene {
    Scene::new(SceneConfig::new().scene_size(200.0, 100.0).width(10.0)).unwrap()
}

fn parse(scene: &Scene) -> Svg {
    let text = scene.to_svg().unwrap();
    facet_xml::from_str(&text).unwrap()
}

/// Every node in document order
fn flatten(nodes: &[SvgNode]) -> Vec<&SvgNode> {
    let mut out = Vec::new();
    for node in nodes {
        out.push(node);
        if let SvgNode::G(g) = node {
            out.extend(flatten(&g.children));
        }
    }
    out
}

/// Text content of every `<text>` element, in document order
fn labels(svg: &Svg) -> Vec<String> {
    flatten(&svg.children)
        .into_iter()
        .filter_map(|n| match n {
            SvgNode::Text(t) => Some(t.content.clone()),
            _ => None,
        })
        .collect()
}

/// Transforms of every `<g>`, in document order
fn group_transforms(svg: &Svg) -> Vec<Option<String>> {
    flatten(&svg.children)
        .into_iter()
        .filter_map(|n| match n {
            SvgNode::G(g) => Some(g.transform.clone()),
            _ => None,
        })
        .collect()
}

fn num(v: Option<f64>) -> String {
    v.map_or("-".to_string(), |v| format!("{v}"))
}

/// One line per element, indented by depth
fn outline(nodes: &[SvgNode], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        let line = match node {
            SvgNode::G(g) => format!("g {}", g.transform.as_deref().unwrap_or("-")),
            SvgNode::Circle(c) => format!(
                "circle ({},{}) r={} fill={} stroke={}",
                num(c.cx),
                num(c.cy),
                num(c.r),
                c.fill.as_deref().unwrap_or("-"),
                c.stroke.as_deref().unwrap_or("-"),
            ),
            SvgNode::Line(l) => format!(
                "line ({},{}) -> ({},{})",
                num(l.x1),
                num(l.y1),
                num(l.x2),
                num(l.y2)
            ),
            SvgNode::Rect(r) => format!(
                "rect ({},{}) {}x{}",
                num(r.x),
                num(r.y),
                num(r.width),
                num(r.height)
            ),
            SvgNode::Text(t) => format!(
                "text ({},{}) {:?} fill={}",
                num(t.x),
                num(t.y),
                t.content,
                t.fill.as_deref().unwrap_or("-"),
            ),
            other => format!("{other:?}"),
        };
        out.push_str(&indent);
        out.push_str(&line);
        out.push('\n');
        if let SvgNode::G(g) = node {
            outline(&g.children, depth + 1, out);
        }
    }
}

#[test]
fn tiny_scene() {
    let mut s = small_scene();
    s.make_circle(1.0, 1.0, 0.5);
    s.make_text("v", -2.0, 0.0);

    let svg = parse(&s);
    assert_eq!(svg.width.as_deref(), Some("200"));
    assert_eq!(svg.height.as_deref(), Some("100"));
    assert_eq!(svg.view_box.as_deref(), Some("0 0 200 100"));

    let mut out = String::new();
    outline(&svg.children, 0, &mut out);
    insta::assert_snapshot!(out.trim_end(), @r#"
    g translate(100,50)
      circle (20,-20) r=10 fill=none stroke=black
      text (-40,0) "v" fill=black
    "#);
}

#[test]
fn line_endpoints_are_in_the_parent_frame() {
    let mut s = small_scene();
    s.make_line(0.0, 0.0, 2.0, 0.0);
    let svg = parse(&s);

    let line = flatten(&svg.children)
        .into_iter()
        .find_map(|n| match n {
            SvgNode::Line(l) => Some(l.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!((line.x1, line.y1), (Some(0.0), Some(0.0)));
    assert_eq!((line.x2, line.y2), (Some(40.0), Some(0.0)));
}

#[test]
fn label_text_is_escaped() {
    let mut s = small_scene();
    s.make_text("a < b & c", 0.0, 0.0);
    let text = s.to_svg().unwrap();
    assert!(!text.contains("a < b"));
    assert_eq!(labels(&parse(&s)), ["a < b & c"]);
}

#[test]
fn suppressed_zero_label_is_not_drawn() {
    let mut s = Scene::new(SceneConfig::default()).unwrap();
    let mut axis = s.make_x_axis(AxisSpec::new(-2.0, 2.0)).unwrap();
    assert_eq!(labels(&parse(&s)), ["-2", "-1", "0", "1", "2"]);

    axis.suppress_zero(&mut s).unwrap();
    assert_eq!(labels(&parse(&s)), ["-2", "-1", "1", "2"]);

    axis.restore_zero(&mut s).unwrap();
    let restored = labels(&parse(&s));
    assert_eq!(restored.len(), 5);
    assert!(restored.contains(&"0".to_string()));
}

#[test]
fn y_axis_group_is_rotated_and_labels_turned_back() {
    let mut s = Scene::new(SceneConfig::default()).unwrap();
    s.make_y_axis(AxisSpec::new(1.0, 2.0)).unwrap();
    let svg = parse(&s);

    let re = Regex::new(r"rotate\(([^)]+)\)").unwrap();
    let rotations: Vec<String> = group_transforms(&svg)
        .into_iter()
        .flatten()
        .filter_map(|t| re.captures(&t).map(|c| c[1].to_string()))
        .collect();
    // the axis group, then one label per tick
    assert_eq!(rotations, ["-90", "90", "90"]);
}

#[test]
fn invisible_and_detached_nodes_are_skipped() {
    let mut s = small_scene();
    let hidden = s.make_circle(0.0, 0.0, 1.0);
    s.set_visible(hidden, false).unwrap();

    let g = s.make_group();
    let detached = s.make_rectangle(0.0, 0.0, 1.0, 1.0);
    g.add(&mut s, detached).unwrap();
    g.remove(&mut s, detached).unwrap();

    let svg = parse(&s);
    let nodes = flatten(&svg.children);
    assert!(!nodes.iter().any(|n| matches!(n, SvgNode::Circle(_) | SvgNode::Rect(_))));
    let empty_groups = nodes
        .iter()
        .filter(|n| matches!(n, SvgNode::G(g) if g.children.is_empty()))
        .count();
    assert_eq!(empty_groups, 1);
}

#[test]
fn arrow_renders_shaft_and_head() {
    let mut s = small_scene();
    s.make_arrow(dvec2(0.0, 0.0), dvec2(0.0, 1.0));
    let svg = parse(&s);

    let lines = flatten(&svg.children)
        .into_iter()
        .filter(|n| matches!(n, SvgNode::Line(_)))
        .count();
    assert_eq!(lines, 3);
    assert!(
        group_transforms(&svg)
            .iter()
            .flatten()
            .any(|t| t.ends_with("rotate(-90)"))
    );
}
