//! SVG generation
//!
//! The scene graph is turned into a facet-svg DOM and serialized with
//! facet_xml. Group nodes become `<g transform>`; leaf shapes carry their
//! position in their own coordinates and only get a wrapping `<g>` when
//! rotated.

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Group, Svg, SvgNode, facet_xml};
use glam::DVec2;

use crate::errors::SceneError;
use crate::scene::{NodeId, Primitive, Scene};
use crate::types::Angle;

/// `translate(x,y) rotate(deg)`, omitting identity parts
fn transform_attr(translation: DVec2, rotation: Angle) -> Option<String> {
    let mut parts = Vec::new();
    if translation != DVec2::ZERO {
        parts.push(format!(
            "translate({},{})",
            fmt_num(translation.x),
            fmt_num(translation.y)
        ));
    }
    if rotation.radians() != 0.0 {
        parts.push(format!("rotate({})", fmt_num(rotation.degrees())));
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Build the DOM node for one scene node and its attached subtree, with
/// `offset` added to the node's own translation.
/// Invisible nodes (and so their children) are skipped.
fn node_element(scene: &Scene, id: NodeId, offset: DVec2) -> Option<SvgNode> {
    let node = scene.node(id)?;
    if !node.style.visible {
        return None;
    }
    let translation = offset + node.translation;

    if node.kind.is_group() {
        let mut el = node.kind.to_svg(&node.style, DVec2::ZERO);
        if let SvgNode::G(group) = &mut el {
            group.transform = transform_attr(translation, node.rotation);
            group.children = node
                .children()
                .iter()
                .filter_map(|&child| node_element(scene, child, DVec2::ZERO))
                .collect();
        }
        return Some(el);
    }

    if node.rotation.radians() == 0.0 {
        return Some(node.kind.to_svg(&node.style, translation));
    }

    // rotate about the node's own position
    Some(SvgNode::G(Group {
        transform: transform_attr(translation, node.rotation),
        children: vec![node.kind.to_svg(&node.style, DVec2::ZERO)],
        ..Default::default()
    }))
}

/// Build the `<svg>` DOM for a scene.
///
/// The root group is placed at the centre of the canvas; everything below it
/// is in the root-relative pixel frame that `Units` produces.
pub fn scene_element(scene: &Scene) -> Svg {
    let units = scene.units();
    let (w, h) = (units.pixel_width(), units.pixel_height());

    Svg {
        width: Some(fmt_num(w)),
        height: Some(fmt_num(h)),
        view_box: Some(format!("0 0 {} {}", fmt_num(w), fmt_num(h))),
        children: node_element(scene, scene.root(), scene.root_offset())
            .into_iter()
            .collect(),
        ..Default::default()
    }
}

/// Render a scene to an SVG document
pub fn render(scene: &Scene) -> Result<String, SceneError> {
    let svg = scene_element(scene);
    crate::log::trace!(nodes = scene.len(), "rendering scene to svg");

    fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
        write!(writer, "{}", fmt_num(value))
    }

    let options = SerializeOptions {
        float_formatter: Some(format_float),
        ..Default::default()
    };
    facet_xml::to_string_with_options(&svg, &options).map_err(|e| SceneError::Render {
        message: e.to_string(),
    })
}

/// Format a number like C's %g (6 significant figures, trailing zeros trimmed).
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || value.is_nan() {
        return "0".to_string();
    }
    if value.is_infinite() {
        return value.to_string();
    }

    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_trims() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(64.0), "64");
        assert_eq!(fmt_num(5.5), "5.5");
        assert_eq!(fmt_num(-90.0), "-90");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_num(640.0), "640");
    }

    #[test]
    fn fmt_num_rounds_float_noise() {
        assert_eq!(fmt_num(0.1 + 0.2), "0.3");
        assert_eq!(fmt_num(1e-17), "0.00000000000000001");
    }

    #[test]
    fn transform_skips_identity_parts() {
        assert_eq!(transform_attr(DVec2::ZERO, Angle::ZERO), None);
        assert_eq!(
            transform_attr(DVec2::new(3.0, -1.5), Angle::ZERO).as_deref(),
            Some("translate(3,-1.5)")
        );
        assert_eq!(
            transform_attr(DVec2::ZERO, Angle::QUARTER.flipped()).as_deref(),
            Some("rotate(-90)")
        );
        assert_eq!(
            transform_attr(DVec2::X, Angle::QUARTER).as_deref(),
            Some("translate(1,0) rotate(90)")
        );
    }

    #[test]
    fn scene_dom_has_canvas_size_and_centred_root() {
        use crate::scene::SceneConfig;

        let scene = Scene::new(SceneConfig::new().scene_size(200.0, 100.0)).unwrap();
        let svg = scene_element(&scene);
        assert_eq!(svg.width.as_deref(), Some("200"));
        assert_eq!(svg.view_box.as_deref(), Some("0 0 200 100"));
        match svg.children.as_slice() {
            [SvgNode::G(root)] => {
                assert_eq!(root.transform.as_deref(), Some("translate(100,50)"));
                assert!(root.children.is_empty());
            }
            other => panic!("expected a single root group, got {other:?}"),
        }
    }
}
