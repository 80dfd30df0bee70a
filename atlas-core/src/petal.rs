//! Petal marker markup synthesis. Builds the SVG for one marker from the
//! already-computed encoding (petal count, colors, rotation) plus the
//! portrait image reference. No DOM access; callers inject the markup
//! into an element.

use std::f64::consts::FRAC_PI_2;
use std::fmt::Write;

use crate::encoding::DEFAULT_FIELD_COLOR;

/// Square viewport edge for generated markers, in CSS pixels.
pub const MARKER_SIZE: f64 = 60.0;

// Room left inside the viewport for the 2px stroke.
const STROKE_MARGIN: f64 = 2.0;

/// Shape outline for a given petal count, centered in a `size` x `size`
/// viewport. Counts outside {2,3,4} draw a plain circle.
pub fn petal_path(count: u8, size: f64) -> String {
    let center = size / 2.0;
    let radius = size / 2.0 - STROKE_MARGIN;
    match count {
        2 => two_petal_path(center, radius),
        3 => three_petal_path(center, radius),
        4 => four_petal_path(center, radius),
        _ => circle_path(center, radius),
    }
}

// Circle as two arcs so the path closes on itself.
fn circle_path(cx: f64, r: f64) -> String {
    format!(
        "M {:.2},{:.2} a {:.2},{:.2} 0 1,0 {:.2},0 a {:.2},{:.2} 0 1,0 {:.2},0",
        cx - r,
        cx,
        r,
        r,
        r * 2.0,
        r,
        r,
        -(r * 2.0)
    )
}

// Two lens shapes stacked vertically, meeting at the viewport center.
fn two_petal_path(center: f64, radius: f64) -> String {
    let r = radius * 0.7;
    let offset = radius * 0.35;
    format!(
        "M {c:.2},{top:.2} \
         Q {right:.2},{up:.2} {c:.2},{c:.2} \
         Q {left:.2},{up:.2} {c:.2},{top:.2} \
         M {c:.2},{c:.2} \
         Q {right:.2},{down:.2} {c:.2},{bottom:.2} \
         Q {left:.2},{down:.2} {c:.2},{c:.2} Z",
        c = center,
        top = center - radius,
        bottom = center + radius,
        right = center + r,
        left = center - r,
        up = center - offset,
        down = center + offset,
    )
}

fn three_petal_path(center: f64, radius: f64) -> String {
    lobed_path(center, radius * 0.6, 3, -90.0, 1.0)
}

fn four_petal_path(center: f64, radius: f64) -> String {
    lobed_path(center, radius * 0.55, 4, 0.0, 0.8)
}

// Teardrop lobes at even angular spacing. Each lobe runs from the center
// out to its tip through two quadratic control points perpendicular to
// the lobe axis.
fn lobed_path(center: f64, petal_radius: f64, count: u32, start_deg: f64, control_scale: f64) -> String {
    let mut path = String::new();
    for i in 0..count {
        let angle = ((i as f64) * 360.0 / count as f64 + start_deg).to_radians();
        let x = center + angle.cos() * petal_radius;
        let y = center + angle.sin() * petal_radius;
        let ctrl = petal_radius * control_scale;
        let (ax, ay) = (
            x + (angle + FRAC_PI_2).cos() * ctrl,
            y + (angle + FRAC_PI_2).sin() * ctrl,
        );
        let (bx, by) = (
            x + (angle - FRAC_PI_2).cos() * ctrl,
            y + (angle - FRAC_PI_2).sin() * ctrl,
        );
        let _ = write!(
            path,
            "M {c:.2},{c:.2} Q {ax:.2},{ay:.2} {x:.2},{y:.2} Q {bx:.2},{by:.2} {c:.2},{c:.2} ",
            c = center,
        );
    }
    path.push('Z');
    path
}

/// Diagonal linear gradient definition with stops evenly spaced by index.
/// Only meaningful for two or more colors.
pub fn gradient_def(colors: &[&str], id: &str) -> String {
    let mut stops = String::new();
    for (i, color) in colors.iter().enumerate() {
        let percent = i as f64 / colors.len().saturating_sub(1).max(1) as f64 * 100.0;
        let _ = write!(stops, "<stop offset=\"{percent:.0}%\" stop-color=\"{color}\" />");
    }
    format!(
        "<linearGradient id=\"{id}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\">{stops}</linearGradient>"
    )
}

/// Full marker SVG: the portrait image clipped to the petal outline, with
/// the outline itself drawn on top, rotated about the viewport center.
/// `clip_id` must be unique per marker so clip paths don't alias across
/// elements on the same page; the gradient id is derived from it.
pub fn marker_svg(
    petals: u8,
    colors: &[&str],
    rotation: u32,
    portrait_href: &str,
    clip_id: &str,
) -> String {
    let size = MARKER_SIZE;
    let center = size / 2.0;
    let path = petal_path(petals, size);
    let gradient_id = format!("{clip_id}-gradient");
    let gradient = if colors.len() > 1 {
        gradient_def(colors, &gradient_id)
    } else {
        String::new()
    };
    let fill = if colors.len() > 1 {
        format!("url(#{gradient_id})")
    } else {
        colors.first().copied().unwrap_or(DEFAULT_FIELD_COLOR).to_string()
    };
    let stroke = colors.first().copied().unwrap_or(DEFAULT_FIELD_COLOR);

    format!(
        "<svg width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" \
         xmlns=\"http://www.w3.org/2000/svg\">\
         <defs>{gradient}<clipPath id=\"{clip_id}\"><path d=\"{path}\" /></clipPath></defs>\
         <image href=\"{portrait_href}\" width=\"{size}\" height=\"{size}\" \
         clip-path=\"url(#{clip_id})\" preserveAspectRatio=\"xMidYMid slice\" />\
         <g transform=\"rotate({rotation} {center} {center})\">\
         <path d=\"{path}\" fill=\"{fill}\" fill-opacity=\"0.3\" \
         stroke=\"{stroke}\" stroke-width=\"2\" /></g></svg>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_petal_is_a_circle_with_stroke_margin() {
        let path = petal_path(1, 60.0);
        assert!(path.starts_with("M 2.00,30.00"));
        assert_eq!(path.matches(" a ").count(), 2);
        assert!(path.contains("28.00,28.00"));
    }

    #[test]
    fn unknown_count_falls_back_to_circle() {
        assert_eq!(petal_path(0, 60.0), petal_path(1, 60.0));
        assert_eq!(petal_path(9, 60.0), petal_path(1, 60.0));
    }

    #[test]
    fn two_petals_are_stacked_lenses() {
        let path = petal_path(2, 60.0);
        // Top lens starts at the top of the viewport, second at the center.
        assert!(path.starts_with("M 30.00,2.00"));
        assert!(path.contains("M 30.00,30.00"));
        assert_eq!(path.matches(" Q ").count(), 4);
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn three_petals_have_three_lobes_from_minus_ninety() {
        let path = petal_path(3, 60.0);
        assert_eq!(path.matches("M 30.00,30.00").count(), 3);
        assert_eq!(path.matches(" Q ").count(), 6);
        // First lobe tip points straight up: center + r*0.6 along -90 deg.
        assert!(path.contains("30.00,13.20"));
    }

    #[test]
    fn four_petals_have_four_lobes_from_zero() {
        let path = petal_path(4, 60.0);
        assert_eq!(path.matches("M 30.00,30.00").count(), 4);
        assert_eq!(path.matches(" Q ").count(), 8);
        // First lobe tip points right: center + r*0.55 along 0 deg.
        assert!(path.contains("45.40,30.00"));
    }

    #[test]
    fn single_color_svg_uses_direct_fill_and_stroke() {
        let svg = marker_svg(2, &["#00CED1"], 180, "assets/portraits/a.jpg", "clip-7");
        assert!(svg.contains("fill=\"#00CED1\""));
        assert!(svg.contains("stroke=\"#00CED1\""));
        assert!(svg.contains("rotate(180 30 30)"));
        assert!(!svg.contains("linearGradient"));
    }

    #[test]
    fn clip_path_id_is_shared_between_def_and_image() {
        let svg = marker_svg(1, &["#2ECC71"], 0, "p.jpg", "clip-42");
        assert!(svg.contains("<clipPath id=\"clip-42\">"));
        assert!(svg.contains("clip-path=\"url(#clip-42)\""));
    }

    #[test]
    fn multi_color_svg_builds_an_indexed_gradient() {
        let svg = marker_svg(3, &["#2ECC71", "#00CED1"], 0, "p.jpg", "clip-1");
        assert!(svg.contains("<linearGradient id=\"clip-1-gradient\""));
        assert!(svg.contains("fill=\"url(#clip-1-gradient)\""));
        assert!(svg.contains("offset=\"0%\" stop-color=\"#2ECC71\""));
        assert!(svg.contains("offset=\"100%\" stop-color=\"#00CED1\""));
        // Stroke always uses the first color.
        assert!(svg.contains("stroke=\"#2ECC71\""));
    }
}
