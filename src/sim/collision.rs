//! Collision tests between a thin pin and disc members
//!
//! The flying pin is modelled as a needle: a segment from tip to tail with a
//! small half-width. Disc members expose one of three shapes: a circular
//! sector (wedges), a circle (obstacles, bonuses) or another needle (pins
//! already embedded in the disc).

use glam::Vec2;

use crate::{cartesian_to_polar, normalize_angle};

/// Spacing between samples when walking a needle through a sector
const SECTOR_SAMPLE_STEP: f32 = 2.0;

/// A thin segment with thickness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Needle {
    pub tip: Vec2,
    pub tail: Vec2,
    pub half_width: f32,
}

/// Collision shape of a disc member
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Filled circular sector; `start` and `span` in degrees, clockwise from +x
    Sector {
        center: Vec2,
        radius: f32,
        start: f32,
        span: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
    },
    Needle(Needle),
}

/// Check whether a point lies inside a filled sector
pub fn sector_contains(center: Vec2, radius: f32, start: f32, span: f32, point: Vec2) -> bool {
    let (r, theta) = cartesian_to_polar(center, point);
    if r > radius {
        return false;
    }
    span >= 360.0 || normalize_angle(theta - start) <= span
}

/// Closest point to `p` on segment `a`-`b`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();
    if line_len_sq < 0.0001 {
        return a; // Degenerate segment
    }
    let t = ((p - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    a + line_vec * t
}

/// Distance between two segments (0 when they cross)
pub fn segment_distance(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> f32 {
    if segments_intersect(a0, a1, b0, b1) {
        return 0.0;
    }
    let d1 = (a0 - closest_point_on_segment(a0, b0, b1)).length();
    let d2 = (a1 - closest_point_on_segment(a1, b0, b1)).length();
    let d3 = (b0 - closest_point_on_segment(b0, a0, a1)).length();
    let d4 = (b1 - closest_point_on_segment(b1, a0, a1)).length();
    d1.min(d2).min(d3).min(d4)
}

fn segments_intersect(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> bool {
    let da = a1 - a0;
    let db = b1 - b0;
    let d1 = da.perp_dot(b0 - a0);
    let d2 = da.perp_dot(b1 - a0);
    let d3 = db.perp_dot(a0 - b0);
    let d4 = db.perp_dot(a1 - b0);
    (d1 * d2 < 0.0) && (d3 * d4 < 0.0)
}

/// Test a needle against a shape, returning a contact point on the needle
///
/// Samples start at the tip, so the reported contact is the point nearest the
/// tip that touches the shape.
pub fn needle_contact(needle: &Needle, shape: &Shape) -> Option<Vec2> {
    match *shape {
        Shape::Sector {
            center,
            radius,
            start,
            span,
        } => {
            let length = (needle.tail - needle.tip).length();
            let steps = (length / SECTOR_SAMPLE_STEP).ceil().max(1.0) as usize;
            (0..=steps)
                .map(|i| needle.tip.lerp(needle.tail, i as f32 / steps as f32))
                .find(|&p| sector_contains(center, radius, start, span, p))
        }
        Shape::Circle { center, radius } => {
            let closest = closest_point_on_segment(center, needle.tip, needle.tail);
            ((center - closest).length() <= radius + needle.half_width).then_some(closest)
        }
        Shape::Needle(other) => {
            let dist = segment_distance(needle.tip, needle.tail, other.tip, other.tail);
            if dist <= needle.half_width + other.half_width {
                Some(closest_point_on_segment(other.tail, needle.tip, needle.tail))
            } else {
                None
            }
        }
    }
}
