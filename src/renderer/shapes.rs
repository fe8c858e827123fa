//! Shape generation for 2D primitives
//!
//! Every shape becomes a plain triangle list in logical pixel space.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::projector::DrawCommand;
use super::vertex::Vertex;

/// Segments used for a full circle
pub const CIRCLE_SEGMENTS: u32 = 32;
/// Segments used per rounded corner
pub const CORNER_SEGMENTS: u32 = 6;
/// Samples along a stroked curve
pub const CURVE_SAMPLES: u32 = 12;

/// Flatten a draw list into triangles. `Clear` produces no geometry.
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in commands {
        match *command {
            DrawCommand::Clear { .. } => {}
            DrawCommand::FillRect { min, size, color } => {
                vertices.extend(rect(min, size, color));
            }
            DrawCommand::RoundRect {
                min,
                size,
                radius,
                color,
            } => {
                vertices.extend(rounded_rect(min, size, radius, color, CORNER_SEGMENTS));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                vertices.extend(circle(center, radius, color, CIRCLE_SEGMENTS));
            }
            DrawCommand::QuadCurve {
                from,
                ctrl,
                to,
                width,
                color,
            } => {
                vertices.extend(quad_curve(from, ctrl, to, width, color, CURVE_SAMPLES));
            }
        }
    }
    vertices
}

/// Color of the last `Clear` in the list, if any
pub fn clear_color(commands: &[DrawCommand]) -> Option<[f32; 4]> {
    commands.iter().rev().find_map(|c| match c {
        DrawCommand::Clear { color, .. } => Some(*color),
        _ => None,
    })
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a rounded rectangle.
///
/// The radius is clamped to half the shorter side.
pub fn rounded_rect(
    min: Vec2,
    size: Vec2,
    radius: f32,
    color: [f32; 4],
    corner_segments: u32,
) -> Vec<Vertex> {
    let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    if r == 0.0 {
        return rect(min, size, color);
    }

    let mut vertices = Vec::with_capacity(18 + (corner_segments * 12) as usize);

    // Centre band spans the full height, side bands fill between the corners
    vertices.extend(rect(
        Vec2::new(min.x + r, min.y),
        Vec2::new(size.x - 2.0 * r, size.y),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x, min.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    ));
    vertices.extend(rect(
        Vec2::new(min.x + size.x - r, min.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    ));

    // Corner centres with the angle each quarter-fan starts at (y down)
    let max = min + size;
    let corners = [
        (Vec2::new(max.x - r, min.y + r), -FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
        (Vec2::new(min.x + r, min.y + r), PI),
    ];
    for (center, start) in corners {
        vertices.extend(fan(center, r, start, FRAC_PI_2, color, corner_segments));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    fan(center, radius, 0.0, 2.0 * PI, color, segments)
}

/// Triangle fan covering `span` radians starting at `start`
fn fan(
    center: Vec2,
    radius: f32,
    start: f32,
    span: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Point on a quadratic Bézier at `t`
#[inline]
pub fn quad_point(from: Vec2, ctrl: Vec2, to: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    from * (u * u) + ctrl * (2.0 * u * t) + to * (t * t)
}

/// Generate vertices for a stroked quadratic curve
pub fn quad_curve(
    from: Vec2,
    ctrl: Vec2,
    to: Vec2,
    width: f32,
    color: [f32; 4],
    samples: u32,
) -> Vec<Vertex> {
    let samples = samples.max(1);
    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((samples * 6) as usize);

    for i in 0..samples {
        let p1 = quad_point(from, ctrl, to, i as f32 / samples as f32);
        let p2 = quad_point(from, ctrl, to, (i + 1) as f32 / samples as f32);

        // Perpendicular for width
        let dir = (p2 - p1).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}
