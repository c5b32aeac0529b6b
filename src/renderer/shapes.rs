//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::{BALL_MAX_SPEED, BALL_START_SPEED};
use crate::sim::TrailPoint;

/// Interpolate color based on velocity (slow=blue, medium=green, fast=red/orange)
fn velocity_color(speed: f32, alpha: f32) -> [f32; 4] {
    // Normalize speed to 0-1 range
    let t = ((speed - BALL_START_SPEED) / (BALL_MAX_SPEED - BALL_START_SPEED)).clamp(0.0, 1.0);

    // Color gradient: cyan (serve speed) -> violet -> magenta -> orange (top speed)
    let (r, g, b) = if t < 0.33 {
        let u = t / 0.33;
        (0.2 + 0.4 * u, 0.8 - 0.5 * u, 1.0)
    } else if t < 0.66 {
        let u = (t - 0.33) / 0.33;
        (0.6 + 0.4 * u, 0.3 - 0.1 * u, 1.0 - 0.3 * u)
    } else {
        let u = (t - 0.66) / 0.34;
        (1.0, 0.2 + 0.3 * u, 0.7 - 0.5 * u)
    };

    [r, g, b, alpha]
}

/// Two triangles covering a quad given in order a-b-c-d around its edge
fn quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}

/// Filled axis-aligned rectangle from center and size
pub fn rect(out: &mut Vec<Vertex>, center: Vec2, size: Vec2, color: [f32; 4]) {
    let h = size / 2.0;
    quad(
        out,
        center + Vec2::new(-h.x, -h.y),
        center + Vec2::new(h.x, -h.y),
        center + Vec2::new(h.x, h.y),
        center + Vec2::new(-h.x, h.y),
        color,
    );
}

/// Rectangle outline of the given thickness (drawn inside the bounds)
pub fn rect_outline(out: &mut Vec<Vertex>, center: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) {
    let h = size / 2.0;
    let t = thickness;
    rect(out, center + Vec2::new(0.0, h.y - t / 2.0), Vec2::new(size.x, t), color);
    rect(out, center - Vec2::new(0.0, h.y - t / 2.0), Vec2::new(size.x, t), color);
    rect(out, center + Vec2::new(h.x - t / 2.0, 0.0), Vec2::new(t, size.y - 2.0 * t), color);
    rect(out, center - Vec2::new(h.x - t / 2.0, 0.0), Vec2::new(t, size.y - 2.0 * t), color);
}

/// Thick line segment
pub fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
    let dir = (to - from).normalize_or_zero();
    let perp = dir.perp() * (width / 2.0);
    quad(out, from - perp, to - perp, to + perp, from + perp, color);
}

/// Generate vertices for a ball trail with velocity-based colors
pub fn ball_trail(out: &mut Vec<Vertex>, trail: &[TrailPoint], ball_radius: f32) {
    if trail.len() < 2 {
        return;
    }

    let trail_len = trail.len() as f32;

    for i in 0..trail.len() - 1 {
        let p1 = &trail[i];
        let p2 = &trail[i + 1];

        // Fade alpha and size along trail
        let t1 = i as f32 / trail_len;
        let t2 = (i + 1) as f32 / trail_len;

        let width1 = ball_radius * (1.0 - t1 * 0.7);
        let width2 = ball_radius * (1.0 - t2 * 0.7);

        let color1 = velocity_color(p1.speed, (1.0 - t1) * 0.7);
        let color2 = velocity_color(p2.speed, (1.0 - t2) * 0.7);

        // Perpendicular for width
        let perp = (p2.pos - p1.pos).normalize_or_zero().perp();

        let v1a = p1.pos + perp * width1;
        let v1b = p1.pos - perp * width1;
        let v2a = p2.pos + perp * width2;
        let v2b = p2.pos - perp * width2;

        // Two triangles
        out.push(Vertex::new(v1a.x, v1a.y, color1));
        out.push(Vertex::new(v1b.x, v1b.y, color1));
        out.push(Vertex::new(v2a.x, v2a.y, color2));

        out.push(Vertex::new(v2a.x, v2a.y, color2));
        out.push(Vertex::new(v1b.x, v1b.y, color1));
        out.push(Vertex::new(v2b.x, v2b.y, color2));
    }
}

/// Generate vertices for a filled circle
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(out: &mut Vec<Vertex>, center: Vec2, inner_radius: f32, outer_radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (d1, d2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));
        let inner1 = center + d1 * inner_radius;
        let outer1 = center + d1 * outer_radius;
        let inner2 = center + d2 * inner_radius;
        let outer2 = center + d2 * outer_radius;

        // Two triangles per segment
        out.push(Vertex::new(inner1.x, inner1.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(inner2.x, inner2.y, color));

        out.push(Vertex::new(inner2.x, inner2.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(outer2.x, outer2.y, color));
    }
}
