//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen pixels (y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::Rect;

/// Filled rectangle
pub fn rect(r: Rect, color: [f32; 4]) -> Vec<Vertex> {
    quad(r, [color, color, color, color])
}

/// Rectangle shaded from `top` to `bottom`
pub fn rect_gradient_v(r: Rect, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    quad(r, [top, top, bottom, bottom])
}

/// Rectangle shaded from `left` to `right`
pub fn rect_gradient_h(r: Rect, left: [f32; 4], right: [f32; 4]) -> Vec<Vertex> {
    quad(r, [left, right, right, left])
}

/// Corner colors in order: top-left, top-right, bottom-right, bottom-left
fn quad(r: Rect, colors: [[f32; 4]; 4]) -> Vec<Vertex> {
    if r.is_empty() {
        return Vec::new();
    }
    let (min, max) = (r.min(), r.max());
    let tl = Vertex::new(min.x, min.y, colors[0]);
    let tr = Vertex::new(max.x, min.y, colors[1]);
    let br = Vertex::new(max.x, max.y, colors[2]);
    let bl = Vertex::new(min.x, max.y, colors[3]);

    // Two triangles
    vec![tl, tr, bl, bl, tr, br]
}

/// Filled ellipse inscribed in `bounds`
pub fn oval(bounds: Rect, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let center = Vec2::new(bounds.x + bounds.w / 2.0, bounds.y + bounds.h / 2.0);
    let radii = Vec2::new(bounds.w / 2.0, bounds.h / 2.0);
    arc_fan(center, radii, 0.0, 2.0 * PI, color, segments)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    arc_fan(center, Vec2::splat(radius), 0.0, 2.0 * PI, color, segments)
}

/// Upper half of a disc (flat side down)
pub fn half_disc_up(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    arc_fan(center, Vec2::splat(radius), 0.0, PI, color, segments)
}

/// Elliptical wedge from `start` to `end` radians, counter-clockwise as seen
/// on screen (angle 0 points right, PI/2 points up)
fn arc_fan(
    center: Vec2,
    radii: Vec2,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let span = end - start;
    let point = |theta: f32| {
        Vertex::new(
            center.x + radii.x * theta.cos(),
            center.y - radii.y * theta.sin(),
            color,
        )
    };

    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(point(theta1));
        vertices.push(point(theta2));
    }

    vertices
}

/// Filled polygon as a fan from the first point
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };
    let mut vertices = Vec::with_capacity(rest.len().saturating_sub(1) * 3);
    for pair in rest.windows(2) {
        vertices.push(Vertex::new(first.x, first.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Rotate vertices in place around `pivot`. Positive angles turn clockwise
/// on screen because y grows downward.
pub fn rotate_about(vertices: &mut [Vertex], pivot: Vec2, angle: f32) {
    if angle == 0.0 {
        return;
    }
    let (sin, cos) = angle.sin_cos();
    for v in vertices {
        let d = Vec2::new(v.position[0], v.position[1]) - pivot;
        v.position = [
            pivot.x + d.x * cos - d.y * sin,
            pivot.y + d.x * sin + d.y * cos,
        ];
    }
}
