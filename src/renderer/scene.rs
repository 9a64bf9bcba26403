//! Frame tessellation
//!
//! Turns a [`Frame`] snapshot into one triangle list, back to front:
//! sky, clouds, trees, ground, glider. Text is left to the host HUD.

use glam::Vec2;

use super::shapes::{
    circle, half_disc_up, oval, polygon, rect, rect_gradient_h, rect_gradient_v, rotate_about,
};
use super::vertex::{Vertex, colors};
use crate::Rect;
use crate::session::{Frame, TreeView};

/// Height over which the sky gradient runs before going flat
const SKY_GRADIENT_HEIGHT: f32 = 400.0;
/// Crown overhang on each side of a trunk
const CROWN_OVERHANG: f32 = 10.0;
const CROWN_HEIGHT: f32 = 40.0;
const GRASS_STEP: f32 = 8.0;
const OVAL_SEGMENTS: u32 = 20;

pub fn build_frame_vertices(frame: &Frame) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(2048);
    sky(frame, &mut vertices);
    for cloud in &frame.clouds {
        cloud_puffs(cloud.x, cloud.y, cloud.width, &mut vertices);
    }
    for tree in &frame.trees {
        tree_shapes(tree, frame.screen_height, &mut vertices);
    }
    ground(frame, &mut vertices);
    glider(frame, &mut vertices);
    vertices
}

fn sky(frame: &Frame, out: &mut Vec<Vertex>) {
    let gradient_h = SKY_GRADIENT_HEIGHT.min(frame.screen_height);
    out.extend(rect_gradient_v(
        Rect::new(0.0, 0.0, frame.screen_width, gradient_h),
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));
    out.extend(rect(
        Rect::new(
            0.0,
            gradient_h,
            frame.screen_width,
            frame.screen_height - gradient_h,
        ),
        colors::SKY_BOTTOM,
    ));
}

fn cloud_puffs(x: f32, y: f32, width: f32, out: &mut Vec<Vertex>) {
    out.extend(oval(Rect::new(x, y, width, 30.0), colors::CLOUD, OVAL_SEGMENTS));
    out.extend(oval(
        Rect::new(x + 20.0, y - 10.0, width - 20.0, 30.0),
        colors::CLOUD,
        OVAL_SEGMENTS,
    ));
    out.extend(oval(
        Rect::new(x + 10.0, y + 10.0, width - 10.0, 20.0),
        colors::CLOUD,
        OVAL_SEGMENTS,
    ));
}

fn tree_shapes(tree: &TreeView, floor: f32, out: &mut Vec<Vertex>) {
    let crown_w = tree.width + 2.0 * CROWN_OVERHANG;

    // Top trunk hangs from the ceiling, crown at its lower end
    out.extend(rect_gradient_h(
        Rect::new(tree.x, 0.0, tree.width, tree.height),
        colors::TRUNK_DARK,
        colors::TRUNK_LIGHT,
    ));
    out.extend(oval(
        Rect::new(tree.x - CROWN_OVERHANG, tree.height - 30.0, crown_w, CROWN_HEIGHT),
        colors::CROWN,
        OVAL_SEGMENTS,
    ));

    let bottom_start = tree.height + tree.gap;
    out.extend(rect_gradient_h(
        Rect::new(tree.x, bottom_start, tree.width, floor - bottom_start),
        colors::TRUNK_DARK,
        colors::TRUNK_LIGHT,
    ));
    out.extend(oval(
        Rect::new(tree.x - CROWN_OVERHANG, bottom_start - 10.0, crown_w, CROWN_HEIGHT),
        colors::CROWN,
        OVAL_SEGMENTS,
    ));
}

fn ground(frame: &Frame, out: &mut Vec<Vertex>) {
    out.extend(rect_gradient_v(
        Rect::new(
            0.0,
            frame.ground_y,
            frame.screen_width,
            frame.screen_height - frame.ground_y,
        ),
        colors::GROUND_TOP,
        colors::GROUND_BOTTOM,
    ));

    // Grass tufts; heights vary with position so they don't flicker
    let mut x = 0.0;
    while x < frame.screen_width {
        let blade = 6.0 + ((x / GRASS_STEP) as u32 * 7 % 12) as f32;
        out.extend(rect(
            Rect::new(x, frame.ground_y - blade, 1.0, blade),
            colors::GRASS,
        ));
        x += GRASS_STEP;
    }
}

fn glider(frame: &Frame, out: &mut Vec<Vertex>) {
    let (x, y, size) = (frame.glider_x, frame.glider_y, frame.glider_size);
    let mut body = Vec::with_capacity(256);

    body.extend(oval(
        Rect::new(x, y, size, size / 2.0),
        colors::GLIDER_BODY,
        OVAL_SEGMENTS,
    ));

    let quarter = size / 4.0;
    body.extend(polygon(
        &[
            Vec2::new(x - 5.0, y + quarter),
            Vec2::new(x - 15.0, y + quarter - 5.0),
            Vec2::new(x - 10.0, y + quarter + 10.0),
            Vec2::new(x, y + quarter + 5.0),
        ],
        colors::GLIDER_TAIL,
    ));

    // Gliding membrane spread over the body
    body.extend(half_disc_up(
        Vec2::new(x + size / 2.0, y + size / 2.0),
        size / 2.0 + 5.0,
        colors::GLIDER_MEMBRANE,
        OVAL_SEGMENTS,
    ));

    body.extend(oval(
        Rect::new(x + size - 15.0, y - 5.0, size / 2.0, size / 2.0),
        colors::GLIDER_BODY,
        OVAL_SEGMENTS,
    ));
    body.extend(circle(
        Vec2::new(x + size - 6.0, y + 4.0),
        2.0,
        colors::GLIDER_EYE,
        8,
    ));
    body.extend(circle(
        Vec2::new(x + size + 3.5, y + 6.5),
        1.5,
        colors::GLIDER_EYE,
        8,
    ));

    rotate_about(
        &mut body,
        Vec2::new(x + size / 2.0, y + size / 2.0),
        frame.glider_tilt,
    );
    out.extend(body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::highscores::HighScore;
    use crate::session::Session;
    use crate::sim::GameState;

    fn frame() -> Frame {
        Session::new(GameState::new(11), HighScore::new(), Silent).snapshot()
    }

    #[test]
    fn test_triangle_list() {
        let vertices = build_frame_vertices(&frame());
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 3, 0);
    }

    #[test]
    fn test_trees_add_geometry() {
        let with_trees = frame();
        let mut without = with_trees.clone();
        without.trees.clear();
        let per_tree = (build_frame_vertices(&with_trees).len()
            - build_frame_vertices(&without).len())
            / with_trees.trees.len();
        // Two trunks plus two crowns
        assert_eq!(per_tree, 2 * 6 + 2 * OVAL_SEGMENTS as usize * 3);
    }

    #[test]
    fn test_glider_tilt_keeps_vertex_count() {
        let level = frame();
        let mut tilted = level.clone();
        tilted.glider_tilt = 0.6;
        let a = build_frame_vertices(&level);
        let b = build_frame_vertices(&tilted);
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
    }
}
