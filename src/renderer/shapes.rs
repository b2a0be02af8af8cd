//! Shape generation for 2D primitives
//!
//! Every helper appends triangle-list vertices to `out`.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}

/// Rectangle outline of the given thickness, drawn inside the bounds
pub fn rect_outline(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) {
    let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
    rect(out, pos, Vec2::new(size.x, t), color);
    rect(out, Vec2::new(pos.x, pos.y + size.y - t), Vec2::new(size.x, t), color);
    rect(out, Vec2::new(pos.x, pos.y + t), Vec2::new(t, size.y - 2.0 * t), color);
    rect(
        out,
        Vec2::new(pos.x + size.x - t, pos.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    );
}

pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

/// Square of `half` extents rotated by `degrees` around `center`
pub fn rotated_square(
    out: &mut Vec<Vertex>,
    center: Vec2,
    half: f32,
    degrees: f32,
    color: [f32; 4],
) {
    let rot = Vec2::from_angle(degrees.to_radians());
    let corner = |x: f32, y: f32| center + rot.rotate(Vec2::new(x, y));
    let tl = corner(-half, -half);
    let tr = corner(half, -half);
    let bl = corner(-half, half);
    let br = corner(half, half);
    triangle(out, tl, tr, bl, color);
    triangle(out, bl, tr, br, color);
}

/// Triangle given in local space, rotated by `degrees` and moved to `center`
pub fn rotated_triangle(
    out: &mut Vec<Vertex>,
    center: Vec2,
    local: [Vec2; 3],
    degrees: f32,
    color: [f32; 4],
) {
    let rot = Vec2::from_angle(degrees.to_radians());
    let [a, b, c] = local.map(|p| center + rot.rotate(p));
    triangle(out, a, b, c, color);
}

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

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
