//! The rotating triangle.
//!
//! Pure geometry: given the elapsed time, computes the three vertices that get uploaded every
//! frame. Nothing in here touches OpenGL apart from the attribute layout in [`Vertex`].

use glam::{Vec2, Vec3};
use glow::HasContext;

use crate::abs::Vertex;

/// The value of π the triangle was first written with. Using it skews the vertices slightly
/// off 120° spacing; kept so that geometry can still be reproduced.
pub const LEGACY_PI: f64 = 3.14;

/// Floats per vertex: position, color, texture coordinate.
pub const FLOATS_PER_VERTEX: usize = 8;

const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

const COLORS: [Vec3; 3] = [RED, GREEN, BLUE];
const TEX_COORDS: [Vec2; 3] = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)];

/// One vertex of the triangle as laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TriangleVertex {
    pub position: Vec3,
    pub color: Vec3,
    pub tex_coord: Vec2,
}

impl TriangleVertex {
    /// The vertex as the 8 floats written to the buffer.
    pub fn to_floats(&self) -> [f32; FLOATS_PER_VERTEX] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.color.x,
            self.color.y,
            self.color.z,
            self.tex_coord.x,
            self.tex_coord.y,
        ]
    }
}

impl Vertex for TriangleVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = size_of::<TriangleVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            // Color attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, size_of::<Vec3>() as i32);

            // Texture coordinate attribute
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                (2 * size_of::<Vec3>()) as i32,
            );
        }
    }
}

/// Computes the triangle for `time` seconds since startup.
pub fn rotating_triangle(time: f64) -> [TriangleVertex; 3] {
    rotating_triangle_with_pi(time, std::f64::consts::PI)
}

/// Computes the triangle using the given value of π for the 120° offsets.
///
/// Vertex `i` sits at angle `time + i * 2/3 * pi` on the unit circle at depth 1. Colors and
/// texture coordinates never change.
pub fn rotating_triangle_with_pi(time: f64, pi: f64) -> [TriangleVertex; 3] {
    std::array::from_fn(|i| {
        let angle = time + i as f64 * (2.0 / 3.0 * pi);
        TriangleVertex {
            position: Vec3::new(angle.cos() as f32, angle.sin() as f32, 1.0),
            color: COLORS[i],
            tex_coord: TEX_COORDS[i],
        }
    })
}

/// Flattens the triangle into the 24 floats uploaded each frame.
pub fn payload(vertices: &[TriangleVertex; 3]) -> [f32; 3 * FLOATS_PER_VERTEX] {
    let mut out = [0.0; 3 * FLOATS_PER_VERTEX];
    for (chunk, vertex) in out.chunks_exact_mut(FLOATS_PER_VERTEX).zip(vertices) {
        chunk.copy_from_slice(&vertex.to_floats());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn angle_between(a: Vec3, b: Vec3) -> f32 {
        a.truncate().angle_to(b.truncate()).abs()
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(size_of::<TriangleVertex>(), FLOATS_PER_VERTEX * size_of::<f32>());
        let vertices = rotating_triangle(0.25);
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 96);
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, payload(&vertices).as_slice());
    }

    #[test]
    fn test_vertices_on_unit_circle() {
        for step in 0..200 {
            let time = step as f64 * 0.173 - 10.0;
            for vertex in rotating_triangle(time) {
                let r = vertex.position.truncate().length();
                assert!((r - 1.0).abs() < EPSILON, "radius {r} at t = {time}");
                assert_eq!(vertex.position.z, 1.0);
            }
        }
    }

    #[test]
    fn test_vertices_evenly_spaced() {
        let third = 2.0 * std::f32::consts::PI / 3.0;
        for step in 0..50 {
            let [a, b, c] = rotating_triangle(step as f64 * 0.37).map(|v| v.position);
            assert!((angle_between(a, b) - third).abs() < 1e-4);
            assert!((angle_between(b, c) - third).abs() < 1e-4);
            assert!((angle_between(c, a) - third).abs() < 1e-4);
        }
    }

    #[test]
    fn test_legacy_pi_skews_spacing() {
        let [a, b, c] = rotating_triangle_with_pi(0.0, LEGACY_PI).map(|v| v.position);
        let ab = angle_between(a, b);
        let bc = angle_between(b, c);
        let expected = (2.0 / 3.0 * LEGACY_PI) as f32;
        assert!((ab - expected).abs() < 1e-4);
        assert!((bc - expected).abs() < 1e-4);
        // The closing edge picks up the missing angle.
        assert!(angle_between(c, a) > 2.0 * std::f32::consts::PI / 3.0);
    }

    #[test]
    fn test_deterministic() {
        for time in [0.0, 1.5, 1234.5678, -3.0] {
            let first = payload(&rotating_triangle(time)).map(f32::to_bits);
            let second = payload(&rotating_triangle(time)).map(f32::to_bits);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_colors_and_tex_coords_fixed() {
        for time in [0.0, 0.5, 2.0, 100.0] {
            let [a, b, c] = rotating_triangle(time);
            assert_eq!(a.color, RED);
            assert_eq!(b.color, GREEN);
            assert_eq!(c.color, BLUE);
            assert_eq!(a.tex_coord, Vec2::new(0.0, 0.0));
            assert_eq!(b.tex_coord, Vec2::new(1.0, 0.0));
            assert_eq!(c.tex_coord, Vec2::new(0.5, 1.0));
        }
    }

    #[test]
    fn test_start_position() {
        let [a, b, c] = rotating_triangle(0.0).map(|v| v.position);
        let half_sqrt3 = 3.0f32.sqrt() / 2.0;
        assert!(a.abs_diff_eq(Vec3::new(1.0, 0.0, 1.0), EPSILON));
        assert!(b.abs_diff_eq(Vec3::new(-0.5, half_sqrt3, 1.0), EPSILON));
        assert!(c.abs_diff_eq(Vec3::new(-0.5, -half_sqrt3, 1.0), EPSILON));
    }

    #[test]
    fn test_payload_order() {
        let vertices = rotating_triangle(0.0);
        let floats = payload(&vertices);
        assert_eq!(floats.len(), 24);
        assert_eq!(&floats[3..8], &[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(&floats[11..16], &[0.0, 1.0, 0.0, 1.0, 0.0]);
        assert_eq!(&floats[19..24], &[0.0, 0.0, 1.0, 0.5, 1.0]);
    }
}
