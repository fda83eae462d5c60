//! Vertex buffer management.
//!
//! This module defines the [`TriangleMesh`] struct, a fixed-capacity vertex buffer that is
//! rewritten from the start every frame. Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: bytemuck::Pod {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// A dynamic vertex buffer drawn as plain triangles without an index buffer.
pub struct TriangleMesh {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    capacity: usize,
    vertex_count: usize,
}

impl TriangleMesh {
    /// Allocates `capacity` bytes of `DYNAMIC_DRAW` storage and configures the attributes of
    /// `V`. The buffer starts out empty.
    pub fn new<V: Vertex>(gl: &Arc<glow::Context>, capacity: usize) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(e) => {
                    gl.delete_vertex_array(vao);
                    return Err(e);
                }
            };

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_size(glow::ARRAY_BUFFER, capacity as i32, glow::DYNAMIC_DRAW);

            V::vertex_attribs(gl);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                vao,
                vbo,
                capacity,
                vertex_count: 0,
            })
        }
    }

    /// Overwrites the buffer from offset zero with `vertices`.
    pub fn update<V: Vertex>(&mut self, vertices: &[V]) {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        debug_assert!(
            bytes.len() <= self.capacity,
            "{} bytes do not fit a {} byte buffer",
            bytes.len(),
            self.capacity
        );

        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            self.gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, bytes);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        self.vertex_count = vertices.len();
    }

    /// Draws the vertices of the last update.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count as i32);
            self.gl.bind_vertex_array(None);
        }
    }

    /// Returns the amount of vertices drawn by [`TriangleMesh::draw`].
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

impl Drop for TriangleMesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
