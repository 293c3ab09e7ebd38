use anyhow::{Context, Result};
use gl::types::{GLsizei, GLsizeiptr, GLuint};
use log::debug;
use std::mem;
use std::ptr;

pub mod vertex;

use vertex::{Vertex, POSITION_LOCATION};

pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(0.0, 0.5, 0.0),
    Vertex::new(-0.5, -0.5, 0.0),
    Vertex::new(0.5, -0.5, 0.0),
];

/// A vertex array object together with the buffer holding its positions.
pub struct VertexArray {
    vao: GLuint,
    vbo: GLuint,
    vertex_count: GLsizei,
}

impl VertexArray {
    /// Uploads `vertices` into a static buffer and describes them as
    /// tightly packed float positions at attribute 0.
    pub fn upload(vertices: &[Vertex]) -> Result<Self> {
        let vertex_count = GLsizei::try_from(vertices.len())
            .context("Too many vertices for a single draw call")?;
        let size = GLsizeiptr::try_from(mem::size_of_val(vertices))
            .context("Vertex data is too large for a buffer")?;

        let mut vbo = 0;
        let mut vao = 0;
        unsafe {
            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                size,
                vertices.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);
            gl::EnableVertexAttribArray(POSITION_LOCATION);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::VertexAttribPointer(
                POSITION_LOCATION,
                Vertex::COMPONENTS,
                gl::FLOAT,
                gl::FALSE,
                mem::size_of::<Vertex>() as GLsizei,
                ptr::null(),
            );
        }
        debug!(
            "Uploaded {} vertices ({} bytes) to buffer {}, vertex array {}",
            vertex_count, size, vbo, vao
        );

        Ok(VertexArray {
            vao,
            vbo,
            vertex_count,
        })
    }

    pub fn vertex_count(&self) -> GLsizei {
        self.vertex_count
    }

    /// Binds the vertex array and draws it as a triangle list.
    /// Expects a program to be bound.
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
        }
    }
}

pub fn triangle() -> Result<VertexArray> {
    VertexArray::upload(&TRIANGLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(v: &[Vertex; 3]) -> f32 {
        let [a, b, c] = v.map(|it| it.position);
        0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
    }

    #[test]
    fn vertex_is_three_packed_floats() {
        assert_eq!(mem::size_of::<Vertex>(), 3 * mem::size_of::<f32>());
        assert_eq!(Vertex::COMPONENTS, 3);
    }

    #[test]
    fn triangle_buffer_is_nine_floats_in_order() {
        let floats: Vec<f32> = TRIANGLE.iter().flat_map(|it| it.position).collect();
        assert_eq!(
            floats,
            vec![0.0, 0.5, 0.0, -0.5, -0.5, 0.0, 0.5, -0.5, 0.0]
        );
        assert_eq!(mem::size_of_val(&TRIANGLE), 9 * mem::size_of::<f32>());
    }

    #[test]
    fn triangle_is_counter_clockwise() {
        assert!(signed_area(&TRIANGLE) > 0.0);
    }

    #[test]
    fn triangle_is_inside_clip_space() {
        for vertex in TRIANGLE {
            assert!(vertex.position.iter().all(|c| (-1.0..=1.0).contains(c)));
        }
    }
}
