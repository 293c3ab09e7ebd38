use gl::types::{GLint, GLuint};

/// Attribute location of the position in the vertex shader.
pub const POSITION_LOCATION: GLuint = 0;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    /// Number of float components in `position`.
    pub const COMPONENTS: GLint = 3;

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vertex {
            position: [x, y, z],
        }
    }
}
