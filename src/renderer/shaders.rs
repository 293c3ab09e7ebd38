use anyhow::{bail, Context, Result};
use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use log::debug;
use std::ffi::CString;
use std::fmt;
use std::ptr;

pub const VERTEX_SHADER: &str = include_str!("../../shaders/vert.glsl");
pub const FRAGMENT_SHADER: &str = include_str!("../../shaders/frag.glsl");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A compiled shader object.
pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
}

impl Shader {
    /// Compiles `source`. The driver's info log is part of the error on failure.
    pub fn compile(kind: ShaderKind, source: &str) -> Result<Self> {
        let source = CString::new(source)
            .with_context(|| format!("The {} shader source contains a NUL byte", kind))?;
        unsafe {
            let id = gl::CreateShader(kind.gl_enum());
            gl::ShaderSource(id, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(id);

            let mut status = gl::FALSE as GLint;
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
            if status != gl::TRUE as GLint {
                let log = info_log(id, gl::GetShaderiv, gl::GetShaderInfoLog);
                bail!("Failed to compile the {} shader:\n{}", kind, log);
            }
            debug!("Compiled {} shader {}", kind, id);
            Ok(Shader { id, kind })
        }
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
}

/// A linked shader program.
pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn link(shaders: &[Shader]) -> Result<Self> {
        unsafe {
            let id = gl::CreateProgram();
            for shader in shaders {
                debug!("Attaching {} shader {} to program {}", shader.kind(), shader.id, id);
                gl::AttachShader(id, shader.id);
            }
            gl::LinkProgram(id);

            let mut status = gl::FALSE as GLint;
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut status);
            if status != gl::TRUE as GLint {
                let log = info_log(id, gl::GetProgramiv, gl::GetProgramInfoLog);
                bail!("Failed to link the shader program:\n{}", log);
            }
            debug!("Linked program {} from {} shaders", id, shaders.len());
            Ok(Program { id })
        }
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }
}

/// The program drawing plain white geometry from positions at attribute 0.
pub fn flat_white() -> Result<Program> {
    let vs = Shader::compile(ShaderKind::Vertex, VERTEX_SHADER)?;
    let fs = Shader::compile(ShaderKind::Fragment, FRAGMENT_SHADER)?;
    Program::link(&[vs, fs])
}

type GetIv = unsafe fn(GLuint, GLenum, *mut GLint);
type GetInfoLog = unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);

unsafe fn info_log(id: GLuint, get_iv: GetIv, get_info_log: GetInfoLog) -> String {
    let mut len: GLint = 0;
    get_iv(id, gl::INFO_LOG_LENGTH, &mut len);
    let mut buf = vec![0u8; len.max(1) as usize];
    let mut written: GLsizei = 0;
    get_info_log(
        id,
        buf.len() as GLsizei,
        &mut written,
        buf.as_mut_ptr() as *mut GLchar,
    );
    log_to_string(buf, written)
}

/// Keeps the first `written` bytes of an info log, without the trailing NUL.
fn log_to_string(mut buf: Vec<u8>, written: GLsizei) -> String {
    buf.truncate(written.max(0) as usize);
    while buf.last() == Some(&0) {
        buf.pop();
    }
    String::from_utf8_lossy(&buf).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_target_glsl_410() {
        assert!(VERTEX_SHADER.trim_start().starts_with("#version 410"));
        assert!(FRAGMENT_SHADER.trim_start().starts_with("#version 410"));
    }

    #[test]
    fn vertex_shader_reads_position_at_location_zero() {
        assert!(VERTEX_SHADER.contains("layout(location = 0) in vec3 vp;"));
        assert!(VERTEX_SHADER.contains("gl_Position = vec4(vp, 1.0);"));
    }

    #[test]
    fn fragment_shader_outputs_opaque_white() {
        assert!(FRAGMENT_SHADER.contains("vec4(1.0, 1.0, 1.0, 1.0)"));
    }

    #[test]
    fn sources_have_no_interior_nul() {
        assert!(CString::new(VERTEX_SHADER).is_ok());
        assert!(CString::new(FRAGMENT_SHADER).is_ok());
    }

    #[test]
    fn kinds_map_to_gl_enums() {
        assert_eq!(ShaderKind::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderKind::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
        assert_eq!(ShaderKind::Fragment.to_string(), "fragment");
    }

    #[test]
    fn info_log_is_cut_at_written_length() {
        let mut buf = b"0:3(1): error: syntax error\n".to_vec();
        let written = buf.len() as GLsizei;
        buf.extend_from_slice(&[0, 0, 0]);
        assert_eq!(log_to_string(buf, written), "0:3(1): error: syntax error");
    }

    #[test]
    fn empty_info_log() {
        assert_eq!(log_to_string(vec![0], 0), "");
        assert_eq!(log_to_string(vec![0; 4], -1), "");
    }
}
