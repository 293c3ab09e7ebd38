use gl::types::{GLchar, GLenum, GLsizei, GLuint};
use log::{debug, log};
use std::ffi::{c_void, CStr};
use std::ptr;

/// Callback for KHR_debug output
extern "system" fn gl_debug_callback(
    source: GLenum,
    message_type: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }
    let message = unsafe { CStr::from_ptr(message) }.to_string_lossy();
    log!(
        severity_level(severity),
        "[{}/{}] ({}) {}",
        source_name(source),
        type_name(message_type),
        id,
        message
    );
}

/// Installs the debug callback if the `validation` feature is on and the
/// driver exposes KHR_debug. Needs a current context.
pub fn install_debug_callback() {
    if !cfg!(feature = "validation") {
        return;
    }
    if !gl::DebugMessageCallback::is_loaded() {
        debug!("OpenGL debug output is not available in this context");
        return;
    }
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), ptr::null());
    }
    debug!("Installed OpenGL debug callback");
}

fn severity_level(severity: GLenum) -> log::Level {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => log::Level::Error,
        gl::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        gl::DEBUG_SEVERITY_LOW => log::Level::Info,
        gl::DEBUG_SEVERITY_NOTIFICATION => log::Level::Debug,
        _ => log::Level::Info,
    }
}

fn source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "api",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "window system",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "shader compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "third party",
        gl::DEBUG_SOURCE_APPLICATION => "application",
        _ => "other",
    }
}

fn type_name(message_type: GLenum) -> &'static str {
    match message_type {
        gl::DEBUG_TYPE_ERROR => "error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined",
        gl::DEBUG_TYPE_PORTABILITY => "portability",
        gl::DEBUG_TYPE_PERFORMANCE => "performance",
        gl::DEBUG_TYPE_MARKER => "marker",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_map_to_log_levels() {
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_HIGH), log::Level::Error);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_MEDIUM), log::Level::Warn);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_LOW), log::Level::Info);
        assert_eq!(
            severity_level(gl::DEBUG_SEVERITY_NOTIFICATION),
            log::Level::Debug
        );
        assert_eq!(severity_level(0), log::Level::Info);
    }

    #[test]
    fn unknown_source_and_type_are_other() {
        assert_eq!(source_name(gl::DEBUG_SOURCE_SHADER_COMPILER), "shader compiler");
        assert_eq!(source_name(0), "other");
        assert_eq!(type_name(gl::DEBUG_TYPE_ERROR), "error");
        assert_eq!(type_name(0), "other");
    }
}
