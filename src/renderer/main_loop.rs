use crate::renderer::renderer::Renderer;
use anyhow::{Context, Result};
use std::convert::Infallible;

pub struct RenderLoopSettings {
    pub window_title: String,
    pub window_size: (u32, u32),
    /// Requested OpenGL version, always a core profile.
    pub gl_version: (u8, u8),
    pub resizable: bool,
    pub vsync: bool,
    pub clear_color: [f32; 4],
}

impl Default for RenderLoopSettings {
    fn default() -> Self {
        RenderLoopSettings {
            window_title: "gl-triangle".to_string(),
            window_size: (1280, 720),
            gl_version: (4, 1),
            resizable: false,
            vsync: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

pub struct DrawContext {
    /// Index of the frame being drawn, starting at 0.
    pub frame: u64,
}

pub trait App {
    /// Called once per frame, after the framebuffer was cleared and before
    /// the buffers are swapped.
    fn draw(&mut self, context: &mut DrawContext);
}

/// Main loop, opens a window with an OpenGL context, builds the app with
/// `setup` and starts drawing.
///
/// Must run on main thread. Only returns on initialization failure.
/// CAUTION: Since the main loop hijacks the main thread and never returns, variables living on the
/// stack will not be dropped when the application exits. Anything that needs to be cleaned up
/// should be owned by the [app] object.
pub fn main_loop<A, F>(settings: RenderLoopSettings, setup: F) -> Result<Infallible>
where
    A: App + 'static,
    F: FnOnce() -> Result<A>,
{
    let renderer = Renderer::new(&settings)?;
    let app = setup().context("Failed to set up the scene")?;
    renderer.run_event_loop(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_request_fixed_gl_41_window() {
        let settings = RenderLoopSettings::default();
        assert_eq!(settings.window_size, (1280, 720));
        assert_eq!(settings.gl_version, (4, 1));
        assert!(!settings.resizable);
        assert_eq!(settings.clear_color[3], 1.0);
    }
}
