use crate::renderer::debug::install_debug_callback;
use crate::renderer::main_loop::{App, DrawContext, RenderLoopSettings};
use anyhow::{Context, Result};
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};
use log::{error, info};
use std::ffi::CStr;
use std::os::raw::c_char;
use winit::dpi::LogicalSize;
use winit::event::{Event, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub struct Renderer {
    event_loop: EventLoop<()>,
    context: WindowedContext<PossiblyCurrent>,
    clear_color: [f32; 4],
}

impl Renderer {
    /// Opens the window, makes its core profile context current on this
    /// thread and loads the OpenGL functions.
    pub fn new(settings: &RenderLoopSettings) -> Result<Self> {
        // open window
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_title(&settings.window_title)
            .with_inner_size(LogicalSize::new(
                settings.window_size.0,
                settings.window_size.1,
            ))
            .with_resizable(settings.resizable);

        // context
        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, settings.gl_version))
            .with_gl_profile(GlProfile::Core)
            .with_vsync(settings.vsync)
            .build_windowed(window_builder, &event_loop)
            .context("Could not create window")?;
        let context = unsafe { context.make_current() }
            .map_err(|(_, err)| err)
            .context("Could not make the OpenGL context current")?;

        // init gl
        gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
        info!("OpenGL version {}", gl_string(gl::VERSION));
        info!(
            "Using {} ({})",
            gl_string(gl::RENDERER),
            gl_string(gl::VENDOR)
        );
        install_debug_callback();

        Ok(Renderer {
            event_loop,
            context,
            clear_color: settings.clear_color,
        })
    }

    pub fn run_event_loop(self, mut app: impl App + 'static) -> ! {
        let Renderer {
            event_loop,
            context,
            clear_color,
        } = self;
        let mut frame = 0;

        event_loop.run(move |event, _, control_flow| match event {
            Event::NewEvents(StartCause::Init) => *control_flow = ControlFlow::Poll,
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                _ => {}
            },
            Event::MainEventsCleared => context.window().request_redraw(),
            Event::RedrawRequested(_) => {
                unsafe {
                    let [r, g, b, a] = clear_color;
                    gl::ClearColor(r, g, b, a);
                    gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
                }
                app.draw(&mut DrawContext { frame });
                frame += 1;

                if let Err(err) = context.swap_buffers() {
                    error!("Failed to swap buffers: {}", err);
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::LoopDestroyed => info!("Window closed after {} frames", frame),
            _ => {}
        })
    }
}

/// Reads a string like `gl::VERSION` from the current context.
fn gl_string(name: gl::types::GLenum) -> String {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return "<unknown>".to_string();
        }
        CStr::from_ptr(ptr as *const c_char)
            .to_string_lossy()
            .into_owned()
    }
}
