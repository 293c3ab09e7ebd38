mod renderer;

use crate::renderer::main_loop::{main_loop, App, DrawContext, RenderLoopSettings};
use crate::renderer::object3d::{self, VertexArray};
use crate::renderer::shaders::{self, Program};
use anyhow::Result;
use log::{debug, error, info};

pub fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let cpus = std::thread::available_parallelism().map_or(1, |it| it.get());
    info!("Started! {} CPUs available", cpus);

    let settings = RenderLoopSettings::default();
    if let Err(err) = main_loop(settings, TriangleApp::new) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

/// Draws one white triangle per frame.
struct TriangleApp {
    program: Program,
    triangle: VertexArray,
}

impl TriangleApp {
    fn new() -> Result<Self> {
        let program = shaders::flat_white()?;
        let triangle = object3d::triangle()?;
        info!("Scene ready: {} vertices", triangle.vertex_count());
        Ok(TriangleApp { program, triangle })
    }
}

impl App for TriangleApp {
    fn draw(&mut self, context: &mut DrawContext) {
        if context.frame == 0 {
            debug!("Drawing first frame");
        }
        self.program.bind();
        self.triangle.draw();
    }
}
