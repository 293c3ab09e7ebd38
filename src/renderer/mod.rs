mod debug;
pub mod main_loop;
pub mod object3d;
#[allow(clippy::module_inception)]
pub mod renderer;
pub mod shaders;
