//! Draws one triangle: three hardcoded vertices and a shader program
//! built from the two source files under `shaders/`.
//!
//! A shader that fails to load, compile or link aborts startup with the
//! driver's diagnostic log in the error chain.

use anyhow::{Context, Result};
use learngl::{GlWindow, Mesh, ShaderProgram};
use log::LevelFilter;
use simple_logger::SimpleLogger;

const SCR_WIDTH: u32 = 800;
const SCR_HEIGHT: u32 = 800;

const VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0,
];

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let (window, event_loop) = GlWindow::new("LearnOpenGL", SCR_WIDTH, SCR_HEIGHT)?;

    let program = ShaderProgram::from_files("shaders/vertex.glsl", "shaders/fragment.glsl")
        .context("shader program build failed")?;
    let mesh = Mesh::new(&VERTICES);

    window.run(event_loop, move || {
        unsafe {
            gl::ClearColor(0.2, 0.3, 0.3, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        program.set_used();
        mesh.draw();
    })
}
