//! Draws a rectangle as two indexed triangles, in wireframe so the
//! shared diagonal is visible. Same shader pair as the triangle demo.

use anyhow::{Context, Result};
use learngl::{GlWindow, Mesh, ShaderProgram};
use log::LevelFilter;
use simple_logger::SimpleLogger;

const SCR_WIDTH: u32 = 800;
const SCR_HEIGHT: u32 = 800;

const VERTICES: [f32; 12] = [
    0.5, 0.5, 0.0, // top right
    0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5, 0.5, 0.0, // top left
];

const INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let (window, event_loop) = GlWindow::new("LearnOpenGL", SCR_WIDTH, SCR_HEIGHT)?;

    let program = ShaderProgram::from_files("shaders/vertex.glsl", "shaders/fragment.glsl")
        .context("shader program build failed")?;
    let mesh = Mesh::with_indices(&VERTICES, &INDICES);

    unsafe {
        gl::PolygonMode(gl::FRONT_AND_BACK, gl::LINE);
    }

    window.run(event_loop, move || {
        unsafe {
            gl::ClearColor(0.2, 0.3, 0.3, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        program.set_used();
        mesh.draw();
    })
}
