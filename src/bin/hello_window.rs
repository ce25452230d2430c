//! Opens a window with an OpenGL 3.3 core context and runs a clear-only
//! render loop. Escape or closing the window exits.

use anyhow::Result;
use learngl::GlWindow;
use log::LevelFilter;
use simple_logger::SimpleLogger;

const SCR_WIDTH: u32 = 800;
const SCR_HEIGHT: u32 = 600;

fn main() -> Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let (window, event_loop) = GlWindow::new("LearnOpenGL", SCR_WIDTH, SCR_HEIGHT)?;

    window.run(event_loop, || unsafe {
        gl::ClearColor(0.2, 0.3, 0.3, 1.0);
        gl::Clear(gl::COLOR_BUFFER_BIT);
    })
}
