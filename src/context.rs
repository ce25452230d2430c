//! Window and OpenGL context bootstrap plus the render-loop driver.
//!
//! Everything here is fixed plumbing around glutin and winit: pick a
//! framebuffer config, create a 3.3 core context, make it current and
//! load the GL function pointers. The demo binaries only supply a
//! per-frame draw closure.

use anyhow::{anyhow, Context, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow as GlutinWindow};
use log::{error, info};
use raw_window_handle::HasRawWindowHandle;
use std::{ffi::CString, num::NonZeroU32};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

pub struct GlWindow {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
}

impl GlWindow {
    /// Opens a window with a current OpenGL 3.3 core context and the GL
    /// function pointers loaded. The returned event loop is consumed
    /// later by [`GlWindow::run`].
    pub fn new(title: &str, width: u32, height: u32) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height));

        let template = ConfigTemplateBuilder::new();
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .unwrap()
            })
            .map_err(|e| anyhow!("failed to build GL display: {e}"))?;

        let window = window.ok_or_else(|| anyhow!("display builder produced no window"))?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .context("failed to create OpenGL context")?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .context("failed to create GL surface")?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("failed to make context current")?;

        gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            gl_display.get_proc_address(symbol.as_c_str()) as *const _
        });

        let size = window.inner_size();
        unsafe {
            gl::Viewport(0, 0, size.width as i32, size.height as i32);
        }

        info!("OpenGL 3.3 core context ready ({}x{})", size.width, size.height);

        Ok((
            Self {
                window,
                gl_context,
                gl_surface,
            },
            event_loop,
        ))
    }

    /// Drives the event loop, calling `frame` once per redraw and
    /// swapping buffers afterwards. Returns when the window is closed or
    /// Escape is pressed.
    pub fn run(self, event_loop: EventLoop<()>, mut frame: impl FnMut() + 'static) -> Result<()> {
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(NamedKey::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => elwt.exit(),
                WindowEvent::Resized(size) => self.resize(size),
                WindowEvent::RedrawRequested => {
                    frame();
                    if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
                        error!("swap_buffers failed: {e}");
                        elwt.exit();
                    }
                }
                _ => (),
            },
            Event::AboutToWait => self.window.request_redraw(),
            _ => (),
        })?;

        Ok(())
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        // Zero-sized surfaces come in while the window is minimized.
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.gl_surface.resize(&self.gl_context, width, height);
            unsafe {
                gl::Viewport(0, 0, size.width as i32, size.height as i32);
            }
        }
    }
}
