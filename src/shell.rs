//! Window shell: owns the event loop, GPU state, clock, and input.
//!
//! A demo implements [`Demo`] and hands the shell an init closure that
//! builds it once the GPU exists. Each frame the shell runs
//! update-then-render-then-present to completion; there is no concurrency,
//! so the render pass always sees the state the update pass just wrote.

use std::sync::Arc;

use glam::Vec2;
use tracing::warn;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::ShellError;
use crate::gpu::GpuState;
use crate::input::{Input, KeyCode};
use crate::time::Time;

/// Per-frame state handed to [`Demo::update`].
pub struct FrameCtx<'a> {
    pub time: &'a Time,
    pub input: &'a Input,
    /// Window size in pixels.
    pub viewport: Vec2,
}

/// One interactive application driven by the shell.
pub trait Demo {
    /// Advance simulation and interaction state by the elapsed time.
    fn update(&mut self, ctx: &mut FrameCtx<'_>);

    /// Emit this frame's GPU commands.
    fn render(&mut self, gpu: &mut GpuState) -> Result<(), wgpu::SurfaceError>;

    /// The window was resized; the surface is already reconfigured.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Create a window titled `title` and run `demo` until the window closes.
///
/// The init closure receives the ready GPU state so the demo can build its
/// renderers. Escape closes the window.
pub fn run<D, F>(title: &str, size: (u32, u32), init: F) -> Result<(), ShellError>
where
    D: Demo,
    F: FnOnce(&mut GpuState) -> Result<D, ShellError>,
{
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut shell = Shell {
        title: title.to_owned(),
        size,
        window: None,
        gpu: None,
        demo: None,
        init: Some(init),
        time: Time::new(),
        input: Input::new(),
        error: None,
    };
    event_loop.run_app(&mut shell)?;

    match shell.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct Shell<D, F> {
    title: String,
    size: (u32, u32),
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    demo: Option<D>,
    init: Option<F>,
    time: Time,
    input: Input,
    error: Option<ShellError>,
}

impl<D, F> Shell<D, F>
where
    D: Demo,
    F: FnOnce(&mut GpuState) -> Result<D, ShellError>,
{
    fn try_init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ShellError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));
        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let mut gpu = pollster::block_on(GpuState::new(window))?;
        if let Some(init) = self.init.take() {
            self.demo = Some(init(&mut gpu)?);
        }
        self.gpu = Some(gpu);
        Ok(())
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(demo)) = (self.gpu.as_mut(), self.demo.as_mut()) else {
            return;
        };

        self.time.update();
        let mut ctx = FrameCtx {
            time: &self.time,
            input: &self.input,
            viewport: gpu.viewport(),
        };
        demo.update(&mut ctx);

        match demo.render(gpu) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                warn!("surface lost, reconfiguring");
                let size = winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                };
                gpu.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                warn!("surface out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!(error = ?e, "render error"),
        }

        self.input.begin_frame();
    }
}

impl<D, F> ApplicationHandler for Shell<D, F>
where
    D: Demo,
    F: FnOnce(&mut GpuState) -> Result<D, ShellError>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.try_init(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let Some(demo) = &mut self.demo {
                    demo.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.input.key_pressed(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }
                self.frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
