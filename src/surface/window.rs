//! Native window surface backed by winit and wgpu.
//!
//! The event loop is pumped rather than run: the animation driver owns the
//! frame loop and asks for pending events once per frame, so the window
//! never blocks it.
//!
//! ```no_run
//! # use superformula::surface::window::WindowSurface;
//! let surface = WindowSurface::new("Superformula", 500, 500)?;
//! # Ok::<(), superformula::surface::SurfaceError>(())
//! ```

use std::{sync::Arc, time::Duration};

use glam::IVec2;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalPosition, LogicalSize, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

use super::{DisplaySurface, Rgba, Signals, SurfaceError};
use crate::{
    error::{Result, SuperformulaError},
    gpu::{
        line_renderer::LineRenderer,
        render_context::{FrameAcquire, RenderContext},
    },
};

/// Pumps allowed for the platform to hand us a window.
const RESUME_ATTEMPTS: usize = 50;
/// Wait per pump while waiting for the window.
const RESUME_WAIT: Duration = Duration::from_millis(10);
/// Initial window position in logical pixels.
const WINDOW_POSITION: (i32, i32) = (100, 100);
/// Vertex capacity reserved up front: four shapes at the default step.
const INITIAL_VERTICES: usize = 4 * 1300;

// ── Event collection ─────────────────────────────────────────────────────

/// Internal winit application handler that records signals between polls.
struct EventCollector {
    attributes: WindowAttributes,
    window: Option<Arc<Window>>,
    creation_error: Option<String>,
    signals: Signals,
    resized: Option<PhysicalSize<u32>>,
}

impl EventCollector {
    fn new(attributes: WindowAttributes) -> Self {
        Self {
            attributes,
            window: None,
            creation_error: None,
            signals: Signals::default(),
            resized: None,
        }
    }

    fn take_signals(&mut self) -> Signals {
        std::mem::take(&mut self.signals)
    }
}

impl ApplicationHandler for EventCollector {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.creation_error = Some(e.to_string()),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.signals.quit = true;
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.signals.escape_pressed = true;
                }
            }

            WindowEvent::Resized(size) => {
                self.resized = Some(size);
            }

            _ => (),
        }
    }
}

// ── Surface ──────────────────────────────────────────────────────────────

/// A fixed-size native window drawing polylines through wgpu.
///
/// Dropping the surface releases the GPU resources, then the window, then
/// the event loop.
pub struct WindowSurface {
    // Field order is drop order.
    renderer: LineRenderer,
    context: RenderContext,
    window: Arc<Window>,
    collector: EventCollector,
    event_loop: EventLoop<()>,
}

impl WindowSurface {
    /// Open a non-resizable window whose canvas is `width` × `height`
    /// logical pixels and set up the renderer for it.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the event loop, the window, the GPU
    /// adapter/device or the swapchain cannot be created.
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
    ) -> std::result::Result<Self, SurfaceError> {
        let mut event_loop = EventLoop::new()
            .map_err(|e| SurfaceError::EventLoop(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_position(LogicalPosition::new(
                WINDOW_POSITION.0,
                WINDOW_POSITION.1,
            ))
            .with_resizable(false);
        let mut collector = EventCollector::new(attributes);

        for _ in 0..RESUME_ATTEMPTS {
            let status =
                event_loop.pump_app_events(Some(RESUME_WAIT), &mut collector);
            if let Some(msg) = collector.creation_error.take() {
                return Err(SurfaceError::WindowCreation(msg));
            }
            if collector.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                return Err(SurfaceError::EventLoop(format!(
                    "event loop exited with status {code} before the window \
                     opened"
                )));
            }
        }
        let window = collector
            .window
            .clone()
            .ok_or(SurfaceError::WindowUnavailable)?;

        let size = window.inner_size();
        let context = pollster::block_on(RenderContext::new(
            window.clone(),
            (size.width, size.height),
        ))?;
        let renderer =
            LineRenderer::new(&context, (width, height), INITIAL_VERTICES);
        log::info!(
            "window \"{title}\" opened at {}x{} ({:?})",
            size.width,
            size.height,
            context.format()
        );

        Ok(Self {
            renderer,
            context,
            window,
            collector,
            event_loop,
        })
    }
}

impl DisplaySurface for WindowSurface {
    fn poll_signals(&mut self) -> Signals {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.collector);
        let mut exited = Signals::default();
        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with status {code}");
            exited.quit = true;
        }
        if let Some(size) = self.collector.resized.take() {
            self.context.resize(size.width, size.height);
        }
        self.collector.take_signals().merge(exited)
    }

    fn clear(&mut self, color: Rgba) {
        self.renderer.batch_mut().begin(color);
    }

    fn draw_polyline(&mut self, points: &[IVec2], color: Rgba) {
        self.renderer.batch_mut().push(points, color);
    }

    fn present(&mut self) -> Result<()> {
        let frame = match self.context.acquire_frame() {
            Ok(FrameAcquire::Ready(frame)) => frame,
            Ok(FrameAcquire::Reconfigured | FrameAcquire::Skipped) => {
                return Ok(())
            }
            Err(e) => return Err(SuperformulaError::Render(e.to_string())),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer.render(&self.context, &view);
        self.window.pre_present_notify();
        frame.present();
        Ok(())
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        log::info!("closing window");
    }
}
