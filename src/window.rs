// SPDX-License-Identifier: MPL-2.0
//! Windowing host: winit event loop pumped with a timeout.
//!
//! The driver runs its own blocking loop, so the event loop is pumped
//! (`pump_app_events`) instead of taken over: `pump(timeout)` processes
//! whatever is pending and returns after at most `timeout`, which is the
//! wait-with-timeout primitive the pacer relies on. Close requests are
//! latched and observed at the top of the driver loop.

use crate::error::{Error, Result};
use crate::player::PresentationHost;
use crate::render::Renderer;
use crate::stream::StreamGeometry;
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// How many pumps to attempt before concluding no window will arrive.
const WINDOW_CREATE_PUMPS: u32 = 10;

/// winit application state: the window, and the flags the driver polls.
struct DisplayApp {
    title: String,
    size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    create_error: Option<String>,
    close_requested: bool,
}

impl ApplicationHandler for DisplayApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.size);
        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.create_error = Some(e.to_string()),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            // Resizes need no bookkeeping: the renderer re-reads the window
            // size and re-derives the projection on every present.
            _ => {}
        }
    }
}

/// Owns the event loop, window, and renderer; the driver talks to it through
/// [`PresentationHost`].
pub struct WinitHost {
    renderer: Renderer,
    app: DisplayApp,
    event_loop: EventLoop<()>,
}

impl WinitHost {
    /// Initializes the host, opens a window sized to the stream geometry,
    /// and brings up the GPU pipeline.
    pub fn new(title: &str, geometry: StreamGeometry) -> Result<Self> {
        let mut event_loop = EventLoop::new()
            .map_err(|e| Error::HostInit(format!("event loop creation failed: {e}")))?;

        let mut app = DisplayApp {
            title: title.to_string(),
            size: PhysicalSize::new(geometry.width, geometry.height),
            window: None,
            create_error: None,
            close_requested: false,
        };

        // The window materializes once the loop delivers `resumed`; pump a
        // bounded number of times rather than waiting forever on a broken
        // host.
        for _ in 0..WINDOW_CREATE_PUMPS {
            if app.window.is_some() || app.create_error.is_some() {
                break;
            }
            if let PumpStatus::Exit(_) =
                event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut app)
            {
                break;
            }
        }

        if let Some(message) = app.create_error.take() {
            return Err(Error::WindowCreate(message));
        }
        let window = app
            .window
            .clone()
            .ok_or_else(|| Error::WindowCreate("event loop delivered no window".to_string()))?;

        let renderer = Renderer::new(window, geometry)?;

        Ok(Self {
            renderer,
            app,
            event_loop,
        })
    }
}

impl PresentationHost for WinitHost {
    fn close_requested(&self) -> bool {
        self.app.close_requested
    }

    fn pump(&mut self, timeout: Duration) -> Result<()> {
        if let PumpStatus::Exit(_) = self
            .event_loop
            .pump_app_events(Some(timeout), &mut self.app)
        {
            self.app.close_requested = true;
        }
        Ok(())
    }

    fn present(&mut self, pixels: &[u8]) -> Result<()> {
        self.renderer.render(pixels)
    }
}
