//=========================================================================
// Platform Subsystem
//
// Drives the render surface and input translation from the Winit event
// loop.
//
// Architecture:
// ```text
//  Main / Render Thread:                    Engine:
//  ┌───────────────────────────────┐
//  │  Winit Event Loop             │
//  │   ↓ WindowEvent               │
//  │  HostEvent (event_mapper)     │
//  │   ↓                           │
//  │  InputProcessor (dispatch)    │
//  │   ↓                           │
//  │  InputBuffer ── flush ────────┼──► InputReceiver (any thread)
//  │                               │
//  │  FrameTimer due?              │
//  │   ↓                           │
//  │  RenderSurface::tick ─────────┼──► FrameHandler::tick
//  │   ↓ request_redraw            │
//  │  RenderSurface::paint ────────┼──► FrameHandler::paint → swap
//  └───────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Timer-driven ticks**: the loop sleeps with `ControlFlow::WaitUntil`
//   on the frame timer's deadline, so the cadence is the configured tick
//   interval rather than the monitor refresh rate
// - **Flush before tick**: input translated since the last frame is in
//   the queue before the engine's tick runs
// - **Graceful receiver drop**: if the engine drops its receiver, input is
//   discarded with a warning and the window keeps working
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Host::run()`
//
// Responsibilities:
// - Create the window + GL context on resume
// - Run engine startup, then mark the surface ready
// - Translate Winit input and forward it in order
// - Tick at a fixed interval and paint on redraw
// - Apply cursor changes to the OS window
//
//=========================================================================

//=== Submodules ==========================================================

mod cursor;
mod event_mapper;
mod gl_backend;
mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use log::*;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{HostError, InputSender};
use crate::core::surface::{BackendError, FrameHandler, RenderSurface, SurfaceError};
use crate::core::timer::FrameTimer;
use crate::engine::HostConfig;
use cursor::OsCursors;
use event_mapper::HostEvent;
use gl_backend::GlutinBackend;
use input_processor::InputProcessor;

//=== Platform ============================================================

/// Event-loop driver owning the render surface.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` - no window yet
/// 2. **Execution**: `platform.run()` - blocks in the Winit event loop
/// 3. **Resume**: window + GL context, `startup`, ready flag
/// 4. **Frames**: ticks on the timer, paints on redraw
/// 5. **Shutdown**: close requested (OS or engine) → `shutdown` → return
///
/// # Thread Safety
///
/// Not Send/Sync: the surface it owns is pinned to the main thread.
pub(crate) struct Platform<'h, H: FrameHandler + ?Sized> {
    config: HostConfig,
    surface: RenderSurface<GlutinBackend>,
    handler: &'h mut H,
    input_processor: InputProcessor,
    input_sender: InputSender,
    cursors: OsCursors,

    /// Created once the surface is ready.
    timer: Option<FrameTimer>,

    /// First fatal error; returned from `run` after the loop exits.
    fatal: Option<HostError>,
}

impl<'h, H: FrameHandler + ?Sized> Platform<'h, H> {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet - that happens in `resumed()`.
    pub(crate) fn new(config: HostConfig, input_sender: InputSender, handler: &'h mut H) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            config,
            surface: RenderSurface::new(),
            handler,
            input_processor: InputProcessor::new(),
            input_sender,
            cursors: OsCursors::new(),
            timer: None,
            fatal: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// [`HostError::EventLoopCreation`] if Winit cannot create the loop
    /// (also the case off the main thread on macOS), otherwise the first
    /// fatal error raised while running.
    pub(crate) fn run(mut self) -> Result<(), HostError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(|e| HostError::EventLoopCreation(BackendError::from(e.to_string())))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| HostError::EventLoopExecution(BackendError::from(e.to_string())))?;

        match self.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Records a fatal error and stops the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: HostError) {
        error!(target: "platform", "Fatal: {}", err);
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.surface.close();
        event_loop.exit();
    }

    /// Creates the GL surface and runs engine startup.
    fn start_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HostError> {
        let (width, height) = self.config.size();
        let config = &self.config;
        self.surface.initialize(width, height, |viewport| {
            GlutinBackend::create(event_loop, config, viewport)
        })?;

        self.surface.start(&mut *self.handler).map_err(HostError::Startup)?;

        let timer = FrameTimer::new(self.config.tick_interval(), Instant::now());
        event_loop.set_control_flow(ControlFlow::WaitUntil(timer.deadline()));
        self.timer = Some(timer);
        Ok(())
    }

    /// Ticks if the timer is due, then schedules the next wake-up.
    fn pump(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(timer) = self.timer.as_mut() {
            if timer.poll(Instant::now()) {
                self.input_processor.flush(&mut self.input_sender);

                if self.surface.tick(&mut *self.handler) {
                    if let Some(backend) = self.surface.backend() {
                        backend.window().request_redraw();
                    }
                }
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(timer.deadline()));
        }

        if let Some((backend, registry)) = self.surface.backend_and_cursors() {
            self.cursors.apply(event_loop, backend.window(), registry);
        }

        if self.surface.is_closed() {
            event_loop.exit();
        }
    }

    /// Delivers the last input and runs engine shutdown, which is skipped
    /// when startup never succeeded.
    fn finish(&mut self) {
        self.input_processor.flush(&mut self.input_sender);
        if self.surface.is_ready() {
            self.handler.shutdown();
        } else {
            debug!(target: "platform", "Surface never became ready, skipping shutdown");
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn surface(&self) -> &RenderSurface<GlutinBackend> {
        &self.surface
    }
}

//=== Winit Integration ===================================================

impl<H: FrameHandler + ?Sized> ApplicationHandler for Platform<'_, H> {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.backend().is_some() {
            debug!(target: "platform", "Surface already exists (mobile resume?)");
            return;
        }

        match self.start_surface(event_loop) {
            Ok(()) => {
                if let Some(backend) = self.surface.backend() {
                    let window = backend.window();
                    info!(
                        target: "platform",
                        "Window created: {}x{} @ {}x DPI",
                        window.inner_size().width,
                        window.inner_size().height,
                        window.scale_factor()
                    );
                }
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.surface.close();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => match self.surface.resize(size.width, size.height) {
                Ok(_) => {}
                Err(SurfaceError::InvalidDimensions { .. }) => {
                    debug!(target: "platform", "Zero-sized window (minimized), keeping viewport");
                }
                Err(e) => warn!(target: "platform", "Resize failed: {}", e),
            },

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.surface.paint(&mut *self.handler) {
                    self.fail(event_loop, e.into());
                }
            }

            _ => match HostEvent::from_window_event(&event) {
                Some(host_event) => self.input_processor.handle(host_event),
                None => trace!(target: "platform", "Ignoring window event {:?}", event),
            },
        }
    }

    /// Runs after each batch of OS events, including timer wake-ups.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.finish();
        info!(
            target: "platform",
            "Event loop exiting after {} frames ({} ms)",
            self.surface.frame_count(),
            self.surface.elapsed_ticks()
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
