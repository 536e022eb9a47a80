//=========================================================================
// Render Surface
//=========================================================================
//
// Owns the GL-capable drawing surface and its frame bookkeeping.
//
// Architecture:
// ```text
//   Platform (native event loop)
//      │  initialize / resize / tick / paint
//      ▼
//   RenderSurface<B: GlBackend>
//      ├─ backend: B            (window + GL context, narrow capability)
//      ├─ clock: TickClock      (elapsed ms, monotonic)
//      ├─ ready / frames
//      └─ controls: SurfaceControls (cursor, font, close flag)
//      │  tick / paint
//      ▼
//   FrameHandler (engine)
// ```
//
// Thread affinity: the surface is `!Send` and `!Sync`. Everything here
// runs on the main/render thread; background workers cannot reach it.
//
// Ready flag: ticks and paints are suppressed until `set_ready()`, and
// again after close has been requested.
//
//=========================================================================

//=== Submodules ==========================================================

mod frame;

//=== External Dependencies ===============================================

use std::marker::PhantomData;
use std::num::NonZeroU32;

use log::{debug, error, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::cursor::{CursorKind, CursorRegistry};
use crate::core::font::{FontError, FontKind, FontSelection};
use crate::core::timer::TickClock;

//=== Public API ==========================================================

pub use frame::{Frame, FrameHandler, StartupError, SurfaceControls};

//=== Viewport ============================================================

/// Drawable area in physical pixels. Both dimensions are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Viewport {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl Viewport {
    /// `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }

    pub fn width_nonzero(&self) -> NonZeroU32 {
        self.width
    }

    pub fn height_nonzero(&self) -> NonZeroU32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width() as f32 / self.height() as f32
    }
}

//=== GlBackend ===========================================================

/// Error type crossing the backend seam.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Narrow capability interface over a window + current GL context.
pub trait GlBackend {
    /// Resizes the drawable and the GL viewport.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Presents the frame just drawn (buffer swap).
    fn present(&mut self) -> Result<(), BackendError>;
}

//=== SurfaceError ========================================================

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// Fatal: there is no degraded rendering mode.
    #[error("GL context creation failed: {0}")]
    ContextCreation(#[source] BackendError),

    /// Zero width or height; prior dimensions are kept.
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("render surface is already initialized")]
    AlreadyInitialized,

    #[error("render surface is not initialized")]
    NotInitialized,

    #[error("failed to present frame: {0}")]
    Present(#[source] BackendError),
}

//=== RenderSurface =======================================================

/// The single rendering surface of the process.
///
/// Created empty; [`initialize`](Self::initialize) attaches the GL
/// backend. Uniqueness comes from the host, which owns exactly one.
pub struct RenderSurface<B: GlBackend> {
    backend: Option<B>,
    viewport: Option<Viewport>,
    clock: TickClock,
    frames: u64,
    ready: bool,
    controls: SurfaceControls,

    // Pins the surface to the thread that created it.
    _not_send: PhantomData<*const ()>,
}

impl<B: GlBackend> RenderSurface<B> {
    /// Starts the elapsed-ticks clock; no GL context yet.
    pub fn new() -> Self {
        Self {
            backend: None,
            viewport: None,
            clock: TickClock::new(),
            frames: 0,
            ready: false,
            controls: SurfaceControls::new(),
            _not_send: PhantomData,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Creates the GL context sized `width` x `height` through `create`.
    ///
    /// # Errors
    ///
    /// - [`SurfaceError::InvalidDimensions`] for a zero dimension
    /// - [`SurfaceError::ContextCreation`] if `create` fails (fatal)
    /// - [`SurfaceError::AlreadyInitialized`] on a second call
    pub fn initialize<F>(
        &mut self,
        width: u32,
        height: u32,
        create: F,
    ) -> Result<Viewport, SurfaceError>
    where
        F: FnOnce(Viewport) -> Result<B, BackendError>,
    {
        if self.backend.is_some() {
            return Err(SurfaceError::AlreadyInitialized);
        }

        let viewport = Viewport::new(width, height)
            .ok_or(SurfaceError::InvalidDimensions { width, height })?;

        let mut backend = create(viewport).map_err(|e| {
            error!(target: "surface", "GL context creation failed: {}", e);
            SurfaceError::ContextCreation(e)
        })?;

        backend.set_viewport(viewport);
        self.backend = Some(backend);
        self.viewport = Some(viewport);

        info!(target: "surface", "Render surface initialized at {}x{}", width, height);
        Ok(viewport)
    }

    /// Reconfigures the viewport. Returns `Ok(false)` when the size is
    /// unchanged (nothing is touched).
    ///
    /// # Errors
    ///
    /// [`SurfaceError::InvalidDimensions`] for a zero dimension (the
    /// previous viewport is kept), [`SurfaceError::NotInitialized`]
    /// before `initialize`.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, SurfaceError> {
        let viewport = Viewport::new(width, height)
            .ok_or(SurfaceError::InvalidDimensions { width, height })?;
        let backend = self.backend.as_mut().ok_or(SurfaceError::NotInitialized)?;

        if self.viewport == Some(viewport) {
            trace!(target: "surface", "Resize to unchanged {}x{} ignored", width, height);
            return Ok(false);
        }

        backend.set_viewport(viewport);
        self.viewport = Some(viewport);
        debug!(target: "surface", "Viewport resized to {}x{}", width, height);
        Ok(true)
    }

    /// Allows ticks and paints. Call once engine startup has completed.
    pub fn set_ready(&mut self) {
        if !self.ready {
            info!(target: "surface", "Surface ready to paint");
        }
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Signals shutdown; no tick or paint runs afterwards.
    pub fn close(&mut self) {
        self.controls.close();
    }

    pub fn is_closed(&self) -> bool {
        self.controls.is_close_requested()
    }

    fn is_live(&self) -> bool {
        self.ready && !self.is_closed()
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one frame update. No-op (returns `false`) while not ready or
    /// after close.
    pub fn tick<H: FrameHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        if !self.is_live() {
            return false;
        }

        self.frames += 1;
        let elapsed = self.clock.elapsed_ms();
        let mut frame = Frame::new(&mut self.controls, self.frames, elapsed, self.viewport);
        handler.tick(&mut frame);
        true
    }

    /// Renders the current frame and presents it. Returns `Ok(false)`
    /// when suppressed (not ready, closed, or no context).
    pub fn paint<H: FrameHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> Result<bool, SurfaceError> {
        if !self.is_live() {
            return Ok(false);
        }
        let Some(backend) = self.backend.as_mut() else {
            return Ok(false);
        };

        let elapsed = self.clock.elapsed_ms();
        let mut frame = Frame::new(&mut self.controls, self.frames, elapsed, self.viewport);
        handler.paint(&mut frame);

        backend.present().map_err(SurfaceError::Present)?;
        Ok(true)
    }

    /// Gives `handler` its one-time startup call; success sets ready.
    pub fn start<H: FrameHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), StartupError> {
        handler.startup(&mut self.controls)?;
        self.set_ready();
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    /// Milliseconds since the surface was created; never decreases.
    pub fn elapsed_ticks(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Backend and cursor registry together, for applying cursor changes.
    pub(crate) fn backend_and_cursors(&mut self) -> Option<(&B, &mut CursorRegistry)> {
        let backend = self.backend.as_ref()?;
        Some((backend, self.controls.cursors_mut()))
    }

    //--- Cursor & Font ----------------------------------------------------

    /// Switches the active cursor; `false` (no change) if out of range.
    pub fn set_cursor(&mut self, index: usize) -> bool {
        self.controls.set_cursor(index)
    }

    pub fn cursor(&self) -> CursorKind {
        self.controls.cursor()
    }

    pub fn cursors_mut(&mut self) -> &mut CursorRegistry {
        self.controls.cursors_mut()
    }

    pub fn set_font_type(&mut self, kind: FontKind) {
        self.controls.set_font_type(kind);
    }

    pub fn set_font_size(&mut self, size: f32) -> Result<(), FontError> {
        self.controls.set_font_size(size)
    }

    pub fn font(&self) -> FontSelection {
        self.controls.font()
    }

    pub fn controls(&self) -> &SurfaceControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut SurfaceControls {
        &mut self.controls
    }
}

impl<B: GlBackend> Default for RenderSurface<B> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Doubles -----------------------------------------------------

    #[derive(Default)]
    struct RecordingBackend {
        viewports: Vec<Viewport>,
        presents: u32,
        fail_present: bool,
    }

    impl GlBackend for RecordingBackend {
        fn set_viewport(&mut self, viewport: Viewport) {
            self.viewports.push(viewport);
        }

        fn present(&mut self) -> Result<(), BackendError> {
            if self.fail_present {
                return Err("context lost".into());
            }
            self.presents += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingHandler {
        ticks: Vec<u64>,
        paints: u32,
        close_on_tick: Option<u64>,
        fail_startup: bool,
    }

    impl FrameHandler for CountingHandler {
        fn startup(&mut self, _controls: &mut SurfaceControls) -> Result<(), StartupError> {
            if self.fail_startup {
                return Err("assets missing".into());
            }
            Ok(())
        }

        fn tick(&mut self, frame: &mut Frame<'_>) {
            self.ticks.push(frame.number());
            if self.close_on_tick == Some(frame.number()) {
                frame.close();
            }
        }

        fn paint(&mut self, _frame: &mut Frame<'_>) {
            self.paints += 1;
        }
    }

    fn initialized(width: u32, height: u32) -> RenderSurface<RecordingBackend> {
        let mut surface = RenderSurface::new();
        surface
            .initialize(width, height, |_| Ok(RecordingBackend::default()))
            .unwrap();
        surface
    }

    //=====================================================================
    // Initialization Tests
    //=====================================================================

    #[test]
    fn initialize_sets_viewport() {
        let surface = initialized(800, 600);
        assert_eq!(surface.viewport(), Viewport::new(800, 600));
        assert_eq!(surface.backend().unwrap().viewports, vec![Viewport::new(800, 600).unwrap()]);
    }

    #[test]
    fn initialize_context_failure_is_fatal() {
        let mut surface: RenderSurface<RecordingBackend> = RenderSurface::new();
        let result = surface.initialize(800, 600, |_| Err("no GL 3.2".into()));

        assert!(matches!(result, Err(SurfaceError::ContextCreation(_))));
        assert!(surface.backend().is_none(), "no partial surface may remain");
        assert!(surface.viewport().is_none());
    }

    #[test]
    fn initialize_rejects_zero_size() {
        let mut surface: RenderSurface<RecordingBackend> = RenderSurface::new();
        let result = surface.initialize(0, 600, |_| Ok(RecordingBackend::default()));
        assert!(matches!(result, Err(SurfaceError::InvalidDimensions { width: 0, height: 600 })));
    }

    #[test]
    fn initialize_twice_rejected() {
        let mut surface = initialized(800, 600);
        let result = surface.initialize(800, 600, |_| Ok(RecordingBackend::default()));
        assert!(matches!(result, Err(SurfaceError::AlreadyInitialized)));
    }

    //=====================================================================
    // Resize Tests
    //=====================================================================

    #[test]
    fn resize_to_same_size_is_noop() {
        let mut surface = initialized(800, 600);

        assert!(!surface.resize(800, 600).unwrap());

        assert_eq!(surface.viewport(), Viewport::new(800, 600));
        assert_eq!(surface.backend().unwrap().viewports.len(), 1, "backend must not be touched");
    }

    #[test]
    fn resize_updates_viewport() {
        let mut surface = initialized(800, 600);
        assert!(surface.resize(1024, 768).unwrap());
        assert_eq!(surface.viewport(), Viewport::new(1024, 768));
        assert_eq!(surface.backend().unwrap().viewports.len(), 2);
    }

    #[test]
    fn resize_to_zero_keeps_prior_dimensions() {
        let mut surface = initialized(800, 600);

        let result = surface.resize(0, 0);

        assert!(matches!(result, Err(SurfaceError::InvalidDimensions { .. })));
        assert_eq!(surface.viewport(), Viewport::new(800, 600));
    }

    #[test]
    fn resize_before_initialize_fails() {
        let mut surface: RenderSurface<RecordingBackend> = RenderSurface::new();
        assert!(matches!(surface.resize(800, 600), Err(SurfaceError::NotInitialized)));
    }

    //=====================================================================
    // Tick & Paint Tests
    //=====================================================================

    #[test]
    fn tick_and_paint_suppressed_until_ready() {
        let mut surface = initialized(800, 600);
        let mut handler = CountingHandler::default();

        assert!(!surface.tick(&mut handler));
        assert!(!surface.paint(&mut handler).unwrap());
        assert!(handler.ticks.is_empty());
        assert_eq!(handler.paints, 0);
        assert_eq!(surface.backend().unwrap().presents, 0);

        surface.set_ready();

        assert!(surface.tick(&mut handler));
        assert!(surface.paint(&mut handler).unwrap());
        assert_eq!(handler.ticks, vec![1]);
        assert_eq!(handler.paints, 1);
        assert_eq!(surface.backend().unwrap().presents, 1);
    }

    #[test]
    fn start_sets_ready_on_success() {
        let mut surface = initialized(800, 600);
        let mut handler = CountingHandler::default();

        surface.start(&mut handler).unwrap();
        assert!(surface.is_ready());
    }

    #[test]
    fn failed_startup_leaves_surface_unready() {
        let mut surface = initialized(800, 600);
        let mut handler = CountingHandler { fail_startup: true, ..Default::default() };

        assert!(surface.start(&mut handler).is_err());
        assert!(!surface.is_ready());
        assert!(!surface.tick(&mut handler));
    }

    #[test]
    fn frames_are_numbered_sequentially() {
        let mut surface = initialized(800, 600);
        let mut handler = CountingHandler::default();
        surface.set_ready();

        for _ in 0..3 {
            surface.tick(&mut handler);
        }
        assert_eq!(handler.ticks, vec![1, 2, 3]);
        assert_eq!(surface.frame_count(), 3);
    }

    #[test]
    fn close_stops_further_ticks_and_paints() {
        let mut surface = initialized(800, 600);
        let mut handler = CountingHandler { close_on_tick: Some(2), ..Default::default() };
        surface.set_ready();

        for _ in 0..5 {
            surface.tick(&mut handler);
        }

        assert_eq!(handler.ticks, vec![1, 2]);
        assert!(surface.is_closed());
        assert!(!surface.paint(&mut handler).unwrap());
    }

    #[test]
    fn present_failure_is_reported() {
        let mut surface: RenderSurface<RecordingBackend> = RenderSurface::new();
        let failing = RecordingBackend { fail_present: true, ..Default::default() };
        surface.initialize(320, 200, |_| Ok(failing)).unwrap();
        surface.set_ready();

        let result = surface.paint(&mut CountingHandler::default());
        assert!(matches!(result, Err(SurfaceError::Present(_))));
    }

    //=====================================================================
    // Clock, Cursor & Font Tests
    //=====================================================================

    #[test]
    fn elapsed_ticks_never_decrease() {
        let surface: RenderSurface<RecordingBackend> = RenderSurface::new();
        let mut previous = surface.elapsed_ticks();
        for _ in 0..200 {
            let current = surface.elapsed_ticks();
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn cursor_changes_through_surface() {
        let mut surface: RenderSurface<RecordingBackend> = RenderSurface::new();
        assert!(surface.set_cursor(CursorKind::Attack.index()));
        assert_eq!(surface.cursor(), CursorKind::Attack);

        assert!(!surface.set_cursor(CursorKind::COUNT));
        assert_eq!(surface.cursor(), CursorKind::Attack);
    }

    #[test]
    fn font_changes_through_surface() {
        let mut surface: RenderSurface<RecordingBackend> = RenderSurface::new();
        surface.set_font_type(FontKind::Small);
        surface.set_font_size(11.0).unwrap();
        assert_eq!(surface.font(), FontSelection { kind: FontKind::Small, size: 11.0 });
    }

    #[test]
    fn viewport_rejects_zero() {
        assert!(Viewport::new(0, 1).is_none());
        assert!(Viewport::new(1, 0).is_none());
        let vp = Viewport::new(1920, 1080).unwrap();
        assert!((vp.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
    }
}
