//=========================================================================
// Frame Handler
//=========================================================================
//
// The seam between the render surface and the engine's frame loop.
//
// Lifecycle (driven by the platform, all on the main/render thread):
// ```text
//   initialize ─► startup ─► set_ready ─► tick ─► paint ─► tick ─► ...
//                                          └──── close ───► shutdown
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Deref, DerefMut};

use log::info;

//=== Internal Dependencies ===============================================

use super::Viewport;
use crate::core::cursor::{CursorKind, CursorRegistry};
use crate::core::font::{FontConfiguration, FontError, FontKind, FontSelection};

/// Error type an engine may return from [`FrameHandler::startup`].
pub type StartupError = Box<dyn std::error::Error + Send + Sync>;

//=== FrameHandler ========================================================

/// Engine-side callbacks invoked by the render surface.
///
/// Implementations run on the main/render thread and may issue GL calls
/// from `startup` and `paint`, where the context is current.
pub trait FrameHandler {
    /// Runs once after the GL context exists. Returning `Ok` marks the
    /// surface ready; an error aborts startup.
    fn startup(&mut self, _controls: &mut SurfaceControls) -> Result<(), StartupError> {
        Ok(())
    }

    /// Per-frame update. Frame N's tick always returns before frame N+1's.
    fn tick(&mut self, frame: &mut Frame<'_>);

    /// Draws the current frame. Buffers are swapped after this returns.
    fn paint(&mut self, _frame: &mut Frame<'_>) {}

    /// Runs once when the event loop is shutting down, only if `startup`
    /// succeeded.
    fn shutdown(&mut self) {}
}

//=== SurfaceControls =====================================================

/// Surface state an engine may change from inside its callbacks.
#[derive(Debug, Default)]
pub struct SurfaceControls {
    cursors: CursorRegistry,
    fonts: FontConfiguration,
    close_requested: bool,
}

impl SurfaceControls {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Cursor -----------------------------------------------------------

    /// Switches to the cursor at `index`; `false` if out of range (the
    /// previous cursor stays active).
    pub fn set_cursor(&mut self, index: usize) -> bool {
        self.cursors.set(index)
    }

    pub fn set_cursor_kind(&mut self, kind: CursorKind) {
        self.cursors.set_kind(kind);
    }

    pub fn cursor(&self) -> CursorKind {
        self.cursors.active()
    }

    pub fn cursors(&self) -> &CursorRegistry {
        &self.cursors
    }

    /// For loading cursor images.
    pub fn cursors_mut(&mut self) -> &mut CursorRegistry {
        &mut self.cursors
    }

    //--- Font -------------------------------------------------------------

    pub fn set_font_type(&mut self, kind: FontKind) {
        self.fonts.set_font_type(kind);
    }

    pub fn set_font_size(&mut self, size: f32) -> Result<(), FontError> {
        self.fonts.set_font_size(size)
    }

    pub fn font(&self) -> FontSelection {
        self.fonts.current()
    }

    pub fn fonts(&self) -> &FontConfiguration {
        &self.fonts
    }

    //--- Shutdown ---------------------------------------------------------

    /// Requests application shutdown. No tick or paint runs afterwards.
    pub fn close(&mut self) {
        if !self.close_requested {
            info!(target: "surface", "Close requested");
        }
        self.close_requested = true;
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }
}

//=== Frame ===============================================================

/// Per-frame view handed to [`FrameHandler::tick`] and
/// [`FrameHandler::paint`]. Dereferences to [`SurfaceControls`].
pub struct Frame<'a> {
    controls: &'a mut SurfaceControls,
    number: u64,
    elapsed_ms: u64,
    viewport: Option<Viewport>,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(
        controls: &'a mut SurfaceControls,
        number: u64,
        elapsed_ms: u64,
        viewport: Option<Viewport>,
    ) -> Self {
        Self { controls, number, elapsed_ms, viewport }
    }

    /// 1-based count of ticks run so far (paint sees the latest tick's).
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Milliseconds since surface creation, sampled at frame start.
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }
}

impl Deref for Frame<'_> {
    type Target = SurfaceControls;

    fn deref(&self) -> &SurfaceControls {
        self.controls
    }
}

impl DerefMut for Frame<'_> {
    fn deref_mut(&mut self) -> &mut SurfaceControls {
        self.controls
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_start_on_defaults() {
        let controls = SurfaceControls::new();
        assert_eq!(controls.cursor(), CursorKind::DEFAULT);
        assert_eq!(controls.font().kind, FontKind::Regular);
        assert!(!controls.is_close_requested());
    }

    #[test]
    fn frame_derefs_to_controls() {
        let mut controls = SurfaceControls::new();
        {
            let mut frame = Frame::new(&mut controls, 3, 48, Viewport::new(640, 480));
            assert_eq!(frame.number(), 3);
            assert_eq!(frame.elapsed_ticks(), 48);

            assert!(frame.set_cursor(CursorKind::Select.index()));
            frame.set_font_type(FontKind::Bold);
            frame.close();
        }

        assert_eq!(controls.cursor(), CursorKind::Select);
        assert_eq!(controls.font().kind, FontKind::Bold);
        assert!(controls.is_close_requested());
    }

    #[test]
    fn invalid_cursor_index_through_controls() {
        let mut controls = SurfaceControls::new();
        controls.set_cursor_kind(CursorKind::Build);
        assert!(!controls.set_cursor(999));
        assert_eq!(controls.cursor(), CursorKind::Build);
    }
}
