//=========================================================================
// OS Cursor Realization
//=========================================================================
//
// Applies the registry's active cursor to the Winit window.
//
// Architecture:
//   CursorRegistry::take_change() → CursorShape → CursorIcon / CustomCursor
//                                                   → Window::set_cursor
//
// Custom cursors are created once per loaded image and cached; reloading
// an image (a new `Arc`) invalidates the cached entry. An image the OS
// rejects is dropped from the registry, leaving the system fallback.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorIcon, CustomCursor, Window};

//=== Internal Dependencies ===============================================

use crate::core::cursor::{CursorImage, CursorKind, CursorRegistry, CursorShape, SystemCursor};

//=== OsCursors ===========================================================

/// Cache of OS cursor objects created from registry images.
#[derive(Default)]
pub(crate) struct OsCursors {
    custom: HashMap<CursorKind, (Arc<CursorImage>, CustomCursor)>,
}

impl OsCursors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Pushes the active cursor to `window` if the registry changed.
    pub(crate) fn apply(
        &mut self,
        event_loop: &ActiveEventLoop,
        window: &Window,
        registry: &mut CursorRegistry,
    ) {
        let Some(kind) = registry.take_change() else { return };

        match registry.shape(kind).clone() {
            CursorShape::System(system) => {
                window.set_cursor(CursorIcon::from(system));
            }
            CursorShape::Image(image) => match self.custom_cursor(event_loop, kind, &image) {
                Some(cursor) => window.set_cursor(cursor),
                None => {
                    registry.reset(kind);
                    window.set_cursor(CursorIcon::from(kind.system_fallback()));
                    // The reset re-flags the active cursor; it is applied now.
                    registry.take_change();
                }
            },
        }
        debug!(target: "platform", "Cursor set to {:?}", kind);
    }

    fn custom_cursor(
        &mut self,
        event_loop: &ActiveEventLoop,
        kind: CursorKind,
        image: &Arc<CursorImage>,
    ) -> Option<CustomCursor> {
        if let Some((cached, cursor)) = self.custom.get(&kind) {
            if Arc::ptr_eq(cached, image) {
                return Some(cursor.clone());
            }
        }

        let (hx, hy) = image.hotspot();
        let source =
            CustomCursor::from_rgba(image.rgba().to_vec(), image.width(), image.height(), hx, hy);
        match source {
            Ok(source) => {
                let cursor = event_loop.create_custom_cursor(source);
                self.custom.insert(kind, (Arc::clone(image), cursor.clone()));
                Some(cursor)
            }
            Err(e) => {
                warn!(target: "platform", "OS rejected cursor image for {:?}: {}", kind, e);
                self.custom.remove(&kind);
                None
            }
        }
    }
}

//=== Conversions =========================================================

impl From<SystemCursor> for CursorIcon {
    fn from(cursor: SystemCursor) -> Self {
        match cursor {
            SystemCursor::Default => CursorIcon::Default,
            SystemCursor::Pointer => CursorIcon::Pointer,
            SystemCursor::Crosshair => CursorIcon::Crosshair,
            SystemCursor::Move => CursorIcon::Move,
            SystemCursor::Grab => CursorIcon::Grab,
            SystemCursor::NotAllowed => CursorIcon::NotAllowed,
            SystemCursor::ResizeNorth => CursorIcon::NResize,
            SystemCursor::ResizeSouth => CursorIcon::SResize,
            SystemCursor::ResizeEast => CursorIcon::EResize,
            SystemCursor::ResizeWest => CursorIcon::WResize,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
