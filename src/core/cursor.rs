//=========================================================================
// Cursor Registry
//=========================================================================
//
// Maps the engine's enumerated cursors to loaded images (or a system
// cursor fallback) and tracks which one is active.
//
// Invariants:
// - Exactly one `CursorKind` is active at all times (`Arrow` initially).
// - Out-of-range indices never change the active cursor.
// - A failed image load leaves that slot on its system fallback; the
//   failure is returned to the caller, never panicked on.
//
// The registry is pure state. The platform layer polls `take_change()`
// and pushes the shape to the OS window.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

//=== CursorKind ==========================================================

/// Every cursor the engine can request, by stable index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CursorKind {
    Arrow,
    Destination,
    Sight,
    Target,
    ScrollLeft,
    ScrollRight,
    ScrollDown,
    ScrollUp,
    EdgeOfMap,
    Attach,
    Attack,
    Bomb,
    Bridge,
    Build,
    Embark,
    Disembark,
    Fix,
    Guard,
    Jam,
    LockOn,
    Scout,
    Menu,
    Move,
    NotPossible,
    PickUp,
    SeekRepair,
    Select,
}

impl CursorKind {
    /// Every kind in index order.
    pub const ALL: [CursorKind; 27] = [
        CursorKind::Arrow,
        CursorKind::Destination,
        CursorKind::Sight,
        CursorKind::Target,
        CursorKind::ScrollLeft,
        CursorKind::ScrollRight,
        CursorKind::ScrollDown,
        CursorKind::ScrollUp,
        CursorKind::EdgeOfMap,
        CursorKind::Attach,
        CursorKind::Attack,
        CursorKind::Bomb,
        CursorKind::Bridge,
        CursorKind::Build,
        CursorKind::Embark,
        CursorKind::Disembark,
        CursorKind::Fix,
        CursorKind::Guard,
        CursorKind::Jam,
        CursorKind::LockOn,
        CursorKind::Scout,
        CursorKind::Menu,
        CursorKind::Move,
        CursorKind::NotPossible,
        CursorKind::PickUp,
        CursorKind::SeekRepair,
        CursorKind::Select,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// The baseline cursor active after startup.
    pub const DEFAULT: CursorKind = CursorKind::Arrow;

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// OS cursor shown when no image is loaded for this kind.
    pub fn system_fallback(self) -> SystemCursor {
        use CursorKind::*;
        match self {
            Arrow | Menu => SystemCursor::Default,
            Destination | Sight | Target | LockOn => SystemCursor::Crosshair,
            ScrollLeft => SystemCursor::ResizeWest,
            ScrollRight => SystemCursor::ResizeEast,
            ScrollDown => SystemCursor::ResizeSouth,
            ScrollUp => SystemCursor::ResizeNorth,
            EdgeOfMap | NotPossible => SystemCursor::NotAllowed,
            Move => SystemCursor::Move,
            PickUp => SystemCursor::Grab,
            Select | Attach | Attack | Bomb | Bridge | Build | Embark | Disembark | Fix
            | Guard | Jam | Scout | SeekRepair => SystemCursor::Pointer,
        }
    }
}

//=== SystemCursor ========================================================

/// Platform-provided cursor shapes, independent of the windowing crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemCursor {
    Default,
    Pointer,
    Crosshair,
    Move,
    Grab,
    NotAllowed,
    ResizeNorth,
    ResizeSouth,
    ResizeEast,
    ResizeWest,
}

//=== CursorImage =========================================================

/// Straight-alpha RGBA8 cursor bitmap with its hotspot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorImage {
    rgba: Vec<u8>,
    width: u16,
    height: u16,
    hotspot: (u16, u16),
}

impl CursorImage {
    /// Wraps raw RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// [`CursorError::InvalidImage`] for empty dimensions, a pixel buffer
    /// of the wrong length, or a hotspot outside the image.
    pub fn from_rgba(
        rgba: Vec<u8>,
        width: u16,
        height: u16,
        hotspot: (u16, u16),
    ) -> Result<Self, CursorError> {
        if width == 0 || height == 0 {
            return Err(CursorError::InvalidImage(format!(
                "empty cursor image ({}x{})",
                width, height
            )));
        }

        let expected = usize::from(width) * usize::from(height) * 4;
        if rgba.len() != expected {
            return Err(CursorError::InvalidImage(format!(
                "expected {} bytes of RGBA for {}x{}, got {}",
                expected,
                width,
                height,
                rgba.len()
            )));
        }

        if hotspot.0 >= width || hotspot.1 >= height {
            return Err(CursorError::InvalidImage(format!(
                "hotspot ({}, {}) outside {}x{} image",
                hotspot.0, hotspot.1, width, height
            )));
        }

        Ok(Self { rgba, width, height, hotspot })
    }

    /// Decodes an encoded image (PNG) into a cursor.
    pub fn decode(bytes: &[u8], hotspot: (u16, u16)) -> Result<Self, CursorError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();

        let width = u16::try_from(width)
            .map_err(|_| CursorError::InvalidImage(format!("width {} too large", width)))?;
        let height = u16::try_from(height)
            .map_err(|_| CursorError::InvalidImage(format!("height {} too large", height)))?;

        Self::from_rgba(decoded.into_raw(), width, height, hotspot)
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn hotspot(&self) -> (u16, u16) {
        self.hotspot
    }
}

//=== CursorShape =========================================================

/// What the OS should display for a cursor kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorShape {
    System(SystemCursor),
    Image(Arc<CursorImage>),
}

//=== CursorError =========================================================

#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    /// The resource could not be read.
    #[error("cursor resource unavailable: {0}")]
    Missing(#[from] std::io::Error),

    /// The resource was read but is not a usable image.
    #[error("cursor image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("invalid cursor image: {0}")]
    InvalidImage(String),
}

//=== CursorRegistry ======================================================

#[derive(Debug)]
pub struct CursorRegistry {
    shapes: Vec<CursorShape>,
    active: CursorKind,
    changed: bool,
}

impl CursorRegistry {
    /// Creates a registry with every kind on its system fallback and the
    /// default cursor active (and pending, so the OS gets it once).
    pub fn new() -> Self {
        Self {
            shapes: CursorKind::ALL
                .iter()
                .map(|kind| CursorShape::System(kind.system_fallback()))
                .collect(),
            active: CursorKind::DEFAULT,
            changed: true,
        }
    }

    //--- Loading ----------------------------------------------------------

    /// Installs an image for `kind`.
    ///
    /// On failure the slot is reset to its system fallback and the error
    /// is returned; nothing else changes.
    pub fn load(
        &mut self,
        kind: CursorKind,
        image: Result<CursorImage, CursorError>,
    ) -> Result<(), CursorError> {
        let result = match image {
            Ok(image) => {
                self.shapes[kind.index()] = CursorShape::Image(Arc::new(image));
                debug!(target: "surface", "Loaded cursor image for {:?}", kind);
                Ok(())
            }
            Err(err) => {
                warn!(target: "surface", "Cursor {:?} falls back to system cursor: {}", kind, err);
                self.shapes[kind.index()] = CursorShape::System(kind.system_fallback());
                Err(err)
            }
        };

        if kind == self.active {
            self.changed = true;
        }
        result
    }

    /// Decodes `bytes` and installs the result for `kind`.
    pub fn load_image(
        &mut self,
        kind: CursorKind,
        bytes: &[u8],
        hotspot: (u16, u16),
    ) -> Result<(), CursorError> {
        self.load(kind, CursorImage::decode(bytes, hotspot))
    }

    /// Reads and decodes an image file for `kind`.
    pub fn load_file(
        &mut self,
        kind: CursorKind,
        path: impl AsRef<Path>,
        hotspot: (u16, u16),
    ) -> Result<(), CursorError> {
        let image = std::fs::read(path.as_ref())
            .map_err(CursorError::from)
            .and_then(|bytes| CursorImage::decode(&bytes, hotspot));
        self.load(kind, image)
    }

    /// Drops a loaded image for `kind` (e.g. the OS rejected it).
    pub fn reset(&mut self, kind: CursorKind) {
        self.shapes[kind.index()] = CursorShape::System(kind.system_fallback());
        if kind == self.active {
            self.changed = true;
        }
    }

    //--- Selection --------------------------------------------------------

    /// Activates the cursor at `index`.
    ///
    /// Returns `false` (and keeps the current cursor) when `index` is out
    /// of range.
    pub fn set(&mut self, index: usize) -> bool {
        match CursorKind::from_index(index) {
            Some(kind) => {
                self.set_kind(kind);
                true
            }
            None => {
                debug!(target: "surface", "Ignoring out-of-range cursor index {}", index);
                false
            }
        }
    }

    /// Activates `kind`.
    pub fn set_kind(&mut self, kind: CursorKind) {
        if self.active != kind {
            self.active = kind;
            self.changed = true;
        }
    }

    pub fn active(&self) -> CursorKind {
        self.active
    }

    pub fn shape(&self, kind: CursorKind) -> &CursorShape {
        &self.shapes[kind.index()]
    }

    pub fn active_shape(&self) -> &CursorShape {
        self.shape(self.active)
    }

    /// Returns the active cursor if it changed since the last call.
    pub fn take_change(&mut self) -> Option<CursorKind> {
        std::mem::take(&mut self.changed).then_some(self.active)
    }
}

impl Default for CursorRegistry {
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

    fn checker(width: u16, height: u16) -> Vec<u8> {
        vec![0xFF; usize::from(width) * usize::from(height) * 4]
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    //=====================================================================
    // Selection Tests
    //=====================================================================

    #[test]
    fn starts_on_default_cursor() {
        let registry = CursorRegistry::new();
        assert_eq!(registry.active(), CursorKind::DEFAULT);
    }

    #[test]
    fn every_valid_index_becomes_active() {
        let mut registry = CursorRegistry::new();
        for index in 0..CursorKind::COUNT {
            assert!(registry.set(index));
            assert_eq!(registry.active().index(), index);
        }
    }

    #[test]
    fn out_of_range_index_keeps_active_cursor() {
        let mut registry = CursorRegistry::new();
        registry.set_kind(CursorKind::Attack);

        for index in [CursorKind::COUNT, CursorKind::COUNT + 1, usize::MAX] {
            assert!(!registry.set(index));
            assert_eq!(registry.active(), CursorKind::Attack);
        }
    }

    #[test]
    fn index_round_trips_through_kind() {
        for kind in CursorKind::ALL {
            assert_eq!(CursorKind::from_index(kind.index()), Some(kind));
        }
    }

    #[test]
    fn take_change_reports_once() {
        let mut registry = CursorRegistry::new();
        assert_eq!(registry.take_change(), Some(CursorKind::Arrow), "initial cursor pending");
        assert_eq!(registry.take_change(), None);

        registry.set_kind(CursorKind::Move);
        assert_eq!(registry.take_change(), Some(CursorKind::Move));
        assert_eq!(registry.take_change(), None);

        registry.set_kind(CursorKind::Move);
        assert_eq!(registry.take_change(), None, "re-selecting the same cursor is not a change");
    }

    //=====================================================================
    // Loading Tests
    //=====================================================================

    #[test]
    fn load_valid_rgba_installs_image() {
        let mut registry = CursorRegistry::new();
        let image = CursorImage::from_rgba(checker(4, 4), 4, 4, (1, 1));

        registry.load(CursorKind::Build, image).unwrap();

        match registry.shape(CursorKind::Build) {
            CursorShape::Image(img) => assert_eq!(img.hotspot(), (1, 1)),
            other => panic!("Expected image shape, got {:?}", other),
        }
    }

    #[test]
    fn decode_png_cursor() {
        let image = CursorImage::decode(&png_bytes(8, 6), (0, 5)).unwrap();
        assert_eq!((image.width(), image.height()), (8, 6));
        assert_eq!(image.rgba().len(), 8 * 6 * 4);
        assert_eq!(&image.rgba()[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn missing_file_falls_back_without_panicking() {
        let mut registry = CursorRegistry::new();
        let image = CursorImage::from_rgba(checker(2, 2), 2, 2, (0, 0));
        registry.load(CursorKind::Fix, image).unwrap();

        let result = registry.load_file(CursorKind::Fix, "/nonexistent/cursor/fix.png", (0, 0));

        assert!(matches!(result, Err(CursorError::Missing(_))));
        assert_eq!(
            registry.shape(CursorKind::Fix),
            &CursorShape::System(CursorKind::Fix.system_fallback())
        );
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let mut registry = CursorRegistry::new();
        let result = registry.load_image(CursorKind::Guard, b"definitely not a png", (0, 0));
        assert!(matches!(result, Err(CursorError::Decode(_))));
    }

    #[test]
    fn rgba_validation() {
        assert!(CursorImage::from_rgba(vec![], 0, 4, (0, 0)).is_err());
        assert!(CursorImage::from_rgba(checker(2, 2), 3, 3, (0, 0)).is_err());
        assert!(CursorImage::from_rgba(checker(2, 2), 2, 2, (2, 0)).is_err());
    }

    #[test]
    fn failed_load_of_active_cursor_marks_change() {
        let mut registry = CursorRegistry::new();
        registry.take_change();

        let _ = registry.load(CursorKind::Arrow, Err(CursorError::InvalidImage("bad".into())));

        assert_eq!(registry.take_change(), Some(CursorKind::Arrow));
        assert_eq!(registry.active(), CursorKind::Arrow);
    }
}
