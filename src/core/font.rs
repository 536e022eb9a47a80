//=========================================================================
// Font Configuration
//=========================================================================
//
// Active font family and size for the text-rendering collaborator.
//
// Exactly one `FontKind` is active. Each kind remembers its own size, so
// switching Bold → Small → Bold restores the bold size. Changes apply to
// text drawn after the change; nothing already drawn is touched.
//
//=========================================================================

use log::trace;

//=== FontKind ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKind {
    Small,
    Regular,
    Bold,
}

impl FontKind {
    fn slot(self) -> usize {
        match self {
            FontKind::Small => 0,
            FontKind::Regular => 1,
            FontKind::Bold => 2,
        }
    }

    /// Point size a kind starts with.
    pub fn default_size(self) -> f32 {
        match self {
            FontKind::Small => 9.0,
            FontKind::Regular | FontKind::Bold => 12.0,
        }
    }
}

//=== FontSelection =======================================================

/// Snapshot of the active font, read by the text renderer per draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSelection {
    pub kind: FontKind,
    pub size: f32,
}

//=== FontError ===========================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FontError {
    #[error("font size must be a positive finite number, got {0}")]
    InvalidSize(f32),
}

//=== FontConfiguration ===================================================

#[derive(Debug, Clone)]
pub struct FontConfiguration {
    active: FontKind,
    sizes: [f32; 3],
}

impl FontConfiguration {
    /// Regular font at its default size.
    pub fn new() -> Self {
        Self {
            active: FontKind::Regular,
            sizes: [
                FontKind::Small.default_size(),
                FontKind::Regular.default_size(),
                FontKind::Bold.default_size(),
            ],
        }
    }

    pub fn set_font_type(&mut self, kind: FontKind) {
        trace!(target: "surface", "Font type {:?} -> {:?}", self.active, kind);
        self.active = kind;
    }

    /// Sets the size of the active kind.
    ///
    /// # Errors
    ///
    /// [`FontError::InvalidSize`] for zero, negative, NaN or infinite
    /// sizes; the previous size is kept.
    pub fn set_font_size(&mut self, size: f32) -> Result<(), FontError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(FontError::InvalidSize(size));
        }
        self.sizes[self.active.slot()] = size;
        Ok(())
    }

    pub fn current(&self) -> FontSelection {
        FontSelection {
            kind: self.active,
            size: self.sizes[self.active.slot()],
        }
    }

    pub fn size_of(&self, kind: FontKind) -> f32 {
        self.sizes[kind.slot()]
    }
}

impl Default for FontConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
