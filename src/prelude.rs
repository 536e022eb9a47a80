//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_platform::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Host
pub use crate::engine::{Host, HostBuilder, HostConfig};
pub use crate::core::platform_bridge::{HostError, InputReceiver};

// Frame loop
pub use crate::core::surface::{Frame, FrameHandler, StartupError, SurfaceControls};

// Input
pub use crate::core::input::{InputEvent, InputKind, KeyCode, Modifiers, MouseButton};

// Cursors and fonts
pub use crate::core::cursor::{CursorKind, CursorRegistry};
pub use crate::core::font::{FontKind, FontSelection};

// Background work
pub use crate::core::sync::{spawn, spawn_named, Mutex, Semaphore, ThreadHandle};
