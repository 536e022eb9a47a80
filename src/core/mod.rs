//=========================================================================
// Core
//
// Platform-independent engine types: nothing in here names Winit or
// glutin.
//
// Components:
// - `surface`: render surface lifecycle, frame handler seam
// - `input`: translated input events and held-input tracking
// - `cursor`, `font`: cursor registry and font selection state
// - `timer`: tick clock and fixed-rate frame timer
// - `sync`: threads, mutex, semaphore for background work
// - `platform_bridge`: host errors and the platform → engine input queue
//
//=========================================================================

//=== Module Declarations =================================================

pub mod cursor;
pub mod font;
pub mod input;
pub mod platform_bridge;
pub mod surface;
pub mod sync;
pub mod timer;
