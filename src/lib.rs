//=========================================================================
// Aetheric Platform - Library Root
//
// Platform layer of the Aetheric engine: one GL window, translated
// input, a fixed-rate frame tick and threading primitives.
//
// Responsibilities:
// - Expose the host facade (`HostBuilder` / `Host`)
// - Keep the windowing integration (`platform`) hidden from users
// - Separate engine-facing types (`core`) from OS/GL plumbing
//
// Typical usage:
// ```no_run
// use aetheric_platform::prelude::*;
//
// struct Game;
//
// impl FrameHandler for Game {
//     fn tick(&mut self, _frame: &mut Frame<'_>) {}
// }
//
// fn main() -> Result<(), HostError> {
//     let (host, _input) = HostBuilder::new().build()?;
//     host.run(&mut Game)
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine-facing types: surface, input events, cursors,
// fonts, timers and sync primitives. None of it depends on Winit.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit event loop and glutin GL context and is
// kept private, as it is not part of the public API surface.
//
// `engine` defines the host entry point and its configuration.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------
pub use crate::core::platform_bridge::{HostError, InputReceiver};
pub use crate::core::surface::{Frame, FrameHandler, SurfaceControls};
pub use engine::{Host, HostBuilder, HostConfig};
