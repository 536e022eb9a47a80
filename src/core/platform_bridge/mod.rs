//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit/glutin) with engine-side code.
//
// Core code depends only on this contract, never on the windowing crates,
// so the platform backend can be swapped without touching it.
//
// Components:
// - `interface`: host error definitions
// - `input_queue`: ordered platform → engine input channel
//
//=========================================================================

//=== Module Declarations =================================================

mod input_queue;
mod interface;

//=== Public API ==========================================================

pub use input_queue::InputReceiver;
pub use interface::HostError;

//=== Internal API ========================================================

pub(crate) use input_queue::{input_queue, InputSender};
