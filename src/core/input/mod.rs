//=========================================================================
// Input
//
// Engine-neutral input types shared by the platform translator and the
// engine's frame handler.
//
// Components:
// - `event`: translated event tuples (keys, buttons, modifiers)
// - `held_state`: keys/buttons currently held, used to keep releases
//   balanced and to clear state on focus loss
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod held_state;

//=== Public API ==========================================================

pub use event::{InputEvent, InputKind, KeyCode, Modifiers, MouseButton};
pub use held_state::HeldInputs;
