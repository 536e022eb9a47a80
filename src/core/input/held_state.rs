//=========================================================================
// Held Inputs
//=========================================================================
//
// Tracks which keys and mouse buttons are currently held, so releases can
// be validated and synthesized.
//
// Architecture:
//   press_key/press_button → BTreeSet (held) → release_*/release_all
//
// Ordered sets keep synthesized releases deterministic.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeSet;

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, MouseButton};

//=== HeldInputs ==========================================================

#[derive(Debug, Default, Clone)]
pub struct HeldInputs {
    keys: BTreeSet<KeyCode>,
    buttons: BTreeSet<MouseButton>,
}

impl HeldInputs {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Transitions ------------------------------------------------------

    /// Marks `key` held. Returns `true` on the UP → DOWN transition.
    pub fn press_key(&mut self, key: KeyCode) -> bool {
        self.keys.insert(key)
    }

    /// Marks `key` released. Returns `false` if it was not held.
    pub fn release_key(&mut self, key: KeyCode) -> bool {
        self.keys.remove(&key)
    }

    /// Marks `button` held. Returns `true` on the UP → DOWN transition.
    pub fn press_button(&mut self, button: MouseButton) -> bool {
        self.buttons.insert(button)
    }

    /// Marks `button` released. Returns `false` if it was not held.
    pub fn release_button(&mut self, button: MouseButton) -> bool {
        self.buttons.remove(&button)
    }

    /// Clears everything, returning what was held (in a stable order).
    pub fn release_all(&mut self) -> (Vec<KeyCode>, Vec<MouseButton>) {
        let keys = std::mem::take(&mut self.keys).into_iter().collect();
        let buttons = std::mem::take(&mut self.buttons).into_iter().collect();
        (keys, buttons)
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys.iter()
    }

    pub fn buttons_down(&self) -> impl Iterator<Item = &MouseButton> {
        self.buttons.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.buttons.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
