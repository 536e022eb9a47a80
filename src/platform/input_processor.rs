//=========================================================================
// Input Processor
//=========================================================================
//
// The input translator: turns `HostEvent`s into engine `InputEvent`s.
//
// Architecture:
//   WindowEvent → HostEvent (event_mapper) → DISPATCH[kind] → InputBuffer
//
// Stateful tracking:
// - Modifier state from ModifiersChanged, applied to every later event
// - Last cursor position, reported with button presses/releases
// - Held keys/buttons, so releases never outnumber presses and focus
//   loss can release everything still down
//
// Unmapped keys (F13-F24, exotic keyboards) are filtered, though any text
// they produce is still forwarded.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::event_mapper::{HostEvent, HostEventKind};
use super::input_buffer::InputBuffer;
use crate::core::input::event::{InputEvent, KeyCode, Modifiers};
use crate::core::input::HeldInputs;
use crate::core::platform_bridge::InputSender;

//=== Dispatch Table ======================================================

type Handler = fn(&mut InputProcessor, HostEvent);

/// Handler per event kind, in `HostEventKind` declaration order.
const DISPATCH: [(HostEventKind, Handler); HostEventKind::COUNT] = [
    (HostEventKind::CursorMoved, InputProcessor::on_cursor_moved),
    (HostEventKind::MouseButton, InputProcessor::on_mouse_button),
    (HostEventKind::Wheel, InputProcessor::on_wheel),
    (HostEventKind::Key, InputProcessor::on_key),
    (HostEventKind::ModifiersChanged, InputProcessor::on_modifiers_changed),
    (HostEventKind::ImeCommit, InputProcessor::on_ime_commit),
    (HostEventKind::Focus, InputProcessor::on_focus),
];

//=== InputProcessor ======================================================

/// Translates host events to engine InputEvents with stateful tracking.
///
/// Never blocks and never fails; everything it produces is buffered until
/// [`flush`](Self::flush).
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
    cursor: (f32, f32),
    held: HeldInputs,
    buffer: InputBuffer,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
            cursor: (0.0, 0.0),
            held: HeldInputs::new(),
            buffer: InputBuffer::new(),
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Routes `event` to the handler registered for its kind.
    pub(crate) fn handle(&mut self, event: HostEvent) {
        let (kind, handler) = DISPATCH[event.kind() as usize];
        debug_assert_eq!(kind, event.kind(), "dispatch table out of order");
        handler(self, event);
    }

    /// Sends everything translated so far to the engine's input queue.
    pub(crate) fn flush(&mut self, sender: &mut InputSender) {
        if !self.buffer.is_empty() {
            sender.send_all(self.buffer.drain());
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    #[cfg(test)]
    fn held(&self) -> &HeldInputs {
        &self.held
    }

    #[cfg(test)]
    fn take_events(&mut self) -> Vec<InputEvent> {
        self.buffer.drain()
    }

    //--- Handlers ---------------------------------------------------------

    fn on_cursor_moved(&mut self, event: HostEvent) {
        let HostEvent::CursorMoved { x, y } = event else { return };
        self.cursor = (x, y);
        self.buffer.push(InputEvent::MouseMoved { x, y, modifiers: self.current_modifiers });
    }

    fn on_mouse_button(&mut self, event: HostEvent) {
        let HostEvent::MouseButton { button, pressed } = event else { return };
        let (x, y) = self.cursor;
        let modifiers = self.current_modifiers;

        if pressed {
            if self.held.press_button(button) {
                self.buffer.push(InputEvent::MouseButtonDown { button, x, y, modifiers });
            }
        } else if self.held.release_button(button) {
            self.buffer.push(InputEvent::MouseButtonUp { button, x, y, modifiers });
        } else {
            trace!(target: "platform::input", "Release of unheld button {:?} dropped", button);
        }
    }

    fn on_wheel(&mut self, event: HostEvent) {
        let HostEvent::Wheel { dx, dy } = event else { return };
        self.buffer.push(InputEvent::MouseWheel { dx, dy, modifiers: self.current_modifiers });
    }

    fn on_key(&mut self, event: HostEvent) {
        let HostEvent::Key { key, pressed, repeat, text } = event else { return };
        let modifiers = self.current_modifiers;

        if key == KeyCode::Unidentified {
            trace!(target: "platform::input", "Unmapped key ignored");
        } else if pressed {
            // Repeat is decided by held state alone: a press that takes the
            // key from up to down is always the initial press, whatever the
            // OS reports (auto-repeat arriving after focus returns).
            let first = self.held.press_key(key);
            if first && repeat {
                trace!(target: "platform::input", "Repeat for unheld {:?} taken as press", key);
            }
            self.buffer.push(InputEvent::KeyDown { key, modifiers, repeat: !first });
        } else if self.held.release_key(key) {
            self.buffer.push(InputEvent::KeyUp { key, modifiers });
        } else {
            trace!(target: "platform::input", "Release of unheld key {:?} dropped", key);
        }

        if pressed {
            if let Some(text) = text.filter(|t| is_printable(t)) {
                self.buffer.push(InputEvent::Text { text, modifiers });
            }
        }
    }

    fn on_modifiers_changed(&mut self, event: HostEvent) {
        let HostEvent::ModifiersChanged(modifiers) = event else { return };
        trace!(target: "platform::input", "Modifiers changed: {:?}", modifiers);
        self.current_modifiers = modifiers;
    }

    fn on_ime_commit(&mut self, event: HostEvent) {
        let HostEvent::ImeCommit(text) = event else { return };
        if !text.is_empty() {
            self.buffer.push(InputEvent::Text { text, modifiers: self.current_modifiers });
        }
    }

    fn on_focus(&mut self, event: HostEvent) {
        let HostEvent::Focus(focused) = event else { return };
        if focused {
            debug!(target: "platform::input", "Window focused");
            return;
        }
        self.release_all_held();
    }

    //--- Internal Helpers -------------------------------------------------

    /// Synthesizes a release for every held key and button and clears the
    /// modifier state, so nothing stays stuck after focus returns.
    fn release_all_held(&mut self) {
        self.current_modifiers = Modifiers::NONE;
        let (keys, buttons) = self.held.release_all();
        let (x, y) = self.cursor;

        if !keys.is_empty() || !buttons.is_empty() {
            debug!(
                target: "platform::input",
                "Focus lost, releasing {} keys and {} buttons",
                keys.len(),
                buttons.len()
            );
        }

        for key in keys {
            self.buffer.push(InputEvent::KeyUp { key, modifiers: Modifiers::NONE });
        }
        for button in buttons {
            let modifiers = Modifiers::NONE;
            self.buffer.push(InputEvent::MouseButtonUp { button, x, y, modifiers });
        }
    }
}

/// Text worth forwarding: non-empty and not just control characters
/// (Enter, Backspace, Escape and Tab arrive as key events already).
fn is_printable(text: &str) -> bool {
    text.chars().any(|c| !c.is_control())
}

//=========================================================================
// Tests
//=========================================================================
