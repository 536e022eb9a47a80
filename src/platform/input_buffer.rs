//=========================================================================
// Input Buffer
//
// Collects translated input events between flushes to the input queue.
//
// Responsibilities:
// - Store events in exactly the order they were translated
// - Hand the batch over via `drain()` and start empty again
//
// Notes:
// Nothing is deduplicated or coalesced: two identical consecutive
// key-downs are an auto-repeat, and dropping a mouse move would change
// the position a later press is reported at.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::event::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Transient, ordered event store for one flush interval.
//
#[derive(Debug)]
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    //
    // Preallocates for a typical frame to minimize reallocations.
    //
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------
    pub(crate) fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns all collected events in order and clears the buffer.
    //
    pub(crate) fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    //--- Utilities --------------------------------------------------------
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::{KeyCode, Modifiers};

    fn key_down(key: KeyCode, repeat: bool) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE, repeat }
    }

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y, modifiers: Modifiers::NONE }
    }

    #[test]
    fn starts_empty() {
        let buffer = InputBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn identical_events_are_kept() {
        let mut buffer = InputBuffer::new();
        buffer.push(key_down(KeyCode::KeyA, true));
        buffer.push(key_down(KeyCode::KeyA, true));

        assert_eq!(buffer.len(), 2, "auto-repeats must not be collapsed");
    }

    #[test]
    fn drain_preserves_order_and_clears() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_move(1.0, 1.0));
        buffer.push(key_down(KeyCode::KeyB, false));
        buffer.push(mouse_move(2.0, 2.0));

        let events = buffer.drain();

        assert_eq!(
            events,
            vec![mouse_move(1.0, 1.0), key_down(KeyCode::KeyB, false), mouse_move(2.0, 2.0)]
        );
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_empty());
    }
}
