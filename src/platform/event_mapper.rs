//=========================================================================
// Platform Event Mapper
//
// Converts Winit window events into `HostEvent`s, the backend-neutral
// notifications the input translator dispatches on.
//
// Responsibilities:
// - Translate keyboard, mouse, wheel, IME and focus events
// - Map Winit key/button/modifier enumerations to engine types
// - Ignore events that carry no input (resize, redraw, etc.)
// - Provide fallbacks (`Unidentified`, `Other`) for unmapped inputs
//
// Splitting the mapping from the translation keeps the translator free of
// Winit types, so its contract can be driven with synthetic events.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{
    ElementState, Ime, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent,
};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::event::{KeyCode, Modifiers, MouseButton};

/// Pixel scroll distance treated as one wheel line.
const PIXELS_PER_LINE: f32 = 20.0;

//=== HostEvent ===========================================================

/// One input-relevant OS notification, already in engine vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostEvent {
    CursorMoved { x: f32, y: f32 },
    MouseButton { button: MouseButton, pressed: bool },
    Wheel { dx: f32, dy: f32 },
    Key {
        key: KeyCode,
        pressed: bool,
        repeat: bool,
        text: Option<String>,
    },
    ModifiersChanged(Modifiers),
    ImeCommit(String),
    Focus(bool),
}

/// Discriminant of a [`HostEvent`], used to index the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostEventKind {
    CursorMoved,
    MouseButton,
    Wheel,
    Key,
    ModifiersChanged,
    ImeCommit,
    Focus,
}

impl HostEventKind {
    pub(crate) const COUNT: usize = 7;
}

impl HostEvent {
    pub(crate) fn kind(&self) -> HostEventKind {
        match self {
            Self::CursorMoved { .. } => HostEventKind::CursorMoved,
            Self::MouseButton { .. } => HostEventKind::MouseButton,
            Self::Wheel { .. } => HostEventKind::Wheel,
            Self::Key { .. } => HostEventKind::Key,
            Self::ModifiersChanged(_) => HostEventKind::ModifiersChanged,
            Self::ImeCommit(_) => HostEventKind::ImeCommit,
            Self::Focus(_) => HostEventKind::Focus,
        }
    }

    /// Maps a Winit window event. `None` for events without input content.
    ///
    /// Synthetic key events (Winit's own focus bookkeeping on X11/Windows)
    /// are skipped; the translator synthesizes releases itself.
    pub(crate) fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            //--- Keyboard Input ------------------------------------------
            WindowEvent::KeyboardInput { event, is_synthetic: false, .. } => {
                Some(Self::from_key_event(event))
            }

            //--- Mouse Input ---------------------------------------------
            WindowEvent::CursorMoved { position, .. } => Some(Self::CursorMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),

            WindowEvent::MouseInput { state, button, .. } => Some(Self::MouseButton {
                button: MouseButton::from(*button),
                pressed: *state == ElementState::Pressed,
            }),

            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match *delta {
                    MouseScrollDelta::LineDelta(dx, dy) => (dx, dy),
                    MouseScrollDelta::PixelDelta(pos) => {
                        (pos.x as f32 / PIXELS_PER_LINE, pos.y as f32 / PIXELS_PER_LINE)
                    }
                };
                Some(Self::Wheel { dx, dy })
            }

            //--- Modifiers, Text & Focus ---------------------------------
            WindowEvent::ModifiersChanged(mods) => {
                Some(Self::ModifiersChanged(Modifiers::from(mods.state())))
            }

            WindowEvent::Ime(Ime::Commit(text)) => Some(Self::ImeCommit(text.clone())),

            WindowEvent::Focused(focused) => Some(Self::Focus(*focused)),

            //--- Non-input Events ----------------------------------------
            _ => None,
        }
    }

    fn from_key_event(event: &KeyEvent) -> Self {
        let key = match event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
        };

        Self::Key {
            key,
            pressed: event.state == ElementState::Pressed,
            repeat: event.repeat,
            text: event.text.as_ref().map(|t| t.as_str().to_owned()),
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit ModifiersState to engine Modifiers.
///
/// Left/right variants are merged; Super becomes META.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut mods = Modifiers::NONE;
        mods.set(Modifiers::SHIFT, state.shift_key());
        mods.set(Modifiers::CTRL, state.control_key());
        mods.set(Modifiers::ALT, state.alt_key());
        mods.set(Modifiers::META, state.super_key());
        mods
    }
}

/// Converts Winit mouse buttons to stable engine buttons.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Middle => MouseButton::Middle,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Back => MouseButton::Back,
            WinitMouseButton::Forward => MouseButton::Forward,
            WinitMouseButton::Other(_) => MouseButton::Other,
        }
    }
}

/// Converts Winit physical key codes to engine key codes.
///
/// Keys outside the engine set (F13-F24, media keys, IME keys) map to
/// `KeyCode::Unidentified` and are filtered by the translator.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Function Keys ------------------------------------------------
            F1 => KeyCode::F1, F2 => KeyCode::F2, F3 => KeyCode::F3,
            F4 => KeyCode::F4, F5 => KeyCode::F5, F6 => KeyCode::F6,
            F7 => KeyCode::F7, F8 => KeyCode::F8, F9 => KeyCode::F9,
            F10 => KeyCode::F10, F11 => KeyCode::F11, F12 => KeyCode::F12,

            //--- Arrows & Navigation ------------------------------------------
            ArrowUp => KeyCode::ArrowUp, ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft, ArrowRight => KeyCode::ArrowRight,
            Home => KeyCode::Home, End => KeyCode::End,
            PageUp => KeyCode::PageUp, PageDown => KeyCode::PageDown,
            Insert => KeyCode::Insert, Delete => KeyCode::Delete,

            //--- Editing & Control --------------------------------------------
            Space => KeyCode::Space, Enter => KeyCode::Enter,
            Escape => KeyCode::Escape, Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace, CapsLock => KeyCode::CapsLock,
            NumLock => KeyCode::NumLock, ScrollLock => KeyCode::ScrollLock,
            PrintScreen => KeyCode::PrintScreen, Pause => KeyCode::Pause,

            //--- Modifier Keys ------------------------------------------------
            ShiftLeft => KeyCode::ShiftLeft, ShiftRight => KeyCode::ShiftRight,
            ControlLeft => KeyCode::ControlLeft, ControlRight => KeyCode::ControlRight,
            AltLeft => KeyCode::AltLeft, AltRight => KeyCode::AltRight,
            SuperLeft => KeyCode::SuperLeft, SuperRight => KeyCode::SuperRight,

            //--- Keypad -------------------------------------------------------
            Numpad0 => KeyCode::Numpad0, Numpad1 => KeyCode::Numpad1,
            Numpad2 => KeyCode::Numpad2, Numpad3 => KeyCode::Numpad3,
            Numpad4 => KeyCode::Numpad4, Numpad5 => KeyCode::Numpad5,
            Numpad6 => KeyCode::Numpad6, Numpad7 => KeyCode::Numpad7,
            Numpad8 => KeyCode::Numpad8, Numpad9 => KeyCode::Numpad9,
            NumpadAdd => KeyCode::NumpadAdd, NumpadSubtract => KeyCode::NumpadSubtract,
            NumpadMultiply => KeyCode::NumpadMultiply, NumpadDivide => KeyCode::NumpadDivide,
            NumpadDecimal => KeyCode::NumpadDecimal, NumpadEnter => KeyCode::NumpadEnter,

            //--- Punctuation --------------------------------------------------
            Minus => KeyCode::Minus, Equal => KeyCode::Equal,
            BracketLeft => KeyCode::BracketLeft, BracketRight => KeyCode::BracketRight,
            Backslash => KeyCode::Backslash, Semicolon => KeyCode::Semicolon,
            Quote => KeyCode::Quote, Backquote => KeyCode::Backquote,
            Comma => KeyCode::Comma, Period => KeyCode::Period, Slash => KeyCode::Slash,

            //--- Fallback -----------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, TouchPhase};

    fn device() -> DeviceId {
        // SAFETY: only compared against other dummy ids, never passed to the OS.
        unsafe { DeviceId::dummy() }
    }

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool, super_key: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        if super_key { state.insert(ModifiersState::SUPER); }
        state
    }

    //=====================================================================
    // Conversion Tests
    //=====================================================================

    #[test]
    fn modifiers_convert_all_flags() {
        assert_eq!(Modifiers::from(make_modifiers(false, false, false, false)), Modifiers::NONE);
        assert_eq!(
            Modifiers::from(make_modifiers(true, false, true, false)),
            Modifiers::SHIFT | Modifiers::ALT
        );
        assert_eq!(
            Modifiers::from(make_modifiers(false, true, false, true)),
            Modifiers::CTRL | Modifiers::META
        );
    }

    #[test]
    fn mouse_buttons_map_to_stable_indices() {
        assert_eq!(MouseButton::from(WinitMouseButton::Left).index(), 0);
        assert_eq!(MouseButton::from(WinitMouseButton::Middle).index(), 1);
        assert_eq!(MouseButton::from(WinitMouseButton::Right).index(), 2);
        assert_eq!(MouseButton::from(WinitMouseButton::Back).index(), 3);
        assert_eq!(MouseButton::from(WinitMouseButton::Forward).index(), 4);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(17)).index(), 5);
        assert_eq!(MouseButton::from(WinitMouseButton::Other(3)), MouseButton::Other);
    }

    #[test]
    fn keys_map_across_groups() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyW), KeyCode::KeyW);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
        assert_eq!(KeyCode::from(WinitKeyCode::F12), KeyCode::F12);
        assert_eq!(KeyCode::from(WinitKeyCode::PageDown), KeyCode::PageDown);
        assert_eq!(KeyCode::from(WinitKeyCode::ControlRight), KeyCode::ControlRight);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::NumpadEnter);
        assert_eq!(KeyCode::from(WinitKeyCode::Backquote), KeyCode::Backquote);
    }

    #[test]
    fn unmapped_keys_become_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::MediaPlayPause), KeyCode::Unidentified);
    }

    //=====================================================================
    // Window Event Mapping Tests
    //=====================================================================

    #[test]
    fn cursor_moved_maps_to_position() {
        let event = WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(12.5, 40.0),
        };
        assert_eq!(
            HostEvent::from_window_event(&event),
            Some(HostEvent::CursorMoved { x: 12.5, y: 40.0 })
        );
    }

    #[test]
    fn mouse_input_maps_button_and_state() {
        let event = WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Released,
            button: WinitMouseButton::Back,
        };
        assert_eq!(
            HostEvent::from_window_event(&event),
            Some(HostEvent::MouseButton { button: MouseButton::Back, pressed: false })
        );
    }

    #[test]
    fn line_wheel_passes_through() {
        let event = WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::LineDelta(0.0, -2.0),
            phase: TouchPhase::Moved,
        };
        let expected = HostEvent::Wheel { dx: 0.0, dy: -2.0 };
        assert_eq!(HostEvent::from_window_event(&event), Some(expected));
    }

    #[test]
    fn pixel_wheel_is_converted_to_lines() {
        let event = WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(40.0, 60.0)),
            phase: TouchPhase::Moved,
        };
        let expected = HostEvent::Wheel { dx: 2.0, dy: 3.0 };
        assert_eq!(HostEvent::from_window_event(&event), Some(expected));
    }

    #[test]
    fn focus_and_ime_map() {
        assert_eq!(
            HostEvent::from_window_event(&WindowEvent::Focused(false)),
            Some(HostEvent::Focus(false))
        );
        assert_eq!(
            HostEvent::from_window_event(&WindowEvent::Ime(Ime::Commit("日本".into()))),
            Some(HostEvent::ImeCommit("日本".into()))
        );
        assert_eq!(HostEvent::from_window_event(&WindowEvent::Ime(Ime::Enabled)), None);
    }

    #[test]
    fn non_input_events_are_ignored() {
        assert_eq!(HostEvent::from_window_event(&WindowEvent::RedrawRequested), None);
        assert_eq!(HostEvent::from_window_event(&WindowEvent::CloseRequested), None);
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(HostEvent::Focus(true).kind(), HostEventKind::Focus);
        assert_eq!(HostEvent::Wheel { dx: 0.0, dy: 1.0 }.kind(), HostEventKind::Wheel);
        assert_eq!(HostEvent::ImeCommit(String::new()).kind(), HostEventKind::ImeCommit);
    }
}
