//=========================================================================
// Input Event Types
//
// Engine-neutral representation of translated input.
//
// This module abstracts away platform-specific input (e.g. Winit) into
// a stable format consumed by the engine's input queue.
//
// Responsibilities:
// - Represent keys, mouse buttons and modifier state portably
// - Give mouse buttons a stable engine index (never raw OS values)
// - Carry repeat information on key presses instead of collapsing it
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputTranslator (platform::input_processor)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputQueue → engine frame handler
// ```
//
// Unlike a state snapshot, events are never coalesced or deduplicated:
// the queue preserves exactly the order the OS delivered them in.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

//=== MouseButton =========================================================

/// Physical mouse button, mapped from the platform's enumeration.
///
/// [`index`](Self::index) is the stable engine button index:
///
/// | Button  | Index |
/// |---------|-------|
/// | Left    | 0     |
/// | Middle  | 1     |
/// | Right   | 2     |
/// | Back    | 3     |
/// | Forward | 4     |
/// | Other   | 5     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Middle button (wheel click).
    Middle,

    /// Secondary button (typically right).
    Right,

    /// Side button, "back" by convention.
    Back,

    /// Side button, "forward" by convention.
    Forward,

    /// Any other button (macro buttons, exotic mice).
    Other,
}

impl MouseButton {
    /// Stable engine index for this button.
    pub fn index(self) -> u8 {
        self as u8
    }
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced;
/// characters arrive separately as [`InputEvent::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Arrow & Navigation Keys ------------------------------------------

    ArrowDown, ArrowLeft, ArrowRight, ArrowUp,
    Home, End, PageUp, PageDown, Insert, Delete,

    //--- Editing & Control Keys -------------------------------------------

    Space, Enter, Escape, Tab, Backspace,
    CapsLock, NumLock, ScrollLock, PrintScreen, Pause,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    SuperLeft, SuperRight,

    //--- Keypad -----------------------------------------------------------

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter,

    //--- Punctuation ------------------------------------------------------

    Minus, Equal, BracketLeft, BracketRight, Backslash,
    Semicolon, Quote, Backquote, Comma, Period, Slash,

    /// Fallback for keys the translator does not map.
    ///
    /// Never forwarded to the input queue.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state as a bitset (Shift, Ctrl, Alt, Meta).
///
/// The system does not distinguish between left/right variants.
/// Meta is the Windows/Command/Super key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CTRL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const META: Self = Self(1 << 3);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }

    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    pub fn meta(self) -> bool {
        self.contains(Self::META)
    }

    /// Sets or clears `flag`.
    pub fn set(&mut self, flag: Self, on: bool) {
        if on {
            self.0 |= flag.0;
        } else {
            self.0 &= !flag.0;
        }
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Modifiers(NONE)");
        }

        let names: Vec<&str> = [
            (Self::SHIFT, "SHIFT"),
            (Self::CTRL, "CTRL"),
            (Self::ALT, "ALT"),
            (Self::META, "META"),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| *name)
        .collect();

        write!(f, "Modifiers({})", names.join(" | "))
    }
}

//=== InputKind ===========================================================

/// Discriminant of an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Move,
    Press,
    Release,
    Wheel,
    KeyDown,
    KeyUp,
    Text,
}

//=== InputEvent ==========================================================

/// One translated input notification.
///
/// Every variant carries the modifier state at the time of the event.
/// Positions are window-relative physical pixels, top-left origin.
///
/// # Event Types
///
/// - **MouseMoved**: absolute cursor position
/// - **MouseButtonDown/Up**: engine button + cursor position at the time
/// - **MouseWheel**: scroll delta in lines (positive y = away from user)
/// - **KeyDown**: engine key code; `repeat` marks OS auto-repeat
/// - **KeyUp**: engine key code
/// - **Text**: committed characters (typing or input-method composition)
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseMoved {
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    MouseWheel {
        dx: f32,
        dy: f32,
        modifiers: Modifiers,
    },

    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
        repeat: bool,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    Text {
        text: String,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            Self::MouseMoved { .. } => InputKind::Move,
            Self::MouseButtonDown { .. } => InputKind::Press,
            Self::MouseButtonUp { .. } => InputKind::Release,
            Self::MouseWheel { .. } => InputKind::Wheel,
            Self::KeyDown { .. } => InputKind::KeyDown,
            Self::KeyUp { .. } => InputKind::KeyUp,
            Self::Text { .. } => InputKind::Text,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::MouseMoved { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. }
            | Self::MouseWheel { modifiers, .. }
            | Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::Text { modifiers, .. } => *modifiers,
        }
    }

    /// Key code for key events, `None` otherwise.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown { key, .. } | Self::KeyUp { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Button for press/release events, `None` otherwise.
    pub fn button(&self) -> Option<MouseButton> {
        match self {
            Self::MouseButtonDown { button, .. } | Self::MouseButtonUp { button, .. } => {
                Some(*button)
            }
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // MouseButton Tests
    //=====================================================================

    #[test]
    fn mouse_button_indices_are_stable() {
        let expected = [
            (MouseButton::Left, 0),
            (MouseButton::Middle, 1),
            (MouseButton::Right, 2),
            (MouseButton::Back, 3),
            (MouseButton::Forward, 4),
            (MouseButton::Other, 5),
        ];
        for (button, index) in expected {
            assert_eq!(button.index(), index, "{:?}", button);
        }
    }

    //=====================================================================
    // Modifiers Tests
    //=====================================================================

    #[test]
    fn modifiers_none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn modifiers_combine_with_bitor() {
        let mods = Modifiers::SHIFT | Modifiers::CTRL;
        assert!(mods.shift() && mods.ctrl());
        assert!(!mods.alt() && !mods.meta());
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::SHIFT | Modifiers::ALT));
    }

    #[test]
    fn modifiers_set_and_clear() {
        let mut mods = Modifiers::NONE;
        mods.set(Modifiers::ALT, true);
        mods |= Modifiers::META;
        assert_eq!(mods, Modifiers::ALT | Modifiers::META);

        mods.set(Modifiers::ALT, false);
        assert_eq!(mods, Modifiers::META);
    }

    #[test]
    fn modifiers_from_bits_masks_unknown() {
        assert_eq!(Modifiers::from_bits(0xFF).bits(), 0b1111);
    }

    #[test]
    fn modifiers_debug_lists_flags() {
        let text = format!("{:?}", Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(text, "Modifiers(SHIFT | CTRL)");
        assert_eq!(format!("{:?}", Modifiers::NONE), "Modifiers(NONE)");
    }

    //=====================================================================
    // InputEvent Tests
    //=====================================================================

    #[test]
    fn kind_matches_variant() {
        let modifiers = Modifiers::NONE;
        let (button, key) = (MouseButton::Left, KeyCode::KeyA);
        let events = [
            (InputEvent::MouseMoved { x: 1.0, y: 2.0, modifiers }, InputKind::Move),
            (InputEvent::MouseButtonDown { button, x: 0.0, y: 0.0, modifiers }, InputKind::Press),
            (InputEvent::MouseButtonUp { button, x: 0.0, y: 0.0, modifiers }, InputKind::Release),
            (InputEvent::MouseWheel { dx: 0.0, dy: 1.0, modifiers }, InputKind::Wheel),
            (InputEvent::KeyDown { key, modifiers, repeat: false }, InputKind::KeyDown),
            (InputEvent::KeyUp { key, modifiers }, InputKind::KeyUp),
            (InputEvent::Text { text: "a".into(), modifiers }, InputKind::Text),
        ];

        for (event, kind) in events {
            assert_eq!(event.kind(), kind);
        }
    }

    #[test]
    fn accessors_expose_payload() {
        let down =
            InputEvent::KeyDown { key: KeyCode::F5, modifiers: Modifiers::CTRL, repeat: true };
        assert_eq!(down.key(), Some(KeyCode::F5));
        assert_eq!(down.button(), None);
        assert_eq!(down.modifiers(), Modifiers::CTRL);

        let press = InputEvent::MouseButtonDown {
            button: MouseButton::Right,
            x: 3.0,
            y: 4.0,
            modifiers: Modifiers::ALT,
        };
        assert_eq!(press.button(), Some(MouseButton::Right));
        assert_eq!(press.key(), None);
    }

    #[test]
    fn repeat_is_part_of_identity() {
        let (key, modifiers) = (KeyCode::Space, Modifiers::NONE);
        let first = InputEvent::KeyDown { key, modifiers, repeat: false };
        let repeat = InputEvent::KeyDown { key, modifiers, repeat: true };
        assert_ne!(first, repeat);
    }
}
