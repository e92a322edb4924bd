//! The various data types representing raw player input.

use super::xy::XY;

/// A key which can be pressed or released in an [`Action`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Key {
    Char(char),
    F(usize),
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
    Insert,
    Tab,
    Enter,
    LeftShift,
    LeftCtrl,
    LeftAlt,
}

/// A mouse button which can be pressed or released in an [`Action`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

/// An action the player has taken in the [`IoSystem`][super::IoSystem].
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Action {
    /// A key was pressed. Modifiers are sent as their own presses, just before the key they modify.
    KeyPress { key: Key },
    /// A key was let go.
    KeyRelease { key: Key },
    /// A mouse button was pressed.
    MousePress { pos: XY, button: MouseButton },
    /// A mouse button was released.
    MouseRelease { pos: XY, button: MouseButton },
    /// The mouse has moved to a new location, possibly while holding a button
    MouseMove { pos: XY },
    /// The render target requested that a redraw happen, maybe without direct user input.
    Redraw,
    /// User requested the program end externally
    Closed,
    /// Some unknown input was received, with a description of what it was
    Unknown(String),
    /// Trying to read input let to some kind of error, with a description
    Error(String),
}
