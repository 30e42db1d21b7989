/// Input events delivered to window handlers.
///
/// Keys use `winit::keyboard::KeyCode`. Mouse buttons are our own enum since
/// wheel steps are reported as button presses.

use bitflags::bitflags;
use glam::IVec2;
use winit::keyboard::KeyCode;
use super::platform::raw_modifiers as raw;

bitflags! {
    /// Keyboard modifiers.
    ///
    /// `SHIFT`, `CTRL`, `ALT` and `SUPER` cover both the left and the right
    /// key. After [`fixed_modifiers`], `contains(Modifiers::SHIFT)` holds
    /// when either Shift key is down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        const SHIFT = raw::LSHIFT | raw::RSHIFT;
        const CTRL = raw::LCTRL | raw::RCTRL;
        const ALT = raw::LALT | raw::RALT;
        const SUPER = raw::LSUPER | raw::RSUPER;
        const ALT_GR = raw::ALT_GR;
        const CAPS_LOCK = raw::CAPS_LOCK;
        const NUM_LOCK = raw::NUM_LOCK;
    }
}

/// Normalize a raw platform modifier mask.
///
/// A side-specific bit sets the whole unified flag, so left and right keys
/// compare equal.
pub fn fixed_modifiers(raw_mask: u16) -> Modifiers {
    let mut modifiers = Modifiers::from_bits_truncate(raw_mask);
    for unified in [Modifiers::SHIFT, Modifiers::CTRL, Modifiers::ALT, Modifiers::SUPER] {
        if modifiers.intersects(unified) {
            modifiers.insert(unified);
        }
    }
    modifiers
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    X1,
    X2,
    /// One wheel step up
    WheelUp,
    /// One wheel step down
    WheelDown,
    Other(u16),
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            winit::event::MouseButton::Back => MouseButton::X1,
            winit::event::MouseButton::Forward => MouseButton::X2,
            winit::event::MouseButton::Other(n) => MouseButton::Other(n),
        }
    }
}

bitflags! {
    /// Buttons held during a mouse move
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
        const X1 = 1 << 3;
        const X2 = 1 << 4;
    }
}

impl MouseButtons {
    /// Mask for a single button (empty for wheel and unknown buttons)
    pub fn from_button(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Middle => MouseButtons::MIDDLE,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::X1 => MouseButtons::X1,
            MouseButton::X2 => MouseButtons::X2,
            MouseButton::WheelUp | MouseButton::WheelDown | MouseButton::Other(_) => MouseButtons::empty(),
        }
    }
}

/// Key press or release
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    key: KeyCode,
    modifiers: Modifiers,
    repeated: bool,
    accepted: bool,
}

impl KeyEvent {
    pub fn new(key: KeyCode, modifiers: Modifiers, repeated: bool) -> Self {
        Self { key, modifiers, repeated, accepted: false }
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether this press comes from key auto-repeat
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Mark the event as handled
    pub fn set_accepted(&mut self, accepted: bool) {
        self.accepted = accepted;
    }
}

/// Mouse button press or release (wheel steps included)
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    button: MouseButton,
    position: IVec2,
    modifiers: Modifiers,
    accepted: bool,
}

impl MouseEvent {
    pub fn new(button: MouseButton, position: IVec2, modifiers: Modifiers) -> Self {
        Self { button, position, modifiers, accepted: false }
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn set_accepted(&mut self, accepted: bool) {
        self.accepted = accepted;
    }
}

/// Mouse motion
#[derive(Debug, Clone, PartialEq)]
pub struct MouseMoveEvent {
    position: IVec2,
    relative: IVec2,
    buttons: MouseButtons,
    modifiers: Modifiers,
    accepted: bool,
}

impl MouseMoveEvent {
    pub fn new(position: IVec2, relative: IVec2, buttons: MouseButtons, modifiers: Modifiers) -> Self {
        Self { position, relative, buttons, modifiers, accepted: false }
    }

    pub fn position(&self) -> IVec2 {
        self.position
    }

    /// Motion since the previous move event
    pub fn relative_position(&self) -> IVec2 {
        self.relative
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn set_accepted(&mut self, accepted: bool) {
        self.accepted = accepted;
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
