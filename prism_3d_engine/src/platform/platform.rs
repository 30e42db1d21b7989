/// Platform trait: the windowing system and GL context library.
///
/// The application shell drives windows, contexts and the event queue only
/// through this trait. A backend maps its native window system onto it; tests
/// use a scripted mock.

use std::time::Duration;
use glam::{IVec2, Vec2};
use winit::keyboard::KeyCode;
use crate::error::Result;
use super::configuration::{ContextFlags, WindowConfigurationFlags};
use super::input::{MouseButton, MouseButtons};

/// Native window identifier, assigned by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub u32);

/// Native rendering context handle, assigned by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextHandle(pub u32);

/// Raw keyboard modifier bits as reported by the platform.
///
/// Left and right keys have separate bits; see
/// [`fixed_modifiers`](super::input::fixed_modifiers) for the normalized form.
pub mod raw_modifiers {
    pub const LSHIFT: u16 = 0x0001;
    pub const RSHIFT: u16 = 0x0002;
    pub const LCTRL: u16 = 0x0040;
    pub const RCTRL: u16 = 0x0080;
    pub const LALT: u16 = 0x0100;
    pub const RALT: u16 = 0x0200;
    pub const LSUPER: u16 = 0x0400;
    pub const RSUPER: u16 = 0x0800;
    pub const NUM_LOCK: u16 = 0x1000;
    pub const CAPS_LOCK: u16 = 0x2000;
    pub const ALT_GR: u16 = 0x4000;
}

/// Native window creation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDesc {
    pub title: String,
    pub size: IVec2,
    /// `HIDDEN` suppresses showing the window after creation
    pub flags: WindowConfigurationFlags,
}

/// Context profile requested from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextProfile {
    Core,
    Compatibility,
    Es,
}

/// Framebuffer and context attributes, applied to the next window/context
/// created by the platform
#[derive(Debug, Clone, PartialEq)]
pub struct ContextAttributes {
    pub double_buffer: bool,
    pub depth_size: u8,
    pub multisample_buffers: u8,
    pub samples: u32,
    pub srgb_capable: bool,
    pub major: u8,
    pub minor: u8,
    pub profile: ContextProfile,
    pub flags: ContextFlags,
}

/// Event read from the platform queue
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Window framebuffer was resized
    WindowResized { window: WindowId, size: IVec2 },
    /// Window contents must be redrawn
    WindowExposed { window: WindowId },
    /// Key press or release. `modifiers` uses the [`raw_modifiers`] bits.
    Key {
        window: WindowId,
        key: KeyCode,
        modifiers: u16,
        pressed: bool,
        repeat: bool,
    },
    MouseButton {
        window: WindowId,
        button: MouseButton,
        position: IVec2,
        pressed: bool,
    },
    /// Wheel scroll; positive `delta.y` scrolls up
    MouseWheel {
        window: WindowId,
        position: IVec2,
        delta: Vec2,
    },
    MouseMotion {
        window: WindowId,
        position: IVec2,
        relative: IVec2,
        buttons: MouseButtons,
    },
    /// The user asked the application to quit
    Quit,
}

/// Windowing system and GL context library
pub trait Platform {
    /// Initialize the video subsystem
    fn init(&mut self) -> Result<()>;

    /// Release everything the platform holds. Called last.
    fn shutdown(&mut self);

    fn create_window(&mut self, desc: &WindowDesc) -> Result<WindowId>;
    fn destroy_window(&mut self, window: WindowId);

    fn set_context_attributes(&mut self, attributes: &ContextAttributes);
    fn create_context(&mut self, window: WindowId) -> Result<ContextHandle>;
    fn destroy_context(&mut self, context: ContextHandle);

    /// Driver vendor string of a context (`GL_VENDOR`)
    fn context_vendor(&self, context: ContextHandle) -> String;

    fn swap_buffers(&mut self, window: WindowId);

    /// Request a swap interval. An `Err` means the platform rejected it.
    fn set_swap_interval(&mut self, interval: i32) -> Result<()>;

    /// Swap interval actually in effect
    fn swap_interval(&self) -> i32;

    /// Pop the next pending event, without blocking
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Block until at least one event is pending. The event stays queued.
    fn wait_event(&mut self);

    /// Monotonic time since platform initialization
    fn ticks(&self) -> Duration;

    /// Sleep the calling thread
    fn delay(&mut self, duration: Duration);

    /// Current keyboard modifiers, as [`raw_modifiers`] bits
    fn modifier_state(&self) -> u16;

    /// Grab the mouse in `window` with relative motion, or release it (`None`)
    fn set_mouse_locked(&mut self, window: Option<WindowId>);
}
