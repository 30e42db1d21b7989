/// Windows: per-window state and the callbacks user code implements.

use std::time::Duration;
use bitflags::bitflags;
use glam::IVec2;
use super::application::ApplicationFlags;
use super::input::{KeyEvent, MouseEvent, MouseMoveEvent};
use super::platform::{Platform, WindowId};

bitflags! {
    /// Per-window state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowFlags: u8 {
        /// Draw this window on the next loop iteration
        const REDRAW = 1 << 0;
    }
}

/// Callbacks of one window.
///
/// Only `draw_event` is required; the input callbacks ignore their events
/// by default.
pub trait WindowHandler {
    /// The framebuffer was resized. A redraw is scheduled afterwards.
    fn viewport_event(&mut self, _ctx: &mut WindowContext<'_>, _size: IVec2) {}

    /// Draw the window contents. Call `ctx.swap_buffers()` when done.
    fn draw_event(&mut self, ctx: &mut WindowContext<'_>);

    fn key_press_event(&mut self, _ctx: &mut WindowContext<'_>, _event: &mut KeyEvent) {}
    fn key_release_event(&mut self, _ctx: &mut WindowContext<'_>, _event: &mut KeyEvent) {}
    fn mouse_press_event(&mut self, _ctx: &mut WindowContext<'_>, _event: &mut MouseEvent) {}
    fn mouse_release_event(&mut self, _ctx: &mut WindowContext<'_>, _event: &mut MouseEvent) {}
    fn mouse_move_event(&mut self, _ctx: &mut WindowContext<'_>, _event: &mut MouseMoveEvent) {}
}

/// Registered window
pub(crate) struct Window {
    pub(crate) flags: WindowFlags,
    pub(crate) handler: Box<dyn WindowHandler>,
}

impl Window {
    /// New windows start with a pending redraw
    pub(crate) fn new(handler: Box<dyn WindowHandler>) -> Self {
        Self { flags: WindowFlags::REDRAW, handler }
    }
}

/// What a window callback may do to its window and the application
pub struct WindowContext<'a> {
    pub(crate) id: WindowId,
    pub(crate) platform: &'a mut dyn Platform,
    pub(crate) flags: &'a mut WindowFlags,
    pub(crate) app_flags: &'a mut ApplicationFlags,
}

impl<'a> WindowContext<'a> {
    /// Id of the window receiving the callback
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Schedule a redraw of this window on the next loop iteration
    pub fn redraw(&mut self) {
        self.flags.insert(WindowFlags::REDRAW);
    }

    /// Present the back buffer of this window
    pub fn swap_buffers(&mut self) {
        self.platform.swap_buffers(self.id);
    }

    /// Ask the application to leave its main loop
    pub fn exit(&mut self) {
        self.app_flags.insert(ApplicationFlags::EXIT);
    }

    /// Time since platform initialization
    pub fn ticks(&self) -> Duration {
        self.platform.ticks()
    }

    pub fn platform(&mut self) -> &mut dyn Platform {
        &mut *self.platform
    }
}
