/// Application: window registry, rendering context and the main loop.
///
/// The application owns the platform and every window. Each call to
/// `main_loop()` drains the platform event queue into window callbacks,
/// runs the tick event, draws the windows that asked for a redraw and then
/// paces the loop.
///
/// # Example
///
/// ```no_run
/// use prism_3d_engine::prism3d::platform::{
///     Application, Configuration, Platform, WindowContext, WindowHandler,
/// };
///
/// struct Viewer;
///
/// impl WindowHandler for Viewer {
///     fn draw_event(&mut self, ctx: &mut WindowContext<'_>) {
///         // Render...
///         ctx.swap_buffers();
///     }
/// }
///
/// fn run<P: Platform>(platform: P) -> i32 {
///     let mut app = Application::new(platform);
///     app.create_context(&Configuration::default(), Box::new(Viewer));
///     app.exec()
/// }
/// ```

use std::collections::BTreeMap;
use std::time::Duration;
use bitflags::bitflags;
use crate::error::{Error, Result};
use super::configuration::{Configuration, ContextFlags, Version, WindowConfiguration, WindowConfigurationFlags};
use super::input::{fixed_modifiers, KeyEvent, MouseButton, MouseEvent, MouseMoveEvent};
use super::platform::{
    ContextAttributes, ContextHandle, ContextProfile, Platform, PlatformEvent, WindowDesc, WindowId,
};
use super::window::{Window, WindowContext, WindowFlags, WindowHandler};

/// Driver workaround: binary NVIDIA/AMD drivers pin a forward-compatible core
/// context to exactly the requested version, so use a compatibility context
const AMD_NV_NO_FORWARD_COMPATIBLE_CORE_CONTEXT: &str = "amd-nv-no-forward-compatible-core-context";
const NVIDIA_VENDOR: &str = "NVIDIA Corporation";
const AMD_VENDOR: &str = "ATI Technologies Inc.";

bitflags! {
    /// Application state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ApplicationFlags: u8 {
        /// Leave the main loop
        const EXIT = 1 << 0;
        /// The last swap interval request succeeded
        const VSYNC_ENABLED = 1 << 1;
        /// No tick event needs to run, the loop may block when idle
        const NO_TICK_EVENT = 1 << 2;
    }
}

/// Main loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal: `exec()` returns before the next iteration
    Exiting,
}

/// What the tick callback may do
pub struct TickContext<'a> {
    platform: &'a mut dyn Platform,
    windows: &'a mut BTreeMap<WindowId, Window>,
    app_flags: &'a mut ApplicationFlags,
}

impl<'a> TickContext<'a> {
    /// Schedule a redraw of a window. Returns false for an unknown id.
    pub fn redraw(&mut self, id: WindowId) -> bool {
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.flags.insert(WindowFlags::REDRAW);
                true
            }
            None => false,
        }
    }

    /// Schedule a redraw of every window
    pub fn redraw_all(&mut self) {
        for window in self.windows.values_mut() {
            window.flags.insert(WindowFlags::REDRAW);
        }
    }

    pub fn exit(&mut self) {
        self.app_flags.insert(ApplicationFlags::EXIT);
    }

    pub fn ticks(&self) -> Duration {
        self.platform.ticks()
    }

    pub fn platform(&mut self) -> &mut dyn Platform {
        &mut *self.platform
    }
}

type TickCallback = Box<dyn FnMut(&mut TickContext<'_>)>;

/// Windowed application driven by a [`Platform`]
pub struct Application<P: Platform> {
    platform: P,
    windows: BTreeMap<WindowId, Window>,
    context: Option<ContextHandle>,
    flags: ApplicationFlags,
    minimal_loop_period: Duration,
    tick: Option<TickCallback>,
}

impl<P: Platform> Application<P> {
    fn log_and_return_error(error: Error) -> Error {
        crate::engine_error!("prism3d::Application", "{}", error);
        error
    }

    // ===== LIFECYCLE =====

    /// Initialize the platform and create an application without windows
    pub fn try_new(mut platform: P) -> Result<Self> {
        platform.init().map_err(|e| {
            Self::log_and_return_error(Error::InitializationFailed(format!(
                "cannot initialize platform: {}",
                e
            )))
        })?;

        Ok(Self {
            platform,
            windows: BTreeMap::new(),
            context: None,
            flags: ApplicationFlags::empty(),
            minimal_loop_period: Duration::ZERO,
            tick: None,
        })
    }

    /// Like [`Application::try_new`], exiting the process with status 1 on
    /// failure
    pub fn new(platform: P) -> Self {
        match Self::try_new(platform) {
            Ok(app) => app,
            Err(_) => std::process::exit(1),
        }
    }

    /// Create the main window and its rendering context.
    ///
    /// With [`Version::None`] a GL 3.1 (3.2 on macOS) forward-compatible core
    /// context is tried first. If that fails, or the driver is a binary
    /// NVIDIA/AMD one and the `amd-nv-no-forward-compatible-core-context`
    /// workaround is not disabled, the window is recreated with a GL 2.1
    /// compatibility context.
    ///
    /// # Panics
    ///
    /// If a context was already created.
    pub fn try_create_context(
        &mut self,
        configuration: &Configuration,
        handler: Box<dyn WindowHandler>,
    ) -> Result<WindowId> {
        assert!(
            self.context.is_none(),
            "Application::try_create_context(): context already created"
        );

        let desc = window_desc(&configuration.window);

        let (window, context) = match configuration.version.major_minor() {
            Some((major, minor)) => {
                let profile = if configuration.version >= Version::GL310 {
                    ContextProfile::Core
                } else {
                    ContextProfile::Compatibility
                };
                self.platform.set_context_attributes(&context_attributes(
                    configuration, major, minor, profile, configuration.flags,
                ));
                let window = self.create_native_window(&desc)?;
                (window, self.platform.create_context(window))
            }
            None => self.create_best_context(configuration, &desc)?,
        };

        let context = match context {
            Ok(context) => context,
            Err(e) => {
                self.platform.destroy_window(window);
                return Err(Self::log_and_return_error(Error::InitializationFailed(format!(
                    "cannot create context: {}",
                    e
                ))));
            }
        };

        self.context = Some(context);
        self.register_window(window, &configuration.window, handler);
        crate::engine_info!(
            "prism3d::Application",
            "Created context on window {} ({})",
            window.0,
            self.platform.context_vendor(context)
        );
        Ok(window)
    }

    /// Like [`Application::try_create_context`], exiting the process with
    /// status 1 on failure
    pub fn create_context(&mut self, configuration: &Configuration, handler: Box<dyn WindowHandler>) -> WindowId {
        match self.try_create_context(configuration, handler) {
            Ok(window) => window,
            Err(_) => std::process::exit(1),
        }
    }

    fn create_best_context(
        &mut self,
        configuration: &Configuration,
        desc: &WindowDesc,
    ) -> Result<(WindowId, Result<ContextHandle>)> {
        let core_minor = if cfg!(target_os = "macos") { 2 } else { 1 };
        self.platform.set_context_attributes(&context_attributes(
            configuration,
            3,
            core_minor,
            ContextProfile::Core,
            configuration.flags | ContextFlags::FORWARD_COMPATIBLE,
        ));
        let window = self.create_native_window(desc)?;
        let attempt = self.platform.create_context(window);

        let fall_back = match &attempt {
            Err(e) => {
                crate::engine_warn!(
                    "prism3d::Application",
                    "Cannot create core context: {} (falling back to compatibility context)",
                    e
                );
                true
            }
            Ok(context) => {
                // No warning here, the driver behavior is not going to change
                !cfg!(target_os = "macos")
                    && is_binary_nv_amd_driver(&self.platform.context_vendor(*context))
                    && !configuration.is_workaround_disabled(AMD_NV_NO_FORWARD_COMPATIBLE_CORE_CONTEXT)
            }
        };

        if !fall_back {
            return Ok((window, attempt));
        }

        if let Ok(context) = attempt {
            crate::engine_debug!(
                "prism3d::Application",
                "Using workaround {}",
                AMD_NV_NO_FORWARD_COMPATIBLE_CORE_CONTEXT
            );
            self.platform.destroy_context(context);
        }
        self.platform.destroy_window(window);

        self.platform.set_context_attributes(&context_attributes(
            configuration,
            2,
            1,
            ContextProfile::Compatibility,
            configuration.flags,
        ));
        let window = self.create_native_window(desc)?;
        Ok((window, self.platform.create_context(window)))
    }

    fn create_native_window(&mut self, desc: &WindowDesc) -> Result<WindowId> {
        self.platform.create_window(desc).map_err(|e| {
            Self::log_and_return_error(Error::InitializationFailed(format!("cannot create window: {}", e)))
        })
    }

    fn register_window(&mut self, id: WindowId, configuration: &WindowConfiguration, handler: Box<dyn WindowHandler>) {
        assert!(
            !self.windows.contains_key(&id),
            "Application::register_window(): window {} already registered",
            id.0
        );
        self.windows.insert(id, Window::new(handler));
        if configuration.window_flags.contains(WindowConfigurationFlags::MOUSE_LOCKED) {
            self.platform.set_mouse_locked(Some(id));
        }
        crate::engine_info!(
            "prism3d::Application",
            "Registered window {} \"{}\" {}x{}",
            id.0,
            configuration.title,
            configuration.size.x,
            configuration.size.y
        );
    }

    /// Whether a rendering context exists
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    // ===== WINDOWS =====

    /// Create an additional window sharing the application context
    pub fn create_window(
        &mut self,
        configuration: &WindowConfiguration,
        handler: Box<dyn WindowHandler>,
    ) -> Result<WindowId> {
        let id = self.create_native_window(&window_desc(configuration))?;
        self.register_window(id, configuration, handler);
        Ok(id)
    }

    /// Unregister a window and destroy its native window
    pub fn destroy_window(&mut self, id: WindowId) -> Result<()> {
        if self.windows.remove(&id).is_none() {
            return Err(Self::log_and_return_error(Error::InvalidObject(format!(
                "unknown window {}",
                id.0
            ))));
        }
        self.platform.destroy_window(id);
        crate::engine_info!("prism3d::Application", "Destroyed window {}", id.0);
        Ok(())
    }

    /// Registered window ids, in ascending order
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn window_flags(&self, id: WindowId) -> Option<WindowFlags> {
        self.windows.get(&id).map(|window| window.flags)
    }

    /// Schedule a redraw of a window
    pub fn redraw(&mut self, id: WindowId) -> Result<()> {
        match self.windows.get_mut(&id) {
            Some(window) => {
                window.flags.insert(WindowFlags::REDRAW);
                Ok(())
            }
            None => Err(Self::log_and_return_error(Error::InvalidObject(format!(
                "unknown window {}",
                id.0
            )))),
        }
    }

    /// Grab the mouse in `window` with relative motion, or release it (`None`)
    pub fn set_mouse_locked(&mut self, window: Option<WindowId>) {
        self.platform.set_mouse_locked(window);
    }

    // ===== MAIN LOOP =====

    /// Install a tick callback, run once per loop iteration
    pub fn set_tick_event(&mut self, tick: impl FnMut(&mut TickContext<'_>) + 'static) {
        self.tick = Some(Box::new(tick));
        self.flags.remove(ApplicationFlags::NO_TICK_EVENT);
    }

    /// Remove the tick callback. The loop may block again when idle.
    pub fn clear_tick_event(&mut self) {
        self.tick = None;
        self.flags.remove(ApplicationFlags::NO_TICK_EVENT);
    }

    /// Ask the main loop to stop. Takes effect at the next iteration.
    pub fn exit(&mut self) {
        self.flags.insert(ApplicationFlags::EXIT);
    }

    pub fn state(&self) -> RunState {
        if self.flags.contains(ApplicationFlags::EXIT) {
            RunState::Exiting
        } else {
            RunState::Running
        }
    }

    pub fn flags(&self) -> ApplicationFlags {
        self.flags
    }

    /// Run the main loop until exit is requested. Returns the exit code.
    pub fn exec(&mut self) -> i32 {
        while !self.flags.contains(ApplicationFlags::EXIT) {
            self.main_loop();
        }
        crate::engine_info!("prism3d::Application", "Leaving main loop");
        0
    }

    /// One iteration of the main loop
    ///
    /// # Panics
    ///
    /// If the platform reports an event for a window that is not registered.
    pub fn main_loop(&mut self) {
        let time_before = (!self.minimal_loop_period.is_zero()).then(|| self.platform.ticks());

        while let Some(event) = self.platform.poll_event() {
            if !self.dispatch_event(event) {
                return;
            }
        }

        if !self.flags.contains(ApplicationFlags::NO_TICK_EVENT) {
            self.tick_event();
        }

        let mut something_drawn = false;
        for (&id, window) in self.windows.iter_mut() {
            if !window.flags.contains(WindowFlags::REDRAW) {
                continue;
            }
            window.flags.remove(WindowFlags::REDRAW);
            let mut ctx = WindowContext {
                id,
                platform: &mut self.platform,
                flags: &mut window.flags,
                app_flags: &mut self.flags,
            };
            window.handler.draw_event(&mut ctx);
            something_drawn = true;
        }

        if self.flags.contains(ApplicationFlags::EXIT) {
            return;
        }

        if !something_drawn && self.flags.contains(ApplicationFlags::NO_TICK_EVENT) {
            self.platform.wait_event();
            return;
        }

        if let Some(before) = time_before {
            if !self.flags.contains(ApplicationFlags::VSYNC_ENABLED) {
                let loop_time = self.platform.ticks().saturating_sub(before);
                if loop_time < self.minimal_loop_period {
                    self.platform.delay(self.minimal_loop_period - loop_time);
                }
            }
        }
    }

    /// Returns false when the loop must stop draining events
    fn dispatch_event(&mut self, event: PlatformEvent) -> bool {
        match event {
            PlatformEvent::WindowResized { window, size } => {
                self.with_window(window, |handler, ctx| {
                    handler.viewport_event(ctx, size);
                    ctx.redraw();
                });
            }
            PlatformEvent::WindowExposed { window } => {
                self.with_window(window, |_, ctx| ctx.redraw());
            }
            PlatformEvent::Key { window, key, modifiers, pressed, repeat } => {
                let mut event = KeyEvent::new(key, fixed_modifiers(modifiers), repeat);
                self.with_window(window, |handler, ctx| {
                    if pressed {
                        handler.key_press_event(ctx, &mut event);
                    } else {
                        handler.key_release_event(ctx, &mut event);
                    }
                });
            }
            PlatformEvent::MouseButton { window, button, position, pressed } => {
                let mut event = MouseEvent::new(button, position, fixed_modifiers(self.platform.modifier_state()));
                self.with_window(window, |handler, ctx| {
                    if pressed {
                        handler.mouse_press_event(ctx, &mut event);
                    } else {
                        handler.mouse_release_event(ctx, &mut event);
                    }
                });
            }
            PlatformEvent::MouseWheel { window, position, delta } => {
                let modifiers = fixed_modifiers(self.platform.modifier_state());
                self.with_window(window, |handler, ctx| {
                    if delta.y != 0.0 {
                        let button = if delta.y > 0.0 { MouseButton::WheelUp } else { MouseButton::WheelDown };
                        handler.mouse_press_event(ctx, &mut MouseEvent::new(button, position, modifiers));
                    }
                });
            }
            PlatformEvent::MouseMotion { window, position, relative, buttons } => {
                let mut event = MouseMoveEvent::new(
                    position,
                    relative,
                    buttons,
                    fixed_modifiers(self.platform.modifier_state()),
                );
                self.with_window(window, |handler, ctx| handler.mouse_move_event(ctx, &mut event));
            }
            PlatformEvent::Quit => {
                crate::engine_info!("prism3d::Application", "Quit requested");
                self.flags.insert(ApplicationFlags::EXIT);
                return false;
            }
        }
        true
    }

    fn with_window<F>(&mut self, id: WindowId, f: F)
    where
        F: FnOnce(&mut dyn WindowHandler, &mut WindowContext<'_>),
    {
        let window = match self.windows.get_mut(&id) {
            Some(window) => window,
            None => panic!("Application::main_loop(): event for unknown window {}", id.0),
        };
        let mut ctx = WindowContext {
            id,
            platform: &mut self.platform,
            flags: &mut window.flags,
            app_flags: &mut self.flags,
        };
        f(window.handler.as_mut(), &mut ctx);
    }

    fn tick_event(&mut self) {
        match self.tick.as_mut() {
            Some(tick) => {
                let mut ctx = TickContext {
                    platform: &mut self.platform,
                    windows: &mut self.windows,
                    app_flags: &mut self.flags,
                };
                tick(&mut ctx);
            }
            // Nobody listens, so the loop may block when idle from now on
            None => self.flags.insert(ApplicationFlags::NO_TICK_EVENT),
        }
    }

    // ===== PACING =====

    /// Lower bound on the duration of one loop iteration when VSync is off.
    /// `Duration::ZERO` disables pacing.
    pub fn set_minimal_loop_period(&mut self, period: Duration) {
        self.minimal_loop_period = period;
    }

    pub fn minimal_loop_period(&self) -> Duration {
        self.minimal_loop_period
    }

    /// Set the buffer swap interval (`1` for VSync, `0` to disable).
    ///
    /// Returns false and clears the VSync flag when the platform rejects the
    /// interval or the driver ignores it.
    pub fn set_swap_interval(&mut self, interval: i32) -> bool {
        if let Err(e) = self.platform.set_swap_interval(interval) {
            crate::engine_error!("prism3d::Application", "Cannot set swap interval: {}", e);
            self.flags.remove(ApplicationFlags::VSYNC_ENABLED);
            return false;
        }

        if self.platform.swap_interval() != interval {
            crate::engine_error!("prism3d::Application", "Swap interval setting ignored by the driver");
            self.flags.remove(ApplicationFlags::VSYNC_ENABLED);
            return false;
        }

        self.flags.insert(ApplicationFlags::VSYNC_ENABLED);
        true
    }

    /// Swap interval currently in effect
    pub fn swap_interval(&self) -> i32 {
        self.platform.swap_interval()
    }

    pub fn is_vsync_enabled(&self) -> bool {
        self.flags.contains(ApplicationFlags::VSYNC_ENABLED)
    }

    // ===== PLATFORM ACCESS =====

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

impl<P: Platform> Drop for Application<P> {
    fn drop(&mut self) {
        if let Some(context) = self.context.take() {
            self.platform.destroy_context(context);
        }
        let windows = std::mem::take(&mut self.windows);
        for id in windows.into_keys() {
            self.platform.destroy_window(id);
        }
        self.platform.shutdown();
    }
}

fn window_desc(configuration: &WindowConfiguration) -> WindowDesc {
    WindowDesc {
        title: configuration.title.clone(),
        size: configuration.size,
        flags: configuration.window_flags,
    }
}

/// Attributes for one context creation attempt
fn context_attributes(
    configuration: &Configuration,
    major: u8,
    minor: u8,
    profile: ContextProfile,
    flags: ContextFlags,
) -> ContextAttributes {
    ContextAttributes {
        double_buffer: true,
        depth_size: 24,
        multisample_buffers: u8::from(configuration.sample_count > 1),
        samples: configuration.sample_count,
        srgb_capable: configuration.srgb_capable,
        major,
        minor,
        profile,
        flags,
    }
}

fn is_binary_nv_amd_driver(vendor: &str) -> bool {
    vendor == NVIDIA_VENDOR || vendor == AMD_VENDOR
}

#[cfg(test)]
#[path = "application_tests.rs"]
mod tests;
