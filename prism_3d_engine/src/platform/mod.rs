/// Platform module - windowing, input and the application main loop
///
/// The windowing system / GL context library is reached through the
/// [`Platform`] trait. [`Application`] turns its event queue into window
/// callbacks and frame draws.

// Module declarations
pub mod platform;
pub mod configuration;
pub mod input;
pub mod window;
pub mod application;

#[cfg(test)]
pub(crate) mod mock_platform;

// Re-export everything from platform.rs
pub use platform::*;

// Re-export from other modules
pub use configuration::*;
pub use input::*;
pub use window::{WindowContext, WindowFlags, WindowHandler};
pub use application::{Application, ApplicationFlags, RunState, TickContext};
