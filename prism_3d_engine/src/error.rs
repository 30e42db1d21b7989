//! Error types for the Prism3D engine
//!
//! This module defines the error types used throughout the engine,
//! including platform, initialization, scene graph and image data errors.
//!
//! Programming errors (events for unregistered windows, windows registered
//! twice, querying the inactive representation of an image) are NOT reported
//! through this type: they are asserted.

use std::fmt;

/// Result type for Prism3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Platform-specific error (window system, GL context, driver)
    PlatformError(String),

    /// Initialization failed (platform, window, context)
    InitializationFailed(String),

    /// Invalid scene graph object or feature key
    InvalidObject(String),

    /// Operation rejected because it would break an invariant
    InvalidOperation(String),

    /// Data does not match its declared layout
    InvalidData(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PlatformError(msg) => write!(f, "Platform error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidObject(msg) => write!(f, "Invalid object: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::PlatformError` from it
///
/// Meant for `Platform` implementations reporting windowing or GL failures.
/// The engine itself wraps those failures in its own error kinds.
///
/// # Example
///
/// ```no_run
/// # use prism_3d_engine::engine_err;
/// let err = engine_err!("prism3d::Application", "cannot create window: {}", "no display");
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::prism3d::Error::PlatformError(message)
    }};
}

/// Log an ERROR message and return early with an `Error::PlatformError`
///
/// Meant for `Platform` implementations, like [`engine_err!`].
///
/// # Example
///
/// ```no_run
/// # use prism_3d_engine::engine_bail;
/// fn open() -> prism_3d_engine::prism3d::Result<()> {
///     engine_bail!("prism3d::Application", "cannot open: {}", 42);
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
