/*!
# Prism3D Engine

Core of a real-time 3D engine: geometric intersection routines, a scene graph
with cached hierarchical transformations and cameras, a windowed application
shell driven through a platform abstraction, and image data containers.

## Architecture

- **Scene**: object arena with dirty/clean transformation caching
- **Feature**: capability attached to an object (cameras are features)
- **Camera**: camera matrix and aspect-ratio corrected projection
- **Application**: window registry and the event-driven main loop
- **Platform**: windowing system / GL context library behind a trait
- **ImageData**: owned pixels of an imported image

Everything public is reachable through the `prism3d` namespace.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod scene_graph;
pub mod platform;
pub mod trade;

// Main prism3d namespace module
pub mod prism3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Feature modules
    pub use crate::math;
    pub use crate::scene_graph;
    pub use crate::platform;
    pub use crate::trade;
}

// Re-export math library at crate root
pub use glam;
