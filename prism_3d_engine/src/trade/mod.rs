/// Trade module - containers for imported asset data

// Module declarations
pub mod pixel_storage;
pub mod image_data;

// Re-exports
pub use pixel_storage::*;
pub use image_data::*;
