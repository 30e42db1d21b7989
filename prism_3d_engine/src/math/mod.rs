//! Math module: closed-form geometric helpers.
//!
//! Vector and matrix types come from glam; this module only adds the
//! routines glam does not provide.

pub mod intersection;
