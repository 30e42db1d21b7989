/// Features: capabilities attached to scene graph objects.
///
/// A feature is owned by the scene and attached to exactly one object. It
/// declares which derived transformations of its object it wants to cache;
/// the scene computes only those and hands them over after each clean pass.

use std::any::Any;
use bitflags::bitflags;
use super::transformation::TransformationMatrix;

bitflags! {
    /// Set of derived transformations a feature wants delivered
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CachedTransformations: u8 {
        /// Absolute (object-to-world) transformation
        const ABSOLUTE = 1 << 0;
        /// Inverse of the absolute transformation (world-to-object)
        const INVERTED_ABSOLUTE = 1 << 1;
    }
}

/// One derived transformation, as passed to [`Feature::on_transformation_changed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachedTransformation {
    Absolute,
    InvertedAbsolute,
}

impl CachedTransformation {
    /// Flag corresponding to this variant
    pub fn flag(self) -> CachedTransformations {
        match self {
            CachedTransformation::Absolute => CachedTransformations::ABSOLUTE,
            CachedTransformation::InvertedAbsolute => CachedTransformations::INVERTED_ABSOLUTE,
        }
    }
}

/// Capability attached to a scene graph object.
///
/// `cached_transformations()` is read once, when the feature is attached.
/// Use `Scene::set_cached_transformations` to change the request later.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use glam::Mat4;
/// use prism_3d_engine::prism3d::scene_graph::{
///     CachedTransformation, CachedTransformations, Feature,
/// };
///
/// struct Tracker { world: Mat4 }
///
/// impl Feature<Mat4> for Tracker {
///     fn cached_transformations(&self) -> CachedTransformations {
///         CachedTransformations::ABSOLUTE
///     }
///     fn on_transformation_changed(&mut self, _kind: CachedTransformation, matrix: &Mat4) {
///         self.world = *matrix;
///     }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
/// }
/// ```
pub trait Feature<M: TransformationMatrix>: 'static {
    /// Transformations this feature wants to receive
    fn cached_transformations(&self) -> CachedTransformations {
        CachedTransformations::empty()
    }

    /// Called after the owning object is cleaned, once per requested variant
    fn on_transformation_changed(&mut self, _kind: CachedTransformation, _matrix: &M) {}

    /// Called when the owning object becomes dirty
    fn mark_dirty(&mut self) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
