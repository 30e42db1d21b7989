//! Scene graph: object hierarchy, transformation caching and cameras.
//!
//! A `Scene` owns its objects and their features. Transformations are
//! generic over [`TransformationMatrix`], implemented for `glam::Mat3`
//! (2D scenes) and `glam::Mat4` (3D scenes).

mod camera;
mod drawable;
mod feature;
mod scene;
mod transformation;

pub use camera::{aspect_ratio_fix, AspectRatioPolicy, Camera, CameraMut};
pub use drawable::{Drawable, DrawableGroup};
pub use feature::{CachedTransformation, CachedTransformations, Feature};
pub use scene::{FeatureKey, ObjectKey, Scene};
pub use transformation::TransformationMatrix;

use glam::{Mat3, Mat4};

pub type Scene2D = Scene<Mat3>;
pub type Scene3D = Scene<Mat4>;
pub type Camera2D = Camera<Mat3>;
pub type Camera3D = Camera<Mat4>;
pub type DrawableGroup2D = DrawableGroup<Mat3>;
pub type DrawableGroup3D = DrawableGroup<Mat4>;
