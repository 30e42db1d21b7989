/// Camera: scene graph feature turning objects into views.
///
/// The camera caches the inverted absolute transformation of its object as
/// its camera matrix, and keeps an aspect-ratio corrected copy of the
/// projection matrix for the current viewport.
///
/// The camera matrix is only up to date right after its object was cleaned.
/// `CameraMut::camera_matrix()` and `CameraMut::draw()` clean first.

use std::any::Any;
use glam::{IVec2, Vec2};
use crate::error::Result;
use super::drawable::DrawableGroup;
use super::feature::{CachedTransformation, CachedTransformations, Feature};
use super::scene::{FeatureKey, ObjectKey, Scene};
use super::transformation::TransformationMatrix;

/// How the projection reacts to a viewport whose aspect ratio differs
/// from the projection's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatioPolicy {
    /// Stretch the projection to the viewport
    #[default]
    NotPreserved,
    /// Keep the aspect ratio, showing more of the scene on the longer side
    Extend,
    /// Keep the aspect ratio, cutting the scene on the longer side
    Clip,
}

/// Aspect-ratio correction matrix to pre-multiply a projection with.
///
/// `projection_scale` is the X/Y scale of the raw projection (see
/// [`TransformationMatrix::projection_scale`]). Returns identity for
/// `NotPreserved` and when any scale or viewport component is zero.
pub fn aspect_ratio_fix<M: TransformationMatrix>(
    policy: AspectRatioPolicy,
    projection_scale: Vec2,
    viewport: IVec2,
) -> M {
    if policy == AspectRatioPolicy::NotPreserved
        || projection_scale.x == 0.0
        || projection_scale.y == 0.0
        || viewport.x == 0
        || viewport.y == 0
    {
        return M::IDENTITY;
    }

    let relative = viewport.as_vec2() * projection_scale;

    if (relative.x > relative.y) == (policy == AspectRatioPolicy::Extend) {
        M::from_scale_xy(Vec2::new(relative.y / relative.x, 1.0))
    } else {
        M::from_scale_xy(Vec2::new(1.0, relative.x / relative.y))
    }
}

/// Camera feature
#[derive(Debug, Clone)]
pub struct Camera<M: TransformationMatrix> {
    raw_projection: M,
    projection: M,
    policy: AspectRatioPolicy,
    viewport: IVec2,
    camera_matrix: M,
}

impl<M: TransformationMatrix> Camera<M> {
    /// Identity projection, `NotPreserved` policy, zero viewport
    pub fn new() -> Self {
        Self {
            raw_projection: M::IDENTITY,
            projection: M::IDENTITY,
            policy: AspectRatioPolicy::NotPreserved,
            viewport: IVec2::ZERO,
            camera_matrix: M::IDENTITY,
        }
    }

    fn fix_aspect_ratio(&mut self) {
        let fix: M = aspect_ratio_fix(self.policy, self.raw_projection.projection_scale(), self.viewport);
        self.projection = fix * self.raw_projection;
    }

    /// Aspect-ratio corrected projection matrix
    pub fn projection_matrix(&self) -> M {
        self.projection
    }

    /// Projection matrix as it was set, before correction
    pub fn raw_projection_matrix(&self) -> M {
        self.raw_projection
    }

    /// Size of the visible area, `(2 / p[0][0], 2 / p[1][1])`
    pub fn projection_size(&self) -> Vec2 {
        let scale = self.projection.projection_scale();
        Vec2::new(2.0 / scale.x, 2.0 / scale.y)
    }

    pub fn aspect_ratio_policy(&self) -> AspectRatioPolicy {
        self.policy
    }

    pub fn viewport(&self) -> IVec2 {
        self.viewport
    }

    /// Last camera matrix delivered by the scene. May be stale if the
    /// object is dirty.
    pub fn cached_camera_matrix(&self) -> M {
        self.camera_matrix
    }
}

impl<M: TransformationMatrix> Default for Camera<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TransformationMatrix> Feature<M> for Camera<M> {
    fn cached_transformations(&self) -> CachedTransformations {
        CachedTransformations::INVERTED_ABSOLUTE
    }

    fn on_transformation_changed(&mut self, kind: CachedTransformation, matrix: &M) {
        if kind == CachedTransformation::InvertedAbsolute {
            self.camera_matrix = *matrix;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Mutable handle to a camera living in a scene
pub struct CameraMut<'a, M: TransformationMatrix> {
    scene: &'a mut Scene<M>,
    key: FeatureKey,
    object: ObjectKey,
}

impl<'a, M: TransformationMatrix> CameraMut<'a, M> {
    fn camera(&self) -> &Camera<M> {
        self.scene
            .feature::<Camera<M>>(self.key)
            .expect("CameraMut::camera(): camera removed while borrowed")
    }

    fn camera_mut(&mut self) -> &mut Camera<M> {
        self.scene
            .feature_mut::<Camera<M>>(self.key)
            .expect("CameraMut::camera_mut(): camera removed while borrowed")
    }

    /// Feature key of the camera
    pub fn key(&self) -> FeatureKey {
        self.key
    }

    /// Object the camera is attached to
    pub fn object(&self) -> ObjectKey {
        self.object
    }

    /// Set the projection matrix and reapply the aspect-ratio correction
    pub fn set_projection_matrix(&mut self, projection: M) -> &mut Self {
        let camera = self.camera_mut();
        camera.raw_projection = projection;
        camera.fix_aspect_ratio();
        self
    }

    /// Set the aspect-ratio policy and reapply the correction
    pub fn set_aspect_ratio_policy(&mut self, policy: AspectRatioPolicy) -> &mut Self {
        let camera = self.camera_mut();
        camera.policy = policy;
        camera.fix_aspect_ratio();
        self
    }

    /// Set the viewport size and reapply the correction
    pub fn set_viewport(&mut self, size: IVec2) -> &mut Self {
        let camera = self.camera_mut();
        camera.viewport = size;
        camera.fix_aspect_ratio();
        self
    }

    /// Camera matrix (world-to-camera), cleaning the object first
    pub fn camera_matrix(&mut self) -> M {
        self.scene.clean(self.object);
        self.camera().camera_matrix
    }

    pub fn projection_matrix(&self) -> M {
        self.camera().projection
    }

    pub fn projection_size(&self) -> Vec2 {
        self.camera().projection_size()
    }

    pub fn aspect_ratio_policy(&self) -> AspectRatioPolicy {
        self.camera().policy
    }

    pub fn viewport(&self) -> IVec2 {
        self.camera().viewport
    }

    /// Draw a group of drawables from this camera.
    ///
    /// Drawables whose object no longer exists are skipped.
    pub fn draw(&mut self, group: &mut DrawableGroup<M>) {
        let camera_matrix = self.camera_matrix();
        let projection = self.projection_matrix();

        for (object, drawable) in group.iter_mut() {
            if !self.scene.contains(object) {
                crate::engine_warn!("prism3d::Camera", "Skipping drawable of removed object {:?}", object);
                continue;
            }
            if let Ok(absolute) = self.scene.absolute_transformation(object) {
                drawable.draw(&(camera_matrix * absolute), &projection);
            }
        }
    }
}

impl<M: TransformationMatrix> Scene<M> {
    /// Attach a new camera to an object
    pub fn add_camera(&mut self, object: ObjectKey) -> Result<FeatureKey> {
        self.attach_feature(object, Box::new(Camera::<M>::new()))
    }

    /// Borrow a camera
    pub fn camera(&self, key: FeatureKey) -> Option<&Camera<M>> {
        self.feature::<Camera<M>>(key)
    }

    /// Mutable camera handle, `None` if the key is not a camera of this scene
    pub fn camera_mut(&mut self, key: FeatureKey) -> Option<CameraMut<'_, M>> {
        self.feature::<Camera<M>>(key)?;
        let object = self.feature_object(key)?;
        Some(CameraMut { scene: self, key, object })
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
