/// Matrix types usable as scene graph transformations.
///
/// The scene graph is generic over its transformation type so the same
/// caching code serves 2D (`Mat3`, homogeneous 2D) and 3D (`Mat4`) scenes.

use std::fmt::Debug;
use std::ops::Mul;
use glam::{Mat3, Mat4, Vec2, Vec3};

/// A square homogeneous transformation matrix.
///
/// `a * b` applies `b` first, then `a` (column vectors).
pub trait TransformationMatrix: Copy + PartialEq + Debug + Mul<Output = Self> + 'static {
    /// Identity transformation
    const IDENTITY: Self;

    /// Inverse transformation
    fn inverted(&self) -> Self;

    /// Diagonal X/Y scale of a projection matrix, `(m[0][0], m[1][1])`
    fn projection_scale(&self) -> Vec2;

    /// Scaling along X and Y only
    fn from_scale_xy(scale: Vec2) -> Self;
}

impl TransformationMatrix for Mat3 {
    const IDENTITY: Self = Mat3::IDENTITY;

    fn inverted(&self) -> Self {
        self.inverse()
    }

    fn projection_scale(&self) -> Vec2 {
        Vec2::new(self.x_axis.x, self.y_axis.y)
    }

    fn from_scale_xy(scale: Vec2) -> Self {
        Mat3::from_scale(scale)
    }
}

impl TransformationMatrix for Mat4 {
    const IDENTITY: Self = Mat4::IDENTITY;

    fn inverted(&self) -> Self {
        self.inverse()
    }

    fn projection_scale(&self) -> Vec2 {
        Vec2::new(self.x_axis.x, self.y_axis.y)
    }

    fn from_scale_xy(scale: Vec2) -> Self {
        Mat4::from_scale(Vec3::new(scale.x, scale.y, 1.0))
    }
}
