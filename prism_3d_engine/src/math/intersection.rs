/// Intersection of lines, line segments and planes.
///
/// A line segment is given by its start point `p` and its direction `r`,
/// so that its points are `p + t*r` for `t` in `[0, 1]`. The same
/// parametrization describes a line when `t` is unrestricted.
///
/// No error channel is used. Degenerate configurations are reported through
/// IEEE floating point sentinels:
/// - parallel, non-intersecting input gives `±inf`
/// - collinear input (or a line lying in the plane) gives `NaN`

use glam::{Vec2, Vec3};

/// Intersection of two line segments in 2D.
///
/// Returns `(t, u)` such that the intersection point is `p + t*r` and also
/// `q + u*s`. The segments intersect iff both `t` and `u` lie in `[0, 1]`.
///
/// With `×` the 2D cross product (`a.x*b.y - a.y*b.x`):
///
/// ```text
/// t = (q - p) × s / (r × s)
/// u = (q - p) × r / (r × s)
/// ```
///
/// If `r × s` is zero the segments are parallel: the result is `±inf`
/// when they are disjoint and `NaN` when they are collinear.
///
/// # Example
///
/// ```
/// use prism_3d_engine::prism3d::math::intersection;
/// use glam::Vec2;
///
/// let (t, u) = intersection::line_segment_line_segment(
///     Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0),
///     Vec2::new(1.0, -1.0), Vec2::new(0.0, 2.0),
/// );
/// assert_eq!((t, u), (0.5, 0.5));
/// ```
pub fn line_segment_line_segment(p: Vec2, r: Vec2, q: Vec2, s: Vec2) -> (f32, f32) {
    let qp = q - p;
    let rs = r.perp_dot(s);
    (qp.perp_dot(s) / rs, qp.perp_dot(r) / rs)
}

/// Intersection of a line segment and a line in 2D.
///
/// Returns `t` such that the intersection point is `p + t*r`. The segment
/// intersects the line iff `t` lies in `[0, 1]`. Same sentinels as
/// [`line_segment_line_segment`].
pub fn line_segment_line(p: Vec2, r: Vec2, q: Vec2, s: Vec2) -> f32 {
    (q - p).perp_dot(s) / r.perp_dot(s)
}

/// Intersection of a plane and a line in 3D.
///
/// The plane goes through `plane_position` with normal `plane_normal`. The
/// line goes through `p` with direction `r`. Returns `t` such that the
/// intersection point is `p + t*r`:
///
/// ```text
/// t = (dot(plane_position, n) - dot(n, p)) / dot(n, r)
/// ```
///
/// `±inf` when the line is parallel to the plane, `NaN` when it lies in it.
pub fn plane_line(plane_position: Vec3, plane_normal: Vec3, p: Vec3, r: Vec3) -> f32 {
    let plane_d = plane_position.dot(plane_normal);
    (plane_d - plane_normal.dot(p)) / plane_normal.dot(r)
}

#[cfg(test)]
#[path = "intersection_tests.rs"]
mod tests;
