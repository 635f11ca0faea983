use crate::interactions::closest_point_on_segment;
use crate::models::{Aabb, AabbExtent, Capsule, Obb, Sphere};
use crate::utils::{
    add_vectors, axis_component, cross_product, magnitude_squared, normalize_vector,
    scale_vector, subtract_vectors, with_axis_component, EPSILON,
};

/// Closest point on a solid axis-aligned box (given as center and half
/// extent) to `point`.
///
/// Points outside are clamped onto the surface. Points inside are snapped
/// to the nearest face: the axis with the smallest `extent - |delta|` wins,
/// ties going to x, then y, then z, and the face on the side of `delta` is
/// used (the max face when `delta` is zero).
fn closest_point_on_box(
    center: (f64, f64, f64),
    extent: (f64, f64, f64),
    point: (f64, f64, f64),
) -> (f64, f64, f64) {
    let delta = subtract_vectors(point, center);
    let inside = delta.0.abs() <= extent.0 && delta.1.abs() <= extent.1 && delta.2.abs() <= extent.2;

    if !inside {
        return (
            point.0.max(center.0 - extent.0).min(center.0 + extent.0),
            point.1.max(center.1 - extent.1).min(center.1 + extent.1),
            point.2.max(center.2 - extent.2).min(center.2 + extent.2),
        );
    }

    let mut face_axis = 0;
    let mut face_gap = f64::MAX;
    for axis in 0..3 {
        let gap = axis_component(extent, axis) - axis_component(delta, axis).abs();
        if gap < face_gap {
            face_gap = gap;
            face_axis = axis;
        }
    }

    let side = if axis_component(delta, face_axis) >= 0.0 { 1.0 } else { -1.0 };
    let face = axis_component(center, face_axis) + side * axis_component(extent, face_axis);
    with_axis_component(point, face_axis, face)
}

/// Closest point on `aabb` to `point`; inside points snap to the nearest face.
///
/// # Example
/// ```
/// use rs_collision::interactions::closest_point_on_aabb;
/// use rs_collision::models::Aabb;
///
/// let aabb = Aabb::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
///
/// // Outside: clamped
/// assert_eq!(closest_point_on_aabb(&aabb, (0.5, 3.0, 0.5)), (0.5, 1.0, 0.5));
/// // Inside: projected onto the nearest face
/// assert_eq!(closest_point_on_aabb(&aabb, (0.5, 0.9, 0.5)), (0.5, 1.0, 0.5));
/// ```
pub fn closest_point_on_aabb(aabb: &Aabb, point: (f64, f64, f64)) -> (f64, f64, f64) {
    closest_point_on_box(aabb.center(), aabb.half_extent(), point)
}

pub fn closest_point_on_aabb_extent(aabb: &AabbExtent, point: (f64, f64, f64)) -> (f64, f64, f64) {
    closest_point_on_box(aabb.center, aabb.extent, point)
}

/// Closest point on an oriented box, computed in the box's local frame.
pub fn closest_point_on_obb(obb: &Obb, point: (f64, f64, f64)) -> (f64, f64, f64) {
    let local = closest_point_on_box((0.0, 0.0, 0.0), obb.extent, obb.to_local(point));
    obb.to_world(local)
}

/// Point on the sphere's surface in the direction of `point`.
///
/// A point at the exact center maps to the surface along +x.
pub fn closest_point_on_sphere(sphere: &Sphere, point: (f64, f64, f64)) -> (f64, f64, f64) {
    let direction = normalize_vector(subtract_vectors(point, sphere.center)).unwrap_or((1.0, 0.0, 0.0));
    add_vectors(sphere.center, scale_vector(direction, sphere.radius))
}

/// Point on the capsule's surface nearest to `point`, measured from the
/// closest point of the core segment.
pub fn closest_point_on_capsule(capsule: &Capsule, point: (f64, f64, f64)) -> (f64, f64, f64) {
    let (core, _) = closest_point_on_segment(point, capsule.start, capsule.end);
    let direction = match normalize_vector(subtract_vectors(point, core)) {
        Ok(direction) => direction,
        Err(_) => perpendicular_to(subtract_vectors(capsule.end, capsule.start)),
    };
    add_vectors(core, scale_vector(direction, capsule.radius))
}

/// Some unit vector perpendicular to `axis`; +x for a zero axis.
fn perpendicular_to(axis: (f64, f64, f64)) -> (f64, f64, f64) {
    if magnitude_squared(axis) <= EPSILON {
        return (1.0, 0.0, 0.0);
    }
    let helper = if axis.0.abs() < 0.9 { (1.0, 0.0, 0.0) } else { (0.0, 1.0, 0.0) };
    normalize_vector(cross_product(axis, helper)).unwrap_or((1.0, 0.0, 0.0))
}
