use crate::models::{Aabb, AabbExtent, Obb, Ray, Sphere, Triangle};
use crate::utils::{
    add_vectors, axis_component, cross_product, dot_product, subtract_vectors, EPSILON,
};

/// Slab test of the parametric line `origin + t * direction` against the box
/// `[min, max]` for `t` in `[0, t_limit]`. Returns the entry parameter.
fn slab_entry(
    origin: (f64, f64, f64),
    direction: (f64, f64, f64),
    min: (f64, f64, f64),
    max: (f64, f64, f64),
    t_limit: f64,
) -> Option<f64> {
    let mut t_min: f64 = 0.0;
    let mut t_max = t_limit;

    for axis in 0..3 {
        let o = axis_component(origin, axis);
        let d = axis_component(direction, axis);
        let lo = axis_component(min, axis);
        let hi = axis_component(max, axis);

        if d.abs() < EPSILON {
            // Parallel to the slab: miss unless the origin lies within it
            if o < lo || o > hi {
                return None;
            }
        } else {
            let inverse = 1.0 / d;
            let mut t1 = (lo - o) * inverse;
            let mut t2 = (hi - o) * inverse;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }
    }

    Some(t_min)
}

/// Intersects a ray with an AABB using the slab method.
///
/// Returns the entry distance and point. A ray starting inside the box hits
/// at distance 0.
///
/// # Example
/// ```
/// use rs_collision::interactions::ray_intersects_aabb;
/// use rs_collision::models::{Aabb, Ray};
///
/// let aabb = Aabb::new((-1.0, -1.0, -1.0), (1.0, 1.0, 1.0));
/// let ray = Ray::new((-5.0, 0.0, 0.0), (1.0, 0.0, 0.0)).unwrap();
///
/// let (t, point) = ray_intersects_aabb(&ray, &aabb).unwrap();
/// assert_eq!(t, 4.0);
/// assert_eq!(point, (-1.0, 0.0, 0.0));
/// ```
pub fn ray_intersects_aabb(ray: &Ray, aabb: &Aabb) -> Option<(f64, (f64, f64, f64))> {
    let t = slab_entry(ray.origin, ray.direction, aabb.min, aabb.max, f64::INFINITY)?;
    Some((t, ray.point_at(t)))
}

pub fn ray_intersects_aabb_extent(ray: &Ray, aabb: &AabbExtent) -> Option<(f64, (f64, f64, f64))> {
    ray_intersects_aabb(ray, &aabb.to_aabb())
}

/// Slab test in the box's local frame; the hit point is returned in world space.
pub fn ray_intersects_obb(ray: &Ray, obb: &Obb) -> Option<(f64, (f64, f64, f64))> {
    let origin = obb.to_local(ray.origin);
    let direction = obb.direction_to_local(ray.direction);
    let extent = obb.extent;
    let min = (-extent.0, -extent.1, -extent.2);

    let t = slab_entry(origin, direction, min, extent, f64::INFINITY)?;
    Some((t, ray.point_at(t)))
}

/// Nearest non-negative intersection of a ray with a solid sphere.
pub fn ray_intersects_sphere(ray: &Ray, sphere: &Sphere) -> Option<(f64, (f64, f64, f64))> {
    let oc = subtract_vectors(ray.origin, sphere.center);
    let b = dot_product(oc, ray.direction);
    let c = dot_product(oc, oc) - sphere.radius * sphere.radius;

    // Origin outside and pointing away
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()).max(0.0);
    Some((t, ray.point_at(t)))
}

/// Intersects a ray with a triangle: first with the triangle's plane, then a
/// barycentric inside test of the plane hit.
///
/// Rays parallel to the plane and degenerate triangles never hit.
///
/// # Example
/// ```
/// use rs_collision::interactions::ray_intersects_triangle;
/// use rs_collision::models::{Ray, Triangle};
///
/// let triangle = Triangle::new((0.0, 0.0, 0.0), (2.0, 0.0, 0.0), (0.0, 2.0, 0.0));
/// let ray = Ray::new((0.5, 0.5, 3.0), (0.0, 0.0, -1.0)).unwrap();
///
/// let (t, point) = ray_intersects_triangle(&ray, &triangle).unwrap();
/// assert_eq!(t, 3.0);
/// assert_eq!(point, (0.5, 0.5, 0.0));
/// ```
pub fn ray_intersects_triangle(ray: &Ray, triangle: &Triangle) -> Option<(f64, (f64, f64, f64))> {
    let ab = subtract_vectors(triangle.b, triangle.a);
    let ac = subtract_vectors(triangle.c, triangle.a);
    let normal = cross_product(ab, ac);

    let denom = dot_product(normal, ray.direction);
    if denom.abs() < EPSILON {
        return None;
    }

    let t = dot_product(normal, subtract_vectors(triangle.a, ray.origin)) / denom;
    if t < 0.0 {
        return None;
    }
    let point = ray.point_at(t);

    // Barycentric coordinates of the plane hit
    let ap = subtract_vectors(point, triangle.a);
    let d00 = dot_product(ab, ab);
    let d01 = dot_product(ab, ac);
    let d11 = dot_product(ac, ac);
    let d20 = dot_product(ap, ab);
    let d21 = dot_product(ap, ac);
    let bary_denom = d00 * d11 - d01 * d01;
    if bary_denom.abs() < EPSILON {
        return None;
    }

    let v = (d11 * d20 - d01 * d21) / bary_denom;
    let w = (d00 * d21 - d01 * d20) / bary_denom;
    let u = 1.0 - v - w;

    if u >= 0.0 && v >= 0.0 && w >= 0.0 {
        Some((t, point))
    } else {
        None
    }
}

/// Whether the segment `start..end` touches the box.
pub fn segment_intersects_aabb_extent(
    start: (f64, f64, f64),
    end: (f64, f64, f64),
    aabb: &AabbExtent,
) -> bool {
    let min = subtract_vectors(aabb.center, aabb.extent);
    let max = add_vectors(aabb.center, aabb.extent);
    let direction = subtract_vectors(end, start);

    slab_entry(start, direction, min, max, 1.0).is_some()
}

