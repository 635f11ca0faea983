use crate::interactions::{closest_point_on_segment, closest_points_between_segments, segment_intersects_aabb_extent};
use crate::models::{Aabb, AabbExtent, Capsule, Obb, Plane, Sphere};
use crate::utils::{
    add_vectors, axis_component, distance_squared, dot_product, subtract_vectors,
    with_axis_component, EPSILON, TANGENCY_BIAS,
};

/// Whether the segments/spheres at squared distance `distance_squared` with
/// radii summing to `radius_sum` touch, including the tangency slack.
fn within_radius_sum(distance_squared: f64, radius_sum: f64) -> bool {
    distance_squared <= radius_sum * radius_sum + TANGENCY_BIAS
}

fn to_array(v: (f64, f64, f64)) -> [f64; 3] {
    [v.0, v.1, v.2]
}

/// Inclusive slab-overlap test of two AABBs.
///
/// # Example
/// ```
/// use rs_collision::interactions::aabb_intersects_aabb;
/// use rs_collision::models::Aabb;
///
/// let a = Aabb::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));
/// let b = Aabb::new((1.0, 0.5, 0.5), (2.0, 2.0, 2.0));
/// let c = Aabb::new((1.5, 0.0, 0.0), (2.0, 1.0, 1.0));
///
/// assert!(aabb_intersects_aabb(&a, &b)); // touching faces count
/// assert!(!aabb_intersects_aabb(&a, &c));
/// ```
pub fn aabb_intersects_aabb(a: &Aabb, b: &Aabb) -> bool {
    a.min.0 <= b.max.0 && a.max.0 >= b.min.0 &&
        a.min.1 <= b.max.1 && a.max.1 >= b.min.1 &&
        a.min.2 <= b.max.2 && a.max.2 >= b.min.2
}

pub fn aabb_intersects_aabb_extent(a: &Aabb, b: &AabbExtent) -> bool {
    aabb_intersects_aabb(a, &b.to_aabb())
}

/// Promotes the AABB to an identity-oriented OBB and runs the SAT test.
pub fn aabb_intersects_obb(a: &Aabb, b: &Obb) -> bool {
    obb_intersects_obb(&Obb::from_aabb_extent(&a.to_extent()), b)
}

pub fn aabb_intersects_sphere(a: &Aabb, b: &Sphere) -> bool {
    aabb_extent_intersects_sphere(&a.to_extent(), b)
}

pub fn aabb_intersects_capsule(a: &Aabb, b: &Capsule) -> bool {
    aabb_extent_intersects_capsule(&a.to_extent(), b)
}

pub fn aabb_extent_intersects_aabb_extent(a: &AabbExtent, b: &AabbExtent) -> bool {
    let d = subtract_vectors(a.center, b.center);
    d.0.abs() <= a.extent.0 + b.extent.0 &&
        d.1.abs() <= a.extent.1 + b.extent.1 &&
        d.2.abs() <= a.extent.2 + b.extent.2
}

/// Exact box/sphere test: the clamped sphere center must lie within the radius.
pub fn aabb_extent_intersects_sphere(a: &AabbExtent, b: &Sphere) -> bool {
    // max/min rather than clamp: an inverted box must not panic
    let clamped = (
        b.center.0.max(a.center.0 - a.extent.0).min(a.center.0 + a.extent.0),
        b.center.1.max(a.center.1 - a.extent.1).min(a.center.1 + a.extent.1),
        b.center.2.max(a.center.2 - a.extent.2).min(a.center.2 + a.extent.2),
    );
    distance_squared(clamped, b.center) <= b.radius * b.radius
}

pub fn aabb_extent_intersects_obb(a: &AabbExtent, b: &Obb) -> bool {
    obb_intersects_obb(&Obb::from_aabb_extent(a), b)
}

/// Capsule enclosing the box: its core runs along the box's longest axis and
/// its radius covers the two shorter half extents.
pub fn bounding_capsule(a: &AabbExtent) -> Capsule {
    let mut long_axis = 0;
    for axis in 1..3 {
        if axis_component(a.extent, axis) > axis_component(a.extent, long_axis) {
            long_axis = axis;
        }
    }

    let half_length = axis_component(a.extent, long_axis);
    let flat = with_axis_component(a.extent, long_axis, 0.0);
    let radius = (flat.0 * flat.0 + flat.1 * flat.1 + flat.2 * flat.2).sqrt();
    let offset = with_axis_component((0.0, 0.0, 0.0), long_axis, half_length);

    Capsule {
        start: subtract_vectors(a.center, offset),
        end: add_vectors(a.center, offset),
        radius,
    }
}

/// Box/capsule test.
///
/// Rejects through the box's enclosing capsule, then accepts when either end
/// sphere touches the box or the core segment crosses it. Every remaining
/// case reports an intersection; see the pinned tests for this fallback.
pub fn aabb_extent_intersects_capsule(a: &AabbExtent, b: &Capsule) -> bool {
    if !capsule_intersects_capsule(&bounding_capsule(a), b) {
        return false;
    }

    if aabb_extent_intersects_sphere(a, &Sphere::new(b.start, b.radius)) ||
        aabb_extent_intersects_sphere(a, &Sphere::new(b.end, b.radius)) {
        return true;
    }

    if segment_intersects_aabb_extent(b.start, b.end, a) {
        return true;
    }

    // Neither exact test accepted: the enclosing-capsule overlap decides
    true
}

/// Separating axis test between two oriented boxes.
///
/// Tests the three face axes of each box and the nine pairwise edge cross
/// products. An epsilon on the absolute rotation terms keeps near-parallel
/// edges (whose cross product degenerates) from producing false separations.
///
/// # Example
/// ```
/// use rs_collision::interactions::obb_intersects_obb;
/// use rs_collision::models::{Obb, Quaternion};
/// use std::f64::consts::FRAC_PI_4;
///
/// let a = Obb::from_rotation((0.0, 0.0, 0.0), (1.0, 1.0, 1.0), Quaternion::identity());
/// let rotated = Quaternion::from_axis_angle((0.0, 0.0, 1.0), FRAC_PI_4);
///
/// // A cube turned 45° reaches sqrt(2) along x
/// let near = Obb::from_rotation((2.3, 0.0, 0.0), (1.0, 1.0, 1.0), rotated);
/// let far = Obb::from_rotation((2.5, 0.0, 0.0), (1.0, 1.0, 1.0), rotated);
///
/// assert!(obb_intersects_obb(&a, &near));
/// assert!(!obb_intersects_obb(&a, &far));
/// ```
pub fn obb_intersects_obb(a: &Obb, b: &Obb) -> bool {
    let ae = to_array(a.extent);
    let be = to_array(b.extent);

    // Rotation of b expressed in a's frame
    let mut r = [[0.0; 3]; 3];
    let mut abs_r = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            r[i][j] = dot_product(a.axes[i], b.axes[j]);
            abs_r[i][j] = r[i][j].abs() + EPSILON;
        }
    }

    // Translation in a's frame
    let d = subtract_vectors(b.center, a.center);
    let t = [dot_product(d, a.axes[0]), dot_product(d, a.axes[1]), dot_product(d, a.axes[2])];

    // Face axes of a
    for i in 0..3 {
        let ra = ae[i];
        let rb = be[0] * abs_r[i][0] + be[1] * abs_r[i][1] + be[2] * abs_r[i][2];
        if t[i].abs() > ra + rb {
            return false;
        }
    }

    // Face axes of b
    for j in 0..3 {
        let ra = ae[0] * abs_r[0][j] + ae[1] * abs_r[1][j] + ae[2] * abs_r[2][j];
        let rb = be[j];
        let projection = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
        if projection.abs() > ra + rb {
            return false;
        }
    }

    // Edge cross products a[i] x b[j]
    for i in 0..3 {
        let i1 = (i + 1) % 3;
        let i2 = (i + 2) % 3;
        for j in 0..3 {
            let j1 = (j + 1) % 3;
            let j2 = (j + 2) % 3;
            let ra = ae[i1] * abs_r[i2][j] + ae[i2] * abs_r[i1][j];
            let rb = be[j1] * abs_r[i][j2] + be[j2] * abs_r[i][j1];
            let projection = t[i2] * r[i1][j] - t[i1] * r[i2][j];
            if projection.abs() > ra + rb {
                return false;
            }
        }
    }

    true
}

/// Sphere against an oriented box, tested in the box's local frame.
pub fn obb_intersects_sphere(a: &Obb, b: &Sphere) -> bool {
    aabb_extent_intersects_sphere(&a.local_extent(), &Sphere::new(a.to_local(b.center), b.radius))
}

/// Capsule against an oriented box, tested in the box's local frame.
pub fn obb_intersects_capsule(a: &Obb, b: &Capsule) -> bool {
    let local = Capsule::new(a.to_local(b.start), a.to_local(b.end), b.radius);
    aabb_extent_intersects_capsule(&a.local_extent(), &local)
}

/// Sphere/sphere test with the tangency slack.
///
/// # Example
/// ```
/// use rs_collision::interactions::sphere_intersects_sphere;
/// use rs_collision::models::Sphere;
///
/// let a = Sphere::new((0.0, 0.0, 0.0), 1.0);
/// let touching = Sphere::new((2.0, 0.0, 0.0), 1.0);
/// let far = Sphere::new((10.0, 0.0, 0.0), 1.0);
///
/// assert!(sphere_intersects_sphere(&a, &touching));
/// assert!(!sphere_intersects_sphere(&a, &far));
/// ```
pub fn sphere_intersects_sphere(a: &Sphere, b: &Sphere) -> bool {
    within_radius_sum(distance_squared(a.center, b.center), a.radius + b.radius)
}

pub fn sphere_intersects_capsule(a: &Sphere, b: &Capsule) -> bool {
    let (closest, _) = closest_point_on_segment(a.center, b.start, b.end);
    within_radius_sum(distance_squared(a.center, closest), a.radius + b.radius)
}

/// Whether the sphere touches or straddles the plane.
pub fn sphere_intersects_plane(a: &Sphere, plane: &Plane) -> bool {
    plane.signed_distance(a.center).abs() <= a.radius
}

pub fn capsule_intersects_capsule(a: &Capsule, b: &Capsule) -> bool {
    let closest = closest_points_between_segments(a.start, a.end, b.start, b.end);
    within_radius_sum(closest.distance_squared, a.radius + b.radius)
}
