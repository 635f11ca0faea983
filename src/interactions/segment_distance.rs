use crate::utils::{add_vectors, distance_squared, dot_product, scale_vector, subtract_vectors, EPSILON};

/// Result of a closest-points query between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentClosest {
    /// Squared distance between `point1` and `point2`
    pub distance_squared: f64,
    /// Parameter of `point1` along the first segment, in [0, 1]
    pub s: f64,
    /// Parameter of `point2` along the second segment, in [0, 1]
    pub t: f64,
    pub point1: (f64, f64, f64),
    pub point2: (f64, f64, f64),
}

/// Closest point to `point` on the segment `start..end`, with its parameter in [0, 1].
///
/// A zero-length segment returns `start`.
pub fn closest_point_on_segment(
    point: (f64, f64, f64),
    start: (f64, f64, f64),
    end: (f64, f64, f64),
) -> ((f64, f64, f64), f64) {
    let direction = subtract_vectors(end, start);
    let length_squared = dot_product(direction, direction);

    if length_squared <= EPSILON {
        return (start, 0.0);
    }

    let t = (dot_product(subtract_vectors(point, start), direction) / length_squared).clamp(0.0, 1.0);
    (add_vectors(start, scale_vector(direction, t)), t)
}

/// Computes the closest points between segments `p1..q1` and `p2..q2`.
///
/// Either segment may be degenerate (a point); both being points reduces
/// to a point-point distance.
///
/// # Example
/// ```
/// use rs_collision::interactions::closest_points_between_segments;
///
/// // Two crossing segments one unit apart along z
/// let closest = closest_points_between_segments(
///     (-1.0, 0.0, 0.0), (1.0, 0.0, 0.0),
///     (0.0, -1.0, 1.0), (0.0, 1.0, 1.0),
/// );
///
/// assert!((closest.distance_squared - 1.0).abs() < 1e-12);
/// assert_eq!(closest.point1, (0.0, 0.0, 0.0));
/// assert_eq!(closest.point2, (0.0, 0.0, 1.0));
/// ```
pub fn closest_points_between_segments(
    p1: (f64, f64, f64),
    q1: (f64, f64, f64),
    p2: (f64, f64, f64),
    q2: (f64, f64, f64),
) -> SegmentClosest {
    let d1 = subtract_vectors(q1, p1);
    let d2 = subtract_vectors(q2, p2);
    let r = subtract_vectors(p1, p2);
    let a = dot_product(d1, d1);
    let e = dot_product(d2, d2);
    let f = dot_product(d2, r);

    // Both segments degenerate into points
    if a <= EPSILON && e <= EPSILON {
        return SegmentClosest {
            distance_squared: distance_squared(p1, p2),
            s: 0.0,
            t: 0.0,
            point1: p1,
            point2: p2,
        };
    }

    let (s, t) = if a <= EPSILON {
        // First segment is a point
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = dot_product(d1, r);
        if e <= EPSILON {
            // Second segment is a point
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = dot_product(d1, d2);
            let denom = a * e - b * b;

            // Parallel segments: pick s = 0 and let t follow
            let mut s = if denom != 0.0 {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;

            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    let point1 = add_vectors(p1, scale_vector(d1, s));
    let point2 = add_vectors(p2, scale_vector(d2, t));

    SegmentClosest {
        distance_squared: distance_squared(point1, point2),
        s,
        t,
        point1,
        point2,
    }
}
