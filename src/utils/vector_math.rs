// src/utils/vector_math.rs

/// Calculates the cross product of two 3D vectors.
///
/// # Arguments
/// * `v1` - The first vector as a tuple (x, y, z).
/// * `v2` - The second vector as a tuple (x, y, z).
///
/// # Returns
/// The cross product vector as a tuple (x, y, z).
///
/// # Example
/// ```
/// use rs_collision::utils::cross_product;
///
/// let v1 = (1.0, 0.0, 0.0);
/// let v2 = (0.0, 1.0, 0.0);
/// let result = cross_product(v1, v2);
///
/// assert_eq!(result, (0.0, 0.0, 1.0));
/// ```
pub fn cross_product(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> (f64, f64, f64) {
    (
        v1.1 * v2.2 - v1.2 * v2.1,
        v1.2 * v2.0 - v1.0 * v2.2,
        v1.0 * v2.1 - v1.1 * v2.0
    )
}

/// Calculates the dot product of two 3D vectors.
///
/// # Example
/// ```
/// use rs_collision::utils::dot_product;
///
/// let v1 = (1.0, 2.0, 3.0);
/// let v2 = (4.0, 5.0, 6.0);
///
/// assert_eq!(dot_product(v1, v2), 32.0); // 1*4 + 2*5 + 3*6 = 32
/// ```
pub fn dot_product(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> f64 {
    v1.0 * v2.0 + v1.1 * v2.1 + v1.2 * v2.2
}

/// Calculates the magnitude (length) of a 3D vector.
///
/// # Example
/// ```
/// use rs_collision::utils::vector_magnitude;
///
/// let magnitude = vector_magnitude((3.0, 4.0, 5.0));
/// assert!((magnitude - 7.0710678118654755).abs() < 1e-10);
/// ```
pub fn vector_magnitude(v: (f64, f64, f64)) -> f64 {
    magnitude_squared(v).sqrt()
}

/// Squared magnitude of a 3D vector. Cheaper than [`vector_magnitude`] when
/// only comparisons are needed.
pub fn magnitude_squared(v: (f64, f64, f64)) -> f64 {
    v.0 * v.0 + v.1 * v.1 + v.2 * v.2
}

/// Normalizes a 3D vector (makes it a unit vector).
///
/// # Errors
/// Returns an error if the input is a zero vector.
///
/// # Example
/// ```
/// use rs_collision::utils::normalize_vector;
///
/// let normalized = normalize_vector((3.0, 0.0, 4.0)).unwrap();
///
/// assert!((normalized.0 - 0.6).abs() < 1e-10);
/// assert!((normalized.1 - 0.0).abs() < 1e-10);
/// assert!((normalized.2 - 0.8).abs() < 1e-10);
/// ```
pub fn normalize_vector(v: (f64, f64, f64)) -> Result<(f64, f64, f64), &'static str> {
    let magnitude = vector_magnitude(v);

    if magnitude == 0.0 {
        return Err("Cannot normalize a zero vector");
    }

    Ok((v.0 / magnitude, v.1 / magnitude, v.2 / magnitude))
}

pub fn add_vectors(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> (f64, f64, f64) {
    (v1.0 + v2.0, v1.1 + v2.1, v1.2 + v2.2)
}

pub fn subtract_vectors(v1: (f64, f64, f64), v2: (f64, f64, f64)) -> (f64, f64, f64) {
    (v1.0 - v2.0, v1.1 - v2.1, v1.2 - v2.2)
}

pub fn scale_vector(v: (f64, f64, f64), factor: f64) -> (f64, f64, f64) {
    (v.0 * factor, v.1 * factor, v.2 * factor)
}

pub fn negate_vector(v: (f64, f64, f64)) -> (f64, f64, f64) {
    (-v.0, -v.1, -v.2)
}

/// Component-wise absolute value.
pub fn abs_vector(v: (f64, f64, f64)) -> (f64, f64, f64) {
    (v.0.abs(), v.1.abs(), v.2.abs())
}

/// Squared distance between two points.
///
/// # Example
/// ```
/// use rs_collision::utils::distance_squared;
///
/// assert_eq!(distance_squared((1.0, 2.0, 3.0), (1.0, 2.0, 5.0)), 4.0);
/// ```
pub fn distance_squared(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    magnitude_squared(subtract_vectors(a, b))
}

pub fn distance(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Returns the component of `v` along axis `axis` (0 = x, 1 = y, 2 = z).
///
/// # Panics
/// Panics if `axis` is greater than 2.
pub fn axis_component(v: (f64, f64, f64), axis: usize) -> f64 {
    match axis {
        0 => v.0,
        1 => v.1,
        2 => v.2,
        _ => panic!("axis index {} out of range", axis),
    }
}

/// Returns a copy of `v` with the component along `axis` replaced by `value`.
///
/// # Panics
/// Panics if `axis` is greater than 2.
pub fn with_axis_component(v: (f64, f64, f64), axis: usize, value: f64) -> (f64, f64, f64) {
    match axis {
        0 => (value, v.1, v.2),
        1 => (v.0, value, v.2),
        2 => (v.0, v.1, value),
        _ => panic!("axis index {} out of range", axis),
    }
}

pub fn is_zero_vector(v: (f64, f64, f64)) -> bool {
    v.0 == 0.0 && v.1 == 0.0 && v.2 == 0.0
}

pub fn is_finite_vector(v: (f64, f64, f64)) -> bool {
    v.0.is_finite() && v.1.is_finite() && v.2.is_finite()
}
