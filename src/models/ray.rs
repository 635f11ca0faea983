use crate::utils::{add_vectors, normalize_vector, scale_vector};

/// A half-line with a unit direction, so ray parameters are distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: (f64, f64, f64),
    pub direction: (f64, f64, f64),
}

impl Ray {
    /// Creates a ray; the direction is normalized.
    ///
    /// # Errors
    /// Returns an error if `direction` is the zero vector.
    pub fn new(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Result<Self, &'static str> {
        Ok(Ray {
            origin,
            direction: normalize_vector(direction)?,
        })
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f64) -> (f64, f64, f64) {
        add_vectors(self.origin, scale_vector(self.direction, t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: (f64, f64, f64),
    pub b: (f64, f64, f64),
    pub c: (f64, f64, f64),
}

impl Triangle {
    pub fn new(a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)) -> Self {
        Triangle { a, b, c }
    }
}
