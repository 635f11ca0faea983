use crate::utils::{add_vectors, is_finite_vector, scale_vector};

/// Sphere swept along the segment `start..end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub start: (f64, f64, f64),
    pub end: (f64, f64, f64),
    pub radius: f64,
}

impl Capsule {
    pub fn new(start: (f64, f64, f64), end: (f64, f64, f64), radius: f64) -> Self {
        Capsule { start, end, radius }
    }

    /// Midpoint of the core segment
    pub fn center(&self) -> (f64, f64, f64) {
        scale_vector(add_vectors(self.start, self.end), 0.5)
    }

    pub fn translate(&mut self, offset: (f64, f64, f64)) {
        self.start = add_vectors(self.start, offset);
        self.end = add_vectors(self.end, offset);
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_finite_vector(self.start) || !is_finite_vector(self.end) || !self.radius.is_finite() {
            return Err("capsule endpoints and radius must be finite".to_string());
        }
        if self.radius < 0.0 {
            return Err(format!("capsule radius {} is negative", self.radius));
        }
        Ok(())
    }
}
