use crate::utils::{add_vectors, dot_product, is_finite_vector, normalize_vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: (f64, f64, f64),
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: (f64, f64, f64), radius: f64) -> Self {
        Sphere { center, radius }
    }

    pub fn translate(&mut self, offset: (f64, f64, f64)) {
        self.center = add_vectors(self.center, offset);
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_finite_vector(self.center) || !self.radius.is_finite() {
            return Err("sphere center and radius must be finite".to_string());
        }
        if self.radius < 0.0 {
            return Err(format!("sphere radius {} is negative", self.radius));
        }
        Ok(())
    }
}

/// Axis-aligned ellipsoid. Worlds accept ellipses but no intersection
/// routine exists for them, so they never collide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: (f64, f64, f64),
    pub radii: (f64, f64, f64),
}

impl Ellipse {
    pub fn new(center: (f64, f64, f64), radii: (f64, f64, f64)) -> Self {
        Ellipse { center, radii }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_finite_vector(self.center) || !is_finite_vector(self.radii) {
            return Err("ellipse center and radii must be finite".to_string());
        }
        if self.radii.0 < 0.0 || self.radii.1 < 0.0 || self.radii.2 < 0.0 {
            return Err(format!("ellipse radii {:?} has a negative axis", self.radii));
        }
        Ok(())
    }
}

/// Plane `dot(normal, p) = distance` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: (f64, f64, f64),
    pub distance: f64,
}

impl Plane {
    /// Plane through `point` with the given normal. The normal is normalized.
    ///
    /// # Errors
    /// Returns an error if the normal is the zero vector.
    ///
    /// # Example
    /// ```
    /// use rs_collision::models::Plane;
    ///
    /// let ground = Plane::from_point_normal((0.0, 2.0, 0.0), (0.0, 5.0, 0.0)).unwrap();
    /// assert_eq!(ground.normal, (0.0, 1.0, 0.0));
    /// assert_eq!(ground.distance, 2.0);
    /// ```
    pub fn from_point_normal(point: (f64, f64, f64), normal: (f64, f64, f64)) -> Result<Self, &'static str> {
        let normal = normalize_vector(normal)?;
        Ok(Plane {
            normal,
            distance: dot_product(normal, point),
        })
    }

    /// Signed distance from the plane, positive on the side the normal points to.
    pub fn signed_distance(&self, point: (f64, f64, f64)) -> f64 {
        dot_product(self.normal, point) - self.distance
    }
}
