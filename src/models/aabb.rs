use approx::AbsDiffEq;

use crate::utils::{add_vectors, is_finite_vector, scale_vector, subtract_vectors};

/// Axis-aligned bounding box stored as its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: (f64, f64, f64),
    pub max: (f64, f64, f64),
}

/// Axis-aligned box stored as a center and a half extent per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbExtent {
    pub center: (f64, f64, f64),
    pub extent: (f64, f64, f64),
}

impl Aabb {
    pub fn new(min: (f64, f64, f64), max: (f64, f64, f64)) -> Self {
        Aabb { min, max }
    }

    /// Center of the box, `(min + max) / 2`.
    pub fn center(&self) -> (f64, f64, f64) {
        scale_vector(add_vectors(self.min, self.max), 0.5)
    }

    /// Half extent of the box, `(max - min) / 2`.
    pub fn half_extent(&self) -> (f64, f64, f64) {
        scale_vector(subtract_vectors(self.max, self.min), 0.5)
    }

    /// Converts the box into its center/extent form.
    ///
    /// # Example
    /// ```
    /// use rs_collision::models::Aabb;
    ///
    /// let aabb = Aabb::new((0.0, 0.0, 0.0), (2.0, 4.0, 6.0));
    /// let extent = aabb.to_extent();
    ///
    /// assert_eq!(extent.center, (1.0, 2.0, 3.0));
    /// assert_eq!(extent.extent, (1.0, 2.0, 3.0));
    /// assert_eq!(extent.to_aabb(), aabb);
    /// ```
    pub fn to_extent(&self) -> AabbExtent {
        AabbExtent {
            center: self.center(),
            extent: self.half_extent(),
        }
    }

    pub fn translate(&mut self, offset: (f64, f64, f64)) {
        self.min = add_vectors(self.min, offset);
        self.max = add_vectors(self.max, offset);
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, point: (f64, f64, f64)) -> bool {
        point.0 >= self.min.0 && point.0 <= self.max.0 &&
            point.1 >= self.min.1 && point.1 <= self.max.1 &&
            point.2 >= self.min.2 && point.2 <= self.max.2
    }

    /// Returns an error message when the box has non-finite corners or
    /// `min > max` on some axis.
    pub fn validate(&self) -> Result<(), String> {
        if !is_finite_vector(self.min) || !is_finite_vector(self.max) {
            return Err("AABB corners must be finite".to_string());
        }
        if self.min.0 > self.max.0 || self.min.1 > self.max.1 || self.min.2 > self.max.2 {
            return Err(format!("AABB min {:?} exceeds max {:?}", self.min, self.max));
        }
        Ok(())
    }
}

impl AabbExtent {
    pub fn new(center: (f64, f64, f64), extent: (f64, f64, f64)) -> Self {
        AabbExtent { center, extent }
    }

    /// Converts the box into its min/max form. Exact inverse of
    /// [`Aabb::to_extent`] up to floating-point rounding.
    pub fn to_aabb(&self) -> Aabb {
        Aabb {
            min: subtract_vectors(self.center, self.extent),
            max: add_vectors(self.center, self.extent),
        }
    }

    pub fn translate(&mut self, offset: (f64, f64, f64)) {
        self.center = add_vectors(self.center, offset);
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_finite_vector(self.center) || !is_finite_vector(self.extent) {
            return Err("AABB extent values must be finite".to_string());
        }
        if self.extent.0 < 0.0 || self.extent.1 < 0.0 || self.extent.2 < 0.0 {
            return Err(format!("AABB extent {:?} has a negative axis", self.extent));
        }
        Ok(())
    }
}

impl From<Aabb> for AabbExtent {
    fn from(aabb: Aabb) -> Self {
        aabb.to_extent()
    }
}

impl From<AabbExtent> for Aabb {
    fn from(extent: AabbExtent) -> Self {
        extent.to_aabb()
    }
}

fn vectors_abs_diff_eq(a: (f64, f64, f64), b: (f64, f64, f64), epsilon: f64) -> bool {
    a.0.abs_diff_eq(&b.0, epsilon) && a.1.abs_diff_eq(&b.1, epsilon) && a.2.abs_diff_eq(&b.2, epsilon)
}

impl AbsDiffEq for Aabb {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        vectors_abs_diff_eq(self.min, other.min, epsilon) && vectors_abs_diff_eq(self.max, other.max, epsilon)
    }
}

impl AbsDiffEq for AabbExtent {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        vectors_abs_diff_eq(self.center, other.center, epsilon) &&
            vectors_abs_diff_eq(self.extent, other.extent, epsilon)
    }
}
