use crate::models::{AabbExtent, Quaternion};
use crate::utils::{add_vectors, dot_product, is_finite_vector, scale_vector, subtract_vectors};

/// Oriented bounding box: a center/extent box plus three orthonormal axes.
///
/// `extent.0` is measured along `axes[0]`, `extent.1` along `axes[1]` and
/// `extent.2` along `axes[2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    pub center: (f64, f64, f64),
    pub extent: (f64, f64, f64),
    pub axes: [(f64, f64, f64); 3],
}

impl Obb {
    pub fn new(center: (f64, f64, f64), extent: (f64, f64, f64), axes: [(f64, f64, f64); 3]) -> Self {
        Obb { center, extent, axes }
    }

    /// Creates a box whose local axes are `orientation` applied to the world axes.
    ///
    /// # Example
    /// ```
    /// use rs_collision::models::{Obb, Quaternion};
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let obb = Obb::from_rotation((0.0, 0.0, 0.0), (2.0, 1.0, 1.0),
    ///     Quaternion::from_axis_angle((0.0, 0.0, 1.0), FRAC_PI_2));
    ///
    /// // The long local x axis now points along world y
    /// assert!((obb.axes[0].1 - 1.0).abs() < 1e-10);
    /// ```
    pub fn from_rotation(center: (f64, f64, f64), extent: (f64, f64, f64), orientation: Quaternion) -> Self {
        Obb {
            center,
            extent,
            axes: orientation.to_axes(),
        }
    }

    /// An OBB with identity orientation covering the same volume.
    pub fn from_aabb_extent(aabb: &AabbExtent) -> Self {
        Obb {
            center: aabb.center,
            extent: aabb.extent,
            axes: [(1.0, 0.0, 0.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0)],
        }
    }

    /// Expresses a world-space point in the box's local frame, relative to its center.
    pub fn to_local(&self, point: (f64, f64, f64)) -> (f64, f64, f64) {
        let d = subtract_vectors(point, self.center);
        (
            dot_product(d, self.axes[0]),
            dot_product(d, self.axes[1]),
            dot_product(d, self.axes[2]),
        )
    }

    /// Inverse of [`Obb::to_local`].
    pub fn to_world(&self, local: (f64, f64, f64)) -> (f64, f64, f64) {
        let mut point = self.center;
        point = add_vectors(point, scale_vector(self.axes[0], local.0));
        point = add_vectors(point, scale_vector(self.axes[1], local.1));
        add_vectors(point, scale_vector(self.axes[2], local.2))
    }

    /// Rotates a world-space direction into the local frame (no translation).
    pub fn direction_to_local(&self, direction: (f64, f64, f64)) -> (f64, f64, f64) {
        (
            dot_product(direction, self.axes[0]),
            dot_product(direction, self.axes[1]),
            dot_product(direction, self.axes[2]),
        )
    }

    /// The box as an axis-aligned extent in its own local frame (centered at the origin).
    pub fn local_extent(&self) -> AabbExtent {
        AabbExtent::new((0.0, 0.0, 0.0), self.extent)
    }

    pub fn translate(&mut self, offset: (f64, f64, f64)) {
        self.center = add_vectors(self.center, offset);
    }

    pub fn validate(&self) -> Result<(), String> {
        if !is_finite_vector(self.center) || !is_finite_vector(self.extent) {
            return Err("OBB center and extent must be finite".to_string());
        }
        if self.extent.0 < 0.0 || self.extent.1 < 0.0 || self.extent.2 < 0.0 {
            return Err(format!("OBB extent {:?} has a negative axis", self.extent));
        }
        if self.axes.iter().any(|axis| !is_finite_vector(*axis)) {
            return Err("OBB axes must be finite".to_string());
        }
        Ok(())
    }
}
