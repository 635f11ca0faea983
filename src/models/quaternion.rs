use crate::utils::{add_vectors, normalize_vector, scale_vector};

/// Rotation used to orient boxes. Constructors return unit quaternions; the
/// rotation helpers normalize first, so a drifted value still rotates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub fn identity() -> Self {
        Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// A zero-length axis yields the identity.
    ///
    /// # Example
    /// ```
    /// use rs_collision::models::Quaternion;
    /// use std::f64::consts::PI;
    ///
    /// let half_turn = Quaternion::from_axis_angle((0.0, 0.0, 2.0), PI);
    /// let (x, y, _) = half_turn.rotate_point((1.0, 0.0, 0.0));
    /// assert!((x + 1.0).abs() < 1e-12 && y.abs() < 1e-12);
    /// ```
    pub fn from_axis_angle(axis: (f64, f64, f64), angle: f64) -> Self {
        let unit = match normalize_vector(axis) {
            Ok(unit) => unit,
            Err(_) => return Quaternion::identity(),
        };

        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        Quaternion {
            w: cos_half,
            x: unit.0 * sin_half,
            y: unit.1 * sin_half,
            z: unit.2 * sin_half,
        }
    }

    /// Rotation from roll (x), pitch (y) and yaw (z), applied yaw first.
    pub fn from_euler(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();

        Quaternion {
            w: cr * cp * cy + sr * sp * sy,
            x: sr * cp * cy - cr * sp * sy,
            y: cr * sp * cy + sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
        }
    }

    /// Unit-length copy; a zero quaternion becomes the identity.
    pub fn normalized(&self) -> Self {
        let norm = (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if norm < 1e-10 {
            return Quaternion::identity();
        }
        Quaternion {
            w: self.w / norm,
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
        }
    }

    /// The rotated x, y and z unit axes, i.e. the columns of the rotation
    /// matrix. They form a right-handed orthonormal basis.
    pub fn to_axes(&self) -> [(f64, f64, f64); 3] {
        let Quaternion { w, x, y, z } = self.normalized();
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        [
            (1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy)),
            (2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx)),
            (2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy)),
        ]
    }

    pub fn rotate_point(&self, point: (f64, f64, f64)) -> (f64, f64, f64) {
        let [ax, ay, az] = self.to_axes();
        add_vectors(
            add_vectors(scale_vector(ax, point.0), scale_vector(ay, point.1)),
            scale_vector(az, point.2),
        )
    }
}
