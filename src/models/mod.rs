mod aabb;
mod capsule;
mod obb;
mod quaternion;
mod ray;
mod shape;
mod sphere;

pub use aabb::*;
pub use capsule::*;
pub use obb::*;
pub use quaternion::*;
pub use ray::*;
pub use shape::*;
pub use sphere::*;
