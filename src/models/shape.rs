use std::fmt;

use crate::models::{Aabb, AabbExtent, Capsule, Ellipse, Obb, Sphere};
use crate::utils::{abs_vector, add_vectors, scale_vector, subtract_vectors};

/// Number of [`ShapeType`] variants; the side length of the dispatch tables.
pub const SHAPE_TYPE_COUNT: usize = 6;

/// The closed set of shape kinds a world understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Aabb,
    AabbExtent,
    Obb,
    Sphere,
    Ellipse,
    Capsule,
}

impl ShapeType {
    /// Every shape type, in table order.
    pub const ALL: [ShapeType; SHAPE_TYPE_COUNT] = [
        ShapeType::Aabb,
        ShapeType::AabbExtent,
        ShapeType::Obb,
        ShapeType::Sphere,
        ShapeType::Ellipse,
        ShapeType::Capsule,
    ];

    /// Dense index used by the dispatch tables
    pub fn index(self) -> usize {
        match self {
            ShapeType::Aabb => 0,
            ShapeType::AabbExtent => 1,
            ShapeType::Obb => 2,
            ShapeType::Sphere => 3,
            ShapeType::Ellipse => 4,
            ShapeType::Capsule => 5,
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ShapeType::Aabb => "AABB",
            ShapeType::AabbExtent => "AABBExtent",
            ShapeType::Obb => "OBB",
            ShapeType::Sphere => "Sphere",
            ShapeType::Ellipse => "Ellipse",
            ShapeType::Capsule => "Capsule",
        };
        write!(f, "{}", name)
    }
}

/// A shape value tagged with its kind.
///
/// The tag is the variant itself, so the kind reported by
/// [`Shape::shape_type`] always matches the payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Aabb(Aabb),
    AabbExtent(AabbExtent),
    Obb(Obb),
    Sphere(Sphere),
    Ellipse(Ellipse),
    Capsule(Capsule),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Aabb(_) => ShapeType::Aabb,
            Shape::AabbExtent(_) => ShapeType::AabbExtent,
            Shape::Obb(_) => ShapeType::Obb,
            Shape::Sphere(_) => ShapeType::Sphere,
            Shape::Ellipse(_) => ShapeType::Ellipse,
            Shape::Capsule(_) => ShapeType::Capsule,
        }
    }

    /// Axis-aligned box enclosing the shape.
    ///
    /// # Example
    /// ```
    /// use rs_collision::models::{Capsule, Shape};
    ///
    /// let shape = Shape::from(Capsule::new((0.0, 0.0, 0.0), (0.0, 4.0, 0.0), 1.0));
    /// let bounds = shape.bounding_extent();
    ///
    /// assert_eq!(bounds.center, (0.0, 2.0, 0.0));
    /// assert_eq!(bounds.extent, (1.0, 3.0, 1.0));
    /// ```
    pub fn bounding_extent(&self) -> AabbExtent {
        match self {
            Shape::Aabb(aabb) => aabb.to_extent(),
            Shape::AabbExtent(aabb) => *aabb,
            Shape::Obb(obb) => {
                let mut extent = (0.0, 0.0, 0.0);
                for (axis, half) in obb.axes.iter().zip([obb.extent.0, obb.extent.1, obb.extent.2]) {
                    extent = add_vectors(extent, scale_vector(abs_vector(*axis), half));
                }
                AabbExtent::new(obb.center, extent)
            }
            Shape::Sphere(sphere) => {
                let r = sphere.radius;
                AabbExtent::new(sphere.center, (r, r, r))
            }
            Shape::Ellipse(ellipse) => AabbExtent::new(ellipse.center, ellipse.radii),
            Shape::Capsule(capsule) => {
                let half = scale_vector(abs_vector(subtract_vectors(capsule.end, capsule.start)), 0.5);
                let r = capsule.radius;
                AabbExtent::new(capsule.center(), add_vectors(half, (r, r, r)))
            }
        }
    }

    /// Checks the payload for non-finite values and negative sizes.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Shape::Aabb(aabb) => aabb.validate(),
            Shape::AabbExtent(aabb) => aabb.validate(),
            Shape::Obb(obb) => obb.validate(),
            Shape::Sphere(sphere) => sphere.validate(),
            Shape::Ellipse(ellipse) => ellipse.validate(),
            Shape::Capsule(capsule) => capsule.validate(),
        }
    }
}

impl From<Aabb> for Shape {
    fn from(aabb: Aabb) -> Self {
        Shape::Aabb(aabb)
    }
}

impl From<AabbExtent> for Shape {
    fn from(aabb: AabbExtent) -> Self {
        Shape::AabbExtent(aabb)
    }
}

impl From<Obb> for Shape {
    fn from(obb: Obb) -> Self {
        Shape::Obb(obb)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}

impl From<Capsule> for Shape {
    fn from(capsule: Capsule) -> Self {
        Shape::Capsule(capsule)
    }
}
