use std::sync::OnceLock;

use log::debug;

use crate::interactions::{
    aabb_extent_intersects_aabb_extent, aabb_extent_intersects_capsule, aabb_extent_intersects_obb,
    aabb_extent_intersects_sphere, aabb_intersects_aabb, aabb_intersects_aabb_extent,
    aabb_intersects_capsule, aabb_intersects_obb, aabb_intersects_sphere,
    capsule_intersects_capsule, closest_point_on_aabb, closest_point_on_aabb_extent,
    closest_point_on_capsule, closest_point_on_obb, closest_point_on_sphere, obb_intersects_capsule,
    obb_intersects_obb, obb_intersects_sphere, sphere_intersects_capsule, sphere_intersects_sphere,
};
use crate::models::{Shape, ShapeType, SHAPE_TYPE_COUNT};

pub type IntersectionFn = fn(&Shape, &Shape) -> bool;
pub type PositionFn = fn(&Shape) -> (f64, f64, f64);
pub type ClosestPointFn = fn(&Shape, (f64, f64, f64)) -> (f64, f64, f64);
pub type VelocityApplyFn = fn(&mut Shape, (f64, f64, f64));

/// Builds an intersection entry for the ordered pair `($a, $b)`. The entry
/// reports no collision when handed shapes of any other kinds.
macro_rules! intersection_entry {
    ($a:ident, $b:ident, $test:path) => {{
        let entry: IntersectionFn = |first, second| match (first, second) {
            (Shape::$a(first), Shape::$b(second)) => $test(first, second),
            _ => false,
        };
        Some(entry)
    }};
}

macro_rules! position_entry {
    ($variant:ident, |$inner:ident| $center:expr) => {{
        let entry: PositionFn = |shape| match shape {
            Shape::$variant($inner) => $center,
            _ => (0.0, 0.0, 0.0),
        };
        Some(entry)
    }};
}

macro_rules! closest_point_entry {
    ($variant:ident, $closest:path) => {{
        let entry: ClosestPointFn = |shape, point| match shape {
            Shape::$variant(inner) => $closest(inner, point),
            _ => point,
        };
        Some(entry)
    }};
}

macro_rules! velocity_apply_entry {
    ($variant:ident) => {{
        let entry: VelocityApplyFn = |shape, velocity| {
            if let Shape::$variant(inner) = shape {
                inner.translate(velocity);
            }
        };
        Some(entry)
    }};
}

/// Function tables standing in for per-shape virtual methods.
///
/// Every table is indexed by [`ShapeType::index`]. The intersection table is
/// only populated in one direction per unordered pair; [`ShapeRegistry::intersects`]
/// falls back to the mirrored entry with swapped arguments.
pub struct ShapeRegistry {
    intersection: [[Option<IntersectionFn>; SHAPE_TYPE_COUNT]; SHAPE_TYPE_COUNT],
    position: [Option<PositionFn>; SHAPE_TYPE_COUNT],
    closest_point: [Option<ClosestPointFn>; SHAPE_TYPE_COUNT],
    velocity_apply: [Option<VelocityApplyFn>; SHAPE_TYPE_COUNT],
}

static REGISTRY: OnceLock<ShapeRegistry> = OnceLock::new();

/// Returns the process-wide registry, building it on first use.
///
/// # Example
/// ```
/// use rs_collision::dispatch::registry;
/// use rs_collision::models::{Aabb, Shape, Sphere};
///
/// let aabb = Shape::from(Aabb::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)));
/// let sphere = Shape::from(Sphere::new((1.5, 0.5, 0.5), 0.6));
///
/// assert!(registry().intersects(&aabb, &sphere));
/// assert!(registry().intersects(&sphere, &aabb));
/// ```
pub fn registry() -> &'static ShapeRegistry {
    REGISTRY.get_or_init(ShapeRegistry::build)
}

fn report_missing(table: &str, types: &[ShapeType]) {
    if cfg!(debug_assertions) {
        debug!("No {} entry for {:?}; treating as unsupported", table, types);
    }
}

impl ShapeRegistry {
    fn build() -> Self {
        use ShapeType as T;

        let mut intersection = [[None; SHAPE_TYPE_COUNT]; SHAPE_TYPE_COUNT];
        let mut set = |a: ShapeType, b: ShapeType, entry: Option<IntersectionFn>| {
            intersection[a.index()][b.index()] = entry;
        };

        set(T::Aabb, T::Aabb, intersection_entry!(Aabb, Aabb, aabb_intersects_aabb));
        set(T::Aabb, T::AabbExtent, intersection_entry!(Aabb, AabbExtent, aabb_intersects_aabb_extent));
        set(T::Aabb, T::Obb, intersection_entry!(Aabb, Obb, aabb_intersects_obb));
        set(T::Aabb, T::Sphere, intersection_entry!(Aabb, Sphere, aabb_intersects_sphere));
        set(T::Aabb, T::Capsule, intersection_entry!(Aabb, Capsule, aabb_intersects_capsule));

        set(T::AabbExtent, T::AabbExtent,
            intersection_entry!(AabbExtent, AabbExtent, aabb_extent_intersects_aabb_extent));
        set(T::AabbExtent, T::Obb, intersection_entry!(AabbExtent, Obb, aabb_extent_intersects_obb));
        set(T::AabbExtent, T::Sphere, intersection_entry!(AabbExtent, Sphere, aabb_extent_intersects_sphere));
        set(T::AabbExtent, T::Capsule, intersection_entry!(AabbExtent, Capsule, aabb_extent_intersects_capsule));

        set(T::Obb, T::Obb, intersection_entry!(Obb, Obb, obb_intersects_obb));
        set(T::Obb, T::Sphere, intersection_entry!(Obb, Sphere, obb_intersects_sphere));
        set(T::Obb, T::Capsule, intersection_entry!(Obb, Capsule, obb_intersects_capsule));

        set(T::Sphere, T::Sphere, intersection_entry!(Sphere, Sphere, sphere_intersects_sphere));
        set(T::Sphere, T::Capsule, intersection_entry!(Sphere, Capsule, sphere_intersects_capsule));

        set(T::Capsule, T::Capsule, intersection_entry!(Capsule, Capsule, capsule_intersects_capsule));

        // Ellipses have no routines in any table
        let mut position = [None; SHAPE_TYPE_COUNT];
        position[T::Aabb.index()] = position_entry!(Aabb, |aabb| aabb.center());
        position[T::AabbExtent.index()] = position_entry!(AabbExtent, |aabb| aabb.center);
        position[T::Obb.index()] = position_entry!(Obb, |obb| obb.center);
        position[T::Sphere.index()] = position_entry!(Sphere, |sphere| sphere.center);
        position[T::Capsule.index()] = position_entry!(Capsule, |capsule| capsule.center());

        let mut closest_point = [None; SHAPE_TYPE_COUNT];
        closest_point[T::Aabb.index()] = closest_point_entry!(Aabb, closest_point_on_aabb);
        closest_point[T::AabbExtent.index()] = closest_point_entry!(AabbExtent, closest_point_on_aabb_extent);
        closest_point[T::Obb.index()] = closest_point_entry!(Obb, closest_point_on_obb);
        closest_point[T::Sphere.index()] = closest_point_entry!(Sphere, closest_point_on_sphere);
        closest_point[T::Capsule.index()] = closest_point_entry!(Capsule, closest_point_on_capsule);

        let mut velocity_apply = [None; SHAPE_TYPE_COUNT];
        velocity_apply[T::Aabb.index()] = velocity_apply_entry!(Aabb);
        velocity_apply[T::AabbExtent.index()] = velocity_apply_entry!(AabbExtent);
        velocity_apply[T::Obb.index()] = velocity_apply_entry!(Obb);
        velocity_apply[T::Sphere.index()] = velocity_apply_entry!(Sphere);
        velocity_apply[T::Capsule.index()] = velocity_apply_entry!(Capsule);

        ShapeRegistry {
            intersection,
            position,
            closest_point,
            velocity_apply,
        }
    }

    /// Looks up `[a][b]`, then `[b][a]` with the arguments swapped. Pairs
    /// with no entry in either direction never intersect.
    pub fn intersects(&self, a: &Shape, b: &Shape) -> bool {
        let (ta, tb) = (a.shape_type(), b.shape_type());

        if let Some(test) = self.intersection[ta.index()][tb.index()] {
            return test(a, b);
        }
        if let Some(test) = self.intersection[tb.index()][ta.index()] {
            return test(b, a);
        }

        report_missing("intersection", &[ta, tb]);
        false
    }

    /// Whether either direction of the pair has an intersection routine.
    pub fn supports_pair(&self, a: ShapeType, b: ShapeType) -> bool {
        self.intersection[a.index()][b.index()].is_some() ||
            self.intersection[b.index()][a.index()].is_some()
    }

    /// Logical center of the shape, or `None` for kinds without one.
    pub fn position(&self, shape: &Shape) -> Option<(f64, f64, f64)> {
        match self.position[shape.shape_type().index()] {
            Some(position) => Some(position(shape)),
            None => {
                report_missing("position", &[shape.shape_type()]);
                None
            }
        }
    }

    /// Closest point on `shape` to `point`. Unsupported kinds return `point`.
    pub fn closest_point(&self, shape: &Shape, point: (f64, f64, f64)) -> (f64, f64, f64) {
        match self.closest_point[shape.shape_type().index()] {
            Some(closest) => closest(shape, point),
            None => {
                report_missing("closest point", &[shape.shape_type()]);
                point
            }
        }
    }

    /// Translates the shape in place. Unsupported kinds are left untouched.
    pub fn velocity_apply(&self, shape: &mut Shape, velocity: (f64, f64, f64)) {
        match self.velocity_apply[shape.shape_type().index()] {
            Some(apply) => apply(shape, velocity),
            None => report_missing("velocity apply", &[shape.shape_type()]),
        }
    }

    /// Unordered type pairs with no intersection routine in either direction.
    pub fn missing_intersections(&self) -> Vec<(ShapeType, ShapeType)> {
        let mut missing = Vec::new();
        for (i, &a) in ShapeType::ALL.iter().enumerate() {
            for &b in &ShapeType::ALL[i..] {
                if !self.supports_pair(a, b) {
                    missing.push((a, b));
                }
            }
        }
        missing
    }

    /// Shape types missing any of the single-shape routines.
    pub fn missing_shape_routines(&self) -> Vec<ShapeType> {
        ShapeType::ALL
            .iter()
            .copied()
            .filter(|t| {
                let i = t.index();
                self.position[i].is_none() || self.closest_point[i].is_none() || self.velocity_apply[i].is_none()
            })
            .collect()
    }
}
