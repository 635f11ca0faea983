use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use crate::interactions::{
    ray_intersects_aabb, ray_intersects_aabb_extent, ray_intersects_obb, ray_intersects_sphere,
};
use crate::models::{Aabb, AabbExtent, Capsule, Obb, Ray, Shape, Sphere};
use crate::world::packet::{resolve, Packet};
use crate::world::{CollisionWorld, Primitive};

/// Filter deciding whether a primitive takes part in a query. Receives the
/// query's user data.
pub type TestFn<'a, P> = dyn Fn(&Primitive<P>, Option<&dyn Any>) -> bool + 'a;

/// Callback invoked for each resolved penetration.
pub type ResponseFn<'a, W, P> = dyn Fn(&mut CollisionReport<'_, W, P>) + 'a;

/// Input of a collide call.
///
/// Without a velocity the query is a single discrete pass that counts
/// intersecting primitives. With a velocity and a response, penetrations are
/// resolved iteratively and reported through the response.
pub struct CollisionQuery<'a, W, P> {
    pub velocity: Option<(f64, f64, f64)>,
    pub test: Option<&'a TestFn<'a, P>>,
    pub response: Option<&'a ResponseFn<'a, W, P>>,
    pub user_data: Option<&'a dyn Any>,
}

impl<'a, W, P> CollisionQuery<'a, W, P> {
    pub fn new() -> Self {
        CollisionQuery {
            velocity: None,
            test: None,
            response: None,
            user_data: None,
        }
    }

    pub fn with_velocity(mut self, velocity: (f64, f64, f64)) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn with_test(mut self, test: &'a TestFn<'a, P>) -> Self {
        self.test = Some(test);
        self
    }

    pub fn with_response(mut self, response: &'a ResponseFn<'a, W, P>) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_user_data(mut self, user_data: &'a dyn Any) -> Self {
        self.user_data = Some(user_data);
        self
    }

    /// Whether the query's filter lets `primitive` through.
    pub(crate) fn accepts(&self, primitive: &Primitive<P>) -> bool {
        match self.test {
            Some(test) => test(primitive, self.user_data),
            None => true,
        }
    }
}

impl<W, P> Default for CollisionQuery<'_, W, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, P> Clone for CollisionQuery<'_, W, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W, P> Copy for CollisionQuery<'_, W, P> {}

/// What a response callback sees for one penetration.
///
/// `push_vector` and `packet_shape` may be rewritten by the callback: the
/// resolver reads both back, using the push as the next working velocity and
/// the shape as the packet's shape for the following tests.
pub struct CollisionReport<'r, W, P> {
    pub world: &'r CollisionWorld<W, P>,
    pub collider: &'r Primitive<P>,
    pub push_vector: (f64, f64, f64),
    pub contact_point: (f64, f64, f64),
    pub velocity: (f64, f64, f64),
    pub packet_shape: Shape,
    pub user_data: Option<&'r dyn Any>,
}

/// Nearest primitive hit by a ray.
#[derive(Debug)]
pub struct RayHit<'w, P> {
    pub primitive: &'w Primitive<P>,
    pub distance: f64,
    pub point: (f64, f64, f64),
}

impl<W, P> CollisionWorld<W, P> {
    /// Collides a moving AABB with the world and returns the number of
    /// collisions reported.
    ///
    /// # Example
    /// ```
    /// use std::cell::Cell;
    /// use rs_collision::models::Aabb;
    /// use rs_collision::world::{CollisionQuery, CollisionReport, CollisionWorld};
    ///
    /// let mut world: CollisionWorld<(), u32> = CollisionWorld::new(());
    /// world.add_aabb(Aabb::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)), 7).unwrap();
    ///
    /// let pushed = Cell::new((0.0, 0.0, 0.0));
    /// let response = |report: &mut CollisionReport<(), u32>| pushed.set(report.push_vector);
    /// let query = CollisionQuery::new()
    ///     .with_velocity((0.0, 0.0, -1.0))
    ///     .with_response(&response);
    ///
    /// let falling = Aabb::new((0.0, 0.5, 1.5), (1.0, 1.5, 2.5));
    /// assert_eq!(world.collide_aabb(&falling, &query), 1);
    /// assert!(pushed.get().2 > 0.0);
    /// ```
    pub fn collide_aabb(&self, aabb: &Aabb, query: &CollisionQuery<'_, W, P>) -> u32 {
        resolve(self, Packet::new(Shape::Aabb(*aabb), query, true))
    }

    pub fn collide_aabb_extent(&self, aabb: &AabbExtent, query: &CollisionQuery<'_, W, P>) -> u32 {
        resolve(self, Packet::new(Shape::AabbExtent(*aabb), query, true))
    }

    /// Collides a sphere with the world. Without a velocity every
    /// intersecting primitive is counted once.
    ///
    /// # Example
    /// ```
    /// use rs_collision::models::{Aabb, Sphere};
    /// use rs_collision::world::{CollisionQuery, CollisionWorld};
    ///
    /// let mut world: CollisionWorld<(), ()> = CollisionWorld::new(());
    /// world.add_aabb(Aabb::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)), ()).unwrap();
    /// world.add_aabb(Aabb::new((0.0, 0.0, 5.0), (1.0, 1.0, 6.0)), ()).unwrap();
    ///
    /// let probe = Sphere::new((0.5, 0.5, 1.2), 0.5);
    /// assert_eq!(world.collide_sphere(&probe, &CollisionQuery::new()), 1);
    /// ```
    pub fn collide_sphere(&self, sphere: &Sphere, query: &CollisionQuery<'_, W, P>) -> u32 {
        resolve(self, Packet::new(Shape::Sphere(*sphere), query, true))
    }

    /// Collides an oriented box. OBB queries are always discrete: no sweep
    /// volume is built, even with a velocity.
    pub fn collide_obb(&self, obb: &Obb, query: &CollisionQuery<'_, W, P>) -> u32 {
        resolve(self, Packet::new(Shape::Obb(*obb), query, false))
    }

    pub fn collide_capsule(&self, capsule: &Capsule, query: &CollisionQuery<'_, W, P>) -> u32 {
        resolve(self, Packet::new(Shape::Capsule(*capsule), query, true))
    }

    /// Collides a caller-owned box that may itself be registered in this
    /// world through [`CollisionWorld::add_aabb_ref`]; that primitive is
    /// skipped so the box never collides with itself.
    pub fn collide_aabb_ref(&self, aabb: &Rc<Cell<Aabb>>, query: &CollisionQuery<'_, W, P>) -> u32 {
        resolve(self, Packet::new(Shape::Aabb(aabb.get()), query, true).with_identity(aabb))
    }

    /// Casts a ray and returns the nearest primitive hit.
    ///
    /// Boxes, oriented boxes and spheres are tested; other shape kinds are
    /// never hit.
    ///
    /// # Example
    /// ```
    /// use rs_collision::models::{Aabb, Ray, Sphere};
    /// use rs_collision::world::{CollisionQuery, CollisionWorld};
    ///
    /// let mut world: CollisionWorld<(), &str> = CollisionWorld::new(());
    /// world.add_aabb(Aabb::new((9.0, -1.0, -1.0), (10.0, 1.0, 1.0)), "wall").unwrap();
    /// world.add_sphere(Sphere::new((4.0, 0.0, 0.0), 1.0), "ball").unwrap();
    ///
    /// let ray = Ray::new((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)).unwrap();
    /// let hit = world.raycast(&ray, &CollisionQuery::new()).unwrap();
    ///
    /// assert_eq!(*hit.primitive.user_data(), "ball");
    /// assert!((hit.distance - 3.0).abs() < 1e-9);
    /// ```
    pub fn raycast(&self, ray: &Ray, query: &CollisionQuery<'_, W, P>) -> Option<RayHit<'_, P>> {
        let mut nearest: Option<RayHit<'_, P>> = None;

        for primitive in &self.primitives {
            if !query.accepts(primitive) {
                continue;
            }

            let hit = match primitive.shape() {
                Shape::Aabb(aabb) => ray_intersects_aabb(ray, &aabb),
                Shape::AabbExtent(aabb) => ray_intersects_aabb_extent(ray, &aabb),
                Shape::Obb(obb) => ray_intersects_obb(ray, &obb),
                Shape::Sphere(sphere) => ray_intersects_sphere(ray, &sphere),
                Shape::Ellipse(_) | Shape::Capsule(_) => None,
            };

            if let Some((distance, point)) = hit {
                if nearest.as_ref().map_or(true, |best| distance < best.distance) {
                    nearest = Some(RayHit { primitive, distance, point });
                }
            }
        }

        nearest
    }
}
