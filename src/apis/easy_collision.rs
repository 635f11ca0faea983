// src/apis/easy_collision.rs

use std::cell::Cell;
use std::rc::Rc;

use log::trace;

use crate::models::{Aabb, Shape, Sphere};
use crate::utils::{add_vectors, is_zero_vector, negate_vector, CollisionConstants, CollisionError};
use crate::world::{CollisionQuery, CollisionReport, CollisionWorld, PrimitiveId};

/// Outcome of [`EasyCollision::move_box`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    /// Penetrations resolved at the destination
    pub collisions: u32,
    /// Translation applied on top of the requested motion to separate the box
    pub correction: (f64, f64, f64),
}

/// A simplified interface for moving boxes through a static scene.
///
/// Wraps a [`CollisionWorld`] for the common scene-object case: register
/// static geometry once, then move boxes each frame and let them slide out
/// of whatever they run into.
///
/// # Example
///
/// ```
/// use rs_collision::apis::EasyCollision;
/// use rs_collision::models::Aabb;
///
/// let mut scene = EasyCollision::new();
/// scene.add_static_box(Aabb::new((0.0, 0.0, 0.0), (10.0, 1.0, 10.0)), "floor").unwrap();
///
/// let mut player = Aabb::new((4.0, 1.25, 4.0), (5.0, 2.25, 5.0));
/// let result = scene.move_box(&mut player, (0.25, -0.5, 0.0));
///
/// assert_eq!(result.collisions, 1);
/// assert_eq!(player, Aabb::new((4.25, 1.0, 4.0), (5.25, 2.0, 5.0)));
/// ```
pub struct EasyCollision<P = ()> {
    world: CollisionWorld<(), P>,
}

impl<P> EasyCollision<P> {
    /// Creates an empty scene with the default resolver limits.
    pub fn new() -> Self {
        Self::with_constants(CollisionConstants::default())
    }

    pub fn with_constants(constants: CollisionConstants) -> Self {
        EasyCollision {
            world: CollisionWorld::with_constants((), constants),
        }
    }

    pub fn add_static_box(&mut self, aabb: Aabb, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.world.add_aabb(aabb, user_data)
    }

    pub fn add_static_sphere(&mut self, sphere: Sphere, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.world.add_sphere(sphere, user_data)
    }

    /// Registers a box the caller keeps moving, such as another actor.
    /// [`EasyCollision::move_tracked_box`] moves it without colliding it
    /// with itself.
    pub fn add_tracked_box(&mut self, aabb: Rc<Cell<Aabb>>, user_data: P) -> Result<PrimitiveId, CollisionError> {
        self.world.add_aabb_ref(aabb, user_data)
    }

    pub fn remove(&mut self, id: PrimitiveId) -> Result<P, CollisionError> {
        self.world.remove_primitive(id)
    }

    pub fn world(&self) -> &CollisionWorld<(), P> {
        &self.world
    }

    /// Number of scene primitives the box currently overlaps.
    pub fn overlapping(&self, aabb: &Aabb) -> u32 {
        self.world.collide_aabb(aabb, &CollisionQuery::new())
    }

    pub fn is_blocked(&self, aabb: &Aabb) -> bool {
        self.overlapping(aabb) > 0
    }

    /// Moves `aabb` by `velocity`, then pushes it out of anything it ends up
    /// penetrating.
    ///
    /// Penetrations are resolved at the destination only, so a move longer
    /// than the box itself can pass through thin geometry; split long moves
    /// into steps.
    pub fn move_box(&self, aabb: &mut Aabb, velocity: (f64, f64, f64)) -> MoveResult {
        aabb.translate(velocity);

        let correction = Cell::new((0.0, 0.0, 0.0));
        let response = |report: &mut CollisionReport<(), P>| slide(report, &correction);
        let query = resolve_query(aabb, velocity, &response);
        let collisions = self.world.collide_aabb(aabb, &query);

        aabb.translate(correction.get());
        trace!("Moved box by {:?} with correction {:?}", velocity, correction.get());
        MoveResult {
            collisions,
            correction: correction.get(),
        }
    }

    /// Like [`EasyCollision::move_box`] for a box registered with
    /// [`EasyCollision::add_tracked_box`]; the cell is updated in place.
    pub fn move_tracked_box(&self, aabb: &Rc<Cell<Aabb>>, velocity: (f64, f64, f64)) -> MoveResult {
        let mut moved = aabb.get();
        moved.translate(velocity);
        aabb.set(moved);

        let correction = Cell::new((0.0, 0.0, 0.0));
        let response = |report: &mut CollisionReport<(), P>| slide(report, &correction);
        let query = resolve_query(&moved, velocity, &response);
        let collisions = self.world.collide_aabb_ref(aabb, &query);

        moved.translate(correction.get());
        aabb.set(moved);
        MoveResult {
            collisions,
            correction: correction.get(),
        }
    }
}

impl<P> Default for EasyCollision<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Response shared by the move helpers: the push reaches from the collider's
/// surface into the box, so the box is moved back along it.
fn slide<P>(report: &mut CollisionReport<'_, (), P>, correction: &Cell<(f64, f64, f64)>) {
    let separation = negate_vector(report.push_vector);
    if let Shape::Aabb(packet) = &mut report.packet_shape {
        packet.translate(separation);
    }
    correction.set(add_vectors(correction.get(), separation));
}

/// Query resolving penetrations at the destination. The velocity is limited
/// to the box's half extent per axis so that no sweep volume is built.
fn resolve_query<'a, P>(
    aabb: &Aabb,
    velocity: (f64, f64, f64),
    response: &'a (dyn Fn(&mut CollisionReport<'_, (), P>) + 'a),
) -> CollisionQuery<'a, (), P> {
    let half = aabb.half_extent();
    let limited = (
        velocity.0.max(-half.0).min(half.0),
        velocity.1.max(-half.1).min(half.1),
        velocity.2.max(-half.2).min(half.2),
    );

    let query = CollisionQuery::new().with_response(response);
    if is_zero_vector(limited) {
        query
    } else {
        query.with_velocity(limited)
    }
}
