use std::cell::Cell;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::dispatch::registry;
use crate::models::{Aabb, AabbExtent, Shape};
use crate::utils::{
    abs_vector, add_vectors, axis_component, distance, distance_squared, is_zero_vector,
    negate_vector, scale_vector, subtract_vectors, vector_magnitude,
};
use crate::world::{CollisionQuery, CollisionReport, CollisionWorld, Primitive};

/// Where a packet's resolution ended.
///
/// A packet starts `Seeking`; `InvalidShape`, `Rejected`, `NoSweepTarget`
/// and `Stationary` are taken before any narrow-phase test runs and always
/// report zero collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketState {
    Seeking,
    /// A pass produced no new collision
    Resolved,
    /// The push would have undone the previous one
    OscillationStop,
    IterationCap,
    /// The query shape failed validation
    InvalidShape,
    Rejected,
    NoSweepTarget,
    Stationary,
}

/// State of one collide call. Lives on the stack of that call only.
pub(crate) struct Packet<'q, 'a, W, P> {
    shape: Shape,
    identity: Option<&'q Rc<Cell<Aabb>>>,
    sweep: Option<AabbExtent>,
    velocity: (f64, f64, f64),
    query: &'q CollisionQuery<'a, W, P>,
    collisions: u32,
    state: PacketState,
}

impl<'q, 'a, W, P> Packet<'q, 'a, W, P> {
    pub(crate) fn new(shape: Shape, query: &'q CollisionQuery<'a, W, P>, sweeps: bool) -> Self {
        let sweep = match query.velocity {
            Some(velocity) if sweeps => sweep_volume(&shape, velocity),
            _ => None,
        };

        Packet {
            shape,
            identity: None,
            sweep,
            velocity: query.velocity.unwrap_or((0.0, 0.0, 0.0)),
            query,
            collisions: 0,
            state: PacketState::Seeking,
        }
    }

    /// Marks the packet as the query form of a referenced primitive.
    pub(crate) fn with_identity(mut self, cell: &'q Rc<Cell<Aabb>>) -> Self {
        self.identity = Some(cell);
        self
    }

    fn skips(&self, primitive: &Primitive<P>) -> bool {
        let is_self = self.identity.is_some_and(|cell| primitive.storage().refers_to(cell));
        is_self || !self.query.accepts(primitive)
    }
}

/// Box covering `shape` both at `center - velocity` and at `center + velocity`.
///
/// Only built when the motion on some axis is larger than the shape's half
/// extent on that axis; smaller motions are tested discretely.
pub(crate) fn sweep_volume(shape: &Shape, velocity: (f64, f64, f64)) -> Option<AabbExtent> {
    let bounds = shape.bounding_extent();
    let motion = abs_vector(velocity);

    let outruns = (0..3).any(|axis| axis_component(motion, axis) > axis_component(bounds.extent, axis));
    if !outruns {
        return None;
    }

    Some(AabbExtent::new(bounds.center, add_vectors(bounds.extent, motion)))
}

/// Keeps `packets` counting the collide calls on the stack. Dropping the
/// outermost guard also clears the rejected count.
struct PacketGuard<'w, W, P> {
    world: &'w CollisionWorld<W, P>,
}

impl<'w, W, P> PacketGuard<'w, W, P> {
    fn enter(world: &'w CollisionWorld<W, P>) -> Self {
        world.packets.set(world.packets.get() + 1);
        PacketGuard { world }
    }
}

impl<W, P> Drop for PacketGuard<'_, W, P> {
    fn drop(&mut self) {
        let remaining = self.world.packets.get().saturating_sub(1);
        self.world.packets.set(remaining);

        if remaining == 0 {
            let rejected = self.world.rejected.get();
            if rejected > 0 {
                warn!(
                    "{} collide call(s) were rejected after exceeding the recursion limit of {}",
                    rejected,
                    self.world.constants.max_recursion
                );
                self.world.rejected.set(0);
            }
        }
    }
}

/// Runs one collide call and returns its collision count.
pub(crate) fn resolve<W, P>(world: &CollisionWorld<W, P>, packet: Packet<'_, '_, W, P>) -> u32 {
    resolve_with_state(world, packet).0
}

/// Like [`resolve`], also returning the state the packet ended in.
pub(crate) fn resolve_with_state<W, P>(
    world: &CollisionWorld<W, P>,
    mut packet: Packet<'_, '_, W, P>,
) -> (u32, PacketState) {
    packet.state = run(world, &mut packet);
    trace!(
        "{} packet finished as {:?} with {} collision(s)",
        packet.shape.shape_type(),
        packet.state,
        packet.collisions
    );
    (packet.collisions, packet.state)
}

fn run<W, P>(world: &CollisionWorld<W, P>, packet: &mut Packet<'_, '_, W, P>) -> PacketState {
    if let Err(reason) = packet.shape.validate() {
        debug!("Ignoring {} query shape: {}", packet.shape.shape_type(), reason);
        return PacketState::InvalidShape;
    }

    if packet.query.velocity.is_some_and(is_zero_vector) {
        return PacketState::Stationary;
    }

    if world.packets.get() + world.rejected.get() > world.constants.max_recursion {
        world.rejected.set(world.rejected.get() + 1);
        return PacketState::Rejected;
    }

    let _guard = PacketGuard::enter(world);
    trace!(
        "{} packet seeking at depth {} (sweep: {})",
        packet.shape.shape_type(),
        world.packets.get(),
        packet.sweep.is_some()
    );

    if let Some(sweep) = packet.sweep {
        if !broad_sweep(world, packet, &sweep) {
            return PacketState::NoSweepTarget;
        }
    }

    narrow_phase(world, packet)
}

/// Broad pass against the sweep volume. Returns `false` when nothing lies
/// in the path of the packet.
fn broad_sweep<W, P>(world: &CollisionWorld<W, P>, packet: &mut Packet<'_, '_, W, P>, sweep: &AabbExtent) -> bool {
    let registry = registry();
    let sweep_shape = Shape::AabbExtent(*sweep);
    let velocity = packet.velocity;

    // Where the shape was before this step's motion
    let mut before = packet.shape;
    registry.velocity_apply(&mut before, negate_vector(velocity));
    let origin = registry.position(&before).unwrap_or(sweep.center);

    let mut nearest: Option<(&Primitive<P>, (f64, f64, f64), f64)> = None;
    for primitive in world.primitives() {
        if packet.skips(primitive) {
            continue;
        }

        let shape = primitive.shape();
        if !registry.intersects(&sweep_shape, &shape) {
            continue;
        }

        let contact = registry.closest_point(&shape, origin);
        let gap = distance(origin, contact);
        if nearest.map_or(true, |(_, _, best)| gap < best) {
            nearest = Some((primitive, contact, gap));
        }
    }

    let (collider, contact, gap) = match nearest {
        Some(nearest) => nearest,
        None => return false,
    };

    match packet.query.response {
        Some(response) if gap > world.constants.sweep_push_threshold => {
            let push = scale_vector(negate_vector(velocity), gap / vector_magnitude(velocity));
            let mut report = CollisionReport {
                world,
                collider,
                push_vector: push,
                contact_point: contact,
                velocity,
                packet_shape: packet.shape,
                user_data: packet.query.user_data,
            };
            response(&mut report);

            packet.velocity = report.push_vector;
            packet.shape = report.packet_shape;
            packet.collisions += 1;
        }
        _ => registry.velocity_apply(&mut packet.shape, velocity),
    }

    true
}

/// Contact point and push vector for `packet_shape` penetrating `collider`.
///
/// Of the collider's closest point to the packet center and the packet's
/// closest point to that, the one farther from the center is the contact
/// and the nearer one the penetrative point; the push runs from the latter
/// to the former.
fn contact_and_push(packet_shape: &Shape, collider: &Shape) -> ((f64, f64, f64), (f64, f64, f64)) {
    let registry = registry();
    let center = registry
        .position(packet_shape)
        .unwrap_or_else(|| packet_shape.bounding_extent().center);

    let on_collider = registry.closest_point(collider, center);
    let on_packet = registry.closest_point(packet_shape, on_collider);

    let (contact, penetrative) = if distance_squared(center, on_collider) >= distance_squared(center, on_packet) {
        (on_collider, on_packet)
    } else {
        (on_packet, on_collider)
    };

    (contact, subtract_vectors(contact, penetrative))
}

fn narrow_phase<W, P>(world: &CollisionWorld<W, P>, packet: &mut Packet<'_, '_, W, P>) -> PacketState {
    let registry = registry();
    let single_pass = packet.query.response.is_none() || packet.query.velocity.is_none();

    for _ in 0..world.constants.max_iterations {
        let mut collided = false;

        for primitive in world.primitives() {
            if packet.skips(primitive) {
                continue;
            }

            let shape = primitive.shape();
            if !registry.intersects(&packet.shape, &shape) {
                continue;
            }

            let response = match packet.query.response {
                Some(response) => response,
                None => {
                    packet.collisions += 1;
                    collided = true;
                    continue;
                }
            };

            let (contact, push) = contact_and_push(&packet.shape, &shape);
            if is_zero_vector(push) {
                continue;
            }
            if packet.collisions >= 1 && push == negate_vector(packet.velocity) {
                return PacketState::OscillationStop;
            }

            let mut report = CollisionReport {
                world,
                collider: primitive,
                push_vector: push,
                contact_point: contact,
                velocity: packet.velocity,
                packet_shape: packet.shape,
                user_data: packet.query.user_data,
            };
            response(&mut report);

            packet.velocity = report.push_vector;
            packet.shape = report.packet_shape;
            packet.collisions += 1;
            collided = true;
        }

        if !collided || single_pass {
            return PacketState::Resolved;
        }
    }

    PacketState::IterationCap
}
