use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::models::{Aabb, AabbExtent, Obb, Shape, Sphere};
use crate::utils::CollisionConstants;
use crate::world::packet::{resolve_with_state, sweep_volume, Packet};
use crate::world::{CollisionQuery, CollisionReport, CollisionWorld, PacketState};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A wide floor and a box resting half a unit into it.
fn floor_world() -> CollisionWorld<(), ()> {
    let mut world = CollisionWorld::new(());
    world.add_aabb(Aabb::new((0.0, 0.0, 0.0), (10.0, 1.0, 10.0)), ()).unwrap();
    world
}

fn sinking_box() -> Shape {
    Shape::Aabb(Aabb::new((4.0, 0.5, 4.0), (5.0, 1.5, 5.0)))
}

#[test]
fn test_sweep_only_when_motion_outruns_extent() {
    let shape = Shape::Aabb(Aabb::new((0.0, 0.0, 0.0), (2.0, 2.0, 2.0)));

    assert_eq!(sweep_volume(&shape, (0.5, -0.9, 1.0)), None);

    let sweep = sweep_volume(&shape, (0.0, -3.0, 0.5)).unwrap();
    assert_eq!(sweep, AabbExtent::new((1.0, 1.0, 1.0), (1.0, 4.0, 1.5)));
}

#[test]
fn test_sweep_covers_both_ends_of_motion() {
    let sphere = Shape::Sphere(Sphere::new((0.0, 0.0, 0.0), 0.25));
    let velocity = (2.0, 0.0, -1.0);
    let sweep = sweep_volume(&sphere, velocity).unwrap().to_aabb();

    assert!(sweep.contains_point((2.25, 0.0, -1.0)));
    assert!(sweep.contains_point((-2.25, 0.0, 1.0)));
    assert!(!sweep.contains_point((2.5, 0.0, 0.0)));
}

#[test]
fn test_obb_packets_never_sweep() {
    let world = floor_world();
    let query = CollisionQuery::new().with_velocity((0.0, -50.0, 0.0));
    let obb = Obb::from_aabb_extent(&AabbExtent::new((5.0, 10.0, 5.0), (0.5, 0.5, 0.5)));

    let (count, state) = resolve_with_state(&world, Packet::new(Shape::Obb(obb), &query, false));
    assert_eq!(count, 0);
    assert_eq!(state, PacketState::Resolved);
}

#[test]
fn test_zero_velocity_is_stationary() {
    init_logging();
    let world = floor_world();
    let calls = Cell::new(0);
    let response = |_: &mut CollisionReport<(), ()>| calls.set(calls.get() + 1);
    let query = CollisionQuery::new()
        .with_velocity((0.0, 0.0, 0.0))
        .with_response(&response);

    // Overlapping the floor, yet no motion means nothing to report
    let (count, state) = resolve_with_state(&world, Packet::new(sinking_box(), &query, true));
    assert_eq!(count, 0);
    assert_eq!(state, PacketState::Stationary);
    assert_eq!(calls.get(), 0);
    assert_eq!(world.packets(), 0);
}

#[test]
fn test_empty_sweep_reports_nothing() {
    let world = floor_world();
    let query = CollisionQuery::new().with_velocity((0.0, 3.0, 0.0));
    let above = Shape::Aabb(Aabb::new((4.0, 5.0, 4.0), (5.0, 6.0, 5.0)));

    let (count, state) = resolve_with_state(&world, Packet::new(above, &query, true));
    assert_eq!(count, 0);
    assert_eq!(state, PacketState::NoSweepTarget);
}

#[test]
fn test_recursion_guard_rejects_without_testing() {
    init_logging();
    let world = floor_world();
    let tested = Cell::new(0);
    let test = |_: &crate::world::Primitive<()>, _: Option<&dyn std::any::Any>| {
        tested.set(tested.get() + 1);
        true
    };
    let query = CollisionQuery::new().with_test(&test);

    // Pretend 21 calls are already on the stack
    world.packets.set(21);
    let (count, state) = resolve_with_state(&world, Packet::new(sinking_box(), &query, true));
    assert_eq!(count, 0);
    assert_eq!(state, PacketState::Rejected);
    assert_eq!(world.rejected(), 1);
    assert_eq!(tested.get(), 0);

    world.packets.set(0);
    world.rejected.set(0);
    let (count, _) = resolve_with_state(&world, Packet::new(sinking_box(), &query, true));
    assert_eq!(count, 1);
    assert_eq!(tested.get(), 1);
}

#[test]
fn test_discrete_pass_counts_each_primitive_once() {
    let mut world = floor_world();
    world.add_sphere(Sphere::new((4.5, 1.5, 4.5), 0.5), ()).unwrap();
    world.add_sphere(Sphere::new((40.0, 1.5, 4.5), 0.5), ()).unwrap();

    let query = CollisionQuery::new();
    let (count, state) = resolve_with_state(&world, Packet::new(sinking_box(), &query, true));
    assert_eq!(count, 2);
    assert_eq!(state, PacketState::Resolved);
}

#[test]
fn test_unmoved_packet_runs_to_iteration_cap() {
    let world = floor_world();
    let pushes = Cell::new(0);
    let response = |report: &mut CollisionReport<(), ()>| {
        assert_eq!(report.push_vector, (0.5, 0.0, 0.0));
        pushes.set(pushes.get() + 1);
    };
    let query = CollisionQuery::new()
        .with_velocity((0.0, -0.1, 0.0))
        .with_response(&response);

    let (count, state) = resolve_with_state(&world, Packet::new(sinking_box(), &query, true));
    assert_eq!(count, 20);
    assert_eq!(state, PacketState::IterationCap);
    assert_eq!(pushes.get(), 20);
}

#[test]
fn test_iteration_cap_is_configurable() {
    let mut world = CollisionWorld::with_constants((), CollisionConstants::new(Some(4), None, None));
    world.add_aabb(Aabb::new((0.0, 0.0, 0.0), (10.0, 1.0, 10.0)), ()).unwrap();
    let response = |_: &mut CollisionReport<(), ()>| {};
    let query = CollisionQuery::new()
        .with_velocity((0.0, -0.1, 0.0))
        .with_response(&response);

    let (count, state) = resolve_with_state(&world, Packet::new(sinking_box(), &query, true));
    assert_eq!(count, 4);
    assert_eq!(state, PacketState::IterationCap);
}

#[test]
fn test_response_moving_packet_resolves() {
    let world = floor_world();
    let response = |report: &mut CollisionReport<(), ()>| {
        if let Shape::Aabb(aabb) = &mut report.packet_shape {
            aabb.translate((0.0, 0.6, 0.0));
        }
    };
    let query = CollisionQuery::new()
        .with_velocity((0.0, -0.1, 0.0))
        .with_response(&response);

    let (count, state) = resolve_with_state(&world, Packet::new(sinking_box(), &query, true));
    assert_eq!(count, 1);
    assert_eq!(state, PacketState::Resolved);
}

#[test]
fn test_opposing_walls_stop_oscillation() {
    init_logging();
    let mut world: CollisionWorld<(), ()> = CollisionWorld::new(());
    world.add_aabb(Aabb::new((-1.0, 0.0, 0.0), (0.5, 1.0, 1.0)), ()).unwrap();
    world.add_aabb(Aabb::new((1.5, 0.0, 0.0), (3.0, 1.0, 1.0)), ()).unwrap();

    let pushes = std::cell::RefCell::new(Vec::new());
    let response = |report: &mut CollisionReport<(), ()>| pushes.borrow_mut().push(report.push_vector);
    let query = CollisionQuery::new()
        .with_velocity((0.0, 0.0, 0.1))
        .with_response(&response);

    // Wedged between the walls: the second push would exactly undo the first
    let wedged = Shape::Aabb(Aabb::new((0.0, 0.0, 0.0), (2.0, 1.0, 1.0)));
    let (count, state) = resolve_with_state(&world, Packet::new(wedged, &query, true));

    assert_eq!(state, PacketState::OscillationStop);
    assert_eq!(count, 1);
    assert_eq!(*pushes.borrow(), vec![(-0.5, 0.0, 0.0)]);
}

#[test]
fn test_single_wall_does_not_oscillate() {
    let mut world: CollisionWorld<(), ()> = CollisionWorld::new(());
    world.add_aabb(Aabb::new((-1.0, 0.0, 0.0), (0.5, 1.0, 1.0)), ()).unwrap();
    let response = |_: &mut CollisionReport<(), ()>| {};
    let query = CollisionQuery::new()
        .with_velocity((0.0, 0.0, 0.1))
        .with_response(&response);

    let wedged = Shape::Aabb(Aabb::new((0.0, 0.0, 0.0), (2.0, 1.0, 1.0)));
    let (_, state) = resolve_with_state(&world, Packet::new(wedged, &query, true));
    assert_eq!(state, PacketState::IterationCap);
}

#[test]
fn test_packets_restored_when_response_panics() {
    let world = floor_world();
    let response = |_: &mut CollisionReport<(), ()>| panic!("response failed");
    let query = CollisionQuery::new()
        .with_velocity((0.0, -0.1, 0.0))
        .with_response(&response);

    let result = catch_unwind(AssertUnwindSafe(|| {
        resolve_with_state(&world, Packet::new(sinking_box(), &query, true))
    }));

    assert!(result.is_err());
    assert_eq!(world.packets(), 0);
}

#[test]
fn test_invalid_query_shape_is_ignored() {
    init_logging();
    let world = floor_world();
    let calls = Cell::new(0);
    let response = |_: &mut CollisionReport<(), ()>| calls.set(calls.get() + 1);
    let query = CollisionQuery::new()
        .with_velocity((0.0, -0.25, 0.0))
        .with_response(&response);

    let inverted = Shape::AabbExtent(AabbExtent::new((4.5, 0.5, 4.5), (0.5, -0.5, 0.5)));
    let (count, state) = resolve_with_state(&world, Packet::new(inverted, &query, true));
    assert_eq!(count, 0);
    assert_eq!(state, PacketState::InvalidShape);
    assert_eq!(calls.get(), 0);
    assert_eq!(world.packets(), 0);
    assert_eq!(world.rejected(), 0);
}
