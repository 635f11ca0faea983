use std::cell::Cell;
use std::rc::Rc;

use crate::models::{Aabb, AabbExtent, Capsule, Ellipse, Obb, Shape, ShapeType, Sphere};
use crate::utils::{CollisionConstants, CollisionError, DEFAULT_COLLISION_CONSTANTS};
use crate::world::{CollisionWorld, PrimitiveId, ShapeStorage};

fn unit_box() -> Aabb {
    Aabb::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0))
}

#[test]
fn test_new_world_is_empty() {
    let world: CollisionWorld<&str, ()> = CollisionWorld::new("scene");

    assert!(world.is_empty());
    assert_eq!(world.len(), 0);
    assert_eq!(*world.user_data(), "scene");
    assert_eq!(world.packets(), 0);
    assert_eq!(world.rejected(), 0);
    assert_eq!(world.constants(), DEFAULT_COLLISION_CONSTANTS);
}

#[test]
fn test_with_constants() {
    let constants = CollisionConstants::new(Some(3), Some(2), Some(0.5));
    let world: CollisionWorld<(), ()> = CollisionWorld::with_constants((), constants);

    assert_eq!(world.constants().max_iterations, 3);
    assert_eq!(world.constants().max_recursion, 2);
    assert_eq!(world.constants().sweep_push_threshold, 0.5);
}

#[test]
fn test_add_every_shape_kind() {
    let mut world: CollisionWorld<(), u32> = CollisionWorld::new(());

    world.add_aabb(unit_box(), 0).unwrap();
    world.add_aabb_extent(AabbExtent::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)), 1).unwrap();
    world.add_obb(Obb::from_aabb_extent(&AabbExtent::new((0.0, 0.0, 0.0), (1.0, 1.0, 1.0))), 2).unwrap();
    world.add_sphere(Sphere::new((0.0, 0.0, 0.0), 1.0), 3).unwrap();
    world.add_ellipse(Ellipse::new((0.0, 0.0, 0.0), (1.0, 2.0, 3.0)), 4).unwrap();
    world.add_capsule(Capsule::new((0.0, 0.0, 0.0), (0.0, 1.0, 0.0), 0.5), 5).unwrap();

    let types: Vec<ShapeType> = world.primitives().iter().map(|p| p.shape_type()).collect();
    assert_eq!(types, ShapeType::ALL.to_vec());

    let data: Vec<u32> = world.primitives().iter().map(|p| *p.user_data()).collect();
    assert_eq!(data, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_ids_are_unique_and_displayed() {
    let mut world: CollisionWorld<(), ()> = CollisionWorld::new(());
    let first = world.add_aabb(unit_box(), ()).unwrap();
    let second = world.add_aabb(unit_box(), ()).unwrap();

    assert_ne!(first, second);
    world.remove_primitive(first).unwrap();
    let third = world.add_aabb(unit_box(), ()).unwrap();
    assert_ne!(third, first);
    assert_ne!(third, second);

    assert_eq!(PrimitiveId(12).to_string(), "#12");
}

#[test]
fn test_remove_keeps_insertion_order() {
    let mut world: CollisionWorld<(), char> = CollisionWorld::new(());
    let ids: Vec<PrimitiveId> = ['a', 'b', 'c', 'd']
        .into_iter()
        .map(|c| world.add_aabb(unit_box(), c).unwrap())
        .collect();

    assert_eq!(world.remove_primitive(ids[1]), Ok('b'));

    let remaining: Vec<char> = world.primitives().iter().map(|p| *p.user_data()).collect();
    assert_eq!(remaining, vec!['a', 'c', 'd']);
    assert_eq!(world.primitive_user_data(ids[3]), Some(&'d'));
    assert!(world.primitive(ids[1]).is_none());
}

#[test]
fn test_remove_unknown_primitive() {
    let mut world: CollisionWorld<(), ()> = CollisionWorld::new(());
    let id = world.add_sphere(Sphere::new((0.0, 0.0, 0.0), 1.0), ()).unwrap();
    world.remove_primitive(id).unwrap();

    assert_eq!(world.remove_primitive(id), Err(CollisionError::PrimitiveNotFound(id)));
}

#[test]
fn test_invalid_shapes_are_rejected() {
    let mut world: CollisionWorld<(), ()> = CollisionWorld::new(());

    let inverted = world.add_aabb(Aabb::new((1.0, 0.0, 0.0), (0.0, 1.0, 1.0)), ());
    assert!(matches!(inverted, Err(CollisionError::InvalidShape(_))));

    let negative = world.add_sphere(Sphere::new((0.0, 0.0, 0.0), -1.0), ());
    assert!(matches!(negative, Err(CollisionError::InvalidShape(_))));

    let not_finite = world.add_capsule(Capsule::new((f64::NAN, 0.0, 0.0), (0.0, 0.0, 0.0), 1.0), ());
    assert!(matches!(not_finite, Err(CollisionError::InvalidShape(_))));

    let referenced = Rc::new(Cell::new(Aabb::new((0.0, f64::INFINITY, 0.0), (1.0, 1.0, 1.0))));
    assert!(world.add_aabb_ref(referenced, ()).is_err());

    assert!(world.is_empty());
}

#[test]
fn test_user_data_accessors() {
    let mut world: CollisionWorld<Vec<&str>, String> = CollisionWorld::new(Vec::new());
    let id = world.add_aabb(unit_box(), "crate".to_string()).unwrap();

    world.user_data_mut().push("loaded");
    assert_eq!(world.user_data(), &vec!["loaded"]);

    if let Some(data) = world.primitive_user_data_mut(id) {
        data.push_str(" #1");
    }
    assert_eq!(world.primitive_user_data(id).map(String::as_str), Some("crate #1"));
    assert_eq!(world.primitive_user_data(PrimitiveId(99)), None);
}

#[test]
fn test_referenced_box_tracks_caller_updates() {
    let platform = Rc::new(Cell::new(unit_box()));
    let mut world: CollisionWorld<(), ()> = CollisionWorld::new(());
    let id = world.add_aabb_ref(Rc::clone(&platform), ()).unwrap();

    let primitive = world.primitive(id).unwrap();
    assert!(primitive.storage().is_reference());
    assert!(primitive.storage().refers_to(&platform));

    let mut moved = unit_box();
    moved.translate((0.0, 2.0, 0.0));
    platform.set(moved);

    assert_eq!(world.primitive(id).unwrap().shape(), Shape::Aabb(moved));
}

#[test]
fn test_referenced_box_is_released_not_dropped() {
    let platform = Rc::new(Cell::new(unit_box()));

    {
        let mut world: CollisionWorld<(), ()> = CollisionWorld::new(());
        let id = world.add_aabb_ref(Rc::clone(&platform), ()).unwrap();
        world.add_aabb_ref(Rc::clone(&platform), ()).unwrap();
        assert_eq!(Rc::strong_count(&platform), 3);

        world.remove_primitive(id).unwrap();
        assert_eq!(Rc::strong_count(&platform), 2);
    }

    // The world is gone; the caller's box is intact
    assert_eq!(Rc::strong_count(&platform), 1);
    assert_eq!(platform.get(), unit_box());
}

#[test]
fn test_owned_storage() {
    let storage = ShapeStorage::Owned(Shape::Sphere(Sphere::new((1.0, 2.0, 3.0), 0.5)));
    let other = Rc::new(Cell::new(unit_box()));

    assert!(!storage.is_reference());
    assert!(!storage.refers_to(&other));
    assert_eq!(storage.shape().shape_type(), ShapeType::Sphere);
}
