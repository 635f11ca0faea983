//! Run with `wasm-pack test --node`.
#![cfg(target_arch = "wasm32")]

use rs_collision_wasm::WasmCollisionWorld;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_box_lands_on_floor() {
    let mut world = WasmCollisionWorld::new();
    world.add_aabb(0.0, 0.0, 0.0, 10.0, 1.0, 10.0, 1).unwrap();

    let result = world.collide_aabb(4.0, 0.75, 4.0, 5.0, 1.75, 5.0, 0.0, -0.25, 0.0);
    assert_eq!(result.count(), 1);
    let correction = result.correction().to_vec();
    assert_eq!(correction, vec![0.0, 0.25, 0.0]);
}

#[wasm_bindgen_test]
fn test_zero_velocity_reports_nothing() {
    let mut world = WasmCollisionWorld::new();
    world.add_aabb(0.0, 0.0, 0.0, 10.0, 1.0, 10.0, 1).unwrap();

    let result = world.collide_aabb(4.0, 0.5, 4.0, 5.0, 1.5, 5.0, 0.0, 0.0, 0.0);
    assert_eq!(result.count(), 0);
    assert_eq!(result.correction().to_vec(), vec![0.0, 0.0, 0.0]);

    assert_eq!(world.count_overlaps_aabb(4.0, 0.5, 4.0, 5.0, 1.5, 5.0), 1);
}

#[wasm_bindgen_test]
fn test_invalid_shape_is_rejected() {
    let mut world = WasmCollisionWorld::new();

    assert!(world.add_sphere(0.0, 0.0, 0.0, -1.0, 7).is_err());
    assert_eq!(world.len(), 0);
}

#[wasm_bindgen_test]
fn test_remove_returns_tag() {
    let mut world = WasmCollisionWorld::new();
    let id = world.add_sphere(0.0, 0.0, 0.0, 1.0, 7).unwrap();

    assert_eq!(world.remove(id).unwrap(), 7);
    assert!(world.remove(id).is_err());
}
