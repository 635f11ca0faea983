// rs_collision_wasm/src/lib.rs
// This is the public API for the wasm wrapper of the collision library.

use std::cell::Cell;

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;
use rs_collision::models::{Aabb, Sphere};
use rs_collision::dispatch::registry;
use rs_collision::utils::{add_vectors, negate_vector, CollisionError};
use rs_collision::world::{CollisionQuery, CollisionReport, CollisionWorld, PrimitiveId};

fn to_js_error(error: CollisionError) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&error.to_string()));
    JsValue::from_str(&error.to_string())
}

/// A collision world whose primitives carry a numeric tag.
#[wasm_bindgen]
pub struct WasmCollisionWorld {
    world: CollisionWorld<(), u32>,
}

#[wasm_bindgen]
impl WasmCollisionWorld {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            world: CollisionWorld::new(()),
        }
    }

    #[wasm_bindgen]
    pub fn add_aabb(&mut self, min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64, tag: u32) -> Result<u64, JsValue> {
        self.world.add_aabb(Aabb::new((min_x, min_y, min_z), (max_x, max_y, max_z)), tag)
            .map(|id| id.0)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn add_sphere(&mut self, x: f64, y: f64, z: f64, radius: f64, tag: u32) -> Result<u64, JsValue> {
        self.world.add_sphere(Sphere::new((x, y, z), radius), tag)
            .map(|id| id.0)
            .map_err(to_js_error)
    }

    /// Removes a primitive and returns its tag.
    #[wasm_bindgen]
    pub fn remove(&mut self, id: u64) -> Result<u32, JsValue> {
        self.world.remove_primitive(PrimitiveId(id)).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.world.len()
    }

    /// Collides a box moving with the given velocity. Each penetration slides
    /// the box back out; the result carries the total correction. A zero
    /// velocity reports no collisions; use `count_overlaps_aabb` for a plain
    /// overlap count.
    #[wasm_bindgen]
    pub fn collide_aabb(&self, min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64, vx: f64, vy: f64, vz: f64) -> WasmCollideResult {
        let aabb = Aabb::new((min_x, min_y, min_z), (max_x, max_y, max_z));
        self.collide((vx, vy, vz), |query| self.world.collide_aabb(&aabb, query))
    }

    #[wasm_bindgen]
    pub fn collide_sphere(&self, x: f64, y: f64, z: f64, radius: f64, vx: f64, vy: f64, vz: f64) -> WasmCollideResult {
        let sphere = Sphere::new((x, y, z), radius);
        self.collide((vx, vy, vz), |query| self.world.collide_sphere(&sphere, query))
    }

    /// Number of primitives the box overlaps where it stands.
    #[wasm_bindgen]
    pub fn count_overlaps_aabb(&self, min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> u32 {
        let aabb = Aabb::new((min_x, min_y, min_z), (max_x, max_y, max_z));
        self.world.collide_aabb(&aabb, &CollisionQuery::new())
    }
}

impl WasmCollisionWorld {
    fn collide<F>(&self, velocity: (f64, f64, f64), run: F) -> WasmCollideResult
    where
        F: Fn(&CollisionQuery<'_, (), u32>) -> u32,
    {
        let correction = Cell::new((0.0, 0.0, 0.0));
        let response = |report: &mut CollisionReport<(), u32>| {
            let separation = negate_vector(report.push_vector);
            registry().velocity_apply(&mut report.packet_shape, separation);
            correction.set(add_vectors(correction.get(), separation));
        };

        let query = CollisionQuery::new()
            .with_velocity(velocity)
            .with_response(&response);
        let count = run(&query);

        WasmCollideResult {
            count,
            correction: correction.get(),
        }
    }
}

impl Default for WasmCollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision count plus the translation that separated the query shape.
#[wasm_bindgen]
pub struct WasmCollideResult {
    count: u32,
    correction: (f64, f64, f64),
}

#[wasm_bindgen]
impl WasmCollideResult {
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[wasm_bindgen(getter)]
    pub fn correction(&self) -> Float64Array {
        let (x, y, z) = self.correction;
        Float64Array::from(&[x, y, z][..])
    }
}
