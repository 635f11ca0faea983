//! Shape collision detection and resolution.
//!
//! - [`models`]: shape value types and the tagged [`models::Shape`]
//! - [`interactions`]: intersection tests, closest points, ray queries
//! - [`dispatch`]: function tables selecting the routine for a pair of shape kinds
//! - [`world`]: primitive storage, the packet resolver and the collide queries
//! - [`apis`]: a move-and-slide facade for scene objects
pub mod utils;
pub mod models;
pub mod interactions;
pub mod dispatch;
pub mod world;
pub mod apis;
