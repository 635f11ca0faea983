mod collision_world;
mod packet;
mod query;

pub use collision_world::*;
pub use packet::PacketState;
pub use query::*;

#[cfg(test)]
mod collision_world_tests;
#[cfg(test)]
mod packet_tests;
