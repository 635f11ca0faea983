mod constants;
mod constants_config;
pub mod errors;
mod vector_math;

pub use constants::*;
pub use constants_config::*;
pub use errors::CollisionError;
pub use vector_math::*;
