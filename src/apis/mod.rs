pub mod easy_collision;

pub use easy_collision::{EasyCollision, MoveResult};
