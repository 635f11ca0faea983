use std::fmt;
use std::error::Error;

use crate::world::PrimitiveId;

/// Represents errors returned by collision world operations.
///
/// Geometry queries never fail: unsupported shape pairs and degenerate
/// inputs resolve to "no collision". Only store operations report errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// The shape handed to an add call has non-finite coordinates, an
    /// inverted box or a negative radius.
    InvalidShape(String),
    /// No primitive with this id lives in the world.
    PrimitiveNotFound(PrimitiveId),
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CollisionError::InvalidShape(msg) => write!(f, "Invalid shape: {}", msg),
            CollisionError::PrimitiveNotFound(id) => write!(f, "Primitive {} not found", id),
        }
    }
}

impl Error for CollisionError {}
