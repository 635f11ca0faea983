// src/utils/constants_config.rs
use crate::utils::DEFAULT_COLLISION_CONSTANTS;

/// Tunable limits of the packet resolver.
///
/// A world copies these at construction; every collide call on that world
/// reads them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionConstants {
    /// Upper bound on narrow-phase passes per collide call.
    pub max_iterations: u32,
    /// A collide call is rejected once `packets + rejected` exceeds this.
    pub max_recursion: u32,
    /// Nearest sweep distance above which the broad phase pushes back
    /// instead of moving the packet.
    pub sweep_push_threshold: f64,
}

impl Default for CollisionConstants {
    fn default() -> Self {
        DEFAULT_COLLISION_CONSTANTS
    }
}

impl CollisionConstants {
    /// Creates constants, falling back to [`DEFAULT_COLLISION_CONSTANTS`]
    /// for every `None`.
    ///
    /// # Example
    /// ```
    /// use rs_collision::utils::CollisionConstants;
    ///
    /// let constants = CollisionConstants::new(Some(5), None, None);
    /// assert_eq!(constants.max_iterations, 5);
    /// assert_eq!(constants.max_recursion, 20);
    /// assert_eq!(constants.sweep_push_threshold, 1.0);
    /// ```
    pub fn new(
        max_iterations: Option<u32>,
        max_recursion: Option<u32>,
        sweep_push_threshold: Option<f64>,
    ) -> Self {
        let default = DEFAULT_COLLISION_CONSTANTS;
        Self {
            max_iterations: max_iterations.unwrap_or(default.max_iterations),
            max_recursion: max_recursion.unwrap_or(default.max_recursion),
            sweep_push_threshold: sweep_push_threshold.unwrap_or(default.sweep_push_threshold),
        }
    }
}
