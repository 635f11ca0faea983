use crate::utils;

pub const DEFAULT_COLLISION_CONSTANTS: utils::CollisionConstants = utils::CollisionConstants {
    max_iterations: 20,
    max_recursion: 20,
    sweep_push_threshold: 1.0,
};

/// Slack added to radius-sum comparisons so that touching (and nearly
/// touching) round shapes always report a collision.
pub const TANGENCY_BIAS: f64 = 1.0;

/// Numerical tolerance for parallel-axis and degenerate-length checks
pub const EPSILON: f64 = 1e-6;
