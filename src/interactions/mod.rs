mod closest_points;
mod ray_queries;
mod segment_distance;
mod shape_intersections;

pub use closest_points::*;
pub use ray_queries::*;
pub use segment_distance::*;
pub use shape_intersections::*;
