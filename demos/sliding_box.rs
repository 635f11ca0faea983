// demos/sliding_box.rs

use log::info;
use rs_collision::apis::EasyCollision;
use rs_collision::models::{Aabb, Sphere};
use rs_collision::utils::CollisionError;

fn main() -> Result<(), CollisionError> {
    env_logger::init();

    let mut scene = EasyCollision::new();
    scene.add_static_box(Aabb::new((0.0, 0.0, 0.0), (20.0, 1.0, 20.0)), "floor")?;
    scene.add_static_box(Aabb::new((8.0, 1.0, 0.0), (9.0, 4.0, 20.0)), "wall")?;
    scene.add_static_sphere(Sphere::new((4.0, 1.5, 6.0), 0.75), "boulder")?;

    let mut player = Aabb::new((1.0, 3.0, 5.5), (2.0, 4.0, 6.5));
    let velocity = (0.5, -0.25, 0.0);

    println!("Start: min={:?}, max={:?}", player.min, player.max);

    for step in 1..=24 {
        let result = scene.move_box(&mut player, velocity);
        if result.collisions > 0 {
            info!("Step {}: {} collision(s), correction {:?}", step, result.collisions, result.correction);
        }
        println!(
            "Step {:2}: min=({:.2}, {:.2}, {:.2}) collisions={}",
            step, player.min.0, player.min.1, player.min.2, result.collisions
        );
    }

    println!("End: min={:?}, max={:?}", player.min, player.max);
    println!("Blocked where it stands: {}", scene.is_blocked(&player));

    Ok(())
}
