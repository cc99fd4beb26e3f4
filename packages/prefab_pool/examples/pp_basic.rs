//! Basic usage of the `prefab_pool` crate:
//!
//! * Creating a pool and prewarming it for a template.
//! * Acquiring instances, including beyond the prewarmed size.
//! * Releasing instances back to the pool.
//! * Shutting the pool down.
//!
//! Run with `RUST_LOG=prefab_pool=trace` to see what the pool does.

use prefab_pool::PrefabPool;
use testing::{FakeScene, Label};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = FakeScene::new();
    let asteroid = scene.register_template("asteroid");

    let mut pool = PrefabPool::builder()
        .container_name("Asteroids")
        .build(&mut scene);

    // Prewarming instantiates everything up front, while nobody is waiting for it.
    pool.create_pool(&mut scene, asteroid, 3)
        .expect("asteroid is a registered template");
    println!(
        "Prewarmed {} asteroids, {} entities alive in the scene",
        pool.free_len(asteroid).unwrap_or_default(),
        scene.alive_count()
    );

    let wave: Vec<_> = (0..5).map(|_| pool.acquire(&mut scene, asteroid)).collect();
    println!(
        "Spawned a wave of {} asteroids; the pool had to instantiate {} in total",
        wave.len(),
        scene.instantiate_count()
    );

    for instance in wave {
        pool.release(&mut scene, instance);
    }
    println!(
        "After the wave, {} asteroids are parked for reuse",
        pool.free_len(asteroid).unwrap_or_default()
    );

    // The typed variant resolves a component of the instance along with it.
    let (instance, label) = pool.acquire_component::<Label, _>(&mut scene, asteroid);
    if let Some(Label(name)) = label {
        println!("Acquired {instance}, labelled '{name}'");
    }

    let checked_out = pool.shutdown(&mut scene);
    println!(
        "Shut down with {} instance(s) still checked out, {} entities alive in the scene",
        checked_out.len(),
        scene.alive_count()
    );
}
