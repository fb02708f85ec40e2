//! Sphere spawning
//!
//! Radii and positions are whole numbers drawn uniformly from their ranges.
//! Wandering kinds start with a random heading; stationary ones keep the
//! identity orientation.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::pose::Pose;
use super::state::{Entity, EntityKind, Environment, Pool};
use crate::config::PoolConfig;

/// Uniform angle in [0, 2π)
pub fn random_angle(rng: &mut Pcg32) -> f32 {
    rng.random::<f32>() * std::f32::consts::TAU
}

/// Uniform whole-number point inside the environment cube
pub fn random_position(environment: &Environment, rng: &mut Pcg32) -> Vec3 {
    let half = environment.size.floor() as i32;
    Vec3::new(
        rng.random_range(-half..=half) as f32,
        rng.random_range(-half..=half) as f32,
        rng.random_range(-half..=half) as f32,
    )
}

/// Build a fresh sphere of `kind` at a random spot
pub fn spawn_entity(
    kind: EntityKind,
    tuning: &PoolConfig,
    environment: &Environment,
    rng: &mut Pcg32,
) -> Entity {
    // Validated config guarantees min >= 1
    let radius = rng.random_range(tuning.radius.min..=tuning.radius.max) as f32;
    let position = random_position(environment, rng);
    let mut pose = Pose::from_translation(position);
    if kind.is_mobile() {
        pose = pose.yawed_pitched(random_angle(rng), random_angle(rng));
    }
    Entity::new(kind, radius, pose)
}

/// Top the pool up to its configured population
pub fn fill_pool(pool: &mut Pool, tuning: &PoolConfig, environment: &Environment, rng: &mut Pcg32) {
    while pool.entities.len() < pool.capacity {
        let entity = spawn_entity(pool.kind, tuning, environment, rng);
        pool.entities.push(entity);
    }
}
