//! Sphere Eater - eat smaller spheres, dodge the spiked ones and the sun
//!
//! Core modules:
//! - `sim`: Deterministic gameplay simulation (motion, collisions, game state)
//! - `config`: Data-driven game balance
//! - `input`: Host key/pointer events turned into per-frame commands
//! - `hud`: Scoreboard text for the host display
//! - `render`: Render snapshots and picking for the host renderer
//! - `web`: Browser bridge (wasm32 only)

pub mod config;
pub mod hud;
pub mod input;
pub mod render;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Half-width of the cubic play area (centered on the origin)
    pub const ENVIRONMENT_SIZE: f32 = 100.0;
    /// Seconds the player has to reach the goal size
    pub const TIME_LIMIT_SECS: f32 = 120.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 5.0;
    pub const PLAYER_SPEED: f32 = 2.0;
    pub const PLAYER_ROTATION_SPEED: f32 = PI / 32.0;
    /// Growth per absorbed radius unit (additive)
    pub const SIZE_INCREMENT_RATE: f32 = 0.4;

    /// Stationary spheres
    pub const STATIONARY_COUNT: usize = 6;
    pub const STATIONARY_RADIUS_MIN: u32 = 2;
    pub const STATIONARY_RADIUS_MAX: u32 = 7;

    /// Mobile spheres
    pub const MOBILE_COUNT: usize = 5;
    pub const MOBILE_RADIUS_MIN: u32 = 4;
    pub const MOBILE_RADIUS_MAX: u32 = 9;
    pub const MOBILE_SPEED: f32 = 0.8;
    pub const MOBILE_REORIENT_CHANCE: f32 = 0.01;

    /// Spiked spheres
    pub const SPIKED_COUNT: usize = 5;
    pub const SPIKED_RADIUS_MIN: u32 = 2;
    pub const SPIKED_RADIUS_MAX: u32 = 5;
    pub const SPIKED_SPEED: f32 = 0.5;
    pub const SPIKED_REORIENT_CHANCE: f32 = 0.01;

    /// The sun sits in a corner of the play area
    pub const SUN_RADIUS: f32 = 4.0;
    pub const SUN_POSITION: [f32; 3] = [100.0, 100.0, 100.0];

    /// Goal radius per difficulty
    pub const GOAL_NORMAL: f32 = 10.0;
    pub const GOAL_HARD: f32 = 20.0;
    pub const GOAL_EASY: f32 = 6.0;

    /// Screen rectangle covered by the HUD panel (pixels, top-left origin)
    pub const UI_PANEL_RECT: [f32; 4] = [0.0, 0.0, 260.0, 160.0];

    /// Chase camera: distance behind the player and vertical field of view
    pub const CAMERA_DISTANCE: f32 = 100.0;
    pub const CAMERA_FOV_Y: f32 = 30.0 * PI / 180.0;
}

/// Euclidean distance between two sphere centers
#[inline]
pub fn center_distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

/// True when every component of `point` lies within `[-half_width, half_width]`
#[inline]
pub fn inside_cube(point: Vec3, half_width: f32) -> bool {
    point.abs().max_element() <= half_width
}
