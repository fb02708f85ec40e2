//! Rigid poses for spheres
//!
//! A pose is a 4x4 rigid transform. Local axes: +Z forward, +X lateral, +Y up.
//! Incremental motion composes on the right, so translations and rotations
//! are always expressed in the entity's own frame.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Rotation + translation of an entity, the single source of its position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose(Mat4);

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    pub fn from_translation(position: Vec3) -> Self {
        Self(Mat4::from_translation(position))
    }

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self(matrix)
    }

    pub fn matrix(&self) -> Mat4 {
        self.0
    }

    /// Pose applied to the local origin
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    /// Unit vector of the local forward axis in world space
    pub fn forward(&self) -> Vec3 {
        self.0.transform_vector3(Vec3::Z).normalize_or_zero()
    }

    /// Compose a local-space transform onto this pose
    #[must_use]
    pub fn then(&self, local: Mat4) -> Self {
        Self(self.0 * local)
    }

    /// Move `distance` along the local forward axis
    #[must_use]
    pub fn advanced(&self, distance: f32) -> Self {
        self.then(Mat4::from_translation(Vec3::new(0.0, 0.0, distance)))
    }

    /// Turn about the local up axis (positive swings forward toward +X)
    #[must_use]
    pub fn yawed(&self, angle: f32) -> Self {
        self.then(Mat4::from_rotation_y(angle))
    }

    /// Turn about the local lateral axis (positive swings forward toward -Y)
    #[must_use]
    pub fn pitched(&self, angle: f32) -> Self {
        self.then(Mat4::from_rotation_x(angle))
    }

    /// Yaw followed by pitch as one composed rotation
    #[must_use]
    pub fn yawed_pitched(&self, yaw: f32, pitch: f32) -> Self {
        self.then(Mat4::from_rotation_y(yaw) * Mat4::from_rotation_x(pitch))
    }

    /// Reverse course: half-turn about the local lateral axis
    #[must_use]
    pub fn half_turned(&self) -> Self {
        self.pitched(std::f32::consts::PI)
    }

    /// Express a world-space point in this pose's local frame
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.0.inverse().transform_point3(world)
    }

    /// Column-major matrix elements for host renderers
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.0.to_cols_array()
    }
}
