//! Data handed to the host renderer
//!
//! The host draws whatever it likes from a [`RenderSnapshot`]; nothing here
//! feeds back into the simulation. Picking answers "which sphere is under the
//! cursor" for the HUD.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{CAMERA_DISTANCE, CAMERA_FOV_Y};
use crate::sim::{EntityKind, GameState, Pose};

/// Something the renderer draws as a sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Player,
    Sphere(EntityKind),
}

/// One sphere to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderBody {
    pub kind: BodyKind,
    pub radius: f32,
    /// Column-major world transform (unscaled)
    pub matrix: [f32; 16],
}

impl RenderBody {
    fn new(kind: BodyKind, radius: f32, pose: &Pose) -> Self {
        Self {
            kind,
            radius,
            matrix: pose.to_cols_array(),
        }
    }
}

/// Everything visible in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub player: RenderBody,
    /// Hidden once the run is over (the host plays its burst instead)
    pub player_visible: bool,
    pub bodies: Vec<RenderBody>,
    pub grid_visible: bool,
    /// Half-width of the play area, for the grid
    pub environment_size: f32,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let mut bodies = Vec::with_capacity(state.entity_count() + 1);
        bodies.extend(
            state
                .pools
                .iter()
                .map(|e| RenderBody::new(BodyKind::Sphere(e.kind), e.radius, &e.pose)),
        );
        bodies.push(RenderBody::new(
            BodyKind::Sphere(state.sun.kind),
            state.sun.radius,
            &state.sun.pose,
        ));

        Self {
            player: RenderBody::new(BodyKind::Player, state.player.radius, &state.player.pose),
            player_visible: !state.is_over(),
            bodies,
            grid_visible: state.view.grid_visible,
            environment_size: state.environment.size,
        }
    }
}

/// Result of a picking query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickHit {
    pub kind: BodyKind,
    pub radius: f32,
    /// Distance along the ray to the sphere surface
    pub distance: f32,
}

/// Distance along a normalized ray to the first point on the sphere, if any.
/// A ray starting inside the sphere hits at the exit point.
fn ray_sphere_distance(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let m = origin - center;
    let b = m.dot(dir);
    let c = m.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// World-space ray through a screen pixel for the chase camera, which sits
/// behind the player looking along its heading. Screen right is local -X.
pub fn camera_ray(player_pose: &Pose, pointer: Vec2, viewport: Vec2) -> Option<(Vec3, Vec3)> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let ndc = Vec2::new(
        2.0 * pointer.x / viewport.x - 1.0,
        1.0 - 2.0 * pointer.y / viewport.y,
    );
    let half_height = (CAMERA_FOV_Y * 0.5).tan();
    let half_width = half_height * viewport.x / viewport.y;
    let local_dir = Vec3::new(-ndc.x * half_width, ndc.y * half_height, 1.0);

    let matrix = player_pose.matrix();
    let origin = matrix.transform_point3(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE));
    let dir = matrix.transform_vector3(local_dir).try_normalize()?;
    Some((origin, dir))
}

/// Nearest sphere hit by the ray, including the player while visible
pub fn pick(state: &GameState, ray_origin: Vec3, ray_dir: Vec3) -> Option<PickHit> {
    let dir = ray_dir.try_normalize()?;

    let player = (!state.is_over())
        .then(|| (BodyKind::Player, state.player.radius, state.player.position()));
    let spheres = state
        .pools
        .iter()
        .chain(std::iter::once(&state.sun))
        .map(|e| (BodyKind::Sphere(e.kind), e.radius, e.position()));

    spheres
        .chain(player)
        .filter_map(|(kind, radius, center)| {
            ray_sphere_distance(ray_origin, dir, center, radius).map(|distance| PickHit {
                kind,
                radius,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
