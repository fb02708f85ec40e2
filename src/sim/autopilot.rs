//! Idle/demo mode - a simple AI that steers the player
//!
//! Each frame it picks at most one steering increment: turn away from a
//! threat that is close and ahead, turn away from a wall that is close ahead,
//! otherwise chase the nearest sphere small enough to eat.

use glam::Vec3;

use super::collision::{CollisionRule, effective_separation};
use super::motion::Steer;
use super::state::{Entity, GameState};

/// Separation below which a threat ahead triggers evasion
const THREAT_MARGIN: f32 = 15.0;
/// How far ahead the wall check looks
const WALL_LOOKAHEAD: f32 = 20.0;

/// Steering that turns the local heading toward `local_target`
fn steer_toward(local_target: Vec3, tolerance: f32) -> Option<Steer> {
    let lateral = local_target.truncate().length();
    if local_target.z > 0.0 && lateral.atan2(local_target.z) <= tolerance {
        return None;
    }
    if local_target.z <= 0.0 && lateral < f32::EPSILON {
        // Dead behind: any turn will do
        return Some(Steer::YawLeft);
    }
    Some(if local_target.x.abs() >= local_target.y.abs() {
        if local_target.x > 0.0 { Steer::YawLeft } else { Steer::YawRight }
    } else if local_target.y > 0.0 {
        Steer::PitchUp
    } else {
        Steer::PitchDown
    })
}

/// Steering that turns the local heading away from `local_threat`
fn steer_away(local_threat: Vec3) -> Steer {
    if local_threat.x.abs() >= local_threat.y.abs() {
        if local_threat.x > 0.0 { Steer::YawRight } else { Steer::YawLeft }
    } else if local_threat.y > 0.0 {
        Steer::PitchDown
    } else {
        Steer::PitchUp
    }
}

fn is_threat(entity: &Entity, player_radius: f32) -> bool {
    match CollisionRule::for_kind(entity.kind) {
        CollisionRule::Absorbable => entity.radius > player_radius,
        CollisionRule::Lethal(_) => true,
    }
}

/// Pick this frame's steering for the player, if any
pub fn autopilot_steer(state: &GameState) -> Option<Steer> {
    let player = &state.player;
    let position = player.position();
    let pose = player.pose;

    // Closest threat in front of us
    let threat = state
        .pools
        .iter()
        .chain(std::iter::once(&state.sun))
        .filter(|e| is_threat(e, player.radius))
        .map(|e| {
            let rule = CollisionRule::for_kind(e.kind);
            let distance = (e.position() - position).length();
            let gap = effective_separation(rule, distance, player.radius, e.radius);
            (e, gap)
        })
        .filter(|(e, gap)| *gap < THREAT_MARGIN && pose.to_local(e.position()).z > 0.0)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((entity, _)) = threat {
        return Some(steer_away(pose.to_local(entity.position())));
    }

    if !state
        .environment
        .contains(position + pose.forward() * WALL_LOOKAHEAD)
    {
        // Aim back at the middle of the play area
        return steer_toward(pose.to_local(Vec3::ZERO), player.rotation_speed)
            .or(Some(Steer::YawLeft));
    }

    let prey = state
        .pools
        .iter()
        .filter(|e| !is_threat(e, player.radius))
        .min_by(|a, b| {
            let da = (a.position() - position).length_squared();
            let db = (b.position() - position).length_squared();
            da.total_cmp(&db)
        })?;
    steer_toward(pose.to_local(prey.position()), player.rotation_speed * 0.5)
}
