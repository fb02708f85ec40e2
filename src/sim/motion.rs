//! Per-frame motion
//!
//! Moves are proposed as a new pose and checked against the play area before
//! they are committed. The player simply refuses to leave; wandering spheres
//! turn around instead.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::random_angle;
use super::state::{Entity, Environment, Player};
use crate::config::PoolConfig;

/// Discrete steering commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steer {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

/// Result of advancing the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    Moved,
    /// The move would have left the play area and was dropped
    Blocked,
}

/// What a wandering sphere did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WanderStep {
    Moved,
    Reoriented,
    /// Hit the boundary and turned around in place
    Bounced,
}

/// Rotate the player by one steering increment
pub fn steer_player(player: &mut Player, steer: Steer) {
    let angle = player.rotation_speed;
    player.pose = match steer {
        Steer::YawLeft => player.pose.yawed(angle),
        Steer::YawRight => player.pose.yawed(-angle),
        Steer::PitchUp => player.pose.pitched(-angle),
        Steer::PitchDown => player.pose.pitched(angle),
    };
}

/// Move the player forward one frame unless that leaves the play area
pub fn advance_player(player: &mut Player, environment: &Environment) -> PlayerMove {
    let candidate = player.pose.advanced(player.step_distance());
    if environment.contains(candidate.translation()) {
        player.pose = candidate;
        PlayerMove::Moved
    } else {
        PlayerMove::Blocked
    }
}

/// Pointer steering: the further the cursor is from the screen center, the
/// harder the turn. `offset` is in pixels with screen y growing downward.
pub fn pointer_steer(player: &mut Player, offset: Vec2, viewport_width: f32) {
    if viewport_width <= 0.0 {
        return;
    }
    let yaw = player.rotation_speed * -offset.x / viewport_width;
    let pitch = player.rotation_speed * offset.y / viewport_width;
    player.pose = player.pose.yawed_pitched(yaw, pitch);
}

/// One frame of wandering for a mobile or spiked sphere
pub fn wander(
    entity: &mut Entity,
    tuning: &PoolConfig,
    environment: &Environment,
    rng: &mut Pcg32,
) -> WanderStep {
    if rng.random::<f32>() < tuning.reorient_chance {
        entity.pose = entity.pose.yawed_pitched(random_angle(rng), random_angle(rng));
        return WanderStep::Reoriented;
    }

    let candidate = entity.pose.advanced(tuning.speed / entity.radius);
    if environment.contains(candidate.translation()) {
        entity.pose = candidate;
        WanderStep::Moved
    } else {
        entity.pose = entity.pose.half_turned();
        WanderStep::Bounced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, RadiusRange};
    use crate::sim::pose::Pose;
    use crate::sim::state::EntityKind;
    use glam::Vec3;
    use rand::SeedableRng;

    fn player() -> Player {
        Player::new(&GameConfig::default().player)
    }

    fn env() -> Environment {
        Environment { size: 100.0 }
    }

    fn tuning(speed: f32, reorient_chance: f32) -> PoolConfig {
        PoolConfig {
            count: 1,
            radius: RadiusRange::new(2, 2),
            speed,
            reorient_chance,
        }
    }

    #[test]
    fn player_moves_speed_over_radius() {
        let mut p = player();
        assert_eq!(advance_player(&mut p, &env()), PlayerMove::Moved);
        // speed 2 / radius 5
        assert!((p.position().z - 0.4).abs() < 1e-6);
    }

    #[test]
    fn player_blocked_at_boundary() {
        let mut p = player();
        p.pose = Pose::from_translation(Vec3::new(0.0, 0.0, 99.9));
        let before = p.pose;
        assert_eq!(advance_player(&mut p, &env()), PlayerMove::Blocked);
        assert_eq!(p.pose, before);
    }

    #[test]
    fn steering_keys_turn_the_heading() {
        let mut p = player();
        steer_player(&mut p, Steer::YawLeft);
        assert!(p.pose.forward().x > 0.0);
        let mut p = player();
        steer_player(&mut p, Steer::YawRight);
        assert!(p.pose.forward().x < 0.0);
        let mut p = player();
        steer_player(&mut p, Steer::PitchUp);
        assert!(p.pose.forward().y > 0.0);
        let mut p = player();
        steer_player(&mut p, Steer::PitchDown);
        assert!(p.pose.forward().y < 0.0);
    }

    #[test]
    fn pointer_left_of_center_turns_left() {
        let mut p = player();
        pointer_steer(&mut p, Vec2::new(-400.0, 0.0), 800.0);
        assert!(p.pose.forward().x > 0.0);
        assert_eq!(p.position(), Vec3::ZERO);
    }

    #[test]
    fn pointer_at_center_keeps_heading() {
        let mut p = player();
        pointer_steer(&mut p, Vec2::ZERO, 800.0);
        assert!((p.pose.forward() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn wanderer_moves_forward() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut e = Entity::at(EntityKind::Mobile, 2.0, Vec3::ZERO);
        let step = wander(&mut e, &tuning(0.8, 0.0), &env(), &mut rng);
        assert_eq!(step, WanderStep::Moved);
        assert!((e.position().z - 0.4).abs() < 1e-6);
    }

    #[test]
    fn wanderer_always_reorients_at_full_chance() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut e = Entity::at(EntityKind::Spiked, 2.0, Vec3::new(3.0, 4.0, 5.0));
        let step = wander(&mut e, &tuning(0.8, 1.0), &env(), &mut rng);
        assert_eq!(step, WanderStep::Reoriented);
        assert!((e.position() - Vec3::new(3.0, 4.0, 5.0)).length() < 1e-4);
    }

    #[test]
    fn wanderer_bounces_off_boundary() {
        let mut rng = Pcg32::seed_from_u64(0);
        let start = Pose::from_translation(Vec3::new(0.0, 0.0, 99.9));
        let mut e = Entity::new(EntityKind::Mobile, 2.0, start);
        let step = wander(&mut e, &tuning(0.8, 0.0), &env(), &mut rng);
        assert_eq!(step, WanderStep::Bounced);
        assert_eq!(e.position(), start.translation());
        assert!(e.pose.forward().z < -0.99);

        // Next frame heads back inside
        let step = wander(&mut e, &tuning(0.8, 0.0), &env(), &mut rng);
        assert_eq!(step, WanderStep::Moved);
        assert!(e.position().z < 99.9);
    }
}
