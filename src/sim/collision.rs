//! Sphere contact rules
//!
//! Contact is decided by an "effective separation": a signed quantity built
//! from the center distance and the radii, where `<= 0` means touching.
//! Edible spheres use an asymmetric rule (a big player has to swallow the
//! center, a small one only has to reach the surface); lethal spheres kill on
//! any surface contact.

use glam::Vec3;

use super::state::{Entity, EntityKind, LossReason};
use crate::center_distance;

/// How a kind of sphere interacts with the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRule {
    /// Eaten if smaller than the player, eats the player otherwise
    Absorbable,
    /// Any touch ends the run
    Lethal(LossReason),
}

impl CollisionRule {
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Stationary | EntityKind::Mobile => CollisionRule::Absorbable,
            EntityKind::Spiked => CollisionRule::Lethal(LossReason::Spiked),
            EntityKind::Hazard => CollisionRule::Lethal(LossReason::Sun),
        }
    }
}

/// Outcome of a player/sphere contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player swallows the sphere
    Absorb,
    /// Sphere is bigger and swallows the player
    Eaten,
    /// Lethal sphere touched
    Killed(LossReason),
}

/// Signed separation; `<= 0` means contact
pub fn effective_separation(
    rule: CollisionRule,
    distance: f32,
    player_radius: f32,
    entity_radius: f32,
) -> f32 {
    match rule {
        CollisionRule::Absorbable if player_radius >= entity_radius => distance - player_radius,
        CollisionRule::Absorbable => distance - entity_radius,
        CollisionRule::Lethal(_) => distance - entity_radius - player_radius,
    }
}

/// Check one sphere against the player
pub fn check_contact(player_position: Vec3, player_radius: f32, entity: &Entity) -> Option<Contact> {
    let rule = CollisionRule::for_kind(entity.kind);
    let distance = center_distance(player_position, entity.position());
    if effective_separation(rule, distance, player_radius, entity.radius) > 0.0 {
        return None;
    }
    Some(match rule {
        CollisionRule::Absorbable if entity.radius > player_radius => Contact::Eaten,
        CollisionRule::Absorbable => Contact::Absorb,
        CollisionRule::Lethal(reason) => Contact::Killed(reason),
    })
}

/// Radius after swallowing a sphere (additive growth)
#[inline]
pub fn grown_radius(player_radius: f32, size_increment_rate: f32, entity_radius: f32) -> f32 {
    player_radius + size_increment_rate * entity_radius
}
