//! Gameplay simulation
//!
//! Everything that decides what happens in a run lives here:
//! - The player and the three sphere pools, plus the sun
//! - Per-frame motion and boundary handling
//! - Contact resolution and the win/loss outcome
//! - The countdown clock and difficulty goal
//!
//! Nothing in this module touches the browser or the GPU. Randomness comes
//! from the seeded generator in [`GameState`], so a seed plus the same frame
//! inputs always produces the same run.

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod motion;
pub mod pose;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_steer;
pub use clock::GameClock;
pub use collision::{CollisionRule, Contact, check_contact, effective_separation, grown_radius};
pub use motion::{PlayerMove, Steer, WanderStep};
pub use pose::Pose;
pub use spawn::spawn_entity;
pub use state::{
    Difficulty, Entity, EntityKind, Environment, GameEvent, GamePhase, GameState, LossReason,
    Outcome, Player, Pool, Pools, ViewToggles,
};
pub use tick::{Command, PointerSample, TickInput, simulate_step, tick};
