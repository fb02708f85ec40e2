//! Per-frame simulation step
//!
//! One call advances the game by one rendered frame. There is no fixed
//! timestep: motion and reorientation chances are per frame, only the clock
//! uses the frame delta.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::autopilot::autopilot_steer;
use super::collision::{Contact, check_contact, grown_radius};
use super::motion::{PlayerMove, Steer, WanderStep, advance_player, pointer_steer, steer_player, wander};
use super::spawn::spawn_entity;
use super::state::{EntityKind, GameEvent, GamePhase, GameState, LossReason, Outcome};

/// Discrete commands decoded from key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Start, pause or resume; restarts once the run is over
    TogglePause,
    /// Show/hide the helper grid
    ToggleGrid,
    CycleDifficulty,
    Steer(Steer),
}

/// Latest pointer state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Screen position in pixels, top-left origin
    pub position: Vec2,
    /// A mouse button is held
    pub held: bool,
}

/// Input for a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Key commands in arrival order
    pub commands: Vec<Command>,
    pub pointer: PointerSample,
    /// Viewport size in pixels (pointer steering is off while zero)
    pub viewport: Vec2,
    /// Idle/demo mode - AI steers the player
    pub autopilot: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    for &command in &input.commands {
        apply_command(state, command);
    }

    // Not started, paused or over: nothing moves, the clock stays put
    if state.phase != GamePhase::Running {
        return;
    }

    // Time runs out before anything else can happen this frame
    if state.time_remaining == 0 {
        state.finish(Outcome::Lost(LossReason::TimeUp));
        return;
    }
    state.clock.advance(input.dt);
    state.time_remaining = state
        .clock
        .remaining_whole_secs(state.config.time_limit_secs);

    if input.autopilot
        && let Some(steer) = autopilot_steer(state)
    {
        steer_player(&mut state.player, steer);
    }

    if advance_player(&mut state.player, &state.environment) == PlayerMove::Blocked {
        let position = state.player.position();
        log::warn!(
            "Player at the edge of the play area ({:.1}, {:.1}, {:.1})",
            position.x,
            position.y,
            position.z
        );
        state.events.push(GameEvent::BoundaryWarning { position });
    }

    let pointer = input.pointer;
    if pointer.held && input.viewport.x > 0.0 && !state.config.ui_panel.contains(pointer.position) {
        let offset = pointer.position - input.viewport * 0.5;
        pointer_steer(&mut state.player, offset, input.viewport.x);
    }

    move_wanderers(state);
    resolve_collisions(state);
}

/// Pure form of [`tick`]: consumes a state and returns the next one
pub fn simulate_step(mut state: GameState, input: &TickInput) -> GameState {
    tick(&mut state, input);
    state
}

fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::TogglePause => match state.phase {
            GamePhase::Ready | GamePhase::Paused => state.set_phase(GamePhase::Running),
            GamePhase::Running => state.set_phase(GamePhase::Paused),
            GamePhase::Over(_) => state.restart(),
        },
        Command::ToggleGrid => {
            state.view.grid_visible = !state.view.grid_visible;
        }
        Command::CycleDifficulty => {
            if !state.is_over() {
                state.cycle_difficulty();
            }
        }
        Command::Steer(steer) => {
            if state.phase == GamePhase::Running {
                steer_player(&mut state.player, steer);
            }
        }
    }
}

fn move_wanderers(state: &mut GameState) {
    for kind in [EntityKind::Mobile, EntityKind::Spiked] {
        let (Some(pool), Some(tuning)) = (state.pools.get_mut(kind), state.config.pool(kind)) else {
            continue;
        };
        for (slot, entity) in pool.entities.iter_mut().enumerate() {
            if wander(entity, tuning, &state.environment, &mut state.rng) == WanderStep::Bounced {
                log::debug!("{} sphere {} bounced off the boundary", kind.label(), slot);
                state.events.push(GameEvent::Bounced { kind, slot });
            }
        }
    }
}

/// An edible sphere swallowed this frame
#[derive(Debug, Clone, Copy)]
struct Absorption {
    kind: EntityKind,
    slot: usize,
    entity_radius: f32,
}

/// Read-only pass over all spheres
#[derive(Debug, Default)]
struct ContactScan {
    absorptions: Vec<Absorption>,
    /// Terminal outcome and, when the player was eaten, the slot of the eater
    terminal: Option<(Outcome, Option<(EntityKind, usize)>)>,
}

/// Check every sphere in collision order (stationary, mobile, spiked, sun),
/// growing a running radius as spheres are swallowed. Stops at the first
/// terminal contact.
fn scan_contacts(state: &GameState) -> ContactScan {
    let position = state.player.position();
    let rate = state.player.size_increment_rate;
    let goal = state.goal();
    let mut radius = state.player.radius;
    let mut scan = ContactScan::default();

    let pooled = EntityKind::POOLED.into_iter().flat_map(move |kind| {
        state
            .pools
            .get(kind)
            .into_iter()
            .flat_map(|pool| pool.entities.iter().enumerate().map(|(slot, e)| (Some(slot), e)))
    });
    let candidates = pooled.chain(std::iter::once((None, &state.sun)));

    for (slot, entity) in candidates {
        let Some(contact) = check_contact(position, radius, entity) else {
            continue;
        };
        match contact {
            Contact::Absorb => {
                radius = grown_radius(radius, rate, entity.radius);
                if let Some(slot) = slot {
                    scan.absorptions.push(Absorption {
                        kind: entity.kind,
                        slot,
                        entity_radius: entity.radius,
                    });
                }
                if radius >= goal {
                    scan.terminal = Some((Outcome::Won, None));
                    break;
                }
            }
            Contact::Eaten => {
                let eater = slot.map(|slot| (entity.kind, slot));
                scan.terminal = Some((Outcome::Lost(LossReason::Eaten), eater));
                break;
            }
            Contact::Killed(reason) => {
                scan.terminal = Some((Outcome::Lost(reason), None));
                break;
            }
        }
    }
    scan
}

fn resolve_collisions(state: &mut GameState) {
    let scan = scan_contacts(state);

    for absorption in &scan.absorptions {
        let Absorption { kind, slot, entity_radius } = *absorption;
        state.player.radius = grown_radius(
            state.player.radius,
            state.player.size_increment_rate,
            entity_radius,
        );
        log::debug!(
            "Absorbed {} sphere {} (radius {}), player radius now {:.2}",
            kind.label(),
            slot,
            entity_radius,
            state.player.radius
        );
        state.events.push(GameEvent::Absorbed {
            kind,
            slot,
            entity_radius,
            player_radius: state.player.radius,
        });

        // Replace the slot in place
        let (Some(pool), Some(tuning)) = (state.pools.get_mut(kind), state.config.pool(kind)) else {
            continue;
        };
        let fresh = spawn_entity(kind, tuning, &state.environment, &mut state.rng);
        let position = fresh.position();
        pool.entities[slot] = fresh;
        state.events.push(GameEvent::Respawned { kind, slot, position });
    }

    if let Some((outcome, eater)) = scan.terminal {
        // The eater leaves its pool and is not replaced
        if let Some((kind, slot)) = eater
            && let Some(pool) = state.pools.get_mut(kind)
        {
            pool.entities.remove(slot);
        }
        state.finish(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::pose::Pose;
    use crate::sim::state::{Difficulty, Entity};
    use glam::Vec3;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    /// Nothing moves on its own and the pools start empty
    fn quiet_state() -> GameState {
        let mut config = GameConfig::default();
        config.player.speed = 0.0;
        for pool in [&mut config.stationary, &mut config.mobile, &mut config.spiked] {
            pool.count = 0;
            pool.speed = 0.0;
            pool.reorient_chance = 0.0;
        }
        GameState::with_config(config, 99).unwrap()
    }

    fn place(state: &mut GameState, kind: EntityKind, radius: f32, position: Vec3) {
        let pool = state.pools.get_mut(kind).unwrap();
        pool.entities.push(Entity::at(kind, radius, position));
        pool.capacity = pool.entities.len();
    }

    fn start() -> TickInput {
        TickInput {
            dt: DT,
            commands: vec![Command::TogglePause],
            ..Default::default()
        }
    }

    fn frame() -> TickInput {
        TickInput {
            dt: DT,
            ..Default::default()
        }
    }

    fn running(mut state: GameState) -> GameState {
        state.set_phase(GamePhase::Running);
        state.events.clear();
        state
    }

    #[test]
    fn test_ready_until_started() {
        let mut state = GameState::new(12345);
        let before = state.pools.clone();
        tick(&mut state, &frame());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.pools, before);
        assert_eq!(state.clock.elapsed(), 0.0);

        tick(&mut state, &start());
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.clock.elapsed() > 0.0);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = GameState::new(12345);
        tick(&mut state, &start());
        tick(&mut state, &start());
        assert_eq!(state.phase, GamePhase::Paused);
        let elapsed = state.clock.elapsed();
        tick(&mut state, &frame());
        assert_eq!(state.clock.elapsed(), elapsed);
        tick(&mut state, &start());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_absorb_grows_and_respawns() {
        let mut state = running(quiet_state());
        place(&mut state, EntityKind::Stationary, 3.0, Vec3::new(0.0, 0.0, 2.0));
        tick(&mut state, &frame());

        assert!((state.player.radius - 6.2).abs() < 1e-5);
        assert_eq!(state.pools.stationary.len(), 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::Respawned { kind: EntityKind::Stationary, slot: 0, .. }
        )));
    }

    #[test]
    fn test_eaten_by_larger_sphere() {
        let mut state = running(quiet_state());
        place(&mut state, EntityKind::Mobile, 8.0, Vec3::new(0.0, 0.0, 3.0));
        place(&mut state, EntityKind::Mobile, 4.0, Vec3::new(50.0, 0.0, 0.0));
        tick(&mut state, &frame());

        assert_eq!(state.outcome(), Some(Outcome::Lost(LossReason::Eaten)));
        // The eater is removed without a replacement
        assert_eq!(state.pools.mobile.len(), 1);
        assert_eq!(state.pools.mobile.entities[0].radius, 4.0);
        assert_eq!(state.player.radius, 5.0);
    }

    #[test]
    fn test_spiked_contact_loses() {
        let mut state = running(quiet_state());
        state.player.radius = 2.0;
        place(&mut state, EntityKind::Spiked, 3.0, Vec3::new(4.0, 0.0, 0.0));
        tick(&mut state, &frame());

        let outcome = state.outcome().unwrap();
        assert_eq!(outcome, Outcome::Lost(LossReason::Spiked));
        assert!(outcome.description().contains("spiked sphere"));
        assert_eq!(state.pools.spiked.len(), 1);
    }

    #[test]
    fn test_sun_contact_loses() {
        let mut state = running(quiet_state());
        state.sun = Entity::at(EntityKind::Hazard, 4.0, Vec3::new(0.0, 8.0, 0.0));
        tick(&mut state, &frame());
        assert_eq!(state.outcome(), Some(Outcome::Lost(LossReason::Sun)));
    }

    #[test]
    fn test_reaching_goal_wins_before_later_checks() {
        let mut state = running(quiet_state());
        state.difficulty = Difficulty::Easy; // goal 6
        place(&mut state, EntityKind::Stationary, 3.0, Vec3::new(0.0, 0.0, 1.0));
        place(&mut state, EntityKind::Spiked, 2.0, Vec3::new(0.0, 3.0, 0.0));
        tick(&mut state, &frame());

        assert_eq!(state.outcome(), Some(Outcome::Won));
        assert!(state.player.radius >= 6.0);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_first_terminal_contact_decides() {
        let mut state = running(quiet_state());
        place(&mut state, EntityKind::Mobile, 9.0, Vec3::new(0.0, 0.0, 1.0));
        place(&mut state, EntityKind::Spiked, 2.0, Vec3::new(0.0, 3.0, 0.0));
        tick(&mut state, &frame());
        assert_eq!(state.outcome(), Some(Outcome::Lost(LossReason::Eaten)));
    }

    #[test]
    fn test_two_absorptions_in_one_frame() {
        let mut state = running(quiet_state());
        place(&mut state, EntityKind::Stationary, 2.0, Vec3::new(1.0, 0.0, 0.0));
        place(&mut state, EntityKind::Mobile, 4.0, Vec3::new(0.0, 1.0, 0.0));
        tick(&mut state, &frame());
        // 5 + 0.4*2 + 0.4*4
        assert!((state.player.radius - 7.4).abs() < 1e-5);
        assert_eq!(state.pools.stationary.len(), 1);
        assert_eq!(state.pools.mobile.len(), 1);
    }

    #[test]
    fn test_time_runs_out() {
        let mut config = quiet_state().config;
        config.time_limit_secs = 2.0;
        let mut state = GameState::with_config(config, 5).unwrap();
        let second = TickInput { dt: 1.0, ..Default::default() };

        tick(&mut state, &TickInput { dt: 1.0, commands: vec![Command::TogglePause], ..Default::default() });
        assert_eq!(state.time_remaining, 1);
        tick(&mut state, &second);
        assert_eq!(state.time_remaining, 0);
        assert_eq!(state.phase, GamePhase::Running);
        tick(&mut state, &second);
        assert_eq!(state.outcome(), Some(Outcome::Lost(LossReason::TimeUp)));
    }

    #[test]
    fn test_time_up_preempts_collisions() {
        let mut state = running(quiet_state());
        state.time_remaining = 0;
        state.player.radius = 2.0;
        place(&mut state, EntityKind::Stationary, 1.0, Vec3::ZERO);
        tick(&mut state, &frame());
        assert_eq!(state.outcome(), Some(Outcome::Lost(LossReason::TimeUp)));
        assert_eq!(state.player.radius, 2.0);
    }

    #[test]
    fn test_player_boundary_warning() {
        let mut state = GameState::new(3);
        state.set_phase(GamePhase::Running);
        for pool in [&mut state.pools.stationary, &mut state.pools.mobile, &mut state.pools.spiked] {
            pool.entities.clear();
        }
        state.player.pose = Pose::from_translation(Vec3::new(0.0, 0.0, 99.9));
        tick(&mut state, &frame());
        assert_eq!(state.player.position(), Vec3::new(0.0, 0.0, 99.9));
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::BoundaryWarning { .. })));
    }

    #[test]
    fn test_pointer_over_panel_is_ignored() {
        let mut state = running(quiet_state());
        let mut input = frame();
        input.viewport = Vec2::new(1000.0, 800.0);
        input.pointer = PointerSample { position: Vec2::new(10.0, 10.0), held: true };
        tick(&mut state, &input);
        assert!((state.player.pose.forward() - Vec3::Z).length() < 1e-6);

        input.pointer.position = Vec2::new(900.0, 400.0);
        tick(&mut state, &input);
        // Right of center turns toward -X
        assert!(state.player.pose.forward().x < 0.0);
    }

    #[test]
    fn test_pointer_needs_a_held_button() {
        let mut state = running(quiet_state());
        let mut input = frame();
        input.viewport = Vec2::new(1000.0, 800.0);
        input.pointer = PointerSample { position: Vec2::new(900.0, 700.0), held: false };
        tick(&mut state, &input);
        assert!((state.player.pose.forward() - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_over_is_inert_until_restart() {
        let mut state = running(quiet_state());
        state.finish(Outcome::Won);
        let radius = state.player.radius;
        let mut input = frame();
        input.commands = vec![Command::Steer(Steer::YawLeft), Command::CycleDifficulty];
        tick(&mut state, &input);
        assert_eq!(state.outcome(), Some(Outcome::Won));
        assert_eq!(state.difficulty, Difficulty::Normal);
        assert_eq!(state.player.radius, radius);

        tick(&mut state, &start());
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::Restarted { .. })));
    }

    #[test]
    fn test_toggles_stay_live_while_paused() {
        let mut state = GameState::new(8);
        state.set_phase(GamePhase::Paused);
        let input = TickInput {
            dt: DT,
            commands: vec![Command::ToggleGrid, Command::CycleDifficulty],
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(!state.view.grid_visible);
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_difficulty_change_keeps_radius() {
        let mut state = running(quiet_state());
        state.player.radius = 8.0;
        let input = TickInput {
            dt: DT,
            commands: vec![Command::CycleDifficulty, Command::CycleDifficulty],
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.difficulty, Difficulty::Easy);
        assert_eq!(state.player.radius, 8.0);
        // No absorption happened, so no win check either
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            start(),
            TickInput { dt: DT, commands: vec![Command::Steer(Steer::YawLeft)], ..Default::default() },
            frame(),
            TickInput { dt: DT, autopilot: true, ..Default::default() },
            frame(),
        ];
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.pools, b.pools);
        assert_eq!(a.player, b.player);
        assert_eq!(a.phase, b.phase);
    }

    #[test]
    fn test_simulate_step_returns_next_state() {
        let state = GameState::new(4);
        let before = state.clone();
        let next = simulate_step(state, &start());
        assert_eq!(before.phase, GamePhase::Ready);
        assert_eq!(next.phase, GamePhase::Running);
        assert_ne!(next.player.pose, before.player.pose);
    }

    fn steer_strategy() -> impl Strategy<Value = Command> {
        prop_oneof![
            Just(Command::Steer(Steer::YawLeft)),
            Just(Command::Steer(Steer::YawRight)),
            Just(Command::Steer(Steer::PitchUp)),
            Just(Command::Steer(Steer::PitchDown)),
        ]
    }

    proptest! {
        #[test]
        fn proptest_frozen_step_changes_nothing(
            seed in any::<u64>(),
            dt in 0.0f32..1.0,
            commands in proptest::collection::vec(steer_strategy(), 0..4),
            x in 0.0f32..1000.0,
            y in 0.0f32..800.0,
            autopilot in any::<bool>(),
        ) {
            let mut state = GameState::new(seed);
            state.set_phase(GamePhase::Paused);
            let before = state.clone();
            let input = TickInput {
                dt,
                commands,
                pointer: PointerSample { position: Vec2::new(x, y), held: true },
                viewport: Vec2::new(1000.0, 800.0),
                autopilot,
            };
            tick(&mut state, &input);
            prop_assert_eq!(&state.player, &before.player);
            prop_assert_eq!(&state.pools, &before.pools);
            prop_assert_eq!(state.time_remaining, before.time_remaining);
            prop_assert_eq!(state.clock.elapsed(), before.clock.elapsed());
        }

        #[test]
        fn proptest_clock_counts_down_to_zero_then_loses(
            deltas in proptest::collection::vec(0.0f32..0.7, 1..200),
        ) {
            let mut config = quiet_state().config;
            config.time_limit_secs = 3.0;
            let mut state = GameState::with_config(config, 1).unwrap();
            state.set_phase(GamePhase::Running);
            let mut last = state.time_remaining;
            let mut saw_zero = false;
            for dt in deltas.iter().copied().chain(std::iter::repeat(0.5).take(20)) {
                let was_zero = state.time_remaining == 0;
                tick(&mut state, &TickInput { dt, ..Default::default() });
                if state.is_over() {
                    prop_assert!(was_zero);
                    prop_assert_eq!(state.outcome(), Some(Outcome::Lost(LossReason::TimeUp)));
                    break;
                }
                prop_assert!(state.time_remaining <= last);
                last = state.time_remaining;
                saw_zero |= state.time_remaining == 0;
            }
            prop_assert!(saw_zero);
            prop_assert!(state.is_over());
        }

        #[test]
        fn proptest_absorption_is_additive(
            player_radius in 3.0f32..9.0,
            entity_radius in 1u32..=3,
            offset in 0.0f32..0.9,
        ) {
            let mut state = running(quiet_state());
            state.difficulty = Difficulty::Hard; // goal 20, out of reach here
            state.player.radius = player_radius;
            let entity_radius = entity_radius as f32;
            place(&mut state, EntityKind::Stationary, entity_radius, Vec3::new(offset * player_radius, 0.0, 0.0));
            let pool_len = state.pools.stationary.len();
            tick(&mut state, &frame());
            let expected = player_radius + state.player.size_increment_rate * entity_radius;
            prop_assert!((state.player.radius - expected).abs() < 1e-4);
            prop_assert_eq!(state.pools.stationary.len(), pool_len);
        }

        #[test]
        fn proptest_wanderers_stay_inside(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            for _ in 0..300 {
                move_wanderers(&mut state);
            }
            for entity in state.pools.iter() {
                prop_assert!(state.environment.contains(entity.position()));
            }
        }
    }
}
