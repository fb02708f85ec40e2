//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in `GameState`: the player, the
//! sphere pools, the sun, the clock and the game phase.

use glam::Vec3;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::GameClock;
use super::pose::Pose;
use super::spawn::fill_pool;
use crate::config::{ConfigError, GameConfig, PlayerConfig};
use crate::inside_cube;

/// Sphere categories. Pooled kinds respawn; the hazard is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Never moves after spawning, can be eaten
    Stationary,
    /// Wanders the play area, can be eaten
    Mobile,
    /// Wanders the play area, kills on touch
    Spiked,
    /// The sun
    Hazard,
}

impl EntityKind {
    /// Kinds that live in pools, in collision order
    pub const POOLED: [EntityKind; 3] = [
        EntityKind::Stationary,
        EntityKind::Mobile,
        EntityKind::Spiked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Stationary => "stationary",
            EntityKind::Mobile => "mobile",
            EntityKind::Spiked => "spiked",
            EntityKind::Hazard => "sun",
        }
    }

    /// Whether the kind moves each frame
    pub fn is_mobile(&self) -> bool {
        matches!(self, EntityKind::Mobile | EntityKind::Spiked)
    }
}

/// Difficulty levels; each selects a goal radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    Easy,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Hard, Difficulty::Easy];

    /// Numeric level (1 = normal, 2 = hard, 3 = easy)
    pub fn level(&self) -> u8 {
        match self {
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
            Difficulty::Easy => 3,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Normal),
            2 => Some(Difficulty::Hard),
            3 => Some(Difficulty::Easy),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Easy => "easy",
        }
    }

    /// Cycle 1 -> 2 -> 3 -> 1
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
            Difficulty::Easy => Difficulty::Normal,
        }
    }
}

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    TimeUp,
    /// Touched an edible sphere bigger than the player
    Eaten,
    Spiked,
    Sun,
}

impl LossReason {
    pub fn description(&self) -> &'static str {
        match self {
            LossReason::TimeUp => {
                "TIME'S UP! You have not reached the goal size within the time limit."
            }
            LossReason::Eaten => "You have been eaten by a sphere larger than you.",
            LossReason::Spiked => "You have been killed by a spiked sphere.",
            LossReason::Sun => "You have been burned up by the sun.",
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost(LossReason),
}

impl Outcome {
    pub fn description(&self) -> &'static str {
        match self {
            Outcome::Won => "You reached the goal size!",
            Outcome::Lost(reason) => reason.description(),
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start key
    #[default]
    Ready,
    /// Active gameplay
    Running,
    /// Paused by the player
    Paused,
    /// Run ended; only a restart leaves this phase
    Over(Outcome),
}

/// Things that happened during a frame, for hosts (HUD, renderer, audio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    DifficultyChanged {
        difficulty: Difficulty,
        goal: f32,
    },
    /// The player tried to leave the play area
    BoundaryWarning {
        position: Vec3,
    },
    /// A wandering sphere hit the boundary and turned around
    Bounced {
        kind: EntityKind,
        slot: usize,
    },
    Absorbed {
        kind: EntityKind,
        slot: usize,
        entity_radius: f32,
        player_radius: f32,
    },
    Respawned {
        kind: EntityKind,
        slot: usize,
        position: Vec3,
    },
    /// Terminal transition; position/radius are where the burst effect goes
    GameOver {
        outcome: Outcome,
        position: Vec3,
        radius: f32,
    },
    Restarted {
        seed: u64,
    },
}

/// The player sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub radius: f32,
    pub pose: Pose,
    pub speed: f32,
    pub rotation_speed: f32,
    pub size_increment_rate: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            radius: config.radius,
            pose: Pose::IDENTITY,
            speed: config.speed,
            rotation_speed: config.rotation_speed,
            size_increment_rate: config.size_increment_rate,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pose.translation()
    }

    /// Distance covered per frame; bigger spheres are slower
    pub fn step_distance(&self) -> f32 {
        self.speed / self.radius
    }
}

/// A non-player sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub radius: f32,
    pub pose: Pose,
}

impl Entity {
    pub fn new(kind: EntityKind, radius: f32, pose: Pose) -> Self {
        debug_assert!(radius > 0.0, "entity radius must be positive");
        Self { kind, radius, pose }
    }

    /// An entity with identity orientation at `position`
    pub fn at(kind: EntityKind, radius: f32, position: Vec3) -> Self {
        Self::new(kind, radius, Pose::from_translation(position))
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pose.translation()
    }
}

/// Fixed-size collection of one kind of sphere. Slots are identified by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub kind: EntityKind,
    /// Configured population
    pub capacity: usize,
    pub entities: Vec<Entity>,
}

impl Pool {
    pub fn new(kind: EntityKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            entities: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}

/// The three sphere pools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pools {
    pub stationary: Pool,
    pub mobile: Pool,
    pub spiked: Pool,
}

impl Pools {
    /// Pool for a pooled kind (`None` for the sun)
    pub fn get(&self, kind: EntityKind) -> Option<&Pool> {
        match kind {
            EntityKind::Stationary => Some(&self.stationary),
            EntityKind::Mobile => Some(&self.mobile),
            EntityKind::Spiked => Some(&self.spiked),
            EntityKind::Hazard => None,
        }
    }

    pub fn get_mut(&mut self, kind: EntityKind) -> Option<&mut Pool> {
        match kind {
            EntityKind::Stationary => Some(&mut self.stationary),
            EntityKind::Mobile => Some(&mut self.mobile),
            EntityKind::Spiked => Some(&mut self.spiked),
            EntityKind::Hazard => None,
        }
    }

    /// All pooled entities in collision order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.stationary
            .iter()
            .chain(self.mobile.iter())
            .chain(self.spiked.iter())
    }
}

/// Cubic play area centered on the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Half-width of the cube
    pub size: f32,
}

impl Environment {
    pub fn contains(&self, point: Vec3) -> bool {
        inside_cube(point, self.size)
    }
}

/// Presentation toggles that stay live while paused
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewToggles {
    pub grid_visible: bool,
}

impl Default for ViewToggles {
    fn default() -> Self {
        Self { grid_visible: true }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub player: Player,
    pub pools: Pools,
    pub sun: Entity,
    pub environment: Environment,
    pub clock: GameClock,
    /// Whole seconds left, as last published to the HUD
    pub time_remaining: u32,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    /// Events raised by the most recent frame
    pub events: Vec<GameEvent>,
    pub view: ViewToggles,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Create a new game with custom tuning
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let environment = Environment {
            size: config.environment_size,
        };

        let mut pools = Pools {
            stationary: Pool::new(EntityKind::Stationary, config.stationary.count),
            mobile: Pool::new(EntityKind::Mobile, config.mobile.count),
            spiked: Pool::new(EntityKind::Spiked, config.spiked.count),
        };
        for kind in EntityKind::POOLED {
            if let (Some(pool), Some(tuning)) = (pools.get_mut(kind), config.pool(kind)) {
                fill_pool(pool, tuning, &environment, &mut rng);
            }
        }

        let sun = Entity::at(EntityKind::Hazard, config.sun.radius, config.sun.position);
        let time_remaining = GameClock::new().remaining_whole_secs(config.time_limit_secs);

        log::info!(
            "New game (seed {}): {} stationary, {} mobile, {} spiked",
            seed,
            pools.stationary.len(),
            pools.mobile.len(),
            pools.spiked.len()
        );

        Self {
            player: Player::new(&config.player),
            pools,
            sun,
            environment,
            clock: GameClock::new(),
            time_remaining,
            difficulty: Difficulty::default(),
            phase: GamePhase::Ready,
            events: Vec::new(),
            view: ViewToggles::default(),
            seed,
            rng,
            config,
        }
    }

    /// Goal radius for the selected difficulty
    pub fn goal(&self) -> f32 {
        self.config.goals.goal_for(self.difficulty)
    }

    /// Simulation suspended (not started, paused or over)
    pub fn is_frozen(&self) -> bool {
        self.phase != GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Over(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Move to a new phase, keeping the clock in step and recording the change
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        if to == GamePhase::Running {
            self.clock.start();
        } else {
            self.clock.stop();
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// End the run. The first terminal outcome of a frame wins; later calls are ignored.
    pub fn finish(&mut self, outcome: Outcome) {
        if self.is_over() {
            return;
        }
        self.set_phase(GamePhase::Over(outcome));
        match outcome {
            Outcome::Won => log::info!("Goal reached at radius {:.2}", self.player.radius),
            Outcome::Lost(reason) => log::info!("Game lost: {}", reason.description()),
        }
        self.events.push(GameEvent::GameOver {
            outcome,
            position: self.player.position(),
            radius: self.player.radius,
        });
    }

    /// Select the next difficulty. Only future win checks are affected.
    pub fn cycle_difficulty(&mut self) {
        self.difficulty = self.difficulty.next();
        let goal = self.goal();
        log::info!("Difficulty: {} (goal {})", self.difficulty.label(), goal);
        self.events.push(GameEvent::DifficultyChanged {
            difficulty: self.difficulty,
            goal,
        });
    }

    /// Fresh `Ready` game with the same tuning and a seed drawn from this run
    pub fn restart(&mut self) {
        let seed = self.rng.next_u64();
        let config = self.config.clone();
        *self = Self::build(config, seed);
        self.events.push(GameEvent::Restarted { seed });
    }

    /// Total spheres across all pools
    pub fn entity_count(&self) -> usize {
        self.pools.iter().count()
    }
}
