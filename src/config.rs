//! Game balance and tuning
//!
//! Every number the simulation reads comes from a `GameConfig`. Hosts either
//! use the defaults or hand over a JSON document (the web bridge does).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::ScreenRect;
use crate::sim::{Difficulty, EntityKind};

/// Player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting radius
    pub radius: f32,
    /// Forward speed numerator (distance per frame is `speed / radius`)
    pub speed: f32,
    /// Radians per steering key press, also scales mouse steering
    pub rotation_speed: f32,
    /// Radius gained per unit of absorbed radius
    pub size_increment_rate: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            rotation_speed: PLAYER_ROTATION_SPEED,
            size_increment_rate: SIZE_INCREMENT_RATE,
        }
    }
}

/// Inclusive integer radius range for spawned spheres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: u32,
    pub max: u32,
}

impl RadiusRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Tuning for one pool of spheres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of spheres kept in the pool
    pub count: usize,
    pub radius: RadiusRange,
    /// Forward speed numerator (ignored for stationary spheres)
    #[serde(default)]
    pub speed: f32,
    /// Per-frame probability of a random reorientation instead of moving
    #[serde(default)]
    pub reorient_chance: f32,
}

/// The fixed hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub radius: f32,
    pub position: Vec3,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            radius: SUN_RADIUS,
            position: Vec3::from_array(SUN_POSITION),
        }
    }
}

/// Goal radius for each difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub normal: f32,
    pub hard: f32,
    pub easy: f32,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            normal: GOAL_NORMAL,
            hard: GOAL_HARD,
            easy: GOAL_EASY,
        }
    }
}

impl Goals {
    pub fn goal_for(&self, difficulty: Difficulty) -> f32 {
        match difficulty {
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
            Difficulty::Easy => self.easy,
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Half-width of the play cube
    pub environment_size: f32,
    pub time_limit_secs: f32,
    pub player: PlayerConfig,
    pub stationary: PoolConfig,
    pub mobile: PoolConfig,
    pub spiked: PoolConfig,
    pub sun: SunConfig,
    pub goals: Goals,
    /// Pointer steering is ignored over this part of the screen
    pub ui_panel: ScreenRect,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            environment_size: ENVIRONMENT_SIZE,
            time_limit_secs: TIME_LIMIT_SECS,
            player: PlayerConfig::default(),
            stationary: PoolConfig {
                count: STATIONARY_COUNT,
                radius: RadiusRange::new(STATIONARY_RADIUS_MIN, STATIONARY_RADIUS_MAX),
                speed: 0.0,
                reorient_chance: 0.0,
            },
            mobile: PoolConfig {
                count: MOBILE_COUNT,
                radius: RadiusRange::new(MOBILE_RADIUS_MIN, MOBILE_RADIUS_MAX),
                speed: MOBILE_SPEED,
                reorient_chance: MOBILE_REORIENT_CHANCE,
            },
            spiked: PoolConfig {
                count: SPIKED_COUNT,
                radius: RadiusRange::new(SPIKED_RADIUS_MIN, SPIKED_RADIUS_MAX),
                speed: SPIKED_SPEED,
                reorient_chance: SPIKED_REORIENT_CHANCE,
            },
            sun: SunConfig::default(),
            goals: Goals::default(),
            ui_panel: ScreenRect::from_array(UI_PANEL_RECT),
        }
    }
}

/// Reasons a `GameConfig` is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON could not be parsed into a config
    Parse(String),
    InvalidEnvironmentSize,
    InvalidTimeLimit,
    InvalidPlayerRadius,
    InvalidPlayerSpeed,
    InvalidRotationSpeed,
    InvalidSizeIncrementRate,
    /// Pool radius range must satisfy `0 < min <= max`
    InvalidRadiusRange { kind: EntityKind, min: u32, max: u32 },
    InvalidPoolSpeed { kind: EntityKind },
    InvalidReorientChance { kind: EntityKind, chance: f32 },
    InvalidSunRadius,
    InvalidGoal { difficulty: Difficulty },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::InvalidEnvironmentSize => {
                write!(f, "environment_size must be positive and finite")
            }
            Self::InvalidTimeLimit => write!(f, "time_limit_secs must be positive and finite"),
            Self::InvalidPlayerRadius => write!(f, "player.radius must be positive and finite"),
            Self::InvalidPlayerSpeed => write!(f, "player.speed must be finite and >= 0"),
            Self::InvalidRotationSpeed => {
                write!(f, "player.rotation_speed must be finite and >= 0")
            }
            Self::InvalidSizeIncrementRate => {
                write!(f, "player.size_increment_rate must be finite and >= 0")
            }
            Self::InvalidRadiusRange { kind, min, max } => write!(
                f,
                "{} radius range {min}..={max} must satisfy 0 < min <= max",
                kind.label()
            ),
            Self::InvalidPoolSpeed { kind } => {
                write!(f, "{} speed must be finite and >= 0", kind.label())
            }
            Self::InvalidReorientChance { kind, chance } => write!(
                f,
                "{} reorient_chance must be within [0, 1], got {chance}",
                kind.label()
            ),
            Self::InvalidSunRadius => write!(f, "sun.radius must be positive and finite"),
            Self::InvalidGoal { difficulty } => {
                write!(f, "{} goal must be positive and finite", difficulty.label())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Pool tuning for a pooled kind (`None` for the sun)
    pub fn pool(&self, kind: EntityKind) -> Option<&PoolConfig> {
        match kind {
            EntityKind::Stationary => Some(&self.stationary),
            EntityKind::Mobile => Some(&self.mobile),
            EntityKind::Spiked => Some(&self.spiked),
            EntityKind::Hazard => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_world()?;
        self.validate_player()?;
        for kind in EntityKind::POOLED {
            if let Some(pool) = self.pool(kind) {
                Self::validate_pool(kind, pool)?;
            }
        }
        self.validate_hazards_and_goals()?;
        Ok(())
    }

    fn validate_world(&self) -> Result<(), ConfigError> {
        if !positive(self.environment_size) {
            return Err(ConfigError::InvalidEnvironmentSize);
        }
        if !positive(self.time_limit_secs) {
            return Err(ConfigError::InvalidTimeLimit);
        }
        Ok(())
    }

    fn validate_player(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        if !positive(player.radius) {
            return Err(ConfigError::InvalidPlayerRadius);
        }
        if !non_negative(player.speed) {
            return Err(ConfigError::InvalidPlayerSpeed);
        }
        if !non_negative(player.rotation_speed) {
            return Err(ConfigError::InvalidRotationSpeed);
        }
        if !non_negative(player.size_increment_rate) {
            return Err(ConfigError::InvalidSizeIncrementRate);
        }
        Ok(())
    }

    fn validate_pool(kind: EntityKind, pool: &PoolConfig) -> Result<(), ConfigError> {
        let RadiusRange { min, max } = pool.radius;
        if min == 0 || min > max {
            return Err(ConfigError::InvalidRadiusRange { kind, min, max });
        }
        if !non_negative(pool.speed) {
            return Err(ConfigError::InvalidPoolSpeed { kind });
        }
        if !(0.0..=1.0).contains(&pool.reorient_chance) {
            return Err(ConfigError::InvalidReorientChance {
                kind,
                chance: pool.reorient_chance,
            });
        }
        Ok(())
    }

    fn validate_hazards_and_goals(&self) -> Result<(), ConfigError> {
        if !positive(self.sun.radius) {
            return Err(ConfigError::InvalidSunRadius);
        }
        for difficulty in Difficulty::ALL {
            if !positive(self.goals.goal_for(difficulty)) {
                return Err(ConfigError::InvalidGoal { difficulty });
            }
        }
        Ok(())
    }
}
