//! # Game Configuration
//!
//! Tunable constants for every subsystem, grouped per concern. All fields
//! default to the reference values, so an empty JSON object is a valid
//! configuration and a partial file only overrides what it names.
//!
//! ```
//! use voxel_sandbox::application_state::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "world": { "seed": 7 } }"#).unwrap();
//! assert_eq!(config.world.seed, Some(7));
//! assert_eq!(config.world.half_extent, 32);
//! ```

use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a configuration can be rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The text is not valid JSON for [`GameConfig`].
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but is outside its allowed range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Terrain generation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Explicit seed for terrain noise and ore trials. `None` draws a random
    /// seed, making every run different.
    pub seed: Option<u32>,
    /// Columns are generated for `x, z` in `-half_extent..half_extent`.
    pub half_extent: i32,
    /// Frequency applied to column coordinates before sampling noise.
    pub noise_frequency: f64,
    /// Height amplitude of the surface noise.
    pub noise_amplitude: f64,
    /// Number of subsurface cells directly below the surface.
    pub subsurface_depth: i32,
    /// Deepest cell below the surface that receives a deep block.
    pub deep_depth: i32,
    /// Per-cell chance that a deep block becomes its kind's ore.
    pub ore_chance: f64,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: None,
            half_extent: 32,
            noise_frequency: 0.05,
            noise_amplitude: 8.0,
            subsurface_depth: 3,
            deep_depth: 10,
            ore_chance: 0.05,
        }
    }
}

/// Player movement and survival settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Eye position at spawn.
    pub spawn: [f32; 3],
    pub speed: f32,
    pub jump_force: f32,
    pub gravity: f32,
    /// Distance from eye to feet.
    pub height: f32,
    /// Horizontal half-width of the collision box.
    pub radius: f32,
    pub max_health: i32,
    /// Impact speed below which landing is harmless.
    pub fall_damage_threshold: f32,
    pub fall_damage_multiplier: f32,
    pub run_multiplier: f32,
    pub crouch_multiplier: f32,
    /// Radians of view rotation per unit of look input.
    pub look_sensitivity: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 10.0, 0.0],
            speed: 5.0,
            jump_force: 6.0,
            gravity: 15.0,
            height: 1.8,
            radius: 0.3,
            max_health: 100,
            fall_damage_threshold: 15.0,
            fall_damage_multiplier: 2.0,
            run_multiplier: 1.6,
            crouch_multiplier: 0.5,
            look_sensitivity: 0.002,
        }
    }
}

/// Creature physics, AI and spawning settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    pub gravity: f32,
    pub jump_force: f32,
    /// Horizontal speed of an aggressive leap.
    pub move_speed: f32,
    /// Horizontal speed while patrolling.
    pub patrol_speed: f32,
    pub aggro_radius: f32,
    /// Leap interval bounds, in seconds.
    pub leap_interval: [f32; 2],
    /// Patrol direction refresh interval bounds, in seconds.
    pub wander_interval: [f32; 2],
    /// Per-frame chance of a small hop while patrolling.
    pub idle_hop_chance: f64,
    /// Factor applied to horizontal velocity when hitting a wall.
    pub bounce_factor: f32,
    pub max_alive: usize,
    /// Seconds between spawner checks.
    pub spawn_interval: f32,
    /// Height new creatures are dropped from.
    pub spawn_height: f32,
    /// Horizontal half-extent of the spawn square around the origin.
    pub spawn_radius: f32,
    /// Creatures that fall below this height are despawned.
    pub despawn_depth: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            gravity: 15.0,
            jump_force: 6.0,
            move_speed: 2.0,
            patrol_speed: 1.0,
            aggro_radius: 20.0,
            leap_interval: [1.0, 3.0],
            wander_interval: [2.0, 5.0],
            idle_hop_chance: 0.005,
            bounce_factor: -0.5,
            max_alive: 5,
            spawn_interval: 10.0,
            spawn_height: 15.0,
            spawn_radius: 10.0,
            despawn_depth: -64.0,
        }
    }
}

/// Melee settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub attack_range: f32,
    /// Maximum angle between facing and target, in degrees.
    pub attack_cone_degrees: f32,
    pub damage: i32,
    /// Horizontal knockback speed applied to a surviving target.
    pub knockback_speed: f32,
    /// Upward knockback speed applied to a surviving target.
    pub knockback_lift: f32,
    /// Swing progress per second; a swing lasts until progress reaches pi.
    pub swing_speed: f32,
    /// Progress window `(start, end)` in which a swing can land hits.
    pub hit_window: [f32; 2],
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_range: 2.5,
            attack_cone_degrees: 60.0,
            damage: 5,
            knockback_speed: 10.0,
            knockback_lift: 5.0,
            swing_speed: 10.0,
            hit_window: [0.5, 2.5],
        }
    }
}

/// Block interaction settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Seconds the mine input must be held to break a block.
    pub duration: f32,
    /// Multiply `duration` by the targeted kind's hardness.
    pub scale_by_hardness: bool,
    /// Maximum ray length for mining and placing.
    pub reach: f32,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            duration: 0.5,
            scale_by_hardness: false,
            reach: 5.0,
        }
    }
}

/// Day/night clock settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub day_length: u32,
    pub start_time: u32,
    /// Clock units added per frame.
    pub tick_rate: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_length: 24000,
            start_time: 6000,
            tick_rate: 2,
        }
    }
}

/// Mesh cache settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Maximum number of chunk meshes kept built at once.
    pub cache_capacity: usize,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self { cache_capacity: 256 }
    }
}

/// Complete configuration of a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldGenConfig,
    pub player: PlayerConfig,
    pub creatures: CreatureConfig,
    pub combat: CombatConfig,
    pub mining: MiningConfig,
    pub clock: ClockConfig,
    pub mesh: MeshConfig,
    /// Upper bound on the time step of one frame, in seconds.
    pub max_frame_step: f32,
}

impl GameConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks that every value is inside its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(value: f32, field: &'static str) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        fn interval(bounds: [f32; 2], field: &'static str) -> Result<(), ConfigError> {
            if bounds[0] >= 0.0 && bounds[0] <= bounds[1] {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be an ordered, non-negative [min, max] pair",
                })
            }
        }

        if self.world.half_extent <= 0 {
            return Err(ConfigError::Invalid {
                field: "world.half_extent",
                reason: "must be positive",
            });
        }
        if self.world.subsurface_depth < 0 || self.world.deep_depth < self.world.subsurface_depth {
            return Err(ConfigError::Invalid {
                field: "world.deep_depth",
                reason: "layers must satisfy 0 <= subsurface_depth <= deep_depth",
            });
        }
        if !(0.0..=1.0).contains(&self.world.ore_chance) {
            return Err(ConfigError::Invalid {
                field: "world.ore_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.creatures.idle_hop_chance) {
            return Err(ConfigError::Invalid {
                field: "creatures.idle_hop_chance",
                reason: "must be a probability in [0, 1]",
            });
        }
        if self.player.max_health <= 0 {
            return Err(ConfigError::Invalid {
                field: "player.max_health",
                reason: "must be positive",
            });
        }
        if self.clock.day_length == 0 {
            return Err(ConfigError::Invalid {
                field: "clock.day_length",
                reason: "must be positive",
            });
        }
        if self.mesh.cache_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "mesh.cache_capacity",
                reason: "must be positive",
            });
        }

        positive(self.max_frame_step, "max_frame_step")?;
        positive(self.player.speed, "player.speed")?;
        positive(self.player.gravity, "player.gravity")?;
        positive(self.player.height, "player.height")?;
        positive(self.creatures.gravity, "creatures.gravity")?;
        positive(self.creatures.aggro_radius, "creatures.aggro_radius")?;
        positive(self.creatures.spawn_interval, "creatures.spawn_interval")?;
        positive(self.combat.attack_range, "combat.attack_range")?;
        positive(self.combat.swing_speed, "combat.swing_speed")?;
        positive(self.mining.duration, "mining.duration")?;
        positive(self.mining.reach, "mining.reach")?;
        interval(self.creatures.leap_interval, "creatures.leap_interval")?;
        interval(self.creatures.wander_interval, "creatures.wander_interval")?;
        interval(self.combat.hit_window, "combat.hit_window")?;
        Ok(())
    }
}

/// Default upper bound on one frame's time step.
pub const DEFAULT_MAX_FRAME_STEP: f32 = 0.1;

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldGenConfig::default(),
            player: PlayerConfig::default(),
            creatures: CreatureConfig::default(),
            combat: CombatConfig::default(),
            mining: MiningConfig::default(),
            clock: ClockConfig::default(),
            mesh: MeshConfig::default(),
            max_frame_step: DEFAULT_MAX_FRAME_STEP,
        }
    }
}

impl GameConfig {
    /// The reference configuration with an explicit world seed.
    pub fn seeded(seed: u32) -> Self {
        let mut config = GameConfig::default();
        config.world.seed = Some(seed);
        config
    }
}
