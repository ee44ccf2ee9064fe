/// Game configuration: every tunable the simulation reads.
///
/// A `GameConfig` is built once per session (defaults, optionally overridden
/// from a JSON file) and copied into each `Level` at construction.  Nothing
/// in here changes while a level is running.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const DARK_BLUE: Rgb = Rgb(20, 33, 61);
pub const RED: Rgb = Rgb(200, 50, 50);
pub const YELLOW: Rgb = Rgb(255, 200, 50);
pub const ORANGE: Rgb = Rgb(255, 140, 0);
pub const PURPLE: Rgb = Rgb(200, 100, 255);
pub const CYAN: Rgb = Rgb(50, 200, 200);
pub const GRAY: Rgb = Rgb(100, 100, 100);

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    pub level_width: f32,
    /// Ticks per second of the fixed-rate loop.
    pub fps: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 700.0,
            level_width: 4000.0,
            fps: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Negative: up is -y.
    pub jump_power: f32,
    pub move_speed: f32,
    pub max_fall_speed: f32,
    /// Wall-jump horizontal speed as a multiple of `move_speed`.
    pub wall_jump_multiplier: f32,
    pub wall_slide_damping: f32,
    /// Slack (px) when deciding which side of a platform the player came from.
    pub collision_tolerance: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// How far below the screen bottom the player may fall before dying.
    pub fall_margin: f32,
    pub platform_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            jump_power: -12.0,
            move_speed: 5.0,
            max_fall_speed: 20.0,
            wall_jump_multiplier: 2.0,
            wall_slide_damping: 0.9,
            collision_tolerance: 5.0,
            spawn_x: 100.0,
            spawn_y: 600.0,
            player_width: 30.0,
            player_height: 40.0,
            fall_margin: 200.0,
            platform_speed: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub max_health: i32,
    pub spike_damage: i32,
    pub enemy_contact_damage: i32,
    /// Centre-to-centre distance within which an attack lands.
    pub attack_range: f32,
    pub attack_damage: i32,
    pub enemy_health: i32,
    pub enemy_speed: f32,
    pub attack_cooldown: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            spike_damage: 1,
            enemy_contact_damage: 2,
            attack_range: 60.0,
            attack_damage: 1,
            enemy_health: 2,
            enemy_speed: 2.0,
            attack_cooldown: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub coin: u32,
    pub crystal: u32,
    pub enemy_kill: u32,
    pub goal: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            coin: 10,
            crystal: 25,
            enemy_kill: 50,
            goal: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the screen width kept ahead of the player.
    pub lead: f32,
    /// Fraction of the remaining distance closed each tick.
    pub smoothing: f32,
    /// Sprites further than this outside the screen are culled.
    pub cull_margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lead: 1.0 / 3.0,
            smoothing: 0.1,
            cull_margin: 100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub gravity: f32,
    pub size: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            size: 5.0,
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub physics: PhysicsConfig,
    pub combat: CombatConfig,
    pub scoring: ScoringConfig,
    pub camera: CameraConfig,
    pub particles: ParticleConfig,
}

impl GameConfig {
    /// Read a config file.  Missing sections and fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(|source| GameError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Lowest y the player's top edge may reach before counting as a fall.
    pub fn death_line(&self) -> f32 {
        self.screen.height + self.physics.fall_margin
    }
}
