/// Campaign progress that outlives a single level: a handful of flat
/// numeric fields stored as JSON.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::entities::Player;
use crate::error::GameError;
use crate::runner::LevelStats;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub crystals: u32,
    pub coins: u32,
    pub max_health: i32,
    pub speed_bonus: u32,
    /// Next level to play when continuing.
    pub highest_level: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            crystals: 0,
            coins: 0,
            max_health: 100,
            speed_bonus: 0,
            highest_level: 1,
        }
    }
}

impl Progress {
    /// A missing file is a fresh start, not an error.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| GameError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like `load`, but an unreadable file falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("Ignoring save file: {e}");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let text = serde_json::to_string_pretty(self).map_err(|source| GameError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Bank a completed level's pickups and unlock the next level.
    pub fn record(&mut self, stats: &LevelStats) {
        self.crystals += stats.crystals;
        self.coins += stats.coins;
        if stats.number >= self.highest_level {
            self.highest_level = stats.number + 1;
        }
    }

    /// Apply purchased upgrades to a freshly spawned player.
    pub fn outfit(&self, player: &mut Player) {
        player.max_health = self.max_health;
        player.health = self.max_health;
        player.move_speed += self.speed_bonus as f32;
    }
}
