use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::fruit::{CLASSIC_CATALOG, FruitKind, ORCHARD_CATALOG};

/// Side length of the square arena, in position units
pub const ARENA_SIZE: i32 = 600;

/// Size of one grid cell, in position units
pub const CELL_SIZE: i32 = 20;

/// Number of cells along one side of the arena
pub const GRID_CELLS: i32 = ARENA_SIZE / CELL_SIZE;

/// How long the fin bonus stays active once triggered
pub const BONUS_DURATION: Duration = Duration::from_millis(5000);

/// Pause between the collision and the game-over report
pub const GAME_OVER_DELAY: Duration = Duration::from_millis(1000);

/// How long the head stays highlighted after eating
pub const EAT_FLASH_DURATION: Duration = Duration::from_millis(300);

/// The two hardcoded rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Apples only, slow speed-up, poison fin bonus
    #[default]
    Classic,
    /// Four fruit kinds, faster speed-up, no bonus
    Orchard,
}

/// Rules that differ between variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantRules {
    /// Fruit kinds a (re)placement chooses from, uniformly
    pub catalog: &'static [FruitKind],
    /// The tick interval never drops below this
    pub speed_floor: Duration,
    /// Interval reduction per fruit eaten
    pub speed_step: Duration,
    /// Whether eating can trigger the fin bonus
    pub bonus_enabled: bool,
}

impl Variant {
    pub fn rules(self) -> VariantRules {
        match self {
            Variant::Classic => VariantRules {
                catalog: CLASSIC_CATALOG,
                speed_floor: Duration::from_millis(80),
                speed_step: Duration::from_millis(5),
                bonus_enabled: true,
            },
            Variant::Orchard => VariantRules {
                catalog: ORCHARD_CATALOG,
                speed_floor: Duration::from_millis(50),
                speed_step: Duration::from_millis(10),
                bonus_enabled: false,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Orchard => "orchard",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Which rule set to play
    pub variant: Variant,
    /// Tick interval at game start, in milliseconds
    pub initial_interval_ms: u64,
    /// Seed for fruit placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Classic,
            initial_interval_ms: 200,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration for the given variant
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed placement seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse game config")?;

        if config.initial_interval_ms == 0 {
            anyhow::bail!("initial_interval_ms must be greater than zero");
        }

        Ok(config)
    }
}
