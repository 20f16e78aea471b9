//! Simulation parameters.
//!
//! Loaded from YAML. Omitted sections fall back to the stock values; the
//! world, grass and display sections also accept individual omitted fields.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::animal::Species;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default = "SpeciesConfig::fox")]
    pub fox: SpeciesConfig,
    #[serde(default = "SpeciesConfig::rabbit")]
    pub rabbit: SpeciesConfig,
    #[serde(default)]
    pub grass: GrassConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    pub initial_foxes: usize,
    pub initial_rabbits: usize,
    /// Probability that a rabbit freezes instead of fleeing.
    pub hesitation_chance: f64,
}

/// Per-species parameters shared by foxes and rabbits. A species section
/// is either omitted entirely or given in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    pub initial_energy: i32,
    pub energy_loss_per_move: i32,
    /// Energy gained from one successful meal.
    pub energy_gain: i32,
    pub reproduction_cost: i32,
    /// Half-width of the box searched for a mate.
    pub reproduction_range: i32,
    /// Manhattan reach for catching prey. Grazers eat from their own cell and ignore it.
    pub eating_range: i32,
    /// Manhattan distance at which a fox starts chasing or a rabbit starts fleeing.
    pub sensing_range: i32,
    pub eating_cooldown: u32,
    pub reproduction_cooldown: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    pub initial_amount: u32,
    pub growth_rate: u32,
    pub max_amount: u32,
    /// Ticks a depleted cell waits before each regrowth step.
    pub regrowth_ticks: u32,
}

/// Only read by the window frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub cell_size: f64,
    pub frame_time_ms: u64,
    pub chart_height: f64,
    pub chart_history: usize,
    pub fox_color: [f32; 4],
    pub rabbit_color: [f32; 4],
    pub grass_color: [f32; 4],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 80,
            initial_foxes: 10,
            initial_rabbits: 40,
            hesitation_chance: 0.2,
        }
    }
}

impl SpeciesConfig {
    pub fn fox() -> Self {
        Self {
            initial_energy: 100,
            energy_loss_per_move: 2,
            energy_gain: 90,
            reproduction_cost: 200,
            reproduction_range: 2,
            eating_range: 2,
            sensing_range: 30,
            eating_cooldown: 5,
            reproduction_cooldown: 15,
        }
    }

    pub fn rabbit() -> Self {
        Self {
            initial_energy: 15,
            energy_loss_per_move: 1,
            energy_gain: 3,
            reproduction_cost: 30,
            reproduction_range: 1,
            eating_range: 0,
            sensing_range: 10,
            eating_cooldown: 2,
            reproduction_cooldown: 5,
        }
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.initial_energy <= 0 {
            return Err(ConfigError::Invalid(format!("{name}.initial_energy must be > 0")));
        }
        let non_negative = [
            ("energy_loss_per_move", self.energy_loss_per_move),
            ("energy_gain", self.energy_gain),
            ("reproduction_cost", self.reproduction_cost),
            ("reproduction_range", self.reproduction_range),
            ("eating_range", self.eating_range),
            ("sensing_range", self.sensing_range),
        ];
        for (field, value) in non_negative {
            if value < 0 {
                return Err(ConfigError::Invalid(format!("{name}.{field} must be >= 0")));
            }
        }
        Ok(())
    }
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            initial_amount: 2,
            growth_rate: 3,
            max_amount: 2,
            regrowth_ticks: 50,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: 8.0,
            frame_time_ms: 100,
            chart_height: 160.0,
            chart_history: 300,
            fox_color: [1.0, 0.0, 0.0, 1.0],
            rabbit_color: [0.0, 0.0, 1.0, 1.0],
            grass_color: [0.0, 100.0 / 255.0, 0.0, 1.0],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            fox: SpeciesConfig::fox(),
            rabbit: SpeciesConfig::rabbit(),
            grass: GrassConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl DisplayConfig {
    /// Checked by the window only; the engine never reads these values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0.0 || self.chart_history < 2 {
            return Err(ConfigError::Invalid(
                "display.cell_size must be > 0 and chart_history >= 2".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents)?;
        Ok(config)
    }

    /// Parse YAML on top of the stock parameters and validate the result.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn species(&self, species: Species) -> &SpeciesConfig {
        match species {
            Species::Fox => &self.fox,
            Species::Rabbit => &self.rabbit,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.world.width.max(0) as usize * self.world.height.max(0) as usize
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width <= 0 || self.world.height <= 0 {
            return Err(ConfigError::Invalid(
                "world width and height must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.world.hesitation_chance) {
            return Err(ConfigError::Invalid(
                "hesitation_chance must be between 0 and 1".to_string(),
            ));
        }
        let population = self.world.initial_foxes + self.world.initial_rabbits;
        if population > self.cell_count() {
            return Err(ConfigError::Invalid(format!(
                "initial population {population} does not fit in {} cells",
                self.cell_count()
            )));
        }
        self.fox.validate("fox")?;
        self.rabbit.validate("rabbit")?;
        if self.grass.max_amount == 0 {
            return Err(ConfigError::Invalid("grass.max_amount must be > 0".to_string()));
        }
        if self.grass.regrowth_ticks == 0 {
            return Err(ConfigError::Invalid(
                "grass.regrowth_ticks must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fox.energy_gain, 90);
        assert_eq!(config.rabbit.energy_gain, 3);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded = Config::from_yaml(&yaml).unwrap();
        assert_eq!(loaded.fox, config.fox);
        assert_eq!(loaded.rabbit, config.rabbit);
        assert_eq!(loaded.world.width, 120);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("world:\n  width: 20\n  height: 10\n").unwrap();
        assert_eq!(config.world.width, 20);
        assert_eq!(config.world.initial_foxes, 10);
        assert_eq!(config.fox, SpeciesConfig::fox());
        assert_eq!(config.rabbit, SpeciesConfig::rabbit());
        assert_eq!(config.grass.regrowth_ticks, 50);
    }

    #[test]
    fn incomplete_species_section_is_an_error() {
        let result = Config::from_yaml("fox:\n  eating_range: 4\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn overcrowded_population_is_rejected() {
        let mut config = Config::default();
        config.world.width = 5;
        config.world.height = 5;
        config.world.initial_foxes = 10;
        config.world.initial_rabbits = 16;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn hesitation_must_be_a_probability() {
        let mut config = Config::default();
        config.world.hesitation_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_range_is_rejected() {
        let mut config = Config::default();
        config.rabbit.sensing_range = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn display_settings_do_not_block_the_engine() {
        let mut config = Config::default();
        config.display.cell_size = 0.0;
        config.display.chart_history = 0;
        assert!(config.validate().is_ok());
        assert!(config.display.validate().is_err());
        assert!(DisplayConfig::default().validate().is_ok());
    }

    #[test]
    fn save_and_load_file() {
        let path = std::env::temp_dir().join("foxes_rabbits_config_test.yaml");
        let mut config = Config::default();
        config.grass.regrowth_ticks = 7;
        config.save(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.grass.regrowth_ticks, 7);
        let _ = std::fs::remove_file(&path);
    }
}
