use royale_simulation::{
    Arena, MotionSettings, Population, SimulationError, SimulationSettings,
};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// Re-export types
pub use self::types::{
    ArenaConfig, Config, DebugConfig, EntityConfig, OutputConfig, PopulationConfig, RulesConfig,
    SenderType, SerializerType, TickConfig,
};
mod types;

// Config error handling
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Invalid simulation settings: {0}")]
    SimulationError(#[from] SimulationError),
}

// Config loader implementation
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a config file. `.toml` files are parsed as TOML, everything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let file_content = fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml_str(&file_content)
        } else {
            Self::from_json_str(&file_content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Validate arena dimensions
        if config.arena.width == 0 || config.arena.height == 0 {
            return Err(ConfigError::ValidationError(
                "Arena dimensions must be greater than 0".to_string(),
            ));
        }

        // Validate population
        if config.population().total() == 0 {
            return Err(ConfigError::ValidationError(
                "Population must contain at least one entity".to_string(),
            ));
        }

        // Validate tick cadence
        if config.tick.interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Tick interval must be greater than 0".to_string(),
            ));
        }

        // Validate output settings
        if config.output.frequency == 0 {
            return Err(ConfigError::ValidationError(
                "Output frequency must be greater than 0".to_string(),
            ));
        }
        if config.output.sender == SenderType::File && config.output.path.is_none() {
            return Err(ConfigError::ValidationError(
                "File sender requires an output path".to_string(),
            ));
        }

        // Radius, velocity and minimum delta are checked by the engine itself
        config.simulation_settings().validate()?;

        Ok(())
    }
}

/// Load and validate a config file in one step.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let config = ConfigLoader::from_file(path)?;
    ConfigLoader::validate(&config)?;
    Ok(config)
}

impl Config {
    pub fn population(&self) -> Population {
        Population::new(
            self.population.rock,
            self.population.paper,
            self.population.scissors,
        )
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick.interval_ms)
    }

    /// Engine settings described by this config.
    pub fn simulation_settings(&self) -> SimulationSettings {
        let arena = Arena {
            width: self.arena.width as f32,
            height: self.arena.height as f32,
            entity_radius: self.entity.radius,
        };
        let motion = MotionSettings {
            velocity_scale: self.entity.velocity,
            bounce: self.rules.bounce,
            min_delta_time: self.tick.min_delta_ms / 1000.0,
        };
        SimulationSettings::new(arena, motion)
            .with_resolution(self.rules.collisions)
            .with_tick_interval(self.tick_interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use royale_simulation::{BounceRule, CollisionResolution};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_classic_game() {
        let config = Config::default();
        assert_eq!(config.arena.width, 350);
        assert_eq!(config.arena.height, 500);
        assert_eq!(config.population(), Population::new(20, 20, 20));
        assert_eq!(config.entity.radius, 8.0);
        assert_eq!(config.entity.velocity, 0.2);
        assert_eq!(config.tick.interval_ms, 50);
        assert_eq!(config.rules.bounce, BounceRule::Doubling);
        assert_eq!(config.rules.collisions, CollisionResolution::Simultaneous);
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn load_valid_json_config() {
        let content = r#"{
          "arena": { "width": 200, "height": 120 },
          "population": { "rock": 5, "paper": 0, "scissors": 7 },
          "entity": { "radius": 6.0, "velocity": 0.5 },
          "rules": { "bounce": "mirror", "collisions": "sequential" },
          "output": { "serializer": "binary", "sender": "stdio", "frequency": 10 }
        }"#;
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.arena.width, 200);
        assert_eq!(config.population(), Population::new(5, 0, 7));
        assert_eq!(config.rules.bounce, BounceRule::Mirror);
        assert_eq!(config.rules.collisions, CollisionResolution::Sequential);
        assert_eq!(config.output.serializer, SerializerType::Binary);
        assert_eq!(config.output.sender, SenderType::Stdio);
        assert_eq!(config.output.frequency, 10);
        // Missing sections fall back to defaults
        assert_eq!(config.tick, TickConfig::default());
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn load_valid_toml_config() {
        let temp = assert_fs::NamedTempFile::new("royale.toml").unwrap();
        temp.write_str(
            r#"
            [arena]
            width = 400
            height = 300

            [population]
            rock = 1
            paper = 2
            scissors = 3

            [tick]
            interval_ms = 20
            max_ticks = 500

            [debug]
            team_counts = true
            "#,
        )
        .unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.arena.width, 400);
        assert_eq!(config.population(), Population::new(1, 2, 3));
        assert_eq!(config.tick.interval_ms, 20);
        assert_eq!(config.tick.max_ticks, Some(500));
        assert!(config.debug.team_counts);
        assert_eq!(config.entity, EntityConfig::default());
    }

    #[test]
    fn settings_carry_rules_and_units() {
        let mut config = Config::default();
        config.tick.min_delta_ms = 2.0;
        config.rules.bounce = BounceRule::Mirror;
        let settings = config.simulation_settings();
        assert_eq!(settings.arena.width, 350.0);
        assert_eq!(settings.arena.entity_radius, 8.0);
        assert_eq!(settings.motion.bounce, BounceRule::Mirror);
        assert!((settings.motion.min_delta_time - 0.002).abs() < 1e-9);
        assert_eq!(settings.tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let mut zero_arena = Config::default();
        zero_arena.arena.width = 0;
        assert!(matches!(
            ConfigLoader::validate(&zero_arena),
            Err(ConfigError::ValidationError(_))
        ));

        let mut empty = Config::default();
        empty.population = PopulationConfig {
            rock: 0,
            paper: 0,
            scissors: 0,
        };
        assert!(matches!(
            ConfigLoader::validate(&empty),
            Err(ConfigError::ValidationError(_))
        ));

        let mut no_path = Config::default();
        no_path.output.sender = SenderType::File;
        assert!(matches!(
            ConfigLoader::validate(&no_path),
            Err(ConfigError::ValidationError(_))
        ));

        let mut zero_frequency = Config::default();
        zero_frequency.output.frequency = 0;
        assert!(ConfigLoader::validate(&zero_frequency).is_err());

        let mut zero_interval = Config::default();
        zero_interval.tick.interval_ms = 0;
        assert!(ConfigLoader::validate(&zero_interval).is_err());

        let mut huge_radius = Config::default();
        huge_radius.entity.radius = 600.0;
        assert!(matches!(
            ConfigLoader::validate(&huge_radius),
            Err(ConfigError::SimulationError(SimulationError::RadiusTooLarge { .. }))
        ));

        let mut still = Config::default();
        still.entity.velocity = 0.0;
        assert!(matches!(
            ConfigLoader::validate(&still),
            Err(ConfigError::SimulationError(SimulationError::InvalidVelocity(_)))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ \"arena\": {{ \"width\": -5 }} }}").unwrap();
        assert!(matches!(
            ConfigLoader::from_file(file.path()),
            Err(ConfigError::JsonParseError(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            ConfigLoader::from_file("/definitely/not/here.json"),
            Err(ConfigError::FileReadError(_))
        ));
    }
}
