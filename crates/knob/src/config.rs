use crate::angle::{DEFAULT_LIMITING_ANGLE, LimitingAngle};
use crate::border::BorderAnimation;
use crate::control::KnobControl;
use crate::error::InvalidConfig;
use crate::meter::{DEFAULT_SEGMENT_COUNT, LevelMeter, MeterStyle};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const ENV_PREFIX: &str = "MUSICKNOB";
/// Separates nested keys in environment variable names:
/// `MUSICKNOB_BORDER__PERIOD_MS` sets `border.period_ms`.
pub const ENV_KEY_SEPARATOR: &str = "__";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BorderConfig {
    pub width: f64,
    pub corner_radius: f64,
    pub period_ms: u64,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            width: 1.0,
            corner_radius: 10.0,
            period_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub limiting_angle: f64,
    pub segment_count: usize,
    pub meter_style: MeterStyle,
    pub border: BorderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limiting_angle: DEFAULT_LIMITING_ANGLE,
            segment_count: DEFAULT_SEGMENT_COUNT,
            meter_style: MeterStyle::default(),
            border: BorderConfig::default(),
        }
    }
}

impl Config {
    pub fn limiting_angle(&self) -> Result<LimitingAngle, InvalidConfig> {
        LimitingAngle::new(self.limiting_angle)
    }

    pub fn meter(&self) -> Result<LevelMeter, InvalidConfig> {
        LevelMeter::new(self.segment_count, self.meter_style)
    }

    pub fn border_animation(&self) -> Result<BorderAnimation, InvalidConfig> {
        BorderAnimation::new(Duration::from_millis(self.border.period_ms))
    }

    pub fn knob(&self) -> Result<KnobControl, InvalidConfig> {
        Ok(KnobControl::new(self.limiting_angle()?))
    }

    /// Checks every constraint up front so that misconfiguration surfaces at
    /// load time rather than when a component is first built.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.limiting_angle()?;
        self.meter()?;
        self.border_animation()?;
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(#[from] InvalidConfig),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "rainbowt", "musicknob").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

/// Loads `path` (if it exists) layered under `MUSICKNOB_*` environment
/// variables, then validates the result.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    load_layered(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_KEY_SEPARATOR)
        .try_parsing(true)
}

fn load_layered(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    finish(s)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(s)
}

fn finish(s: config::Config) -> Result<Config, ConfigError> {
    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Loads the user's config, falling back to defaults when it is missing or
/// broken.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    write_default_config_to(&path)?;
    Ok(path)
}

/// Writes the commented default config to `path` unless a file is already there.
pub fn write_default_config_to(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_matches_defaults() {
        let parsed = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed = parse_config("segment_count = 10\nmeter_style = \"Binary\"").unwrap();
        assert_eq!(parsed.segment_count, 10);
        assert_eq!(parsed.meter_style, MeterStyle::Binary);
        assert_eq!(parsed.limiting_angle, DEFAULT_LIMITING_ANGLE);
        assert_eq!(parsed.border, BorderConfig::default());
    }

    #[test]
    fn test_nested_border_section() {
        let parsed = parse_config("[border]\nperiod_ms = 1500").unwrap();
        assert_eq!(parsed.border.period_ms, 1500);
        assert_eq!(parsed.border.corner_radius, 10.0);
    }

    #[test]
    fn test_invalid_values_are_rejected_at_load() {
        let cases = vec![
            ("segment_count = 0", InvalidConfig::ZeroSegments),
            ("limiting_angle = 180.0", InvalidConfig::LimitingAngle(180.0)),
            ("limiting_angle = -5.0", InvalidConfig::LimitingAngle(-5.0)),
            ("[border]\nperiod_ms = 0", InvalidConfig::BorderPeriod),
        ];

        for (toml, expected) in cases {
            match parse_config(toml) {
                Err(ConfigError::Invalid(e)) => assert_eq!(e, expected, "{toml}"),
                other => panic!("expected invalid config for {toml:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_style_is_a_parse_error() {
        assert!(matches!(
            parse_config("meter_style = \"plaid\""),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn test_components_built_from_config() {
        let config = Config {
            limiting_angle: 30.0,
            segment_count: 10,
            ..Config::default()
        };
        let knob = config.knob().unwrap();
        assert_eq!(knob.rotation(), 30.0);
        assert_eq!(config.meter().unwrap().segment_count(), 10);
        assert_eq!(
            config.border_animation().unwrap().period(),
            Duration::from_millis(3000)
        );
    }

    fn fake_env(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();
        environment().source(Some(vars))
    }

    #[test]
    fn test_environment_overrides_top_level_and_nested_keys() {
        let missing = std::env::temp_dir().join("musicknob-no-such-config.toml");
        let loaded = load_layered(
            &missing,
            fake_env(&[
                ("MUSICKNOB_LIMITING_ANGLE", "30"),
                ("MUSICKNOB_METER_STYLE", "binary"),
                ("MUSICKNOB_BORDER__PERIOD_MS", "1500"),
            ]),
        )
        .unwrap();

        assert_eq!(loaded.limiting_angle, 30.0);
        assert_eq!(loaded.meter_style, MeterStyle::Binary);
        assert_eq!(loaded.border.period_ms, 1500);
        assert_eq!(loaded.border.width, 1.0);
    }

    #[test]
    fn test_environment_values_are_validated() {
        let missing = std::env::temp_dir().join("musicknob-no-such-config.toml");
        let result = load_layered(&missing, fake_env(&[("MUSICKNOB_SEGMENT_COUNT", "0")]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(InvalidConfig::ZeroSegments))
        ));
    }

    #[test]
    fn test_write_default_config_does_not_overwrite() {
        let dir = std::env::temp_dir().join(format!("musicknob-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        write_default_config_to(&path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        fs_err::write(&path, "segment_count = 5").unwrap();
        write_default_config_to(&path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "segment_count = 5");

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.segment_count, 5);

        fs_err::remove_dir_all(&dir).unwrap();
    }
}
